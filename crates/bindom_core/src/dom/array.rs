use std::io::{Read, Write};
use std::ops::{Index, IndexMut};

use crate::dom::field::Scope;
use crate::dom::{BindomError, CodecOptions, Field, Result, Value};

/// Largest element capacity reserved up front; counts come from untrusted input.
const MAX_PREALLOC: usize = 4096;

/// Source of an array's element count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayWidth {
	/// Literal element count.
	Count(usize),
	/// Value of an already parsed member with this name, resolved at parse time.
	Member(String),
}

impl From<usize> for ArrayWidth {
	fn from(value: usize) -> Self {
		ArrayWidth::Count(value)
	}
}

impl From<&str> for ArrayWidth {
	fn from(value: &str) -> Self {
		ArrayWidth::Member(value.to_owned())
	}
}

impl From<String> for ArrayWidth {
	fn from(value: String) -> Self {
		ArrayWidth::Member(value)
	}
}

/// Homogeneous repetition of one element type.
#[derive(Debug, Clone)]
pub struct Array {
	width: ArrayWidth,
	element: Box<Field>,
	items: Vec<Field>,
	label: Box<str>,
}

impl Array {
	/// Create an empty array whose elements are fresh copies of `element`.
	pub fn new(width: impl Into<ArrayWidth>, element: impl Into<Field>) -> Self {
		Self {
			width: width.into(),
			element: Box::new(element.into()),
			items: Vec::new(),
			label: "".into(),
		}
	}

	/// Element count source.
	pub fn width(&self) -> &ArrayWidth {
		&self.width
	}

	/// Replace the element count source used by the next parse.
	pub fn set_width(&mut self, width: impl Into<ArrayWidth>) {
		self.width = width.into();
	}

	/// Element prototype.
	pub fn element(&self) -> &Field {
		&self.element
	}

	/// Current element count.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Whether the array currently holds no elements.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Iterate elements in index order.
	pub fn iter(&self) -> std::slice::Iter<'_, Field> {
		self.items.iter()
	}

	/// Iterate elements mutably in index order.
	pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Field> {
		self.items.iter_mut()
	}

	/// Element at `index`.
	pub fn get(&self, index: usize) -> Result<&Field> {
		let len = self.items.len();
		self.items.get(index).ok_or(BindomError::IndexOutOfRange { index, len })
	}

	/// Mutable element at `index`.
	pub fn get_mut(&mut self, index: usize) -> Result<&mut Field> {
		let len = self.items.len();
		self.items.get_mut(index).ok_or(BindomError::IndexOutOfRange { index, len })
	}

	/// Assign a value to the element at `index` in place.
	pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<()> {
		self.get_mut(index)?.set_value(value)
	}

	/// Replace the element at `index` outright, returning the old element.
	///
	/// The new element takes over the old element's name.
	pub fn replace(&mut self, index: usize, field: impl Into<Field>) -> Result<Field> {
		let mut field = field.into();
		field.attach(&element_name(&self.label, index));
		let slot = self.get_mut(index)?;
		Ok(std::mem::replace(slot, field))
	}

	/// Append a fresh copy of the element prototype.
	pub fn push_default(&mut self) -> &mut Field {
		let mut item = (*self.element).clone();
		item.attach(&element_name(&self.label, self.items.len()));
		self.items.push(item);
		let last = self.items.len() - 1;
		&mut self.items[last]
	}

	pub(crate) fn rename(&mut self, label: &str) {
		self.label = label.into();
		for (index, item) in self.items.iter_mut().enumerate() {
			item.attach(&element_name(label, index));
		}
	}

	pub(crate) fn set_values(&mut self, values: Vec<Value>) -> Result<()> {
		let mut items = Vec::with_capacity(values.len());
		for (index, value) in values.into_iter().enumerate() {
			let mut item = match self.items.get(index) {
				Some(existing) => existing.clone(),
				None => {
					let mut fresh = (*self.element).clone();
					fresh.attach(&element_name(&self.label, index));
					fresh
				}
			};
			item.set_value(value)?;
			items.push(item);
		}
		self.items = items;
		Ok(())
	}

	pub(crate) fn parse_scoped<R: Read + ?Sized>(&mut self, reader: &mut R, options: &CodecOptions, scope: Option<&Scope<'_>>) -> Result<usize> {
		let count = self.resolve_count(scope)?;
		if count > options.max_array_elems {
			return Err(BindomError::InvalidArrayCount {
				name: self.label.to_string(),
				reason: format!("{count} elements exceeds the limit of {}", options.max_array_elems),
			});
		}
		tracing::trace!(array = %self.label, count, "parsing array");

		let mut items = Vec::with_capacity(count.min(MAX_PREALLOC));
		let mut consumed = 0_usize;
		for index in 0..count {
			let mut item = (*self.element).clone();
			item.attach(&element_name(&self.label, index));
			consumed += item.parse_scoped(reader, options, scope)?;
			items.push(item);
		}

		self.items = items;
		Ok(consumed)
	}

	pub(crate) fn build_into<W: Write + ?Sized>(&self, writer: &mut W, options: &CodecOptions) -> Result<usize> {
		let mut written = 0_usize;
		for item in &self.items {
			written += item.build_into(writer, options)?;
		}
		Ok(written)
	}

	fn resolve_count(&self, scope: Option<&Scope<'_>>) -> Result<usize> {
		let member = match &self.width {
			ArrayWidth::Count(count) => return Ok(*count),
			ArrayWidth::Member(member) => member,
		};

		let field = scope
			.and_then(|scope| scope.lookup(member))
			.ok_or_else(|| BindomError::UnknownMember { name: member.clone() })?;
		let invalid = |reason: String| BindomError::InvalidArrayCount {
			name: self.label.to_string(),
			reason,
		};

		match field.value() {
			Value::Int(count) => usize::try_from(count).map_err(|_| invalid(format!("{member} is negative ({count})"))),
			Value::UInt(count) => usize::try_from(count).map_err(|_| invalid(format!("{member} is too large ({count})"))),
			Value::Float(count) if count >= 0.0 && count.fract() == 0.0 && count <= usize::MAX as f64 => Ok(count as usize),
			Value::Float(count) => Err(invalid(format!("{member} is not a whole non-negative number ({count})"))),
			other => Err(invalid(format!("{member} is a {} value", other.kind_name()))),
		}
	}
}

fn element_name(label: &str, index: usize) -> String {
	format!("{label}[{index}]")
}

impl Index<usize> for Array {
	type Output = Field;

	/// # Panics
	///
	/// Panics when `index` is out of range.
	fn index(&self, index: usize) -> &Field {
		&self.items[index]
	}
}

impl IndexMut<usize> for Array {
	fn index_mut(&mut self, index: usize) -> &mut Field {
		&mut self.items[index]
	}
}
