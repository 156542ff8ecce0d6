use std::collections::HashMap;
use std::io::{Read, Write};
use std::ops::{Index, IndexMut};

use crate::dom::field::Scope;
use crate::dom::path::{step, step_mut};
use crate::dom::{BindomError, CodecOptions, Field, FieldPath, FieldValue, PathStep, Result, StructValue, Value};

/// Composite field: ordered children plus a name index.
///
/// The ordered sequence defines parse and build order and is never
/// reordered. The index maps each name to the slot of the child most recently
/// attached under it; an older child attached under the same name stays in the
/// sequence but is no longer reachable by name.
#[derive(Debug, Clone, Default)]
pub struct Struct {
	children: Vec<Field>,
	index: HashMap<Box<str>, usize>,
}

impl Struct {
	/// Create an empty struct.
	pub fn new() -> Self {
		Self::default()
	}

	/// Return this struct with `field` appended under `name`.
	pub fn with_child(mut self, name: &str, field: impl Into<Field>) -> Self {
		self.add_child(name, field);
		self
	}

	/// Append `field` under `name` and bind the name to it.
	pub fn add_child(&mut self, name: &str, field: impl Into<Field>) -> &mut Field {
		let mut field = field.into();
		field.attach(name);
		let slot = self.children.len();
		self.children.push(field);
		self.index.insert(name.into(), slot);
		&mut self.children[slot]
	}

	/// Child currently bound to `name`.
	pub fn get(&self, name: &str) -> Result<&Field> {
		let slot = self.slot(name)?;
		Ok(&self.children[slot])
	}

	/// Mutable child currently bound to `name`.
	pub fn get_mut(&mut self, name: &str) -> Result<&mut Field> {
		let slot = self.slot(name)?;
		Ok(&mut self.children[slot])
	}

	/// Whether `name` is bound.
	pub fn contains(&self, name: &str) -> bool {
		self.index.contains_key(name)
	}

	/// Assign a value to the child bound to `name` in place.
	///
	/// The child keeps its identity and position.
	pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
		self.get_mut(name)?.set_value(value)
	}

	/// Replace the child bound to `name` with `field`, in the same ordered slot.
	///
	/// Returns the previous child. Later builds emit the new field in place of the old one.
	pub fn replace(&mut self, name: &str, field: impl Into<Field>) -> Result<Field> {
		let slot = self.slot(name)?;
		let mut field = field.into();
		field.attach(name);
		Ok(std::mem::replace(&mut self.children[slot], field))
	}

	/// Number of children in the ordered sequence.
	pub fn len(&self) -> usize {
		self.children.len()
	}

	/// Whether the struct has no children.
	pub fn is_empty(&self) -> bool {
		self.children.is_empty()
	}

	/// Iterate children in parse/build order.
	pub fn iter(&self) -> std::slice::Iter<'_, Field> {
		self.children.iter()
	}

	/// Child names in parse/build order, including children no longer bound by name.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.children.iter().map(|child| child.name().unwrap_or_default())
	}

	/// Iterate children mutably in parse/build order.
	pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Field> {
		self.children.iter_mut()
	}

	/// Member values in declaration order.
	pub fn value(&self) -> StructValue {
		StructValue {
			fields: self
				.children
				.iter()
				.map(|child| FieldValue {
					name: child.name().unwrap_or_default().into(),
					value: child.value(),
				})
				.collect(),
		}
	}

	/// Parse every child in order from `reader`, returning total bytes consumed.
	///
	/// Array widths naming a member resolve against children parsed earlier in
	/// this call. If any child fails, every child keeps its pre-call state.
	pub fn parse<R: Read + ?Sized>(&mut self, reader: &mut R, options: &CodecOptions) -> Result<usize> {
		self.parse_scoped(reader, options, None)
	}

	/// Parse only the child bound to `name`, returning bytes consumed.
	///
	/// Lets a driver attach and parse members one at a time. Array widths
	/// naming a member resolve against the children placed before this one,
	/// using whatever state they currently hold. On failure the child keeps
	/// its pre-call state.
	pub fn parse_child<R: Read + ?Sized>(&mut self, name: &str, reader: &mut R, options: &CodecOptions) -> Result<usize> {
		let slot = self.slot(name)?;
		let (done, rest) = self.children.split_at_mut(slot);
		let scope = Scope { members: done, parent: None };
		rest[0].parse_scoped(reader, options, Some(&scope))
	}

	/// Serialize every child in order into a new byte vector.
	pub fn build(&self, options: &CodecOptions) -> Result<Vec<u8>> {
		let mut out = Vec::new();
		self.build_into(&mut out, options)?;
		Ok(out)
	}

	/// Serialize every child in order into `writer`, returning bytes written.
	pub fn build_into<W: Write + ?Sized>(&self, writer: &mut W, options: &CodecOptions) -> Result<usize> {
		tracing::debug!(children = self.children.len(), "building struct");
		let mut written = 0_usize;
		for child in &self.children {
			written += child.build_into(writer, options)?;
		}
		Ok(written)
	}

	/// Resolve a descendant by path, starting with a member name.
	pub fn at(&self, path: &FieldPath) -> Result<&Field> {
		let (first, rest) = split_path(path)?;
		let start = self.get(first)?;
		rest.iter().try_fold(start, |field, item| step(field, item))
	}

	/// Resolve a mutable descendant by path, starting with a member name.
	pub fn at_mut(&mut self, path: &FieldPath) -> Result<&mut Field> {
		let (first, rest) = split_path(path)?;
		let start = self.get_mut(first)?;
		rest.iter().try_fold(start, |field, item| step_mut(field, item))
	}

	pub(crate) fn parse_scoped<R: Read + ?Sized>(&mut self, reader: &mut R, options: &CodecOptions, parent: Option<&Scope<'_>>) -> Result<usize> {
		tracing::debug!(children = self.children.len(), "parsing struct");

		let mut children = self.children.clone();
		let mut consumed = 0_usize;
		for slot in 0..children.len() {
			let (done, rest) = children.split_at_mut(slot);
			let scope = Scope { members: done, parent };
			let child = &mut rest[0];
			match child.parse_scoped(reader, options, Some(&scope)) {
				Ok(n) => consumed += n,
				Err(err) => {
					tracing::debug!(member = child.name().unwrap_or_default(), error = %err, "struct parse failed, keeping previous state");
					return Err(err);
				}
			}
		}

		self.children = children;
		tracing::debug!(consumed, "parsed struct");
		Ok(consumed)
	}

	pub(crate) fn set_values(&mut self, values: StructValue) -> Result<()> {
		let mut next = self.clone();
		for FieldValue { name, value } in values.fields {
			next.set(&name, value)?;
		}
		*self = next;
		Ok(())
	}

	fn slot(&self, name: &str) -> Result<usize> {
		self.index
			.get(name)
			.copied()
			.ok_or_else(|| BindomError::UnknownMember { name: name.to_owned() })
	}
}

fn split_path(path: &FieldPath) -> Result<(&str, &[PathStep])> {
	match path.steps.split_first() {
		Some((PathStep::Field(name), rest)) => Ok((name.as_str(), rest)),
		_ => Err(BindomError::InvalidFieldPath { path: path.to_string() }),
	}
}

impl Index<&str> for Struct {
	type Output = Field;

	/// # Panics
	///
	/// Panics when `name` is not bound.
	fn index(&self, name: &str) -> &Field {
		match self.get(name) {
			Ok(field) => field,
			Err(err) => panic!("{err}"),
		}
	}
}

impl IndexMut<&str> for Struct {
	fn index_mut(&mut self, name: &str) -> &mut Field {
		match self.get_mut(name) {
			Ok(field) => field,
			Err(err) => panic!("{err}"),
		}
	}
}
