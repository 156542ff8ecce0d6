use std::io::{Read, Write};

use crate::dom::bytes::write_counted;
use crate::dom::path::{step, step_mut};
use crate::dom::{Array, BindomError, CodecOptions, FieldPath, Number, Result, Str, Struct, Value, WStr};

/// Concrete node type and its state.
#[derive(Debug, Clone)]
pub enum FieldKind {
	/// Placeholder with no value and no byte form (function return slots).
	Void,
	/// Fixed-width number.
	Number(Number),
	/// Zero-terminated single-byte string.
	Str(Str),
	/// Zero-terminated UTF-16LE string.
	WStr(WStr),
	/// Homogeneous repetition.
	Array(Array),
	/// Ordered named children.
	Struct(Struct),
}

impl FieldKind {
	/// Short label used in diagnostics and listings.
	pub fn label(&self) -> &'static str {
		match self {
			FieldKind::Void => "void",
			FieldKind::Number(number) => number.kind().as_str(),
			FieldKind::Str(_) => "string",
			FieldKind::WStr(_) => "wstring",
			FieldKind::Array(_) => "array",
			FieldKind::Struct(_) => "struct",
		}
	}
}

/// Node in a binary document tree.
///
/// The name is stamped by the containing struct or array; a detached field has none.
#[derive(Debug, Clone)]
pub struct Field {
	name: Option<Box<str>>,
	kind: FieldKind,
}

/// Already-parsed members visible to array widths while a struct is mid-parse.
pub(crate) struct Scope<'a> {
	pub(crate) members: &'a [Field],
	pub(crate) parent: Option<&'a Scope<'a>>,
}

impl Scope<'_> {
	/// Find the most recently parsed member called `name`, searching enclosing structs outward.
	pub(crate) fn lookup(&self, name: &str) -> Option<&Field> {
		self.members
			.iter()
			.rev()
			.find(|member| member.name() == Some(name))
			.or_else(|| self.parent.and_then(|parent| parent.lookup(name)))
	}
}

impl Field {
	/// Wrap a node kind as a detached field.
	pub fn new(kind: FieldKind) -> Self {
		Self { name: None, kind }
	}

	/// Detached void field.
	pub fn void() -> Self {
		Self::new(FieldKind::Void)
	}

	/// Create a field of `kind` and parse it from `reader` immediately.
	pub fn from_reader<R: Read + ?Sized>(kind: impl Into<FieldKind>, reader: &mut R, options: &CodecOptions) -> Result<Self> {
		let mut field = Self::new(kind.into());
		field.parse(reader, options)?;
		Ok(field)
	}

	/// Name stamped by the parent container, if attached.
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	pub(crate) fn attach(&mut self, name: &str) {
		self.name = Some(name.into());
		if let FieldKind::Array(array) = &mut self.kind {
			array.rename(name);
		}
	}

	/// Node kind and state.
	pub fn kind(&self) -> &FieldKind {
		&self.kind
	}

	/// Mutable node kind and state.
	pub fn kind_mut(&mut self) -> &mut FieldKind {
		&mut self.kind
	}

	/// Short kind label.
	pub fn kind_name(&self) -> &'static str {
		self.kind.label()
	}

	/// Number state, if this is a number.
	pub fn as_number(&self) -> Option<&Number> {
		match &self.kind {
			FieldKind::Number(number) => Some(number),
			_ => None,
		}
	}

	/// Mutable number state, if this is a number.
	pub fn as_number_mut(&mut self) -> Option<&mut Number> {
		match &mut self.kind {
			FieldKind::Number(number) => Some(number),
			_ => None,
		}
	}

	/// Narrow string state, if this is a string.
	pub fn as_str(&self) -> Option<&Str> {
		match &self.kind {
			FieldKind::Str(text) => Some(text),
			_ => None,
		}
	}

	/// Wide string state, if this is a wide string.
	pub fn as_wstr(&self) -> Option<&WStr> {
		match &self.kind {
			FieldKind::WStr(text) => Some(text),
			_ => None,
		}
	}

	/// Array state, if this is an array.
	pub fn as_array(&self) -> Option<&Array> {
		match &self.kind {
			FieldKind::Array(array) => Some(array),
			_ => None,
		}
	}

	/// Mutable array state, if this is an array.
	pub fn as_array_mut(&mut self) -> Option<&mut Array> {
		match &mut self.kind {
			FieldKind::Array(array) => Some(array),
			_ => None,
		}
	}

	/// Struct state, if this is a struct.
	pub fn as_struct(&self) -> Option<&Struct> {
		match &self.kind {
			FieldKind::Struct(item) => Some(item),
			_ => None,
		}
	}

	/// Mutable struct state, if this is a struct.
	pub fn as_struct_mut(&mut self) -> Option<&mut Struct> {
		match &mut self.kind {
			FieldKind::Struct(item) => Some(item),
			_ => None,
		}
	}

	/// Detached semantic value. Unparsed fields report their zero-equivalent default.
	pub fn value(&self) -> Value {
		match &self.kind {
			FieldKind::Void => Value::Void,
			FieldKind::Number(number) => number.scalar().into(),
			FieldKind::Str(text) => Value::Bytes(text.bytes().to_vec()),
			FieldKind::WStr(text) => Value::Text(text.as_str().to_owned()),
			FieldKind::Array(array) => Value::Array(array.iter().map(Field::value).collect()),
			FieldKind::Struct(item) => Value::Struct(item.value()),
		}
	}

	/// Assign a semantic value, coercing it to this node's codec.
	///
	/// Numbers accept any numeric value, strings accept bytes or text, arrays
	/// resize to the given element values, and structs assign member values by
	/// name. Nothing changes when an error is returned.
	pub fn set_value(&mut self, value: impl Into<Value>) -> Result<()> {
		let value = value.into();
		match &mut self.kind {
			FieldKind::Void => Err(BindomError::UnsupportedOperation { op: "set_value", kind: "void" }),
			FieldKind::Number(number) => {
				let scalar = value.as_scalar().ok_or(BindomError::TypeMismatch {
					expected: "number",
					got: value.kind_name(),
				})?;
				number.set(scalar);
				Ok(())
			}
			FieldKind::Str(text) => match value {
				Value::Bytes(bytes) => {
					text.set(bytes);
					Ok(())
				}
				Value::Text(string) => {
					text.set(string.into_bytes());
					Ok(())
				}
				other => Err(BindomError::TypeMismatch {
					expected: "text",
					got: other.kind_name(),
				}),
			},
			FieldKind::WStr(text) => match value {
				Value::Text(string) => {
					text.set(string);
					Ok(())
				}
				Value::Bytes(bytes) => {
					let string = String::from_utf8(bytes).map_err(|_| BindomError::TypeMismatch {
						expected: "text",
						got: "non-UTF-8 bytes",
					})?;
					text.set(string);
					Ok(())
				}
				other => Err(BindomError::TypeMismatch {
					expected: "text",
					got: other.kind_name(),
				}),
			},
			FieldKind::Array(array) => match value {
				Value::Array(values) => array.set_values(values),
				other => Err(BindomError::TypeMismatch {
					expected: "array",
					got: other.kind_name(),
				}),
			},
			FieldKind::Struct(item) => match value {
				Value::Struct(values) => item.set_values(values),
				other => Err(BindomError::TypeMismatch {
					expected: "struct",
					got: other.kind_name(),
				}),
			},
		}
	}

	/// Assign the semantic value held by `other`.
	pub fn set_value_from(&mut self, other: &Field) -> Result<()> {
		self.set_value(other.value())
	}

	/// Parse this field from `reader`, returning bytes consumed.
	///
	/// On failure the field keeps the state it had before the call.
	pub fn parse<R: Read + ?Sized>(&mut self, reader: &mut R, options: &CodecOptions) -> Result<usize> {
		self.parse_scoped(reader, options, None)
	}

	pub(crate) fn parse_scoped<R: Read + ?Sized>(&mut self, reader: &mut R, options: &CodecOptions, scope: Option<&Scope<'_>>) -> Result<usize> {
		match &mut self.kind {
			FieldKind::Void => Err(BindomError::UnsupportedOperation { op: "parse", kind: "void" }),
			FieldKind::Number(number) => number.parse(reader, options),
			FieldKind::Str(text) => text.parse(reader),
			FieldKind::WStr(text) => text.parse(reader),
			FieldKind::Array(array) => array.parse_scoped(reader, options, scope),
			FieldKind::Struct(item) => item.parse_scoped(reader, options, scope),
		}
	}

	/// Serialize this field into a new byte vector.
	pub fn build(&self, options: &CodecOptions) -> Result<Vec<u8>> {
		let mut out = Vec::new();
		self.build_into(&mut out, options)?;
		Ok(out)
	}

	/// Serialize this field into `writer`, returning bytes written.
	pub fn build_into<W: Write + ?Sized>(&self, writer: &mut W, options: &CodecOptions) -> Result<usize> {
		match &self.kind {
			FieldKind::Void => Err(BindomError::UnsupportedOperation { op: "build", kind: "void" }),
			FieldKind::Number(number) => write_counted(writer, &number.encode(options)),
			FieldKind::Str(text) => write_counted(writer, &text.encode()),
			FieldKind::WStr(text) => write_counted(writer, &text.encode()),
			FieldKind::Array(array) => array.build_into(writer, options),
			FieldKind::Struct(item) => item.build_into(writer, options),
		}
	}

	/// Resolve a descendant by path.
	pub fn at(&self, path: &FieldPath) -> Result<&Field> {
		path.steps.iter().try_fold(self, |field, item| step(field, item))
	}

	/// Resolve a mutable descendant by path.
	pub fn at_mut(&mut self, path: &FieldPath) -> Result<&mut Field> {
		path.steps.iter().try_fold(self, |field, item| step_mut(field, item))
	}
}

impl From<FieldKind> for Field {
	fn from(kind: FieldKind) -> Self {
		Self::new(kind)
	}
}

macro_rules! field_from {
	($($variant:ident),+) => {
		$(
			impl From<$variant> for FieldKind {
				fn from(value: $variant) -> Self {
					FieldKind::$variant(value)
				}
			}

			impl From<$variant> for Field {
				fn from(value: $variant) -> Self {
					Field::new(FieldKind::$variant(value))
				}
			}
		)+
	};
}

field_from!(Number, Str, WStr, Array, Struct);

#[cfg(test)]
mod tests;
