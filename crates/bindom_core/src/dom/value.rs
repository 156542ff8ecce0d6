use std::cmp::Ordering;

/// Numeric scalar held by number fields and used as an operand for in-place operations.
#[derive(Debug, Clone, Copy)]
pub enum Scalar {
	/// Two's-complement signed integer.
	Int(i64),
	/// Unsigned integer.
	UInt(u64),
	/// IEEE-754 floating-point value.
	Float(f64),
}

impl Scalar {
	/// Return the value as an integer, truncating floats toward zero (saturating, NaN as zero).
	pub fn to_i128(self) -> i128 {
		match self {
			Scalar::Int(value) => i128::from(value),
			Scalar::UInt(value) => i128::from(value),
			Scalar::Float(value) => value as i128,
		}
	}

	/// Return the value widened or converted to `f64`.
	pub fn to_f64(self) -> f64 {
		match self {
			Scalar::Int(value) => value as f64,
			Scalar::UInt(value) => value as f64,
			Scalar::Float(value) => value,
		}
	}

	/// Whether this scalar carries a floating-point value.
	pub fn is_float(self) -> bool {
		matches!(self, Scalar::Float(_))
	}
}

impl PartialEq for Scalar {
	fn eq(&self, other: &Self) -> bool {
		self.partial_cmp(other) == Some(Ordering::Equal)
	}
}

impl PartialOrd for Scalar {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		if self.is_float() || other.is_float() {
			self.to_f64().partial_cmp(&other.to_f64())
		} else {
			Some(self.to_i128().cmp(&other.to_i128()))
		}
	}
}

macro_rules! scalar_from {
	($variant:ident, $wide:ty: $($ty:ty),+) => {
		$(
			impl From<$ty> for Scalar {
				fn from(value: $ty) -> Self {
					Scalar::$variant(<$wide>::from(value))
				}
			}
		)+
	};
}

scalar_from!(Int, i64: i8, i16, i32, i64);
scalar_from!(UInt, u64: u8, u16, u32, u64);
scalar_from!(Float, f64: f32, f64);

/// Detached semantic value of any field node.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// No value (void fields).
	Void,
	/// Signed integer scalar.
	Int(i64),
	/// Unsigned integer scalar.
	UInt(u64),
	/// Floating-point scalar.
	Float(f64),
	/// Raw single-byte text, terminator excluded.
	Bytes(Vec<u8>),
	/// Decoded text, terminator excluded.
	Text(String),
	/// Array element values in index order.
	Array(Vec<Value>),
	/// Struct member values in declaration order.
	Struct(StructValue),
}

impl Value {
	/// Short label used in diagnostics.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Value::Void => "void",
			Value::Int(_) => "int",
			Value::UInt(_) => "uint",
			Value::Float(_) => "float",
			Value::Bytes(_) => "bytes",
			Value::Text(_) => "text",
			Value::Array(_) => "array",
			Value::Struct(_) => "struct",
		}
	}

	/// Return the numeric scalar, if this is a number.
	pub fn as_scalar(&self) -> Option<Scalar> {
		match self {
			Value::Int(value) => Some(Scalar::Int(*value)),
			Value::UInt(value) => Some(Scalar::UInt(*value)),
			Value::Float(value) => Some(Scalar::Float(*value)),
			_ => None,
		}
	}
}

impl From<Scalar> for Value {
	fn from(value: Scalar) -> Self {
		match value {
			Scalar::Int(value) => Value::Int(value),
			Scalar::UInt(value) => Value::UInt(value),
			Scalar::Float(value) => Value::Float(value),
		}
	}
}

macro_rules! value_from_scalar {
	($($ty:ty),+) => {
		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Scalar::from(value).into()
				}
			}
		)+
	};
}

value_from_scalar!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::Text(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::Text(value)
	}
}

impl From<Vec<u8>> for Value {
	fn from(value: Vec<u8>) -> Self {
		Value::Bytes(value)
	}
}

impl From<&[u8]> for Value {
	fn from(value: &[u8]) -> Self {
		Value::Bytes(value.to_vec())
	}
}

impl From<StructValue> for Value {
	fn from(value: StructValue) -> Self {
		Value::Struct(value)
	}
}

/// Struct value with member names preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructValue {
	/// Member values in declaration order.
	pub fields: Vec<FieldValue>,
}

impl StructValue {
	/// Look up the last member value stored under `name`.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.fields.iter().rev().find(|field| field.name.as_ref() == name).map(|field| &field.value)
	}
}

/// Named member value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Member name.
	pub name: Box<str>,
	/// Member value.
	pub value: Value,
}
