use std::cmp::Ordering;
use std::io::Read;
use std::ops::{AddAssign, MulAssign, SubAssign};

use crate::dom::bytes::read_exact;
use crate::dom::{BindomError, CodecOptions, Endianness, Result, Scalar};

/// Numeric encoding rule of a number kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
	/// Two's-complement signed integer.
	Signed,
	/// Unsigned integer.
	Unsigned,
	/// IEEE-754 binary floating point.
	Float,
}

/// Concrete fixed-width number type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
	/// 1-byte signed.
	Char,
	/// 1-byte unsigned.
	UChar,
	/// 2-byte signed.
	Short,
	/// 2-byte unsigned.
	UShort,
	/// 4-byte signed.
	Int,
	/// 4-byte unsigned.
	UInt,
	/// 8-byte signed.
	Int64,
	/// 8-byte unsigned.
	UInt64,
	/// 4-byte IEEE single.
	Float,
	/// 8-byte IEEE double.
	Double,
}

impl NumberKind {
	/// Every number kind, narrowest integers first.
	pub const ALL: [NumberKind; 10] = [
		NumberKind::Char,
		NumberKind::UChar,
		NumberKind::Short,
		NumberKind::UShort,
		NumberKind::Int,
		NumberKind::UInt,
		NumberKind::Int64,
		NumberKind::UInt64,
		NumberKind::Float,
		NumberKind::Double,
	];

	/// Encoded width in bytes.
	pub fn width(self) -> usize {
		match self {
			NumberKind::Char | NumberKind::UChar => 1,
			NumberKind::Short | NumberKind::UShort => 2,
			NumberKind::Int | NumberKind::UInt | NumberKind::Float => 4,
			NumberKind::Int64 | NumberKind::UInt64 | NumberKind::Double => 8,
		}
	}

	/// Encoding rule.
	pub fn codec(self) -> Codec {
		match self {
			NumberKind::Char | NumberKind::Short | NumberKind::Int | NumberKind::Int64 => Codec::Signed,
			NumberKind::UChar | NumberKind::UShort | NumberKind::UInt | NumberKind::UInt64 => Codec::Unsigned,
			NumberKind::Float | NumberKind::Double => Codec::Float,
		}
	}

	/// Signed kind of the same width for unsigned kinds.
	///
	/// Per-kind byte order set on the signed kind also covers its unsigned counterpart.
	pub fn signed_counterpart(self) -> Option<Self> {
		match self {
			NumberKind::UChar => Some(NumberKind::Char),
			NumberKind::UShort => Some(NumberKind::Short),
			NumberKind::UInt => Some(NumberKind::Int),
			NumberKind::UInt64 => Some(NumberKind::Int64),
			_ => None,
		}
	}

	/// Lowercase type name.
	pub fn as_str(self) -> &'static str {
		match self {
			NumberKind::Char => "char",
			NumberKind::UChar => "uchar",
			NumberKind::Short => "short",
			NumberKind::UShort => "ushort",
			NumberKind::Int => "int",
			NumberKind::UInt => "uint",
			NumberKind::Int64 => "int64",
			NumberKind::UInt64 => "uint64",
			NumberKind::Float => "float",
			NumberKind::Double => "double",
		}
	}

	/// Look up a kind by its lowercase type name.
	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|kind| kind.as_str() == name)
	}

	/// Zero value in this kind's domain.
	pub fn zero(self) -> Scalar {
		match self.codec() {
			Codec::Signed => Scalar::Int(0),
			Codec::Unsigned => Scalar::UInt(0),
			Codec::Float => Scalar::Float(0.0),
		}
	}

	/// Coerce any scalar into this kind's domain.
	///
	/// Integers wrap to the kind's width, floats truncate toward zero when
	/// stored in integer kinds, and `Float` rounds to single precision.
	pub fn normalize(self, value: Scalar) -> Scalar {
		match self.codec() {
			Codec::Float => self.wrap_float(value.to_f64()),
			Codec::Signed | Codec::Unsigned => self.wrap_int(value.to_i128()),
		}
	}

	fn wrap_int(self, value: i128) -> Scalar {
		match self {
			NumberKind::Char => Scalar::Int(i64::from(value as i8)),
			NumberKind::Short => Scalar::Int(i64::from(value as i16)),
			NumberKind::Int => Scalar::Int(i64::from(value as i32)),
			NumberKind::Int64 => Scalar::Int(value as i64),
			NumberKind::UChar => Scalar::UInt(u64::from(value as u8)),
			NumberKind::UShort => Scalar::UInt(u64::from(value as u16)),
			NumberKind::UInt => Scalar::UInt(u64::from(value as u32)),
			NumberKind::UInt64 => Scalar::UInt(value as u64),
			NumberKind::Float | NumberKind::Double => self.wrap_float(value as f64),
		}
	}

	fn wrap_float(self, value: f64) -> Scalar {
		match self {
			NumberKind::Float => Scalar::Float(f64::from(value as f32)),
			NumberKind::Double => Scalar::Float(value),
			_ => self.wrap_int(value as i128),
		}
	}

	/// Decode exactly `self.width()` bytes.
	fn decode(self, raw: &[u8], endian: Endianness) -> Scalar {
		macro_rules! decode_as {
			($ty:ty) => {{
				let mut buf = [0_u8; size_of::<$ty>()];
				buf.copy_from_slice(raw);
				match endian {
					Endianness::Little => <$ty>::from_le_bytes(buf),
					Endianness::Big => <$ty>::from_be_bytes(buf),
				}
			}};
		}

		match self {
			NumberKind::Char => Scalar::from(decode_as!(i8)),
			NumberKind::UChar => Scalar::from(decode_as!(u8)),
			NumberKind::Short => Scalar::from(decode_as!(i16)),
			NumberKind::UShort => Scalar::from(decode_as!(u16)),
			NumberKind::Int => Scalar::from(decode_as!(i32)),
			NumberKind::UInt => Scalar::from(decode_as!(u32)),
			NumberKind::Int64 => Scalar::from(decode_as!(i64)),
			NumberKind::UInt64 => Scalar::from(decode_as!(u64)),
			NumberKind::Float => Scalar::from(decode_as!(f32)),
			NumberKind::Double => Scalar::from(decode_as!(f64)),
		}
	}

	/// Encode a value already normalized into this kind's domain.
	fn encode(self, value: Scalar, endian: Endianness) -> Vec<u8> {
		macro_rules! encode_as {
			($value:expr) => {{
				let value = $value;
				match endian {
					Endianness::Little => value.to_le_bytes().to_vec(),
					Endianness::Big => value.to_be_bytes().to_vec(),
				}
			}};
		}

		let int = value.to_i128();
		match self {
			NumberKind::Char => encode_as!(int as i8),
			NumberKind::UChar => encode_as!(int as u8),
			NumberKind::Short => encode_as!(int as i16),
			NumberKind::UShort => encode_as!(int as u16),
			NumberKind::Int => encode_as!(int as i32),
			NumberKind::UInt => encode_as!(int as u32),
			NumberKind::Int64 => encode_as!(int as i64),
			NumberKind::UInt64 => encode_as!(int as u64),
			NumberKind::Float => encode_as!(value.to_f64() as f32),
			NumberKind::Double => encode_as!(value.to_f64()),
		}
	}
}

/// In-place numeric operation applied by [`Number::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberOp {
	/// `+=`
	Add,
	/// `-=`
	Sub,
	/// `*=`
	Mul,
	/// `/=`, flooring for integer operands and exact for floats.
	Div,
	/// `//=`, rounding toward negative infinity.
	FloorDiv,
	/// `%=`, result takes the sign of the divisor.
	Rem,
	/// `**=`
	Pow,
	/// `&=`
	And,
	/// `|=`
	Or,
	/// `^=`
	Xor,
	/// `<<=`
	Shl,
	/// `>>=`
	Shr,
}

impl NumberOp {
	/// Short operator label.
	pub fn as_str(self) -> &'static str {
		match self {
			NumberOp::Add => "add",
			NumberOp::Sub => "sub",
			NumberOp::Mul => "mul",
			NumberOp::Div => "div",
			NumberOp::FloorDiv => "floor_div",
			NumberOp::Rem => "rem",
			NumberOp::Pow => "pow",
			NumberOp::And => "and",
			NumberOp::Or => "or",
			NumberOp::Xor => "xor",
			NumberOp::Shl => "shl",
			NumberOp::Shr => "shr",
		}
	}

	fn is_bitwise(self) -> bool {
		matches!(self, NumberOp::And | NumberOp::Or | NumberOp::Xor | NumberOp::Shl | NumberOp::Shr)
	}
}

/// Fixed-width numeric field.
#[derive(Debug, Clone)]
pub struct Number {
	kind: NumberKind,
	endian: Option<Endianness>,
	value: Scalar,
}

impl Number {
	/// Create a zero-valued number of `kind` with no endianness override.
	pub fn new(kind: NumberKind) -> Self {
		Self {
			kind,
			endian: None,
			value: kind.zero(),
		}
	}

	/// 1-byte signed number.
	pub fn char() -> Self {
		Self::new(NumberKind::Char)
	}

	/// 1-byte unsigned number.
	pub fn uchar() -> Self {
		Self::new(NumberKind::UChar)
	}

	/// 2-byte signed number.
	pub fn short() -> Self {
		Self::new(NumberKind::Short)
	}

	/// 2-byte unsigned number.
	pub fn ushort() -> Self {
		Self::new(NumberKind::UShort)
	}

	/// 4-byte signed number.
	pub fn int() -> Self {
		Self::new(NumberKind::Int)
	}

	/// 4-byte unsigned number.
	pub fn uint() -> Self {
		Self::new(NumberKind::UInt)
	}

	/// 8-byte signed number.
	pub fn int64() -> Self {
		Self::new(NumberKind::Int64)
	}

	/// 8-byte unsigned number.
	pub fn uint64() -> Self {
		Self::new(NumberKind::UInt64)
	}

	/// 4-byte IEEE single.
	pub fn float() -> Self {
		Self::new(NumberKind::Float)
	}

	/// 8-byte IEEE double.
	pub fn double() -> Self {
		Self::new(NumberKind::Double)
	}

	/// Return this number holding `value`.
	pub fn with_value(mut self, value: impl Into<Scalar>) -> Self {
		self.set(value);
		self
	}

	/// Return this number pinned to `endian`.
	pub fn with_endian(mut self, endian: Endianness) -> Self {
		self.endian = Some(endian);
		self
	}

	/// Number kind.
	pub fn kind(&self) -> NumberKind {
		self.kind
	}

	/// Field-level endianness override, if any.
	pub fn endian(&self) -> Option<Endianness> {
		self.endian
	}

	/// Set or clear the field-level endianness override.
	pub fn set_endian(&mut self, endian: Option<Endianness>) {
		self.endian = endian;
	}

	/// Current value.
	pub fn scalar(&self) -> Scalar {
		self.value
	}

	/// Store `value`, coerced into this kind's domain.
	pub fn set(&mut self, value: impl Into<Scalar>) {
		self.value = self.kind.normalize(value.into());
	}

	/// Read `width` bytes and decode them. Leaves the value untouched on failure.
	pub fn parse<R: Read + ?Sized>(&mut self, reader: &mut R, options: &CodecOptions) -> Result<usize> {
		let width = self.kind.width();
		let mut raw = [0_u8; 8];
		read_exact(reader, &mut raw[..width])?;
		self.value = self.kind.decode(&raw[..width], options.resolve(self.kind, self.endian));
		Ok(width)
	}

	/// Encode the current value into exactly `width` bytes.
	pub fn encode(&self, options: &CodecOptions) -> Vec<u8> {
		self.kind.encode(self.value, options.resolve(self.kind, self.endian))
	}

	/// Apply an in-place operation with `rhs` as the right operand.
	///
	/// Arithmetic switches to floating point when either side is a float and
	/// wraps for integers; bitwise operations reject float operands. The value
	/// is unchanged when an error is returned.
	pub fn apply(&mut self, op: NumberOp, rhs: impl Into<Scalar>) -> Result<()> {
		let rhs = rhs.into();
		if matches!(op, NumberOp::Add | NumberOp::Sub | NumberOp::Mul) {
			self.arith(op, rhs);
			return Ok(());
		}

		self.value = if self.value.is_float() || rhs.is_float() {
			if op.is_bitwise() {
				return Err(BindomError::InvalidOperand {
					op: op.as_str(),
					reason: "bitwise operation on float",
				});
			}
			self.kind.wrap_float(float_op(op, self.value.to_f64(), rhs.to_f64())?)
		} else {
			// i128 holds every i64/u64 operand exactly
			self.kind.wrap_int(int_op(op, self.value.to_i128(), rhs.to_i128())?)
		};
		Ok(())
	}

	/// Replace the value with its bitwise complement.
	pub fn invert(&mut self) -> Result<()> {
		if self.value.is_float() {
			return Err(BindomError::InvalidOperand {
				op: "invert",
				reason: "bitwise operation on float",
			});
		}
		self.value = self.kind.wrap_int(!self.value.to_i128());
		Ok(())
	}

	fn arith(&mut self, op: NumberOp, rhs: Scalar) {
		self.value = if self.value.is_float() || rhs.is_float() {
			let (lhs, rhs) = (self.value.to_f64(), rhs.to_f64());
			self.kind.wrap_float(match op {
				NumberOp::Sub => lhs - rhs,
				NumberOp::Mul => lhs * rhs,
				_ => lhs + rhs,
			})
		} else {
			let (lhs, rhs) = (self.value.to_i128(), rhs.to_i128());
			self.kind.wrap_int(match op {
				NumberOp::Sub => lhs.wrapping_sub(rhs),
				NumberOp::Mul => lhs.wrapping_mul(rhs),
				_ => lhs.wrapping_add(rhs),
			})
		};
	}
}

fn float_op(op: NumberOp, lhs: f64, rhs: f64) -> Result<f64> {
	if matches!(op, NumberOp::Div | NumberOp::FloorDiv | NumberOp::Rem) && rhs == 0.0 {
		return Err(BindomError::DivisionByZero);
	}

	Ok(match op {
		NumberOp::Add => lhs + rhs,
		NumberOp::Sub => lhs - rhs,
		NumberOp::Mul => lhs * rhs,
		NumberOp::Div => lhs / rhs,
		NumberOp::FloorDiv => (lhs / rhs).floor(),
		NumberOp::Rem => {
			let rem = lhs % rhs;
			if rem != 0.0 && (rem < 0.0) != (rhs < 0.0) { rem + rhs } else { rem }
		}
		NumberOp::Pow => lhs.powf(rhs),
		NumberOp::And | NumberOp::Or | NumberOp::Xor | NumberOp::Shl | NumberOp::Shr => {
			return Err(BindomError::InvalidOperand {
				op: op.as_str(),
				reason: "bitwise operation on float",
			});
		}
	})
}

fn int_op(op: NumberOp, lhs: i128, rhs: i128) -> Result<i128> {
	if matches!(op, NumberOp::Div | NumberOp::FloorDiv | NumberOp::Rem) && rhs == 0 {
		return Err(BindomError::DivisionByZero);
	}
	if matches!(op, NumberOp::Shl | NumberOp::Shr) && rhs < 0 {
		return Err(BindomError::InvalidOperand {
			op: op.as_str(),
			reason: "negative shift count",
		});
	}

	Ok(match op {
		NumberOp::Add => lhs.wrapping_add(rhs),
		NumberOp::Sub => lhs.wrapping_sub(rhs),
		NumberOp::Mul => lhs.wrapping_mul(rhs),
		NumberOp::Div | NumberOp::FloorDiv => {
			let quot = lhs.wrapping_div(rhs);
			if lhs % rhs != 0 && (lhs < 0) != (rhs < 0) { quot - 1 } else { quot }
		}
		NumberOp::Rem => {
			let rem = lhs % rhs;
			if rem != 0 && (rem < 0) != (rhs < 0) { rem + rhs } else { rem }
		}
		NumberOp::Pow => {
			if rhs < 0 {
				return Err(BindomError::InvalidOperand {
					op: op.as_str(),
					reason: "negative exponent on integer",
				});
			}
			lhs.wrapping_pow(u32::try_from(rhs).unwrap_or(u32::MAX))
		}
		NumberOp::And => lhs & rhs,
		NumberOp::Or => lhs | rhs,
		NumberOp::Xor => lhs ^ rhs,
		NumberOp::Shl if rhs >= 128 => 0,
		NumberOp::Shl => lhs.wrapping_shl(rhs as u32),
		NumberOp::Shr if rhs >= 128 => {
			if lhs < 0 { -1 } else { 0 }
		}
		NumberOp::Shr => lhs >> rhs,
	})
}

impl<S: Into<Scalar>> AddAssign<S> for Number {
	fn add_assign(&mut self, rhs: S) {
		self.arith(NumberOp::Add, rhs.into());
	}
}

impl<S: Into<Scalar>> SubAssign<S> for Number {
	fn sub_assign(&mut self, rhs: S) {
		self.arith(NumberOp::Sub, rhs.into());
	}
}

impl<S: Into<Scalar>> MulAssign<S> for Number {
	fn mul_assign(&mut self, rhs: S) {
		self.arith(NumberOp::Mul, rhs.into());
	}
}

impl PartialEq for Number {
	fn eq(&self, other: &Self) -> bool {
		self.value == other.value
	}
}

impl PartialOrd for Number {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		self.value.partial_cmp(&other.value)
	}
}

impl PartialEq<Scalar> for Number {
	fn eq(&self, other: &Scalar) -> bool {
		self.value == *other
	}
}

impl PartialOrd<Scalar> for Number {
	fn partial_cmp(&self, other: &Scalar) -> Option<Ordering> {
		self.value.partial_cmp(other)
	}
}

macro_rules! number_cmp {
	($($ty:ty),+) => {
		$(
			impl PartialEq<$ty> for Number {
				fn eq(&self, other: &$ty) -> bool {
					self.value == Scalar::from(*other)
				}
			}

			impl PartialOrd<$ty> for Number {
				fn partial_cmp(&self, other: &$ty) -> Option<Ordering> {
					self.value.partial_cmp(&Scalar::from(*other))
				}
			}
		)+
	};
}

number_cmp!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);
