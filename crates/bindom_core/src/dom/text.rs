use std::borrow::Cow;
use std::io::Read;

use crate::dom::bytes::read_terminated;
use crate::dom::{BindomError, Result};

/// Zero-terminated single-byte string.
///
/// The value is the raw bytes before the terminator; no character set is assumed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Str {
	value: Vec<u8>,
}

impl Str {
	/// Terminator appended by [`Str::encode`] and stripped by [`Str::parse`].
	pub const TERMINATOR: [u8; 1] = [0];

	/// Create an empty string.
	pub fn new() -> Self {
		Self::default()
	}

	/// Return this string holding `value`.
	pub fn with_value(mut self, value: impl Into<Vec<u8>>) -> Self {
		self.value = value.into();
		self
	}

	/// Raw bytes, terminator excluded.
	pub fn bytes(&self) -> &[u8] {
		&self.value
	}

	/// Bytes decoded as UTF-8, replacing invalid sequences.
	pub fn to_string_lossy(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(&self.value)
	}

	/// Replace the raw bytes.
	pub fn set(&mut self, value: impl Into<Vec<u8>>) {
		self.value = value.into();
	}

	/// Read bytes up to and including the zero terminator. No length bound.
	pub fn parse<R: Read + ?Sized>(&mut self, reader: &mut R) -> Result<usize> {
		let (units, consumed) = read_terminated::<R, 1>(reader)?;
		self.value = units;
		Ok(consumed)
	}

	/// Raw bytes followed by one terminator.
	///
	/// Values with an embedded zero byte do not survive a round trip.
	pub fn encode(&self) -> Vec<u8> {
		let mut out = Vec::with_capacity(self.value.len() + Self::TERMINATOR.len());
		out.extend_from_slice(&self.value);
		out.extend_from_slice(&Self::TERMINATOR);
		out
	}
}

impl PartialEq<[u8]> for Str {
	fn eq(&self, other: &[u8]) -> bool {
		self.value == other
	}
}

impl PartialEq<str> for Str {
	fn eq(&self, other: &str) -> bool {
		self.value == other.as_bytes()
	}
}

impl PartialEq<&str> for Str {
	fn eq(&self, other: &&str) -> bool {
		self.value == other.as_bytes()
	}
}

/// Zero-terminated UTF-16LE string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WStr {
	value: String,
}

impl WStr {
	/// Two-byte terminator unit.
	pub const TERMINATOR: [u8; 2] = [0, 0];

	/// Create an empty string.
	pub fn new() -> Self {
		Self::default()
	}

	/// Return this string holding `value`.
	pub fn with_value(mut self, value: impl Into<String>) -> Self {
		self.value = value.into();
		self
	}

	/// Decoded text, terminator excluded.
	pub fn as_str(&self) -> &str {
		&self.value
	}

	/// Replace the text.
	pub fn set(&mut self, value: impl Into<String>) {
		self.value = value.into();
	}

	/// Read two-byte units up to the `00 00` terminator and decode them as UTF-16LE.
	pub fn parse<R: Read + ?Sized>(&mut self, reader: &mut R) -> Result<usize> {
		let (raw, consumed) = read_terminated::<R, 2>(reader)?;
		let units: Vec<u16> = raw.chunks_exact(2).map(|pair| u16::from_le_bytes([pair[0], pair[1]])).collect();
		self.value = String::from_utf16(&units).map_err(|_| BindomError::InvalidUtf16)?;
		Ok(consumed)
	}

	/// UTF-16LE units followed by one terminator unit.
	pub fn encode(&self) -> Vec<u8> {
		let mut out: Vec<u8> = self.value.encode_utf16().flat_map(u16::to_le_bytes).collect();
		out.extend_from_slice(&Self::TERMINATOR);
		out
	}
}

impl PartialEq<str> for WStr {
	fn eq(&self, other: &str) -> bool {
		self.value == other
	}
}

impl PartialEq<&str> for WStr {
	fn eq(&self, other: &&str) -> bool {
		self.value == *other
	}
}

impl PartialEq<String> for WStr {
	fn eq(&self, other: &String) -> bool {
		&self.value == other
	}
}

#[cfg(test)]
mod tests;
