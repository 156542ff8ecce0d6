use std::collections::HashMap;

use crate::dom::NumberKind;

/// Default upper bound on elements in one parsed array.
pub const DEFAULT_MAX_ARRAY_ELEMS: usize = 1 << 20;

/// Byte order for multi-byte numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Endianness {
	/// Most significant byte first.
	#[default]
	Big,
	/// Least significant byte first.
	Little,
}

impl Endianness {
	/// Lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Endianness::Big => "big",
			Endianness::Little => "little",
		}
	}
}

/// Codec settings passed to every parse and build call.
///
/// Endianness resolves most-specific-wins: a field's own override, then the
/// override for its number kind, then the override for the signed kind of the
/// same width (for unsigned kinds), then [`CodecOptions::endian`]. Resolution
/// happens at call time, so changing these options between two builds of the
/// same tree changes the second output.
#[derive(Debug, Clone)]
pub struct CodecOptions {
	/// Process-wide default byte order.
	pub endian: Endianness,
	/// Per-kind byte order overrides.
	pub kind_endian: HashMap<NumberKind, Endianness>,
	/// Maximum element count accepted when parsing one array.
	pub max_array_elems: usize,
}

impl Default for CodecOptions {
	fn default() -> Self {
		Self {
			endian: Endianness::Big,
			kind_endian: HashMap::new(),
			max_array_elems: DEFAULT_MAX_ARRAY_ELEMS,
		}
	}
}

impl CodecOptions {
	/// Preset with a little-endian default and no kind overrides.
	pub fn little_endian() -> Self {
		Self {
			endian: Endianness::Little,
			..Self::default()
		}
	}

	/// Return options with `kind` pinned to `endian`.
	pub fn with_kind_endian(mut self, kind: NumberKind, endian: Endianness) -> Self {
		self.kind_endian.insert(kind, endian);
		self
	}

	/// Return options accepting at most `max` elements per parsed array.
	pub fn with_max_array_elems(mut self, max: usize) -> Self {
		self.max_array_elems = max;
		self
	}

	/// Resolve the byte order for a number of `kind` carrying `field` as its own override.
	pub fn resolve(&self, kind: NumberKind, field: Option<Endianness>) -> Endianness {
		field
			.or_else(|| self.kind_endian.get(&kind).copied())
			.or_else(|| kind.signed_counterpart().and_then(|base| self.kind_endian.get(&base).copied()))
			.unwrap_or(self.endian)
	}
}
