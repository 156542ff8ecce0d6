use std::collections::BTreeMap;
use std::path::Path;

use bindom::dom::{Array, ArrayWidth, CodecOptions, Endianness, Field, Number, NumberKind, Str, Struct, WStr};
use serde::Deserialize;

use crate::error::CliError;

/// Declarative description of a binary file: codec defaults plus the root member list.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Layout {
	/// Global default byte order.
	#[serde(default)]
	pub endian: Option<EndianDef>,
	/// Per-kind byte order overrides keyed by kind name (`"ushort"`, ...).
	#[serde(default)]
	pub overrides: BTreeMap<String, EndianDef>,
	/// Root struct members in file order.
	pub fields: Vec<FieldDef>,
}

/// Byte order as spelled in layout files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndianDef {
	/// Most significant byte first.
	Big,
	/// Least significant byte first.
	Little,
}

impl From<EndianDef> for Endianness {
	fn from(value: EndianDef) -> Self {
		match value {
			EndianDef::Big => Endianness::Big,
			EndianDef::Little => Endianness::Little,
		}
	}
}

/// One node declaration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDef {
	/// Member name; required for struct members, ignored for array elements.
	#[serde(default)]
	pub name: Option<String>,
	/// Kind name: a number kind, `string`, `wstring`, `array`, or `struct`.
	#[serde(rename = "type")]
	pub ty: String,
	/// Byte order pinned on this number field.
	#[serde(default)]
	pub endian: Option<EndianDef>,
	/// Array element count: a literal or the name of an earlier member.
	#[serde(default)]
	pub count: Option<CountDef>,
	/// Array element prototype.
	#[serde(default)]
	pub element: Option<Box<FieldDef>>,
	/// Struct members.
	#[serde(default)]
	pub fields: Vec<FieldDef>,
}

/// Array count as spelled in layout files.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CountDef {
	/// Fixed element count.
	Literal(usize),
	/// Count read from a previously parsed member.
	Member(String),
}

impl From<CountDef> for ArrayWidth {
	fn from(value: CountDef) -> Self {
		match value {
			CountDef::Literal(count) => ArrayWidth::Count(count),
			CountDef::Member(name) => ArrayWidth::Member(name),
		}
	}
}

impl Layout {
	/// Read and deserialize a layout file.
	pub fn load(path: &Path) -> Result<Self, CliError> {
		let bytes = std::fs::read(path).map_err(|source| CliError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let layout = serde_json::from_slice(&bytes)?;
		tracing::debug!(path = %path.display(), "loaded layout");
		Ok(layout)
	}

	/// Codec defaults declared by this layout.
	pub fn codec_options(&self) -> Result<CodecOptions, CliError> {
		let mut options = CodecOptions::default();
		if let Some(endian) = self.endian {
			options.endian = endian.into();
		}
		for (name, endian) in &self.overrides {
			let kind = NumberKind::from_name(name).ok_or_else(|| CliError::Layout {
				reason: format!("override names unknown number kind {name:?}"),
			})?;
			options = options.with_kind_endian(kind, (*endian).into());
		}
		Ok(options)
	}

	/// Build the unparsed root struct.
	pub fn root(&self) -> Result<Field, CliError> {
		Ok(Field::from(build_struct(&self.fields, "root")?))
	}
}

fn build_struct(defs: &[FieldDef], owner: &str) -> Result<Struct, CliError> {
	let mut item = Struct::new();
	for def in defs {
		let name = def.name.as_deref().ok_or_else(|| CliError::Layout {
			reason: format!("member of {owner} has no name"),
		})?;
		item.add_child(name, build_field(def, name)?);
	}
	Ok(item)
}

fn build_field(def: &FieldDef, label: &str) -> Result<Field, CliError> {
	let invalid = |reason: String| CliError::Layout {
		reason: format!("{label}: {reason}"),
	};

	if def.endian.is_some() && NumberKind::from_name(&def.ty).is_none() {
		return Err(invalid(format!("endian only applies to number kinds, not {}", def.ty)));
	}

	let field = match def.ty.as_str() {
		"string" => Field::from(Str::new()),
		"wstring" => Field::from(WStr::new()),
		"struct" => Field::from(build_struct(&def.fields, label)?),
		"array" => {
			let count = def.count.clone().ok_or_else(|| invalid("array needs a count".to_owned()))?;
			let element = def.element.as_deref().ok_or_else(|| invalid("array needs an element".to_owned()))?;
			Field::from(Array::new(count, build_field(element, label)?))
		}
		other => {
			let kind = NumberKind::from_name(other).ok_or_else(|| invalid(format!("unknown type {other:?}")))?;
			let mut number = Number::new(kind);
			if let Some(endian) = def.endian {
				number.set_endian(Some(endian.into()));
			}
			Field::from(number)
		}
	};
	Ok(field)
}

#[cfg(test)]
mod tests;
