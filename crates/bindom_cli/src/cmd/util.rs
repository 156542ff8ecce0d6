use std::path::{Path, PathBuf};

use bindom::dom::{Codec, CodecOptions, Endianness, Field, FieldKind, Value};
use serde::Serialize;

use crate::error::CliError;
use crate::layout::Layout;

/// Layout and data inputs shared by every command.
#[derive(clap::Args)]
pub struct InputArgs {
	/// Layout declaration (JSON).
	pub layout: PathBuf,
	/// Binary data to parse.
	pub data: PathBuf,
	/// Force a little-endian global default, whatever the layout declares.
	#[arg(long)]
	pub little: bool,
	/// Largest element count accepted for any array.
	#[arg(long = "max-array")]
	pub max_array: Option<usize>,
}

/// Parsed document together with the bytes it came from.
pub(crate) struct Loaded {
	pub(crate) root: Field,
	pub(crate) options: CodecOptions,
	pub(crate) data: Vec<u8>,
	pub(crate) consumed: usize,
}

/// Load the layout, read the data file, and parse it into a fresh tree.
pub(crate) fn load(input: &InputArgs) -> Result<Loaded, CliError> {
	let layout = Layout::load(&input.layout)?;
	let mut options = layout.codec_options()?;
	if input.little {
		options.endian = Endianness::Little;
	}
	if let Some(max_array) = input.max_array {
		options.max_array_elems = max_array;
	}

	let mut root = layout.root()?;
	let data = read_file(&input.data)?;
	let consumed = root.parse(&mut data.as_slice(), &options)?;
	tracing::debug!(consumed, size = data.len(), "parsed data file");

	Ok(Loaded {
		root,
		options,
		data,
		consumed,
	})
}

pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>, CliError> {
	std::fs::read(path).map_err(|source| CliError::Io {
		path: path.to_path_buf(),
		source,
	})
}

pub(crate) fn write_file(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
	std::fs::write(path, bytes).map_err(|source| CliError::Io {
		path: path.to_path_buf(),
		source,
	})
}

/// Print one pretty JSON document to stdout.
pub(crate) fn emit_json<T: Serialize>(payload: &T) -> Result<(), CliError> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}

/// JSON shape of one tree node.
#[derive(Serialize)]
pub(crate) struct FieldJson {
	pub(crate) name: Option<String>,
	pub(crate) kind: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub(crate) value: Option<serde_json::Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub(crate) children: Option<Vec<FieldJson>>,
}

impl FieldJson {
	pub(crate) fn from_field(field: &Field) -> Self {
		let children = match field.kind() {
			FieldKind::Array(items) => Some(items.iter().map(FieldJson::from_field).collect()),
			FieldKind::Struct(members) => Some(members.iter().map(FieldJson::from_field).collect()),
			_ => None,
		};
		Self {
			name: field.name().map(str::to_owned),
			kind: field.kind_name(),
			value: children.is_none().then(|| value_to_json(&field.value())),
			children,
		}
	}
}

pub(crate) fn value_to_json(value: &Value) -> serde_json::Value {
	use serde_json::{Map, Value as JsonValue};

	match value {
		Value::Void => JsonValue::Null,
		Value::Int(v) => serde_json::json!(v),
		Value::UInt(v) => serde_json::json!(v),
		Value::Float(v) => serde_json::json!(v),
		Value::Bytes(v) => match std::str::from_utf8(v) {
			Ok(text) => serde_json::json!(text),
			Err(_) => JsonValue::Array(v.iter().map(|item| serde_json::json!(item)).collect()),
		},
		Value::Text(v) => serde_json::json!(v),
		Value::Array(items) => JsonValue::Array(items.iter().map(value_to_json).collect()),
		Value::Struct(item) => {
			let fields: Map<String, JsonValue> = item
				.fields
				.iter()
				.map(|field| (field.name.to_string(), value_to_json(&field.value)))
				.collect();
			JsonValue::Object(fields)
		}
	}
}

/// Print a node and its descendants as an indented listing.
pub(crate) fn print_field(field: &Field, indent: usize) {
	let pad = " ".repeat(indent);
	let name = field.name().unwrap_or("<root>");
	match field.kind() {
		FieldKind::Array(items) => {
			println!("{pad}{name}: array[{}]", items.len());
			for item in items.iter() {
				print_field(item, indent + 2);
			}
		}
		FieldKind::Struct(members) => {
			println!("{pad}{name}: struct");
			for member in members.iter() {
				print_field(member, indent + 2);
			}
		}
		_ => println!("{pad}{name}: {} = {}", field.kind_name(), render_value(&field.value())),
	}
}

/// Render a leaf value for text output.
pub(crate) fn render_value(value: &Value) -> String {
	match value {
		Value::Void => "void".to_owned(),
		Value::Int(v) => v.to_string(),
		Value::UInt(v) => v.to_string(),
		Value::Float(v) => v.to_string(),
		Value::Bytes(v) => format!("\"{}\"", v.escape_ascii()),
		Value::Text(v) => format!("{v:?}"),
		Value::Array(items) => format!("[{} items]", items.len()),
		Value::Struct(item) => format!("{{{} fields}}", item.fields.len()),
	}
}

/// Parse a command-line literal into a value suited to `target`.
///
/// Integers accept decimal or `0x`-prefixed hex with an optional sign; text
/// fields take the literal verbatim.
pub(crate) fn parse_literal(target: &Field, literal: &str) -> Result<Value, CliError> {
	let invalid = |reason: String| CliError::InvalidAssignment {
		input: literal.to_owned(),
		reason,
	};

	match target.kind() {
		FieldKind::Number(number) if number.kind().codec() == Codec::Float => literal
			.parse::<f64>()
			.map(Value::Float)
			.map_err(|_| invalid(format!("expected a {} literal", number.kind().as_str()))),
		FieldKind::Number(number) => parse_int(literal)
			.or_else(|| literal.parse::<f64>().ok().map(Value::Float))
			.ok_or_else(|| invalid(format!("expected a {} literal", number.kind().as_str()))),
		FieldKind::Str(_) | FieldKind::WStr(_) => Ok(Value::Text(literal.to_owned())),
		other => Err(invalid(format!("cannot assign a literal to a {} field", other.label()))),
	}
}

fn parse_int(literal: &str) -> Option<Value> {
	let (negative, digits) = match literal.strip_prefix('-') {
		Some(rest) => (true, rest),
		None => (false, literal.strip_prefix('+').unwrap_or(literal)),
	};
	let magnitude = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
		Some(hex) => u64::from_str_radix(hex, 16).ok()?,
		None => digits.parse::<u64>().ok()?,
	};

	if negative {
		let value = 0_i128 - i128::from(magnitude);
		i64::try_from(value).ok().map(Value::Int)
	} else {
		Some(Value::UInt(magnitude))
	}
}
