use std::fmt;

use crate::dom::{BindomError, Field, FieldKind, Result};

/// One parsed operation in a field path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
	/// Select a named struct member.
	Field(String),
	/// Select an array element by zero-based index.
	Index(usize),
}

/// Parsed field path expression such as `header.entries[2].size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
	/// Ordered sequence of path steps.
	pub steps: Vec<PathStep>,
}

impl FieldPath {
	/// Parse dotted member syntax with optional `[index]` selectors.
	pub fn parse(input: &str) -> Result<Self> {
		let invalid = || BindomError::InvalidFieldPath { path: input.to_owned() };
		let mut steps = Vec::new();

		for segment in input.split('.') {
			let (name, mut selectors) = segment.split_at(segment.find('[').unwrap_or(segment.len()));
			if !is_member_name(name) {
				return Err(invalid());
			}
			steps.push(PathStep::Field(name.to_owned()));

			while !selectors.is_empty() {
				let (index, rest) = selectors.strip_prefix('[').and_then(|inner| inner.split_once(']')).ok_or_else(invalid)?;
				if index.is_empty() || !index.bytes().all(|byte| byte.is_ascii_digit()) {
					return Err(invalid());
				}
				steps.push(PathStep::Index(index.parse().map_err(|_| invalid())?));
				selectors = rest;
			}
		}

		Ok(Self { steps })
	}
}

fn is_member_name(name: &str) -> bool {
	!name.is_empty() && name.bytes().all(|byte| byte.is_ascii_alphanumeric() || byte == b'_')
}

impl fmt::Display for FieldPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, item) in self.steps.iter().enumerate() {
			match item {
				PathStep::Field(name) if i == 0 => write!(f, "{name}")?,
				PathStep::Field(name) => write!(f, ".{name}")?,
				PathStep::Index(index) => write!(f, "[{index}]")?,
			}
		}
		Ok(())
	}
}

pub(crate) fn step<'a>(field: &'a Field, item: &PathStep) -> Result<&'a Field> {
	match (item, field.kind()) {
		(PathStep::Field(name), FieldKind::Struct(members)) => members.get(name),
		(PathStep::Index(index), FieldKind::Array(items)) => items.get(*index),
		(PathStep::Field(_), _) => Err(BindomError::TypeMismatch {
			expected: "struct",
			got: field.kind_name(),
		}),
		(PathStep::Index(_), _) => Err(BindomError::TypeMismatch {
			expected: "array",
			got: field.kind_name(),
		}),
	}
}

pub(crate) fn step_mut<'a>(field: &'a mut Field, item: &PathStep) -> Result<&'a mut Field> {
	let got = field.kind_name();
	match (item, field.kind_mut()) {
		(PathStep::Field(name), FieldKind::Struct(members)) => members.get_mut(name),
		(PathStep::Index(index), FieldKind::Array(items)) => items.get_mut(*index),
		(PathStep::Field(_), _) => Err(BindomError::TypeMismatch { expected: "struct", got }),
		(PathStep::Index(_), _) => Err(BindomError::TypeMismatch { expected: "array", got }),
	}
}

#[cfg(test)]
mod tests;
