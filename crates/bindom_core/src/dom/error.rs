use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, BindomError>;

/// Errors produced while parsing, building, and editing field trees.
#[derive(Debug, Error)]
pub enum BindomError {
	/// Underlying reader or writer failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Input ended before the field's current configuration was satisfied.
	#[error("premature end of input: need {need} bytes, got {got}")]
	PrematureEndOfInput {
		/// Bytes the field required.
		need: usize,
		/// Bytes the reader produced before end of input.
		got: usize,
	},
	/// Name-based lookup on a struct for a name that was never attached.
	#[error("unknown member: {name}")]
	UnknownMember {
		/// Requested member name.
		name: String,
	},
	/// Positional access on an array outside its current bounds.
	#[error("index {index} out of range for array of length {len}")]
	IndexOutOfRange {
		/// Requested element index.
		index: usize,
		/// Current element count.
		len: usize,
	},
	/// Operation invoked on a field kind that cannot perform it.
	#[error("unsupported operation {op} on {kind} field")]
	UnsupportedOperation {
		/// Attempted operation.
		op: &'static str,
		/// Field kind label.
		kind: &'static str,
	},
	/// Assigned value does not fit the receiving field kind.
	#[error("type mismatch: expected {expected}, got {got}")]
	TypeMismatch {
		/// Value kind the field accepts.
		expected: &'static str,
		/// Value kind that was supplied.
		got: &'static str,
	},
	/// Array width resolved to something that is not a usable element count.
	#[error("invalid array count for {name}: {reason}")]
	InvalidArrayCount {
		/// Array field name.
		name: String,
		/// Why the resolved width was rejected.
		reason: String,
	},
	/// Wide string payload is not valid UTF-16LE.
	#[error("invalid UTF-16LE text")]
	InvalidUtf16,
	/// Numeric division or modulo by zero.
	#[error("division by zero")]
	DivisionByZero,
	/// Numeric operand rejected by an in-place operation.
	#[error("invalid operand for {op}: {reason}")]
	InvalidOperand {
		/// Operation name.
		op: &'static str,
		/// Why the operand was rejected.
		reason: &'static str,
	},
	/// Path expression syntax is invalid.
	#[error("invalid field path: {path}")]
	InvalidFieldPath {
		/// Original path string.
		path: String,
	},
}
