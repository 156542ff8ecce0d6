mod array;
mod bytes;
mod error;
mod field;
mod number;
mod options;
mod path;
mod structure;
mod text;
mod value;

/// Homogeneous array field and its width source.
pub use array::{Array, ArrayWidth};
/// Error and result aliases.
pub use error::{BindomError, Result};
/// Field node and its concrete kinds.
pub use field::{Field, FieldKind};
/// Fixed-width number fields.
pub use number::{Codec, Number, NumberKind, NumberOp};
/// Endianness and codec settings.
pub use options::{CodecOptions, DEFAULT_MAX_ARRAY_ELEMS, Endianness};
/// Field path parser types.
pub use path::{FieldPath, PathStep};
/// Composite struct field.
pub use structure::Struct;
/// Zero-terminated text fields.
pub use text::{Str, WStr};
/// Detached semantic values.
pub use value::{FieldValue, Scalar, StructValue, Value};
