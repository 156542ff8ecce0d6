//! Public library API for parsing binary data into typed field trees and building it back.

/// Field nodes, codecs, and parse/build entry points.
pub mod dom;
