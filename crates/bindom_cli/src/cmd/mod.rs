/// Single-node lookup command.
pub mod get;
/// Parse-and-print command.
pub mod parse;
/// Assign values by path and write the rebuilt file.
pub mod patch;
/// Parse, rebuild, and compare command.
pub mod roundtrip;
pub(crate) mod util;

#[cfg(test)]
pub(crate) mod test_support;
