use std::io::{ErrorKind, Read, Write};

use crate::dom::{BindomError, Result};

/// Fill `buf` from `reader`, looping over short reads until it is full or the reader hits end of input.
///
/// Returns the number of bytes placed in `buf`; anything below `buf.len()` means end of input.
pub(crate) fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
	let mut filled = 0_usize;
	while filled < buf.len() {
		match reader.read(&mut buf[filled..]) {
			Ok(0) => break,
			Ok(n) => filled += n,
			Err(err) if err.kind() == ErrorKind::Interrupted => continue,
			Err(err) => return Err(err.into()),
		}
	}
	Ok(filled)
}

/// Fill `buf` completely or fail with [`BindomError::PrematureEndOfInput`].
pub(crate) fn read_exact<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
	let got = read_full(reader, buf)?;
	if got < buf.len() {
		return Err(BindomError::PrematureEndOfInput { need: buf.len(), got });
	}
	Ok(())
}

/// Read `N`-byte units until an all-zero unit, returning the units before it and the total consumed.
pub(crate) fn read_terminated<R: Read + ?Sized, const N: usize>(reader: &mut R) -> Result<(Vec<u8>, usize)> {
	let mut out = Vec::new();
	loop {
		let mut unit = [0_u8; N];
		let got = read_full(reader, &mut unit)?;
		if got < N {
			return Err(BindomError::PrematureEndOfInput {
				need: out.len() + N,
				got: out.len() + got,
			});
		}
		if unit == [0_u8; N] {
			let consumed = out.len() + N;
			return Ok((out, consumed));
		}
		out.extend_from_slice(&unit);
	}
}

/// Write all of `bytes` and report how many were written.
pub(crate) fn write_counted<W: Write + ?Sized>(writer: &mut W, bytes: &[u8]) -> Result<usize> {
	writer.write_all(bytes)?;
	Ok(bytes.len())
}
