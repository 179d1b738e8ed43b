//! Bounded reads from caller-supplied streams.

use std::io::{self, Read};

/// Read up to `N` bytes, stopping early only at end of stream.
///
/// Returns the filled prefix length.
pub fn read_header<R: Read, const N: usize>(reader: &mut R) -> io::Result<([u8; N], usize)> {
    let mut buf = [0u8; N];
    let mut filled = 0;
    while filled < N {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok((buf, filled))
}

/// Read the rest of the stream, keeping at most `limit` bytes.
pub fn read_capped<R: Read>(reader: R, limit: usize) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    reader.take(limit as u64).read_to_end(&mut data)?;
    Ok(data)
}
