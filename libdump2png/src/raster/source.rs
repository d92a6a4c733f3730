use std::io::{self, ErrorKind, Read};

/// Reads from `source` until `buf` is full or the source reports end of data
///
/// Returns the number of bytes placed in `buf`. A return value smaller than `buf.len()`
/// means the source is exhausted.
pub fn fill_buffer(source: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
