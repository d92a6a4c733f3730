/// Byte order used when assembling a multi-byte window into an integer
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Endian {
    /// Most significant byte first
    Big,
    /// Least significant byte first
    Little,
}

/// Assembles the first two bytes of `window` into a `u16`
///
/// # Panics
///
/// Panics if `window` holds fewer than two bytes
#[must_use]
pub fn word16(window: &[u8], endian: Endian) -> u16 {
    let bytes = [window[0], window[1]];
    match endian {
        Endian::Big => u16::from_be_bytes(bytes),
        Endian::Little => u16::from_le_bytes(bytes),
    }
}

/// Assembles the first four bytes of `window` into a `u32`
///
/// # Panics
///
/// Panics if `window` holds fewer than four bytes
#[must_use]
pub fn word32(window: &[u8], endian: Endian) -> u32 {
    let bytes = [window[0], window[1], window[2], window[3]];
    match endian {
        Endian::Big => u32::from_be_bytes(bytes),
        Endian::Little => u32::from_le_bytes(bytes),
    }
}

/// The most significant byte of a `u16`
#[must_use]
pub const fn msb16(value: u16) -> u8 {
    value.to_be_bytes()[0]
}

/// The most significant byte of a `u32`
#[must_use]
pub const fn msb32(value: u32) -> u8 {
    value.to_be_bytes()[0]
}
