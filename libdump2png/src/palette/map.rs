//! Pure byte-window to RGB mapping functions
//!
//! Every function here has the [`MapFn`](super::MapFn) signature so that a palette can be
//! resolved to one of them once, before a scan begins. The window always holds at least
//! [`Palette::bytes_per_pixel`](super::Palette::bytes_per_pixel) bytes.
#![allow(clippy::cast_possible_truncation)]

use super::{
    word::{msb16, msb32, word16, word32, Endian},
    Rgb,
};

// Intensities used by the x86 palette for the first, second and third match of each table
const FIRST: u8 = 0xff;
const SECOND: u8 = 0xcf;
const THIRD: u8 = 0xaf;

const fn splat(value: u8) -> Rgb {
    [value, value, value]
}

pub fn gray(window: &[u8], _last: u8) -> Rgb {
    splat(window[0])
}

pub fn gray16b(window: &[u8], _last: u8) -> Rgb {
    splat(msb16(word16(window, Endian::Big)))
}

pub fn gray16l(window: &[u8], _last: u8) -> Rgb {
    splat(msb16(word16(window, Endian::Little)))
}

pub fn gray32b(window: &[u8], _last: u8) -> Rgb {
    splat(msb32(word32(window, Endian::Big)))
}

pub fn gray32l(window: &[u8], _last: u8) -> Rgb {
    splat(msb32(word32(window, Endian::Little)))
}

/// Three bands (red, green, blue), each ramping from 0 to 255
pub fn hues(window: &[u8], _last: u8) -> Rgb {
    let v = u16::from(window[0]) * 3;
    let level = v as u8;
    match v >> 8 {
        0 => [level, 0, 0],
        1 => [0, level, 0],
        _ => [0, 0, level],
    }
}

/// Six bands: red, green, blue, cyan, magenta, yellow
pub fn hues6(window: &[u8], _last: u8) -> Rgb {
    let v = u16::from(window[0]) * 6;
    let level = v as u8;
    match v >> 8 {
        0 => [level, 0, 0],
        1 => [0, level, 0],
        2 => [0, 0, level],
        3 => [0, level, level],
        4 => [level, 0, level],
        _ => [level, level, 0],
    }
}

/// Six bands alternating between a single ramping primary and a saturated primary
/// with the two others ramping
pub fn fhues(window: &[u8], _last: u8) -> Rgb {
    let v = u16::from(window[0]) * 6;
    let level = v as u8;
    match v >> 8 {
        0 => [level, 0, 0],
        1 => [u8::MAX, level, level],
        2 => [0, level, 0],
        3 => [level, u8::MAX, level],
        4 => [0, 0, level],
        _ => [level, level, u8::MAX],
    }
}

/// 3/3/2 bit slice of a single byte
pub fn color(window: &[u8], _last: u8) -> Rgb {
    let b = window[0];
    [b & 0xe0, (b & 0x1c) << 3, (b & 0x03) << 6]
}

pub fn color16(window: &[u8], _last: u8) -> Rgb {
    let v = word16(window, Endian::Little);
    [
        ((v & 0xfc00) >> 8) as u8,
        ((v & 0x03c0) >> 2) as u8,
        ((v & 0x001f) << 3) as u8,
    ]
}

pub fn color32(window: &[u8], _last: u8) -> Rgb {
    let v = word32(window, Endian::Little);
    [
        ((v & 0xff00_0000) >> 24) as u8,
        ((v & 0x001f_e000) >> 13) as u8,
        ((v & 0x0000_01fe) >> 1) as u8,
    ]
}

pub fn rgb(window: &[u8], _last: u8) -> Rgb {
    [window[0], window[1], window[2]]
}

/// Differential, value and integral of the current byte against the previous one
pub fn dvi(window: &[u8], last: u8) -> Rgb {
    let b = window[0];
    let integral = (u16::from(b) + u16::from(last)) / 2;
    [b.abs_diff(last), b, integral as u8]
}

const fn x86_opcode(b: u8) -> u8 {
    match b {
        0x8b => FIRST,  // mov
        0xe8 => SECOND, // call
        0x85 => THIRD,  // test
        _ => 0,
    }
}

const fn english(b: u8) -> u8 {
    match b {
        b'e' => FIRST,
        b't' => SECOND,
        b'a' => THIRD,
        _ => 0,
    }
}

const fn small_binary(b: u8) -> u8 {
    match b {
        0x01 => FIRST,
        0x02 => SECOND,
        0x03 => THIRD,
        _ => 0,
    }
}

/// Grayscale, with red for common x86 opcodes, green for common english letters and
/// blue for small binary values
pub fn x86(window: &[u8], _last: u8) -> Rgb {
    let b = window[0];
    match [x86_opcode(b), english(b), small_binary(b)] {
        [0, 0, 0] => splat(b),
        hit => hit,
    }
}
