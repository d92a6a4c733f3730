mod map;
mod word;

use std::{fmt::Display, str::FromStr};

use strum::{EnumIter, EnumMessage, IntoEnumIterator, IntoStaticStr};

use crate::Error;

pub use word::{word16, word32, Endian};

/// An 8-bit RGB triple
pub type Rgb = [u8; 3];

/// A pure mapping from a byte window (and the previous raw byte) to an [`Rgb`] triple
pub type MapFn = fn(&[u8], u8) -> Rgb;

/// Mask applied to each channel when masking is enabled
pub const CHANNEL_MASK: u8 = 0xfe;

#[derive(
    Default, Debug, Eq, PartialEq, Hash, Copy, Clone, IntoStaticStr, EnumIter, EnumMessage,
)]
#[strum(serialize_all = "lowercase")]
/// The colorization strategies available for rendering a dump
pub enum Palette {
    /// Grayscale, one byte per pixel
    #[strum(message = "grayscale, per byte")]
    Gray,
    /// Grayscale of the most significant byte of a big-endian `u16`
    #[strum(message = "grayscale, per short (big-endian)")]
    Gray16b,
    /// Grayscale of the most significant byte of a big-endian `u32`
    #[strum(message = "grayscale, per long (big-endian)")]
    Gray32b,
    /// Grayscale of the most significant byte of a little-endian `u16`
    #[strum(message = "grayscale, per short (little-endian)")]
    Gray16l,
    /// Grayscale of the most significant byte of a little-endian `u32`
    #[strum(message = "grayscale, per long (little-endian)")]
    Gray32l,
    /// Three hue bands, safe to average under zoom
    #[strum(message = "map to 3 hue ranges (rgb), per byte (zoom safe)")]
    Hues,
    /// Six hue bands (red, green, blue, cyan, magenta, yellow)
    #[strum(message = "map to 6 hue ranges (rgbcmy), per byte")]
    Hues6,
    /// Six bands forming a full hue wheel
    #[strum(message = "map to 3 full hue ranges (rgb), per byte (zoom safe)")]
    Fhues,
    /// Bit-sliced false color of a byte
    #[strum(message = "full colorized scale, per byte")]
    Color,
    /// Bit-sliced false color of a little-endian `u16`
    #[strum(message = "full colorized scale, per short (16-bit)")]
    Color16,
    /// Bit-sliced false color of a little-endian `u32`
    #[strum(message = "full colorized scale, per long (32-bit)")]
    Color32,
    /// Three sequential bytes used as red, green and blue
    #[strum(message = "treat 3 sequential bytes as RGB")]
    Rgb,
    /// Differential, value and integral against the previous byte
    #[strum(message = "use RGB to convey differential, value, integral")]
    Dvi,
    /// Grayscale with color indicators for x86 opcodes, english text and small binary values
    #[default]
    #[strum(message = "grayscale with some (9) color indicators")]
    X86,
}

impl Palette {
    /// Returns the lower-case palette name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        Into::<&'static str>::into(self)
    }

    /// Returns an iterator over every palette
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    /// Returns a one-line description of the palette
    #[must_use]
    pub fn description(self) -> &'static str {
        self.get_message().unwrap_or_default()
    }

    /// Number of raw bytes consumed for one sample of this palette
    #[must_use]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Gray16b | Self::Gray16l | Self::Color16 => 2,
            Self::Gray32b | Self::Gray32l | Self::Color32 => 4,
            _ => 1,
        }
    }

    /// Resolves the mapping function for this palette
    ///
    /// Intended to be called once per scan, the returned function is then applied to every
    /// sample.
    #[must_use]
    pub fn mapper(self) -> MapFn {
        match self {
            Self::Gray => map::gray,
            Self::Gray16b => map::gray16b,
            Self::Gray32b => map::gray32b,
            Self::Gray16l => map::gray16l,
            Self::Gray32l => map::gray32l,
            Self::Hues => map::hues,
            Self::Hues6 => map::hues6,
            Self::Fhues => map::fhues,
            Self::Color => map::color,
            Self::Color16 => map::color16,
            Self::Color32 => map::color32,
            Self::Rgb => map::rgb,
            Self::Dvi => map::dvi,
            Self::X86 => map::x86,
        }
    }

    /// Maps a single window
    ///
    /// `last` is the raw byte preceding the window, only used by [`Palette::Dvi`].
    ///
    /// # Panics
    ///
    /// Panics if `window` is shorter than [`Self::bytes_per_pixel`]
    #[must_use]
    pub fn map(self, window: &[u8], last: u8) -> Rgb {
        self.mapper()(window, last)
    }
}

impl FromStr for Palette {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .find(|palette| palette.as_str() == s)
            .ok_or_else(|| Error::InvalidPalette(s.to_owned()))
    }
}

impl Display for Palette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clears the least significant bit of each channel
///
/// The result cannot be converted back into the exact input bytes.
#[must_use]
pub const fn mask(rgb: Rgb) -> Rgb {
    [
        rgb[0] & CHANNEL_MASK,
        rgb[1] & CHANNEL_MASK,
        rgb[2] & CHANNEL_MASK,
    ]
}
