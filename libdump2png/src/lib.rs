//! # libdump2png
//!
//!
//! This library renders arbitrary binary data, typically process memory dumps, as an 8-bit
//! RGB PNG image so that patterns in large blobs can be inspected visually. Every pixel is
//! produced from one or more raw bytes through a [`Palette`].
//!
//! The input is treated as an undifferentiated stream of bytes: there is no knowledge of
//! memory layout, symbols or object boundaries. For serious core dump analysis, look for
//! tools that read the metadata and structure of the dump.
//!
//! ### Rendering
//!
//! The image is built one row at a time, top to bottom. Each row reads
//! `width * bytes_per_pixel * skip * zoom` bytes from the source:
//! - every destination pixel averages `zoom` consecutive samples of `bytes_per_pixel` bytes
//! - only the first `1 / skip` of the bytes read are shown, the rest are discarded
//! - pixels past the end of the input are black
//!
//! Each row is written to the sink as soon as it is complete, so the full image is never held
//! in memory.
//!
//! ### Masking
//!
//! By default the least significant bit of every channel is cleared, so that the image can't
//! be converted back into the input and leak its exact contents. Set [`ScanParams::mask`] to
//! `false` to keep all bits.
//!
//! ### Usage
//!
//! ```rust
//! use libdump2png::{build, Palette, ScanParams};
//!
//! fn main() -> anyhow::Result<()> {
//!     let dump: Vec<u8> = (0..=255).collect();
//!     let params = ScanParams::builder()
//!         .width(16)
//!         .height(16)
//!         .palette(Palette::Gray)
//!         .build();
//!
//!     let mut png = Vec::new();
//!     build(dump.as_slice(), &mut png, &params)?;
//!     assert_eq!(&png[1..4], b"PNG");
//!     Ok(())
//! }
//! ```
//!
//! The height needed to show a whole input can be computed beforehand with [`plan_height`].
//!

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    missing_docs
)]

mod error;
/// Module containing the palettes mapping raw bytes to colors
pub mod palette;
/// Module containing the row-by-row image builder
pub mod raster;

pub use error::Error;
pub use palette::{mask, Palette, Rgb};
pub use raster::height::{plan_height, HeightPlan, Truncation};
pub use raster::sink::{png_writer, PngSink, TITLE, TITLE_KEYWORD};
pub use raster::{build, Raster, ScanParams};
