pub(crate) mod height;
pub(crate) mod sink;
mod source;

use std::io::{Read, Write};

use bon::Builder;
use tracing::{debug, info, instrument, trace};

use crate::{
    palette::{mask, MapFn, Palette, Rgb},
    Error,
};
use sink::{png_writer, PngSink};
use source::fill_buffer;

const BLACK: Rgb = [0, 0, 0];

/// Parameters fixed for the duration of a scan
#[derive(Builder, Debug, Eq, PartialEq, Copy, Clone)]
#[non_exhaustive]
pub struct ScanParams {
    /// Pixels per row
    pub width: u32,
    /// Number of rows
    pub height: u32,
    /// The palette used to colorize each sample
    #[builder(default)]
    pub palette: Palette,
    /// Number of rows of input consumed per image row; only the first is shown
    #[builder(default = 1)]
    pub skip: u32,
    /// Number of samples averaged into one pixel
    #[builder(default = 1)]
    pub zoom: u32,
    /// Clear the least significant bit of every channel
    #[builder(default = true)]
    pub mask: bool,
}

impl ScanParams {
    /// Checks that width, height, skip and zoom are all non-zero
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroParameter`] naming the first zero parameter
    pub fn validate(&self) -> Result<(), Error> {
        if self.width == 0 {
            return Err(Error::ZeroParameter("width"));
        }
        if self.height == 0 {
            return Err(Error::ZeroParameter("height"));
        }
        if self.skip == 0 {
            return Err(Error::ZeroParameter("skip"));
        }
        if self.zoom == 0 {
            return Err(Error::ZeroParameter("zoom"));
        }
        Ok(())
    }

    /// Input bytes consumed per destination pixel: `bytes_per_pixel * skip * zoom`
    #[must_use]
    pub fn stride(&self) -> u64 {
        (self.palette.bytes_per_pixel() as u64)
            .saturating_mul(u64::from(self.skip))
            .saturating_mul(u64::from(self.zoom))
    }

    /// Input bytes consumed per row
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the row does not fit in memory
    pub fn row_bytes(&self) -> Result<usize, Error> {
        self.stride()
            .checked_mul(u64::from(self.width))
            .and_then(|n| usize::try_from(n).ok())
            .ok_or(Error::Allocation {
                bytes: usize::MAX,
                source: None,
            })
    }

    /// Input bytes covered by the whole image
    #[must_use]
    pub fn shown_bytes(&self) -> u64 {
        self.stride()
            .saturating_mul(u64::from(self.width))
            .saturating_mul(u64::from(self.height))
    }
}

/// Scan state: the byte source, the reused buffers and the previous raw byte
pub struct Raster<R> {
    source: R,
    params: ScanParams,
    mapper: MapFn,
    input: Vec<u8>,
    row: Vec<Rgb>,
    /// The most recently mapped raw byte, starting at 0
    last: u8,
}

fn try_alloc<T: Clone>(len: usize, value: T) -> Result<Vec<T>, Error> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|e| Error::Allocation {
        bytes: len.saturating_mul(std::mem::size_of::<T>()),
        source: Some(e),
    })?;
    buf.resize(len, value);
    Ok(buf)
}

impl<R: Read> Raster<R> {
    /// Validates `params` and allocates the row buffers
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroParameter`] for invalid parameters and [`Error::Allocation`] if
    /// either buffer cannot be allocated
    pub fn new(source: R, params: ScanParams) -> Result<Self, Error> {
        params.validate()?;
        let row_bytes = params.row_bytes()?;
        let input = try_alloc(row_bytes, 0u8)?;
        let row = try_alloc(params.width as usize, BLACK)?;
        debug!(
            "Allocated {row_bytes} byte input buffer for {} pixel rows",
            params.width
        );
        Ok(Self {
            source,
            mapper: params.palette.mapper(),
            params,
            input,
            row,
            last: 0,
        })
    }

    /// Reads and renders the next row
    ///
    /// A short read is not an error: pixels without a complete sample are black.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if the source fails
    pub fn next_row(&mut self, y: u32) -> Result<&[Rgb], Error> {
        let read = fill_buffer(&mut self.source, &mut self.input)
            .map_err(|source| Error::Read { row: y, source })?;
        trace!("row {y}: read {read} bytes");
        self.render(read);
        Ok(&self.row)
    }

    /// Maps the first `available` bytes of the input buffer into the row buffer
    fn render(&mut self, available: usize) {
        let bpp = self.params.palette.bytes_per_pixel();
        let zoom = self.params.zoom as usize;
        let divisor = u64::from(self.params.zoom);
        // Only the first width * zoom windows are shown, the rest of the read is skipped
        let mut windows = self.input[..available].chunks_exact(bpp);

        let mut filled = 0;
        for pixel in &mut self.row {
            let mut sum = [0u64; 3];
            let mut sampled = false;
            for window in windows.by_ref().take(zoom) {
                let rgb = (self.mapper)(window, self.last);
                self.last = window[bpp - 1];
                for (acc, channel) in sum.iter_mut().zip(rgb) {
                    *acc += u64::from(channel);
                }
                sampled = true;
            }
            if !sampled {
                break;
            }
            // missing samples of a short read count as 0
            let rgb = sum.map(|acc| u8::try_from(acc / divisor).unwrap_or(u8::MAX));
            *pixel = if self.params.mask { mask(rgb) } else { rgb };
            filled += 1;
        }
        self.row[filled..].fill(BLACK);
    }
}

/// Renders `params.height` rows of `source` into a PNG written to `sink`
///
/// Rows are streamed to the sink as soon as they are rendered. On error the sink may hold
/// a partial image, which should be discarded.
///
/// # Errors
///
/// - [`Error::ZeroParameter`] if width, height, skip or zoom is zero
/// - [`Error::Allocation`] if the row buffers cannot be allocated
/// - [`Error::EncoderInit`] if the PNG header cannot be written
/// - [`Error::Read`] if the source fails
/// - [`Error::Write`] or [`Error::Finish`] if the sink fails
#[instrument(skip(source, sink))]
pub fn build<R: Read, W: Write>(source: R, sink: W, params: &ScanParams) -> Result<(), Error> {
    let mut raster = Raster::new(source, *params)?;
    let mut writer = png_writer(sink, params.width, params.height)?;

    let mut png = PngSink::new(&mut writer, params.width)?;
    for y in 0..params.height {
        let row = raster.next_row(y)?;
        png.write_row(y, row.as_flattened())?;
    }
    png.finish()?;
    writer.finish().map_err(Error::Finish)?;
    info!(
        "Wrote {}x{} image with {} palette",
        params.width, params.height, params.palette
    );
    Ok(())
}
