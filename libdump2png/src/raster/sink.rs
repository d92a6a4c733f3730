use std::io::Write;

use png::{BitDepth, ColorType, Encoder, StreamWriter, Writer};
use tracing::debug;

use crate::Error;

/// Keyword of the text chunk embedded in every image
pub const TITLE_KEYWORD: &str = "Title";
/// Text of the text chunk embedded in every image
pub const TITLE: &str = "dump2png";

/// Writes the PNG signature, an 8-bit RGB header and the title chunk to `sink`
///
/// The returned writer is handed to [`PngSink::new`] to stream the rows, and finished
/// with [`Writer::finish`] once the stream is complete.
///
/// # Errors
///
/// Returns [`Error::EncoderInit`] if the header cannot be encoded or written
pub fn png_writer<W: Write>(sink: W, width: u32, height: u32) -> Result<Writer<W>, Error> {
    let mut encoder = Encoder::new(sink, width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    encoder
        .add_text_chunk(TITLE_KEYWORD.to_owned(), TITLE.to_owned())
        .map_err(Error::EncoderInit)?;
    let writer = encoder.write_header().map_err(Error::EncoderInit)?;
    debug!("Wrote png header for {width}x{height}");
    Ok(writer)
}

/// Image data of a PNG, streamed one row at a time
///
/// Each call to [`Self::write_row`] streams one row of `width` pixels and [`Self::finish`]
/// flushes the remaining image data.
pub struct PngSink<'a, W: Write> {
    stream: StreamWriter<'a, W>,
    row_len: usize,
}

impl<'a, W: Write> PngSink<'a, W> {
    /// Starts the image data of `writer`
    ///
    /// # Errors
    ///
    /// Returns [`Error::EncoderInit`] if the data stream cannot be started
    pub fn new(writer: &'a mut Writer<W>, width: u32) -> Result<Self, Error> {
        let stream = writer.stream_writer().map_err(Error::EncoderInit)?;
        Ok(Self {
            stream,
            row_len: width as usize * 3,
        })
    }

    /// Streams one row of packed RGB bytes
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] if the underlying writer fails
    pub fn write_row(&mut self, y: u32, row: &[u8]) -> Result<(), Error> {
        debug_assert_eq!(row.len(), self.row_len);
        self.stream
            .write_all(row)
            .map_err(|source| Error::Write { row: y, source })
    }

    /// Completes the image data
    ///
    /// # Errors
    ///
    /// Returns [`Error::Finish`] if fewer rows than declared were written, or if the
    /// remaining data cannot be written
    pub fn finish(self) -> Result<(), Error> {
        self.stream.finish().map_err(Error::Finish)
    }
}
