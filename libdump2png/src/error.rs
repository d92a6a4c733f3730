use std::{collections::TryReserveError, io};
use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
/// Possible `libdump2png` errors
pub enum Error {
    /// Error returned if the row buffers cannot be allocated
    #[error("unable to allocate row buffers of {bytes} bytes")]
    Allocation {
        /// requested buffer size, saturated at [`usize::MAX`]
        bytes: usize,
        /// underlying allocator error
        #[source]
        source: Option<TryReserveError>,
    },
    /// Error returned if the PNG header or encoder cannot be created
    #[error("unable to initialize png encoder")]
    EncoderInit(#[source] png::EncodingError),
    /// Error returned if the sink rejects a row
    #[error("unable to write png row {row}")]
    Write {
        /// index of the row being written
        row: u32,
        /// underlying io error
        #[source]
        source: io::Error,
    },
    /// Error returned if the image trailer cannot be written
    #[error("unable to finish png stream")]
    Finish(#[source] png::EncodingError),
    /// Error returned if the byte source fails with something other than end of data
    #[error("unable to read input for row {row}")]
    Read {
        /// index of the row being read
        row: u32,
        /// underlying io error
        #[source]
        source: io::Error,
    },
    /// Error returned if a palette name is not recognized
    #[error("invalid palette: {0:?}")]
    InvalidPalette(String),
    /// Error returned if a scan parameter that must be positive is zero
    #[error("{0} must be greater than zero")]
    ZeroParameter(&'static str),
}
