use std::{
    fs::{self, File},
    io::{BufWriter, Seek, SeekFrom, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use libdump2png::{build, plan_height, Palette, ScanParams};
use tracing::{debug, info, instrument, warn};

/// Default output file name
pub const DEFAULT_OUTPUT: &str = "dump2png.png";
/// Default image width in pixels
pub const DEFAULT_WIDTH: u32 = 1024;
/// Default maximum image height in pixels
pub const DEFAULT_HEIGHT: u32 = 1024 * 10;

/// Options for rendering a file, as given on the command line
#[derive(Debug, Clone)]
pub struct DumpOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    /// Maximum height, or the exact height when `autoscale` is off
    pub height: u32,
    pub palette: Palette,
    pub skip: u32,
    pub zoom: u32,
    pub seek: u64,
    pub mask: bool,
    pub autoscale: bool,
}

impl DumpOptions {
    /// Options with the command line defaults for `input`
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            output: PathBuf::from(DEFAULT_OUTPUT),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            palette: Palette::default(),
            skip: 1,
            zoom: 1,
            seek: 0,
            mask: true,
            autoscale: true,
        }
    }
}

/// Renders `options.input` into a PNG at `options.output`
///
/// The output file is removed if rendering fails.
#[instrument]
pub fn dump_to_png(options: &DumpOptions) -> Result<ScanParams> {
    let mut params = ScanParams::builder()
        .width(options.width)
        .height(options.height)
        .palette(options.palette)
        .skip(options.skip)
        .zoom(options.zoom)
        .mask(options.mask)
        .build();
    params.validate()?;

    let total = fs::metadata(&options.input)
        .with_context(|| format!("Can't access {}", options.input.display()))?
        .len();
    let available = total.saturating_sub(options.seek);
    debug!("{available} of {total} bytes after seek");

    let plan = plan_height(
        available,
        params.width,
        params.stride(),
        options.height,
        options.autoscale,
    );
    if let Some(truncation) = plan.truncated {
        warn!(
            "Truncating height: showing {} of {} bytes. Use -h to allow larger heights.",
            truncation.shown, truncation.total
        );
    }
    params.height = plan.height;
    debug!("Image covers {} bytes", params.shown_bytes());
    info!(
        "Output image: height:{}, width:{}",
        params.height, params.width
    );

    let mut input = File::open(&options.input)
        .with_context(|| format!("Can't read {}", options.input.display()))?;
    if options.seek > 0 {
        input
            .seek(SeekFrom::Start(options.seek))
            .context("Seek failed")?;
    }

    let output = File::options()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&options.output)
        .with_context(|| format!("Could not write to {}", options.output.display()))?;

    info!("Writing {}...", options.output.display());
    let mut output = BufWriter::new(output);
    let written = build(input, &mut output, &params)
        .map_err(anyhow::Error::from)
        .and_then(|()| output.flush().context("Flush output"));
    if let Err(e) = written {
        drop(output);
        if let Err(remove) = fs::remove_file(&options.output) {
            warn!("Unable to remove {}: {remove}", options.output.display());
        }
        return Err(e.context("Error during png creation"));
    }
    info!("Successfully wrote {}", options.output.display());
    Ok(params)
}
