use dump2png::{dump_to_png, DumpOptions, DEFAULT_HEIGHT, DEFAULT_OUTPUT, DEFAULT_WIDTH};
use libdump2png::Palette;
use std::{fmt::Write, path::PathBuf};
use tracing::{debug, Level};

use anyhow::Result;
use clap::{ArgAction, CommandFactory, FromArgMatches, Parser};

#[cfg(not(debug_assertions))]
const DEFAULT_DEBUG_LEVEL: u8 = 2;
#[cfg(debug_assertions)]
const DEFAULT_DEBUG_LEVEL: u8 = 99;

const X86_INDICATORS: &str = "\
x86 color indicators:
    green = common english chars: 'e', 't', 'a'
    red = common x86 instructions: movl, call, testl
    blue = binary values: 0x01, 0x02, 0x03";

/// Visualize file data as a png. Intended for memory dumps.
///
/// By default, the least significant bit of every channel is masked, so that the image
/// can't be converted back to the input file. Use -M to disable masking.
#[derive(Parser)]
#[command(version, about, disable_help_flag = true)]
struct Cli {
    /// Turn debugging information on
    #[arg(short, long, default_value_t = DEFAULT_DEBUG_LEVEL, action = ArgAction::Count)]
    verbosity: u8,

    /// Print help
    #[arg(long, action = ArgAction::HelpLong)]
    help: Option<bool>,

    /// Don't autoscale height
    #[arg(short = 'H')]
    no_autoscale: bool,

    /// Don't mask least significant bit
    #[arg(short = 'M')]
    no_mask: bool,

    /// Image width in pixels
    #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
    width: u32,

    /// Maximum image height in pixels (the exact height with -H)
    #[arg(short = 'h', long = "height", default_value_t = DEFAULT_HEIGHT)]
    height_max: u32,

    /// Palette type for colorization
    #[arg(short, long, default_value_t = Palette::X86)]
    palette: Palette,

    /// The output file name
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Skips horizontal lines; eg, 3 means show 1 out of 3
    #[arg(short = 'k', long = "skip", default_value_t = 1)]
    skip_factor: u32,

    /// The byte offset of the infile to begin reading
    #[arg(short = 's', long = "seek", default_value_t = 0)]
    seek_bytes: u64,

    /// Averages multiple bytes; eg, 16 averages 16 as 1
    #[arg(short = 'z', long = "zoom", default_value_t = 1)]
    zoom_factor: u32,

    /// The file to visualize
    file: PathBuf,
}

fn palette_help() -> String {
    let mut help = String::from("Palette types:\n");
    for palette in Palette::all() {
        let _ = writeln!(help, "    {:<12}{}", palette.as_str(), palette.description());
    }
    help.push('\n');
    help.push_str(X86_INDICATORS);
    help
}

fn command() -> clap::Command {
    Cli::command().after_long_help(palette_help())
}

const fn verbosity_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

impl Cli {
    fn into_options(self) -> DumpOptions {
        DumpOptions {
            output: self.output,
            width: self.width,
            height: self.height_max,
            palette: self.palette,
            skip: self.skip_factor,
            zoom: self.zoom_factor,
            seek: self.seek_bytes,
            mask: !self.no_mask,
            autoscale: !self.no_autoscale,
            ..DumpOptions::new(self.file)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::from_arg_matches(&command().get_matches())?;
    tracing_subscriber::fmt()
        .with_max_level(verbosity_level(cli.verbosity))
        .with_file(true)
        .with_line_number(true)
        .init();

    let params = dump_to_png(&cli.into_options())?;
    debug!("Rendered with {params:?}");
    Ok(())
}
