use std::{fs::File, io, io::BufWriter, path::Path};

mod common;
use common::{render, render_png, row, FailingSink, FailingSource, TrickleSource};
use libdump2png::{build, Error, Palette, Raster, ScanParams, TITLE, TITLE_KEYWORD};
use mktemp::Temp;

const BLACK: [u8; 3] = [0, 0, 0];

fn gray(width: u32, height: u32) -> ScanParams {
    ScanParams::builder()
        .width(width)
        .height(height)
        .palette(Palette::Gray)
        .mask(false)
        .build()
}

#[test]
fn exact_input_fills_raster() -> anyhow::Result<()> {
    let input: Vec<u8> = (0..10).map(|i| i * 20).collect();
    let img = render(&input, &gray(5, 2))?;
    assert_eq!((img.width(), img.height()), (5, 2));
    for y in 0..2 {
        let expected: Vec<_> = input[y * 5..y * 5 + 5].iter().map(|&b| [b; 3]).collect();
        assert_eq!(row(&img, y as u32), expected);
    }
    Ok(())
}

#[test]
fn short_input_is_black_filled() -> anyhow::Result<()> {
    let img = render(&[7, 8, 9], &gray(5, 2))?;
    assert_eq!(row(&img, 0), vec![[7; 3], [8; 3], [9; 3], BLACK, BLACK]);
    assert_eq!(row(&img, 1), vec![BLACK; 5]);
    Ok(())
}

#[test]
fn empty_input_is_black() -> anyhow::Result<()> {
    let img = render(&[], &gray(3, 3))?;
    assert!(img.pixels().all(|p| p.0 == BLACK));
    Ok(())
}

#[test]
fn incomplete_window_is_black() -> anyhow::Result<()> {
    let params = ScanParams::builder()
        .width(2)
        .height(1)
        .palette(Palette::Rgb)
        .mask(false)
        .build();
    let img = render(&[1, 2, 3, 4, 5], &params)?;
    assert_eq!(row(&img, 0), vec![[1, 2, 3], BLACK]);
    Ok(())
}

#[test]
fn zoom_averages_samples() -> anyhow::Result<()> {
    let params = ScanParams::builder()
        .width(2)
        .height(1)
        .palette(Palette::Gray)
        .zoom(4)
        .mask(false)
        .build();
    let img = render(&[100, 100, 100, 100, 0, 0, 0, 255], &params)?;
    assert_eq!(row(&img, 0), vec![[100; 3], [63; 3]]);
    Ok(())
}

#[test]
fn zoom_of_partial_group_counts_missing_samples_as_zero() -> anyhow::Result<()> {
    let params = ScanParams::builder()
        .width(2)
        .height(1)
        .palette(Palette::Gray)
        .zoom(4)
        .mask(false)
        .build();
    // (50 + 70) / 4
    let img = render(&[10, 20, 30, 40, 50, 70], &params)?;
    assert_eq!(row(&img, 0), vec![[25; 3], [30; 3]]);

    let mut raster = Raster::new(&[10u8, 20, 30, 40, 50, 70][..], params)?;
    assert_eq!(raster.next_row(0)?, &[[25; 3], [30; 3]]);
    Ok(())
}

#[test]
fn zoom_spans_wide_windows() -> anyhow::Result<()> {
    let params = ScanParams::builder()
        .width(1)
        .height(1)
        .palette(Palette::Gray16b)
        .zoom(2)
        .mask(false)
        .build();
    let img = render(&[10, 0xff, 30, 0xff], &params)?;
    assert_eq!(row(&img, 0), vec![[20; 3]]);
    Ok(())
}

#[test]
fn skip_shows_one_out_of_n_lines() -> anyhow::Result<()> {
    let params = ScanParams::builder()
        .width(2)
        .height(2)
        .palette(Palette::Gray)
        .skip(2)
        .mask(false)
        .build();
    let input: Vec<u8> = (0..8).map(|i| i * 10).collect();
    let img = render(&input, &params)?;
    assert_eq!(row(&img, 0), vec![[0; 3], [10; 3]]);
    assert_eq!(row(&img, 1), vec![[40; 3], [50; 3]]);
    Ok(())
}

#[test]
fn mask_is_on_by_default() -> anyhow::Result<()> {
    let params = ScanParams::builder()
        .width(3)
        .height(1)
        .palette(Palette::Gray)
        .build();
    assert!(params.mask);
    let img = render(&[255, 1, 128], &params)?;
    assert_eq!(row(&img, 0), vec![[254; 3], [0; 3], [128; 3]]);
    Ok(())
}

#[test]
fn mask_applies_after_averaging() -> anyhow::Result<()> {
    let params = ScanParams::builder()
        .width(1)
        .height(1)
        .palette(Palette::Gray)
        .zoom(2)
        .build();
    // (254 + 255) / 2 = 254, (3 + 4) / 2 = 3 -> 2
    assert_eq!(row(&render(&[254, 255], &params)?, 0), vec![[254; 3]]);
    assert_eq!(row(&render(&[3, 4], &params)?, 0), vec![[2; 3]]);
    Ok(())
}

#[test]
fn dvi_previous_byte_starts_at_zero_and_carries_across_rows() -> anyhow::Result<()> {
    let params = ScanParams::builder()
        .width(1)
        .height(2)
        .palette(Palette::Dvi)
        .mask(false)
        .build();
    let img = render(&[10, 30], &params)?;
    assert_eq!(row(&img, 0), vec![[10, 10, 5]]);
    assert_eq!(row(&img, 1), vec![[20, 30, 20]]);
    Ok(())
}

#[test]
fn dvi_previous_byte_follows_every_sample() -> anyhow::Result<()> {
    let params = ScanParams::builder()
        .width(2)
        .height(1)
        .palette(Palette::Dvi)
        .zoom(2)
        .mask(false)
        .build();
    // samples: (10, last 0) (20, last 10) | (40, last 20) (40, last 40)
    let img = render(&[10, 20, 40, 40], &params)?;
    assert_eq!(row(&img, 0), vec![[10, 15, 10], [10, 40, 35]]);
    Ok(())
}

#[test]
fn title_chunk_is_embedded() -> anyhow::Result<()> {
    let png = render_png(&[1, 2, 3, 4], &gray(2, 2))?;
    let reader = png::Decoder::new(png.as_slice()).read_info()?;
    let info = reader.info();
    assert_eq!((info.width, info.height), (2, 2));
    assert_eq!(info.color_type, png::ColorType::Rgb);
    assert_eq!(info.bit_depth, png::BitDepth::Eight);
    assert!(info
        .uncompressed_latin1_text
        .iter()
        .any(|chunk| chunk.keyword == TITLE_KEYWORD && chunk.text == TITLE));
    Ok(())
}

#[test]
fn borrowed_sink_holds_one_complete_image() -> anyhow::Result<()> {
    let mut png = Vec::new();
    build(&[1u8, 2, 3, 4][..], &mut png, &gray(2, 2))?;
    assert!(png.ends_with(b"IEND\xae\x42\x60\x82"));
    assert_eq!(png.windows(4).filter(|w| *w == b"IEND").count(), 1);

    // the sink is still owned by the caller after the build
    png.clear();
    build(&[5u8, 6][..], &mut png, &gray(2, 1))?;
    let img = image::load_from_memory(&png)?.to_rgb8();
    assert_eq!(row(&img, 0), vec![[5; 3], [6; 3]]);
    Ok(())
}

fn render_to_file(input: &[u8], params: &ScanParams, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let out = BufWriter::new(File::create(path)?);
    build(input, out, params)?;
    Ok(())
}

#[test]
fn identical_runs_are_byte_identical() -> anyhow::Result<()> {
    let input: Vec<u8> = (0..4096u32).map(|i| (i * 7 % 251) as u8).collect();
    for palette in [Palette::X86, Palette::Dvi, Palette::Color32] {
        let params = ScanParams::builder()
            .width(32)
            .height(16)
            .palette(palette)
            .zoom(2)
            .build();
        let (first, second) = (Temp::new_file()?, Temp::new_file()?);
        render_to_file(&input, &params, &first)?;
        render_to_file(&input, &params, &second)?;
        assert_eq!(sha256::try_digest(&first)?, sha256::try_digest(&second)?);
    }
    Ok(())
}

#[test]
fn rows_match_raster_output() -> anyhow::Result<()> {
    let input: Vec<u8> = (0..=255).collect();
    let params = ScanParams::builder()
        .width(16)
        .height(16)
        .palette(Palette::Hues6)
        .build();
    let img = render(&input, &params)?;
    let mut raster = Raster::new(input.as_slice(), params)?;
    for y in 0..16 {
        assert_eq!(raster.next_row(y)?, row(&img, y).as_slice());
    }
    Ok(())
}

#[test]
fn interrupted_reads_are_retried() -> anyhow::Result<()> {
    let source = TrickleSource::new(vec![1, 2, 3, 4, 5, 6]);
    let mut raster = Raster::new(source, gray(3, 2))?;
    assert_eq!(raster.next_row(0)?, &[[1; 3], [2; 3], [3; 3]]);
    assert_eq!(raster.next_row(1)?, &[[4; 3], [5; 3], [6; 3]]);
    assert_eq!(raster.next_row(2)?, &[BLACK; 3]);
    Ok(())
}

#[test]
fn zero_parameters_are_rejected() {
    let mut params = gray(5, 2);
    params.zoom = 0;
    let err = build(&[0u8; 4][..], Vec::new(), &params).unwrap_err();
    assert!(matches!(err, Error::ZeroParameter("zoom")));

    let mut params = gray(5, 2);
    params.width = 0;
    assert!(matches!(params.validate(), Err(Error::ZeroParameter("width"))));
}

#[test]
fn source_errors_are_fatal() {
    let source = FailingSource {
        kind: io::ErrorKind::PermissionDenied,
    };
    let err = build(source, Vec::new(), &gray(2, 2)).unwrap_err();
    assert!(matches!(err, Error::Read { row: 0, .. }));
}

#[test]
fn sink_rejecting_header_fails_init() {
    let err = build(&[0u8; 4][..], FailingSink { budget: 0 }, &gray(2, 2)).unwrap_err();
    assert!(matches!(err, Error::EncoderInit(_)));
}

#[test]
fn sink_failing_mid_stream_is_fatal() {
    let input: Vec<u8> = (0..64 * 64u32).map(|i| (i * 31 % 256) as u8).collect();
    let err = build(input.as_slice(), FailingSink { budget: 64 }, &gray(64, 64)).unwrap_err();
    assert!(matches!(err, Error::Write { .. } | Error::Finish(_)));
}

#[test]
fn oversized_rows_fail_allocation() {
    let params = ScanParams::builder()
        .width(u32::MAX)
        .height(1)
        .palette(Palette::Rgb)
        .skip(u32::MAX)
        .zoom(u32::MAX)
        .build();
    let err = build(&[0u8; 4][..], Vec::new(), &params).unwrap_err();
    assert!(matches!(err, Error::Allocation { .. }));
}
