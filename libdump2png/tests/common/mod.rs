#![allow(dead_code)]

use std::io::{self, Read, Write};

use image::{ImageFormat, RgbImage};
use libdump2png::{build, ScanParams};

/// Renders `input` into an in-memory PNG
pub fn render_png(input: &[u8], params: &ScanParams) -> anyhow::Result<Vec<u8>> {
    let mut png = Vec::new();
    build(input, &mut png, params)?;
    Ok(png)
}

/// Renders `input` and decodes the resulting PNG
pub fn render(input: &[u8], params: &ScanParams) -> anyhow::Result<RgbImage> {
    let png = render_png(input, params)?;
    Ok(image::load_from_memory_with_format(&png, ImageFormat::Png)?.to_rgb8())
}

/// Pixels of row `y` of `img`
pub fn row(img: &RgbImage, y: u32) -> Vec<[u8; 3]> {
    (0..img.width()).map(|x| img.get_pixel(x, y).0).collect()
}

/// A sink accepting `budget` bytes and failing afterwards
pub struct FailingSink {
    pub budget: usize,
}

impl Write for FailingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.budget == 0 {
            return Err(io::Error::new(io::ErrorKind::Other, "sink is full"));
        }
        let n = buf.len().min(self.budget);
        self.budget -= n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A source failing with `kind` on every read
pub struct FailingSource {
    pub kind: io::ErrorKind,
}

impl Read for FailingSource {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(self.kind, "source failed"))
    }
}

/// A source returning one byte per read, interrupted before every byte
pub struct TrickleSource {
    pub data: Vec<u8>,
    pub pos: usize,
    pub interrupt: bool,
}

impl TrickleSource {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            pos: 0,
            interrupt: true,
        }
    }
}

impl Read for TrickleSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.interrupt {
            self.interrupt = false;
            return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"));
        }
        self.interrupt = true;
        match self.data.get(self.pos) {
            Some(&b) if !buf.is_empty() => {
                buf[0] = b;
                self.pos += 1;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}
