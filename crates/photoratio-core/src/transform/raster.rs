//! RGB working buffer used for the intermediate and output rasters.

use crate::color::Color;

/// An opaque RGB8 raster in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    /// RGB pixel data (3 bytes per pixel). Length is `width * height * 3`.
    pub pixels: Vec<u8>,
}

impl Raster {
    /// Allocate a raster with every pixel set to `fill`.
    ///
    /// Rasters are never handed out uninitialized: anything not drawn over
    /// afterwards is guaranteed to be the fill color.
    pub fn filled(width: u32, height: u32, fill: Color) -> Self {
        let rgb = fill.to_rgb();
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * 3);
        for _ in 0..count {
            pixels.extend_from_slice(&rgb);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 3
    }

    /// RGB value at `(x, y)`. Coordinates must be in bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = self.index(x, y);
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }

    #[inline]
    pub fn put(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let idx = self.index(x, y);
        self.pixels[idx..idx + 3].copy_from_slice(&rgb);
    }

    /// Borrow one row of pixels.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = self.index(0, y);
        &self.pixels[start..start + self.width as usize * 3]
    }
}
