//! A 2D RGBA pixel buffer, row-major.

/// Row-major RGBA pixels for one frame or a whole packed sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel data in row-major RGBA format. Length = `width * height * 4`.
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Set a single pixel.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let idx = self.offset(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&rgba);
    }

    /// Get a single pixel.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = self.offset(x, y);
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Fill the pixels of the rectangle at `(x, y)` of size `w × h` for which
    /// `keep` holds, clipped to the buffer.
    pub fn fill_rect_where(
        &mut self,
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        rgba: [u8; 4],
        keep: impl Fn(u32, u32) -> bool,
    ) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for py in y..y_end {
            for px in x..x_end {
                if keep(px, py) {
                    self.set_pixel(px, py, rgba);
                }
            }
        }
    }

    /// Copy all of `src` into this buffer with its top-left corner at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `src` does not fit.
    pub fn blit(&mut self, src: &PixelBuffer, x: u32, y: u32) {
        assert!(
            x + src.width <= self.width && y + src.height <= self.height,
            "blit of {}x{} at ({x}, {y}) exceeds {}x{}",
            src.width,
            src.height,
            self.width,
            self.height
        );
        let row_bytes = src.width as usize * 4;
        for row in 0..src.height {
            let from = src.offset(0, row);
            let to = self.offset(x, y + row);
            self.pixels[to..to + row_bytes].copy_from_slice(&src.pixels[from..from + row_bytes]);
        }
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels with non-zero alpha.
    pub fn opaque_pixel_count(&self) -> usize {
        self.pixels.chunks_exact(4).filter(|p| p[3] > 0).count()
    }
}
