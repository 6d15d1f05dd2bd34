//! Packed horizontal filmstrips and their frame metadata.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::Xxh3;

use crate::buffer::PixelBuffer;

/// One frame's rectangle within a sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteFrame {
    pub index: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Runtime frame lookup for a rotation angle in radians.
///
/// `floor(normalizedAngle / 2π * frameCount) mod frameCount`; negative and
/// oversized angles wrap.
pub fn frame_index_for_angle(angle: f64, frame_count: u32) -> u32 {
    if frame_count == 0 || !angle.is_finite() {
        return 0;
    }
    let normalized = angle.rem_euclid(TAU);
    ((normalized / TAU * frame_count as f64).floor() as u32) % frame_count
}

/// Every frame of one sprite laid out left to right.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteSheet {
    pub image: PixelBuffer,
    pub frame_width: u32,
    pub frame_height: u32,
    pub frame_count: u32,
    pub frames: Vec<SpriteFrame>,
}

impl SpriteSheet {
    /// A transparent sheet with frame metadata filled in.
    pub(crate) fn new(frame_width: u32, frame_height: u32, frame_count: u32) -> Self {
        let frames = (0..frame_count)
            .map(|index| SpriteFrame {
                index,
                x: index * frame_width,
                y: 0,
                width: frame_width,
                height: frame_height,
            })
            .collect();
        Self {
            image: PixelBuffer::new(frame_width * frame_count, frame_height),
            frame_width,
            frame_height,
            frame_count,
            frames,
        }
    }

    /// Copy a rendered frame into its slot.
    pub(crate) fn place(&mut self, index: u32, frame: &PixelBuffer) {
        self.image.blit(frame, index * self.frame_width, 0);
    }

    /// Total width of the strip.
    pub fn width(&self) -> u32 {
        self.image.width
    }

    pub fn height(&self) -> u32 {
        self.image.height
    }

    pub fn frame(&self, index: u32) -> Option<&SpriteFrame> {
        self.frames.get(index as usize)
    }

    /// The frame to show for a rotation angle.
    pub fn frame_for_angle(&self, angle: f64) -> Option<&SpriteFrame> {
        self.frame(frame_index_for_angle(angle, self.frame_count))
    }

    /// A pixel addressed within one frame.
    pub fn frame_pixel(&self, index: u32, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(index * self.frame_width + x, y)
    }

    /// Copy one frame out of the strip.
    pub fn extract_frame(&self, index: u32) -> Option<PixelBuffer> {
        let frame = self.frame(index)?;
        let mut out = PixelBuffer::new(frame.width, frame.height);
        for y in 0..frame.height {
            for x in 0..frame.width {
                out.set_pixel(x, y, self.image.get_pixel(frame.x + x, frame.y + y));
            }
        }
        Some(out)
    }

    /// The strip as an `image` buffer for encoding. `None` if the pixel data
    /// does not match the strip's dimensions.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.image.width, self.image.height, self.image.pixels.clone())
    }

    /// XXH3 of the geometry and every pixel byte.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        for value in [self.frame_width, self.frame_height, self.frame_count] {
            hasher.update(&value.to_le_bytes());
        }
        hasher.update(&self.image.pixels);
        hasher.digest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_metadata_layout() {
        let sheet = SpriteSheet::new(32, 24, 4);
        assert_eq!(sheet.width(), 128);
        assert_eq!(sheet.height(), 24);
        assert_eq!(sheet.frames.len(), 4);
        for (i, frame) in sheet.frames.iter().enumerate() {
            assert_eq!(frame.index, i as u32);
            assert_eq!(frame.x, i as u32 * 32);
            assert_eq!(frame.y, 0);
            assert_eq!((frame.width, frame.height), (32, 24));
        }
    }

    #[test]
    fn test_frame_index_for_angle() {
        assert_eq!(frame_index_for_angle(0.0, 24), 0);
        assert_eq!(frame_index_for_angle(TAU / 24.0 * 5.5, 24), 5);
        assert_eq!(frame_index_for_angle(TAU, 24), 0);
        assert_eq!(frame_index_for_angle(-TAU / 48.0, 24), 23);
        assert_eq!(frame_index_for_angle(3.0 * TAU + 0.01, 24), 0);
        assert_eq!(frame_index_for_angle(1.0, 0), 0);
        assert_eq!(frame_index_for_angle(f64::NAN, 8), 0);
    }

    #[test]
    fn test_place_and_extract() {
        let mut sheet = SpriteSheet::new(4, 4, 3);
        let mut frame = PixelBuffer::new(4, 4);
        frame.set_pixel(1, 2, [10, 20, 30, 255]);
        sheet.place(2, &frame);
        assert_eq!(sheet.frame_pixel(2, 1, 2), [10, 20, 30, 255]);
        assert_eq!(sheet.image.get_pixel(9, 2), [10, 20, 30, 255]);
        assert_eq!(sheet.extract_frame(2).unwrap(), frame);
        assert!(sheet.extract_frame(3).is_none());
    }

    #[test]
    fn test_frame_for_angle_uses_metadata() {
        let sheet = SpriteSheet::new(8, 8, 8);
        let frame = sheet.frame_for_angle(TAU * 0.5).unwrap();
        assert_eq!(frame.index, 4);
        assert_eq!(frame.x, 32);
    }

    #[test]
    fn test_rgba_image_matches_buffer() {
        let mut sheet = SpriteSheet::new(2, 2, 2);
        let mut frame = PixelBuffer::new(2, 2);
        frame.set_pixel(0, 1, [1, 2, 3, 4]);
        sheet.place(1, &frame);
        let img = sheet.to_rgba_image().unwrap();
        assert_eq!(img.dimensions(), (4, 2));
        assert_eq!(img.get_pixel(2, 1).0, [1, 2, 3, 4]);
        assert_eq!(img.into_raw(), sheet.image.pixels);

        sheet.image.pixels.pop();
        assert!(sheet.to_rgba_image().is_none());
    }

    #[test]
    fn test_content_hash_tracks_pixels() {
        let a = SpriteSheet::new(4, 4, 2);
        let mut b = a.clone();
        assert_eq!(a.content_hash(), b.content_hash());
        b.image.set_pixel(0, 0, [1, 0, 0, 255]);
        assert_ne!(a.content_hash(), b.content_hash());
    }
}
