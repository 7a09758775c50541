use glam::Vec3;
use image::{Rgb, RgbImage};

/// Linear-color framebuffer, stored row by row.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<Vec3>,
}

impl Frame {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec3::ZERO; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Vec3] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Vec3] {
        &mut self.pixels
    }

    pub fn get(&self, x: u32, y: u32) -> Vec3 {
        self.pixels[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Converts the frame into an 8-bit image, clamping colors to `0..=1`.
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let color = self.get(x, y).clamp(Vec3::ZERO, Vec3::ONE) * 255.0;

            Rgb([color.x as u8, color.y as u8, color.z as u8])
        })
    }
}
