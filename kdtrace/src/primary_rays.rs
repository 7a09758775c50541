use glam::vec3;

use crate::gpu::{Ray, RAY_MAG};

/// Pinhole camera sitting at the origin and looking down `+Z`, with `+Y`
/// pointing up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrimaryRays {
    width: u32,
    height: u32,
    vfov: f32,
}

impl PrimaryRays {
    /// `vfov` is the vertical field of view, in degrees.
    pub fn new(width: u32, height: u32, vfov: f32) -> Self {
        Self {
            width,
            height,
            vfov,
        }
    }

    /// Returns one ray per pixel, in row-major order, with directions
    /// scaled to [`RAY_MAG`].
    pub fn generate(&self) -> Vec<Ray> {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| self.ray(x, y)))
            .collect()
    }

    pub fn ray(&self, x: u32, y: u32) -> Ray {
        let width = self.width as f32;
        let height = self.height as f32;
        let x_size = 2.0 * width / height;

        let dir = vec3(
            (x as f32 / width) * x_size - x_size / 2.0,
            1.0 - (y as f32 / height) * 2.0,
            1.0 / (self.vfov.to_radians() / 2.0).tan(),
        );

        Ray::new(Default::default(), dir.normalize() * RAY_MAG)
    }
}
