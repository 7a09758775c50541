use glam::{Mat4, Vec4};

use crate::gpu::Ray;

/// Transformation applied to every ray before it's traced.
///
/// Origins go through the matrix as-is, while directions go through its
/// inverse-transpose with translation zeroed out - that's what keeps them
/// correct under non-uniform scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayTransform {
    matrix: Mat4,
    dir_matrix: Mat4,
}

impl RayTransform {
    pub fn new(matrix: Mat4) -> Self {
        let mut dir_matrix = matrix.inverse().transpose();

        dir_matrix.w_axis = Vec4::W;

        Self { matrix, dir_matrix }
    }

    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    pub fn dir_matrix(&self) -> Mat4 {
        self.dir_matrix
    }

    pub fn apply(&self, ray: Ray) -> Ray {
        Ray::new(
            self.matrix.transform_point3(ray.origin()),
            self.dir_matrix.transform_vector3(ray.direction()),
        )
    }
}

impl Default for RayTransform {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY)
    }
}
