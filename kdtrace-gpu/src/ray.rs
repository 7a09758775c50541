use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4, Vec4Swizzles};

use crate::{Axis, BoundingBox};

/// A ray expressed as a segment: points at `origin + direction * t` for `t`
/// within `0.0 ..= 1.0` are considered reachable, so the direction's length
/// doubles as the ray's maximum distance.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Ray {
    pub origin: Vec4,
    pub direction: Vec4,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin: origin.extend(1.0),
            direction: direction.extend(0.0),
        }
    }

    pub fn origin(&self) -> Vec3 {
        self.origin.xyz()
    }

    pub fn direction(&self) -> Vec3 {
        self.direction.xyz()
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin() + self.direction() * t
    }

    /// Slab test; a ray starting inside the box always hits it.
    ///
    /// The parametric interval is narrowed axis by axis (picking the near
    /// and far face by the direction's sign) and finally has to overlap the
    /// ray's own `0.0 ..= 1.0` range.
    pub fn hits_box(&self, bb: &BoundingBox) -> bool {
        let origin = self.origin();

        if bb.contains(origin) {
            return true;
        }

        let direction = self.direction();
        let corners = [bb.min(), bb.max()];

        let mut tmin = f32::NEG_INFINITY;
        let mut tmax = f32::INFINITY;

        for axis in Axis::ALL {
            let sign = (direction[axis] < 0.0) as usize;
            let inv_direction = 1.0 / direction[axis];

            let near = (corners[sign][axis] - origin[axis]) * inv_direction;
            let far = (corners[1 - sign][axis] - origin[axis]) * inv_direction;

            if tmin > far || near > tmax {
                return false;
            }

            if near > tmin {
                tmin = near;
            }

            if far < tmax {
                tmax = far;
            }
        }

        tmin < 1.0 && tmax > 0.0
    }
}
