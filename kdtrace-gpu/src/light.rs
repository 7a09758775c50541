use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4, Vec4Swizzles};

/// Point light.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Light {
    pub position: Vec4,
    pub color: Vec4,
}

impl Light {
    pub fn new(position: Vec3, color: Vec3) -> Self {
        Self {
            position: position.extend(1.0),
            color: color.extend(1.0),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position.xyz()
    }

    pub fn color(&self) -> Vec3 {
        self.color.xyz()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LightId(u32);

impl LightId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}
