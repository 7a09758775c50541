use bytemuck::Pod;

use crate::gpu;

/// Object that can be uploaded into the GPU as-is.
pub trait Bufferable {
    fn data(&self) -> &[u8];
}

impl<T> Bufferable for [T]
where
    T: Pod,
{
    fn data(&self) -> &[u8] {
        bytemuck::cast_slice(self)
    }
}

impl<T> Bufferable for Vec<T>
where
    T: Pod,
{
    fn data(&self) -> &[u8] {
        bytemuck::cast_slice(self)
    }
}

/// Everything a compute kernel needs to trace the scene.
#[derive(Clone, Copy, Debug)]
pub struct SceneBuffers<'a> {
    pub triangles: &'a [gpu::Triangle],
    pub materials: &'a [gpu::Material],
    pub lights: &'a [gpu::Light],
    pub kdtree: &'a [gpu::KdNode],
}

impl SceneBuffers<'_> {
    /// Returns payloads in the order in which the kernel expects them to be
    /// bound.
    pub fn payloads(&self) -> [&[u8]; 4] {
        [
            self.triangles.data(),
            self.materials.data(),
            self.lights.data(),
            self.kdtree.data(),
        ]
    }
}
