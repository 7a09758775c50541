use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4, Vec4Swizzles};

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Material {
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub reflectivity: f32,
    pub transmissivity: f32,
    pub shininess: f32,
    pub _pad: f32,
}

impl Material {
    pub fn new(diffuse: Vec3, specular: Vec3) -> Self {
        Self {
            diffuse: diffuse.extend(1.0),
            specular: specular.extend(1.0),
            reflectivity: 0.0,
            transmissivity: 0.0,
            shininess: 0.0,
            _pad: 0.0,
        }
    }

    /// Material used for triangles that point at a non-existing material.
    pub fn fallback() -> Self {
        Self::new(Vec3::splat(0.7), Vec3::ZERO)
    }

    pub fn with_reflectivity(mut self, reflectivity: f32) -> Self {
        self.reflectivity = reflectivity;
        self
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    /// Lambertian term for a light at `light_dir` (normalized, pointing
    /// from the surface towards the light).
    pub fn diffuse(&self, normal: Vec3, light_dir: Vec3) -> Vec3 {
        self.diffuse.xyz() * normal.dot(light_dir).max(0.0)
    }

    /// Phong term; `view_refl` is the view direction mirrored around the
    /// surface normal.
    pub fn specular(&self, light_dir: Vec3, view_refl: Vec3) -> Vec3 {
        self.specular.xyz()
            * light_dir.dot(view_refl).max(0.0).powf(self.shininess)
    }

    /// Color by which reflected light gets multiplied.
    pub fn reflection(&self) -> Vec3 {
        self.specular.xyz() * self.reflectivity
    }

    /// How much of the incoming energy survives a reflection off this
    /// material; average of [`Self::reflection()`]'s channels.
    pub fn reflected_energy(&self) -> f32 {
        let reflection = self.reflection();

        (reflection.x + reflection.y + reflection.z) / 3.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::fallback()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(u32);

impl MaterialId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}
