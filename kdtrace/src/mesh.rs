use crate::gpu::{MaterialId, Triangle};

/// Bunch of triangles sharing the same material.
#[derive(Clone, Debug)]
pub struct Mesh {
    triangles: Vec<Triangle>,
    material_id: MaterialId,
}

impl Mesh {
    pub fn new(
        triangles: impl IntoIterator<Item = Triangle>,
        material_id: MaterialId,
    ) -> Self {
        Self {
            triangles: triangles.into_iter().collect(),
            material_id,
        }
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn material_id(&self) -> MaterialId {
        self.material_id
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Makes every triangle point at this mesh's material.
    pub(crate) fn stamp_material(&mut self) {
        for triangle in &mut self.triangles {
            *triangle = triangle.with_material(self.material_id);
        }
    }
}
