use std::sync::OnceLock;

use crate::gpu::{self, LightId, MaterialId};
use crate::{Error, KdTree, KdTreeConfig, Mesh, Result, SceneBuffers};

/// Geometry store: meshes, materials and lights, plus everything derived
/// from them (the flat triangle buffer and the kd-tree built over it).
///
/// Derived data is never patched - changing geometry throws it away and the
/// kd-tree has to be built again.
#[derive(Debug, Default)]
pub struct Scene {
    meshes: Vec<Mesh>,
    materials: Vec<gpu::Material>,
    lights: Vec<gpu::Light>,
    triangles: OnceLock<Vec<gpu::Triangle>>,
    kdtree: Option<KdTree>,
    flat_kdtree: OnceLock<Vec<gpu::KdNode>>,
}

impl Scene {
    pub fn add_mesh(&mut self, mut mesh: Mesh) {
        mesh.stamp_material();

        self.meshes.push(mesh);
        self.triangles = Default::default();
        self.kdtree = None;
        self.flat_kdtree = Default::default();
    }

    pub fn add_material(&mut self, material: gpu::Material) -> MaterialId {
        self.materials.push(material);

        MaterialId::new((self.materials.len() - 1) as u32)
    }

    pub fn add_light(&mut self, light: gpu::Light) -> LightId {
        self.lights.push(light);

        LightId::new((self.lights.len() - 1) as u32)
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn materials(&self) -> &[gpu::Material] {
        &self.materials
    }

    pub fn lights(&self) -> &[gpu::Light] {
        &self.lights
    }

    /// Returns given material or, if it doesn't exist, a plain grey one.
    pub fn material(&self, id: MaterialId) -> gpu::Material {
        self.materials
            .get(id.get() as usize)
            .copied()
            .unwrap_or_else(gpu::Material::fallback)
    }

    /// Returns triangles of all meshes, in the order the meshes got added.
    pub fn triangles(&self) -> &[gpu::Triangle] {
        self.triangles.get_or_init(|| {
            self.meshes
                .iter()
                .flat_map(|mesh| mesh.triangles())
                .copied()
                .collect()
        })
    }

    pub fn triangle(&self, id: gpu::TriangleId) -> &gpu::Triangle {
        &self.triangles()[id.get() as usize]
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|mesh| mesh.len()).sum()
    }

    pub fn build_kdtree(&mut self, config: KdTreeConfig) -> Result<&KdTree> {
        log::info!(
            "Building kd-tree; meshes = {}, triangles = {}, config = {:?}",
            self.meshes.len(),
            self.triangle_count(),
            config,
        );

        let kdtree = KdTree::build(self.triangles(), config)?;

        self.flat_kdtree = Default::default();

        Ok(&*self.kdtree.insert(kdtree))
    }

    pub fn kdtree(&self) -> Option<&KdTree> {
        self.kdtree.as_ref()
    }

    /// Returns the serialized kd-tree, flattening it on the first call.
    pub fn flat_kdtree(&self) -> Option<&[gpu::KdNode]> {
        let kdtree = self.kdtree.as_ref()?;

        Some(self.flat_kdtree.get_or_init(|| kdtree.flatten()))
    }

    pub fn buffers(&self) -> Result<SceneBuffers<'_>> {
        let kdtree = self.flat_kdtree().ok_or(Error::MissingKdTree)?;

        Ok(SceneBuffers {
            triangles: self.triangles(),
            materials: &self.materials,
            lights: &self.lights,
            kdtree,
        })
    }
}

#[cfg(test)]
mod tests {
    use glam::{vec3, Vec3};

    use super::*;
    use crate::gpu::{Material, Triangle, TriangleId};
    use crate::Bufferable;

    fn triangle(x: f32) -> Triangle {
        Triangle::flat([
            vec3(x, 0.0, 0.0),
            vec3(x + 1.0, 0.0, 0.0),
            vec3(x, 1.0, 0.0),
        ])
    }

    fn scene() -> Scene {
        let mut target = Scene::default();

        let red = target.add_material(Material::new(Vec3::X, Vec3::ZERO));
        let green = target.add_material(Material::new(Vec3::Y, Vec3::ZERO));

        target.add_mesh(Mesh::new([triangle(0.0), triangle(2.0)], red));
        target.add_mesh(Mesh::new([triangle(10.0)], green));
        target.add_light(gpu::Light::new(Vec3::Y, Vec3::ONE));

        target
    }

    #[test]
    fn triangles() {
        let target = scene();

        assert_eq!(3, target.triangle_count());
        assert_eq!(3, target.triangles().len());

        let material_ids: Vec<_> = target
            .triangles()
            .iter()
            .map(|triangle| triangle.material_id().get())
            .collect();

        assert_eq!(vec![0, 0, 1], material_ids);

        assert!(target
            .triangle(TriangleId::new(2))
            .approx_eq(&triangle(10.0).with_material(MaterialId::new(1))));
    }

    #[test]
    fn material_fallback() {
        let target = scene();

        assert_eq!(
            Vec3::X.extend(1.0),
            target.material(MaterialId::new(0)).diffuse
        );
        assert_eq!(Material::fallback(), target.material(MaterialId::new(7)));
    }

    #[test]
    fn kdtree_lifecycle() {
        let mut target = scene();

        assert!(target.kdtree().is_none());
        assert!(target.flat_kdtree().is_none());
        assert_eq!(Some(Error::MissingKdTree), target.buffers().err());

        target.build_kdtree(Default::default()).unwrap();

        let node_count = target.kdtree().unwrap().node_count();

        assert_eq!(node_count, target.flat_kdtree().unwrap().len());

        // Changing geometry invalidates everything derived from it
        target.add_mesh(Mesh::new([triangle(20.0)], MaterialId::new(0)));

        assert_eq!(4, target.triangles().len());
        assert!(target.kdtree().is_none());
        assert!(target.flat_kdtree().is_none());
    }

    #[test]
    fn build_kdtree_on_empty_scene() {
        let mut target = Scene::default();

        assert_eq!(
            Some(Error::EmptyScene),
            target.build_kdtree(Default::default()).err()
        );
    }

    #[test]
    fn buffers() {
        let mut target = scene();

        target.build_kdtree(Default::default()).unwrap();

        let buffers = target.buffers().unwrap();
        let [triangles, materials, lights, kdtree] = buffers.payloads();

        assert_eq!(3 * 224, triangles.len());
        assert_eq!(2 * 48, materials.len());
        assert_eq!(32, lights.len());
        assert_eq!(buffers.kdtree.len() * 176, kdtree.len());
        assert_eq!(triangles, target.triangles().data());
    }
}
