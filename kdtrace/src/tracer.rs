use glam::Vec3;

use crate::gpu::{Ray, TriangleId, Vec3Ext, MIN_ENERGY, RAY_MAG};
use crate::{Error, KdTree, KdTreeNode, RayCounters, RenderOptions, Result, Scene};

/// Color returned for rays that escape the scene.
pub const BACKGROUND: f32 = 0.05;

/// Closest intersection found along a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfacePoint {
    /// Parametric distance along the ray, within `EPSILON ..= 1.0`.
    pub distance: f32,
    pub point: Vec3,
    /// Interpolated vertex normal.
    pub normal: Vec3,
    pub triangle_id: TriangleId,
}

/// CPU ray tracer walking the owned kd-tree; serves as the reference the
/// GPU kernels are checked against.
#[derive(Clone, Copy, Debug)]
pub struct Tracer<'a> {
    scene: &'a Scene,
    kdtree: &'a KdTree,
    options: &'a RenderOptions,
}

impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Scene, options: &'a RenderOptions) -> Result<Self> {
        let kdtree = scene.kdtree().ok_or(Error::MissingKdTree)?;

        Ok(Self {
            scene,
            kdtree,
            options,
        })
    }

    /// Finds the nearest triangle hit by `ray`.
    ///
    /// Both children of every node whose box the ray touches get visited,
    /// so a hit is never missed because of split ordering.
    pub fn find_intersection(
        &self,
        ray: Ray,
        counters: &mut RayCounters,
    ) -> Option<SurfacePoint> {
        self.find_in(ray, self.kdtree.root(), counters)
    }

    fn find_in(
        &self,
        ray: Ray,
        node: &KdTreeNode,
        counters: &mut RayCounters,
    ) -> Option<SurfacePoint> {
        counters.aabb_tests += 1;

        if !ray.hits_box(&node.bb()) {
            return None;
        }

        match node {
            KdTreeNode::Internal { left, right, .. } => {
                let left = self.find_in(ray, left, counters);
                let right = self.find_in(ray, right, counters);

                match (left, right) {
                    (Some(left), Some(right)) => {
                        if right.distance < left.distance {
                            Some(right)
                        } else {
                            Some(left)
                        }
                    }

                    (left, right) => left.or(right),
                }
            }

            KdTreeNode::Leaf { triangles, .. } => {
                let mut closest: Option<SurfacePoint> = None;

                for &triangle_id in triangles {
                    counters.triangle_tests += 1;

                    let Some(hit) = self.scene.triangle(triangle_id).hit(ray)
                    else {
                        continue;
                    };

                    if closest.map_or(true, |sp| hit.distance < sp.distance) {
                        closest = Some(SurfacePoint {
                            distance: hit.distance,
                            point: hit.point,
                            normal: hit.normal,
                            triangle_id,
                        });
                    }
                }

                closest
            }
        }
    }

    /// Returns the color seen along `ray`; `reflections` is the number of
    /// reflection rays this ray and its descendants are still allowed to
    /// spawn.
    pub fn trace(
        &self,
        ray: Ray,
        reflections: u32,
        energy: f32,
        counters: &mut RayCounters,
    ) -> Vec3 {
        match self.find_intersection(ray, counters) {
            Some(sp) => self.shade(ray, &sp, reflections, energy, counters),
            None => Vec3::splat(BACKGROUND),
        }
    }

    /// Phong-shades a surface point: direct light from every light that's
    /// visible from `sp`, plus a recursive mirror reflection.
    pub fn shade(
        &self,
        ray: Ray,
        sp: &SurfacePoint,
        reflections: u32,
        energy: f32,
        counters: &mut RayCounters,
    ) -> Vec3 {
        let material = self
            .scene
            .material(self.scene.triangle(sp.triangle_id).material_id());

        let ray_dir = ray.direction();

        // Shade the side the ray came from
        let normal = if ray_dir.dot(sp.normal) >= 0.0 {
            -sp.normal
        } else {
            sp.normal
        };

        let view_dir = -ray_dir / RAY_MAG;
        let view_refl = view_dir.mirror(normal);

        let mut diffuse = Vec3::ZERO;
        let mut specular = Vec3::ZERO;

        for light in self.scene.lights() {
            let light_dir = light.position() - sp.point;

            let is_lit = if self.options.cast_shadows {
                counters.shadow_rays += 1;

                self.find_intersection(Ray::new(sp.point, light_dir), counters)
                    .is_none()
            } else {
                true
            };

            if is_lit {
                let light_dir = light_dir.normalize();

                diffuse += material.diffuse(normal, light_dir);
                specular += material.specular(light_dir, view_refl);
                counters.brdf_evals += 1;
            }
        }

        let energy = energy * material.reflected_energy();

        if reflections > 0 && energy > MIN_ENERGY {
            let refl_ray = Ray::new(sp.point, (-ray_dir).mirror(normal));
            let color =
                self.trace(refl_ray, reflections - 1, energy, counters);

            specular += color * material.reflection();
            counters.refl_rays += 1;
        }

        diffuse + specular
    }

    /// Traces a single primary ray with fresh counters.
    pub fn trace_primary(&self, ray: Ray) -> (Vec3, RayCounters) {
        let mut counters = RayCounters::default();

        let color =
            self.trace(ray, self.options.max_reflections, 1.0, &mut counters);

        (color, counters)
    }
}
