use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3, Vec4, Vec4Swizzles};

use crate::{Axis, BoundingBox, MaterialId, Ray, EPSILON};

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec4,
    pub normal: Vec4,
    pub uv: Vec4,
    pub _pad: Vec4,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.extend(1.0),
            normal: normal.extend(0.0),
            uv: uv.extend(0.0).extend(0.0),
            _pad: Default::default(),
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
    pub normal: Vec4,
    pub material_id: u32,
    pub _pad: [u32; 3],
}

impl Triangle {
    /// Threshold used by [`Self::approx_eq()`].
    pub const EQ_EPSILON: f32 = 1e-8;

    pub fn new(positions: [Vec3; 3], normals: [Vec3; 3], uvs: [Vec2; 3]) -> Self {
        let normal = (positions[1] - positions[0])
            .cross(positions[2] - positions[0])
            .normalize_or_zero();

        Self {
            vertices: [0, 1, 2]
                .map(|i| Vertex::new(positions[i], normals[i], uvs[i])),
            normal: normal.extend(0.0),
            material_id: 0,
            _pad: Default::default(),
        }
    }

    /// Creates a triangle whose vertex normals are all equal to its face
    /// normal.
    pub fn flat(positions: [Vec3; 3]) -> Self {
        let mut this = Self::new(positions, [Vec3::ZERO; 3], [Vec2::ZERO; 3]);

        for vertex in &mut this.vertices {
            vertex.normal = this.normal;
        }

        this
    }

    pub fn with_material(mut self, material_id: MaterialId) -> Self {
        self.material_id = material_id.get();
        self
    }

    pub fn position(&self, idx: usize) -> Vec3 {
        self.vertices[idx].position.xyz()
    }

    pub fn positions(&self) -> [Vec3; 3] {
        [self.position(0), self.position(1), self.position(2)]
    }

    pub fn vertex_normal(&self, idx: usize) -> Vec3 {
        self.vertices[idx].normal.xyz()
    }

    pub fn face_normal(&self) -> Vec3 {
        self.normal.xyz()
    }

    pub fn material_id(&self) -> MaterialId {
        MaterialId::new(self.material_id)
    }

    pub fn bounds(&self) -> BoundingBox {
        self.positions().into_iter().collect()
    }

    /// Returns the vertex coordinates on given axis.
    pub fn coords(&self, axis: Axis) -> [f32; 3] {
        self.positions().map(|position| position[axis])
    }

    /// Compares positions and normals with a tiny tolerance; meant for
    /// validation, as the builder never needs to compare triangles.
    pub fn approx_eq(&self, other: &Self) -> bool {
        fn eq(a: Vec3, b: Vec3) -> bool {
            (a - b).abs().max_element() < Triangle::EQ_EPSILON
        }

        (0..3).all(|i| {
            eq(self.position(i), other.position(i))
                && eq(self.vertex_normal(i), other.vertex_normal(i))
        }) && eq(self.face_normal(), other.face_normal())
    }

    /// Returns barycentric weights of `point` (assumed to lie on this
    /// triangle's plane), computed as ratios of unsigned sub-triangle areas.
    ///
    /// The weights only sum up to one when the point is inside the triangle;
    /// degenerate triangles yield all-zero weights.
    pub fn barycentric(&self, point: Vec3) -> Vec3 {
        let [p0, p1, p2] = self.positions();
        let normal = self.face_normal();

        let area = (p1 - p0).cross(p2 - p0).dot(normal).abs() * 0.5;

        if area < EPSILON {
            return Vec3::ZERO;
        }

        let pv0 = p0 - point;
        let pv1 = p1 - point;
        let pv2 = p2 - point;

        let a0 = pv1.cross(pv2).dot(normal).abs() * 0.5;
        let a1 = pv2.cross(pv0).dot(normal).abs() * 0.5;
        let a2 = pv0.cross(pv1).dot(normal).abs() * 0.5;

        Vec3::new(a0, a1, a2) / area
    }

    /// Intersects `ray` with this triangle; hits are reported only within
    /// the ray's valid range, i.e. `EPSILON ..= 1.0`.
    pub fn hit(&self, ray: Ray) -> Option<TriangleHit> {
        let normal = self.face_normal();
        let ndotdir = ray.direction().dot(normal);

        if ndotdir.abs() <= EPSILON {
            return None;
        }

        let distance = normal.dot(self.position(0) - ray.origin()) / ndotdir;

        if distance < EPSILON || distance > 1.0 {
            return None;
        }

        let point = ray.at(distance);
        let bc = self.barycentric(point);
        let bc_sum = bc.x + bc.y + bc.z;

        if bc_sum < 1.0 - EPSILON || bc_sum > 1.0 + EPSILON {
            return None;
        }

        let normal = self.vertex_normal(0) * bc.x
            + self.vertex_normal(1) * bc.y
            + self.vertex_normal(2) * bc.z;

        Some(TriangleHit {
            distance,
            point,
            normal: normal.normalize(),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriangleHit {
    /// Parametric distance along the ray, within `EPSILON ..= 1.0`.
    pub distance: f32,
    pub point: Vec3,
    pub normal: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriangleId(u32);

impl TriangleId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}
