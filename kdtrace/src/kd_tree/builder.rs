//! Cost-driven kd-tree builder.
//!
//! Each node considers every triangle's extreme vertex coordinates on every
//! axis as splitting planes and keeps the one with the lowest estimated
//! cost; triangles straddling the chosen plane are duplicated into both
//! children instead of being clipped.

use std::time::Instant;

use super::{KdTreeConfig, KdTreeNode};
use crate::gpu::{Axis, BoundingBox, Triangle, TriangleId};

pub struct KdTreeBuilder<'a> {
    triangles: &'a [Triangle],
    config: &'a KdTreeConfig,
    depth: u32,
    nodes: usize,
    leaves: usize,
    refs: usize,
}

impl<'a> KdTreeBuilder<'a> {
    pub fn new(triangles: &'a [Triangle], config: &'a KdTreeConfig) -> Self {
        Self {
            triangles,
            config,
            depth: 0,
            nodes: 0,
            leaves: 0,
            refs: 0,
        }
    }

    pub fn build(mut self) -> KdTreeNode {
        let tt = Instant::now();

        let triangles: Vec<_> = (0..self.triangles.len())
            .map(|id| TriangleId::new(id as u32))
            .collect();

        let bb: BoundingBox = self
            .triangles
            .iter()
            .flat_map(|triangle| triangle.positions())
            .collect();

        debug_assert!(!triangles.is_empty(), "kd-tree needs triangles");
        assert_valid(&bb);

        let cost = self.cost(&bb, Axis::X, &triangles);
        let root = self.subdivide(bb, cost, triangles, 0);

        log::info!(
            "kd-tree built; triangles = {}, depth = {}, nodes = {}, leaves = {}, \
             triangle-refs = {}, tt = {:?}",
            self.triangles.len(),
            self.depth,
            self.nodes,
            self.leaves,
            self.refs,
            tt.elapsed(),
        );

        root
    }

    fn subdivide(
        &mut self,
        bb: BoundingBox,
        cost: f32,
        triangles: Vec<TriangleId>,
        depth: u32,
    ) -> KdTreeNode {
        if triangles.is_empty() || depth >= self.config.max_depth {
            return self.leaf(bb, cost, triangles, depth);
        }

        let Some(plane) = self.find_splitting_plane(&bb, &triangles) else {
            return self.leaf(bb, cost, triangles, depth);
        };

        let is_overfull = self.config.max_node_faces > 0
            && triangles.len() > self.config.max_node_faces;

        if plane.cost >= cost && !is_overfull {
            return self.leaf(bb, cost, triangles, depth);
        }

        let (left_bb, right_bb) = bb.split(plane.axis, plane.at);

        assert_valid(&left_bb);
        assert_valid(&right_bb);

        let mut left = Vec::new();
        let mut right = Vec::new();

        for triangle_id in triangles {
            let coords = self.triangle(triangle_id).coords(plane.axis);

            if coords.iter().any(|&coord| coord < plane.at) {
                left.push(triangle_id);
            }

            if coords.iter().any(|&coord| coord >= plane.at) {
                right.push(triangle_id);
            }
        }

        log::debug!(
            "Splitting node at depth {} by {:?} = {}; cost = {} -> {}, \
             triangles = {} + {}",
            depth,
            plane.axis,
            plane.at,
            cost,
            plane.cost,
            left.len(),
            right.len(),
        );

        self.nodes += 1;

        let left = self.subdivide(left_bb, plane.left_cost, left, depth + 1);
        let right = self.subdivide(right_bb, plane.right_cost, right, depth + 1);

        KdTreeNode::Internal {
            bb,
            cost,
            axis: plane.axis,
            split_at: plane.at,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn leaf(
        &mut self,
        bb: BoundingBox,
        cost: f32,
        triangles: Vec<TriangleId>,
        depth: u32,
    ) -> KdTreeNode {
        log::debug!(
            "Leaf at depth {} holds {} triangle(s)",
            depth,
            triangles.len()
        );

        self.depth = self.depth.max(depth);
        self.nodes += 1;
        self.leaves += 1;
        self.refs += triangles.len();

        KdTreeNode::Leaf {
            bb,
            cost,
            triangles,
        }
    }

    fn find_splitting_plane(
        &self,
        bb: &BoundingBox,
        triangles: &[TriangleId],
    ) -> Option<SplittingPlane> {
        let mut best: Option<SplittingPlane> = None;

        for axis in Axis::ALL {
            for &triangle_id in triangles {
                let coords = self.triangle(triangle_id).coords(axis);

                let candidates = [
                    coords.into_iter().fold(f32::MAX, f32::min),
                    coords.into_iter().fold(f32::MIN, f32::max),
                ];

                for at in candidates {
                    // Planes lying on the node's boundary would produce an
                    // empty child
                    if !bb.straddled_by(axis, at) {
                        continue;
                    }

                    let plane = self.evaluate(bb, triangles, axis, at);

                    let is_better =
                        best.map_or(true, |best| plane.cost < best.cost);

                    if is_better {
                        best = Some(plane);
                    }
                }
            }
        }

        best
    }

    fn evaluate(
        &self,
        bb: &BoundingBox,
        triangles: &[TriangleId],
        axis: Axis,
        at: f32,
    ) -> SplittingPlane {
        let (left_bb, right_bb) = bb.split(axis, at);

        assert_valid(&left_bb);
        assert_valid(&right_bb);

        let left_cost = self.cost(&left_bb, axis, triangles);
        let right_cost = self.cost(&right_bb, axis, triangles);

        SplittingPlane {
            axis,
            at,
            cost: left_cost + right_cost - self.config.cost_traverse,
            left_cost,
            right_cost,
        }
    }

    /// Estimates the cost of resolving a ray within `bb`, considering those
    /// of `triangles` that have at least one vertex within `bb` on `axis`.
    fn cost(
        &self,
        bb: &BoundingBox,
        axis: Axis,
        triangles: &[TriangleId],
    ) -> f32 {
        let count = triangles
            .iter()
            .filter(|&&triangle_id| {
                self.triangle(triangle_id)
                    .coords(axis)
                    .into_iter()
                    .any(|coord| bb.contains_on(axis, coord))
            })
            .count();

        self.config.cost_traverse
            + bb.measure() * (count as f32) * self.config.cost_intersect
    }

    fn triangle(&self, triangle_id: TriangleId) -> &Triangle {
        &self.triangles[triangle_id.get() as usize]
    }
}

#[derive(Clone, Copy, Debug)]
struct SplittingPlane {
    axis: Axis,
    at: f32,
    cost: f32,
    left_cost: f32,
    right_cost: f32,
}

fn assert_valid(bb: &BoundingBox) {
    assert!(bb.is_valid(), "kd-tree node has a negative extent: {:?}", bb);
}

#[cfg(test)]
mod tests {
    use glam::{vec3, Vec3};

    use super::*;

    #[test]
    #[should_panic(expected = "negative extent")]
    fn inverted_box_is_fatal() {
        assert_valid(&BoundingBox::new(Vec3::ONE, Vec3::ZERO));
    }

    #[test]
    fn flat_box_is_fine() {
        assert_valid(&BoundingBox::new(Vec3::ZERO, vec3(1.0, 0.0, 1.0)));
    }

    #[test]
    fn root_cost() {
        let triangles = [Triangle::flat([
            vec3(0.0, 0.0, 0.0),
            vec3(1.0, 0.0, 0.0),
            vec3(0.0, 2.0, 0.0),
        ])];

        let config = KdTreeConfig::default();
        let root = KdTreeBuilder::new(&triangles, &config).build();

        // traverse + perimeter(1 + 2 + 0) * 1 triangle * intersect
        assert_eq!(0.75 + 6.0, root.cost());
        assert!(root.is_leaf());
    }
}
