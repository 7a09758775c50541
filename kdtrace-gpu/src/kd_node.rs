use bytemuck::{Pod, Zeroable};

use crate::{BoundingBox, TriangleId, MAX_NODE_FACES};

/// Serialized kd-tree node.
///
/// Nodes live in a single array where the root occupies index zero and the
/// remaining indices follow a depth-first (left-before-right) walk of the
/// tree; children are referred to by their indices, with `-1` meaning "no
/// child".
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct KdNode {
    pub bb: BoundingBox,
    pub triangles: [u32; MAX_NODE_FACES],
    pub triangle_count: u32,
    pub left: i32,
    pub right: i32,
    pub _pad: u32,
}

impl KdNode {
    pub const NONE: i32 = -1;

    pub fn new(bb: BoundingBox) -> Self {
        Self {
            bb,
            triangles: [0; MAX_NODE_FACES],
            triangle_count: 0,
            left: Self::NONE,
            right: Self::NONE,
            _pad: 0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left == Self::NONE && self.right == Self::NONE
    }

    /// Appends a triangle, returning `false` when the node is already full.
    pub fn push(&mut self, triangle_id: TriangleId) -> bool {
        let len = self.triangle_count as usize;

        if len >= MAX_NODE_FACES {
            return false;
        }

        self.triangles[len] = triangle_id.get();
        self.triangle_count += 1;

        true
    }

    pub fn triangles(&self) -> impl Iterator<Item = TriangleId> + '_ {
        self.triangles[..self.triangle_count as usize]
            .iter()
            .copied()
            .map(TriangleId::new)
    }

    pub fn len(&self) -> usize {
        self.triangle_count as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout() {
        assert_eq!(176, core::mem::size_of::<KdNode>());
    }

    #[test]
    fn push() {
        let mut target = KdNode::new(Default::default());

        assert!(target.is_leaf());

        for id in 0..MAX_NODE_FACES {
            assert!(target.push(TriangleId::new(id as u32)));
        }

        assert!(!target.push(TriangleId::new(1234)));
        assert_eq!(MAX_NODE_FACES, target.len());
        assert_eq!(Some(TriangleId::new(31)), target.triangles().last());
    }
}
