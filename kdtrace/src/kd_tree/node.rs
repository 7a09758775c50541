use crate::gpu::{Axis, BoundingBox, TriangleId};

/// Node of the owned (build-time) kd-tree.
#[derive(Clone, Debug, PartialEq)]
pub enum KdTreeNode {
    Internal {
        bb: BoundingBox,
        cost: f32,
        axis: Axis,
        split_at: f32,
        left: Box<Self>,
        right: Box<Self>,
    },

    Leaf {
        bb: BoundingBox,
        cost: f32,
        triangles: Vec<TriangleId>,
    },
}

impl KdTreeNode {
    pub fn bb(&self) -> BoundingBox {
        match self {
            KdTreeNode::Internal { bb, .. } => *bb,
            KdTreeNode::Leaf { bb, .. } => *bb,
        }
    }

    /// Estimated cost of resolving a ray within this node, as computed by
    /// the builder.
    pub fn cost(&self) -> f32 {
        match self {
            KdTreeNode::Internal { cost, .. } => *cost,
            KdTreeNode::Leaf { cost, .. } => *cost,
        }
    }

    pub fn children(&self) -> Option<[&Self; 2]> {
        if let KdTreeNode::Internal { left, right, .. } = self {
            Some([left.as_ref(), right.as_ref()])
        } else {
            None
        }
    }

    /// Triangles stored in this node; always empty for internal nodes.
    pub fn triangles(&self) -> &[TriangleId] {
        if let KdTreeNode::Leaf { triangles, .. } = self {
            triangles
        } else {
            &[]
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, KdTreeNode::Leaf { .. })
    }

    /// Number of levels below this node.
    pub fn depth(&self) -> u32 {
        match self {
            KdTreeNode::Internal { left, right, .. } => {
                1 + left.depth().max(right.depth())
            }
            KdTreeNode::Leaf { .. } => 0,
        }
    }
}
