use super::KdTreeNode;
use crate::gpu::{self, KdNode};

/// Flattens the owned kd-tree into an index-linked array of [`KdNode`]s.
pub struct KdTreeSerializer;

impl KdTreeSerializer {
    pub fn serialize(root: &KdTreeNode) -> Vec<KdNode> {
        let mut out = Vec::new();

        Self::process(&mut out, root);

        out
    }

    fn process(out: &mut Vec<KdNode>, node: &KdTreeNode) -> usize {
        let ptr = out.len();

        out.push(KdNode::new(node.bb()));

        match node {
            KdTreeNode::Internal { left, right, .. } => {
                let left_ptr = Self::process(out, left);
                let right_ptr = Self::process(out, right);

                out[ptr].left = left_ptr as i32;
                out[ptr].right = right_ptr as i32;
            }

            KdTreeNode::Leaf { triangles, .. } => {
                for &triangle_id in triangles {
                    if !out[ptr].push(triangle_id) {
                        log::warn!(
                            "kd-tree node #{} holds {} triangles, but only {} \
                             fit into a serialized node - dropping the rest",
                            ptr,
                            triangles.len(),
                            gpu::MAX_NODE_FACES,
                        );

                        break;
                    }
                }
            }
        }

        ptr
    }
}
