use std::fmt::Write;

use super::KdTreeNode;

/// Renders kd-tree as a Graphviz digraph; useful for debugging.
///
/// Internal nodes show their splitting plane, leaves list the ids of their
/// triangles; both carry the node's estimated cost. Edges are labelled with
/// the side of the plane they lead to.
pub struct KdTreePrinter {
    out: String,
    next_id: usize,
}

impl KdTreePrinter {
    pub fn print(root: &KdTreeNode) -> String {
        let mut this = Self {
            out: String::from("digraph {\n"),
            next_id: 0,
        };

        this.visit(root);
        this.out.push_str("}\n");
        this.out
    }

    fn visit(&mut self, node: &KdTreeNode) -> usize {
        let id = self.next_id;

        self.next_id += 1;

        match node {
            KdTreeNode::Internal {
                cost,
                axis,
                split_at,
                left,
                right,
                ..
            } => {
                _ = writeln!(
                    self.out,
                    "  n{} [shape=diamond, label=\"{:?} = {}\\ncost {:.2}\"]",
                    id, axis, split_at, cost,
                );

                let left_id = self.visit(left);
                let right_id = self.visit(right);

                _ = writeln!(
                    self.out,
                    "  n{} -> n{} [label=\"<\"]",
                    id, left_id
                );

                _ = writeln!(
                    self.out,
                    "  n{} -> n{} [label=\">=\"]",
                    id, right_id
                );
            }

            KdTreeNode::Leaf {
                cost, triangles, ..
            } => {
                let triangles = if triangles.is_empty() {
                    String::from("empty")
                } else {
                    triangles
                        .iter()
                        .map(|id| format!("#{}", id.get()))
                        .collect::<Vec<_>>()
                        .join(" ")
                };

                _ = writeln!(
                    self.out,
                    "  n{} [shape=box, label=\"{}\\ncost {:.2}\"]",
                    id, triangles, cost,
                );
            }
        }

        id
    }
}
