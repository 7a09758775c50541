mod builder;
mod config;
mod node;
mod printer;
mod serializer;

pub use self::builder::*;
pub use self::config::*;
pub use self::node::*;
pub use self::printer::*;
pub use self::serializer::*;
use crate::gpu::{BoundingBox, KdNode, Triangle};
use crate::{Error, Result};

/// Immutable kd-tree over a triangle buffer.
///
/// The tree refers to triangles by their indices, so it's valid only
/// together with the exact buffer it's been built from - when geometry
/// changes, the tree has to be built again.
#[derive(Clone, Debug)]
pub struct KdTree {
    root: KdTreeNode,
    config: KdTreeConfig,
}

impl KdTree {
    pub fn build(triangles: &[Triangle], config: KdTreeConfig) -> Result<Self> {
        config.validate()?;

        if triangles.is_empty() {
            return Err(Error::EmptyScene);
        }

        let root = KdTreeBuilder::new(triangles, &config).build();

        Ok(Self { root, config })
    }

    pub fn root(&self) -> &KdTreeNode {
        &self.root
    }

    pub fn config(&self) -> &KdTreeConfig {
        &self.config
    }

    pub fn bb(&self) -> BoundingBox {
        self.root.bb()
    }

    pub fn depth(&self) -> u32 {
        self.root.depth()
    }

    /// Iterates over nodes in depth-first, left-before-right order, i.e. the
    /// same order in which [`Self::flatten()`] lays them out.
    pub fn iter(&self) -> KdTreeIter<'_> {
        KdTreeIter {
            stack: vec![&self.root],
        }
    }

    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    pub fn leaf_count(&self) -> usize {
        self.iter().filter(|node| node.is_leaf()).count()
    }

    /// Total number of triangle references stored in leaves; can exceed the
    /// number of triangles, since triangles spanning a splitting plane get
    /// stored on both of its sides.
    pub fn triangle_refs(&self) -> usize {
        self.iter().map(|node| node.triangles().len()).sum()
    }

    pub fn flatten(&self) -> Vec<KdNode> {
        KdTreeSerializer::serialize(&self.root)
    }

    pub fn to_dot(&self) -> String {
        KdTreePrinter::print(&self.root)
    }
}

pub struct KdTreeIter<'a> {
    stack: Vec<&'a KdTreeNode>,
}

impl<'a> Iterator for KdTreeIter<'a> {
    type Item = &'a KdTreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;

        if let Some([left, right]) = node.children() {
            self.stack.push(right);
            self.stack.push(left);
        }

        Some(node)
    }
}
