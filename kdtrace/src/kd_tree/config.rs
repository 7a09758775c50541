use crate::{gpu, Error, Result};

/// Parameters of the kd-tree's cost model and its size limits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KdTreeConfig {
    /// Nodes at this depth (root being at depth zero) are never split.
    pub max_depth: u32,

    /// Nodes holding more triangles than this get split even if the split
    /// doesn't pay off according to the cost model; zero disables the limit.
    pub max_node_faces: usize,

    /// Estimated cost of visiting a node.
    pub cost_traverse: f32,

    /// Estimated cost of testing a single triangle.
    pub cost_intersect: f32,
}

impl KdTreeConfig {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_node_faces(mut self, max_node_faces: usize) -> Self {
        self.max_node_faces = max_node_faces;
        self
    }

    pub fn with_cost_traverse(mut self, cost_traverse: f32) -> Self {
        self.cost_traverse = cost_traverse;
        self
    }

    pub fn with_cost_intersect(mut self, cost_intersect: f32) -> Self {
        self.cost_intersect = cost_intersect;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(Error::InvalidConfig("max_depth must be positive"));
        }

        for cost in [self.cost_traverse, self.cost_intersect] {
            if !cost.is_finite() || cost < 0.0 {
                return Err(Error::InvalidConfig(
                    "costs must be finite and non-negative",
                ));
            }
        }

        Ok(())
    }
}

impl Default for KdTreeConfig {
    fn default() -> Self {
        Self {
            max_depth: gpu::MAX_TREE_DEPTH,
            max_node_faces: gpu::MAX_NODE_FACES,
            cost_traverse: 0.75,
            cost_intersect: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate() {
        assert_eq!(Ok(()), KdTreeConfig::default().validate());

        assert_eq!(
            Ok(()),
            KdTreeConfig::default().with_max_node_faces(0).validate()
        );

        assert!(KdTreeConfig::default().with_max_depth(0).validate().is_err());

        assert!(KdTreeConfig::default()
            .with_cost_traverse(-1.0)
            .validate()
            .is_err());

        assert!(KdTreeConfig::default()
            .with_cost_intersect(f32::NAN)
            .validate()
            .is_err());
    }
}
