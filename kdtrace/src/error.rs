use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("scene contains no triangles")]
    EmptyScene,

    #[error("invalid kd-tree config: {0}")]
    InvalidConfig(&'static str),

    #[error("invalid render options: {0}")]
    InvalidOptions(&'static str),

    #[error("kd-tree has not been built yet - call `Scene::build_kdtree()`")]
    MissingKdTree,

    #[error("got {got} rays for a {width}x{height} frame")]
    RayCountMismatch { got: usize, width: u32, height: u32 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
