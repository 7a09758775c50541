//! Host side of kdtrace: scene management, kd-tree construction and
//! flattening, plus a multithreaded CPU tracer used as a reference for the
//! GPU kernels.
//!
//! Usage:
//!
//! ```no_run
//! use kdtrace::gpu::{Light, Material, Triangle};
//! use kdtrace::glam::vec3;
//! use kdtrace::*;
//!
//! let mut scene = Scene::default();
//! let material = scene.add_material(Material::fallback());
//!
//! scene.add_mesh(Mesh::new(
//!     [Triangle::flat([
//!         vec3(-1.0, -1.0, 5.0),
//!         vec3(1.0, -1.0, 5.0),
//!         vec3(0.0, 1.0, 5.0),
//!     ])],
//!     material,
//! ));
//!
//! scene.add_light(Light::new(vec3(0.0, 5.0, 0.0), vec3(1.0, 1.0, 1.0)));
//! scene.build_kdtree(KdTreeConfig::default())?;
//!
//! let rays = PrimaryRays::new(320, 240, 50.0).generate();
//! let mut renderer = Renderer::new(RenderOptions::default())?;
//! let frame = renderer.render(&scene, &rays, &Default::default(), 320, 240)?;
//!
//! println!("{}", renderer.stats());
//! frame.to_image().save("out.png").unwrap();
//! # Ok::<(), kdtrace::Error>(())
//! ```

mod buffers;
mod error;
mod kd_tree;
mod mesh;
mod primary_rays;
mod renderer;
mod scene;
mod stats;
mod tracer;
mod transform;

pub use glam;
pub use kdtrace_gpu as gpu;

pub use self::buffers::*;
pub use self::error::*;
pub use self::kd_tree::*;
pub use self::mesh::*;
pub use self::primary_rays::*;
pub use self::renderer::*;
pub use self::scene::*;
pub use self::stats::*;
pub use self::tracer::*;
pub use self::transform::*;
