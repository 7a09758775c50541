use crate::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Maximum number of reflection rays spawned along a single primary
    /// ray's path; zero disables reflections.
    pub max_reflections: u32,
    pub cast_shadows: bool,
    /// Number of worker threads; each one renders a horizontal band of the
    /// frame.
    pub threads: usize,
}

impl RenderOptions {
    pub fn with_max_reflections(mut self, max_reflections: u32) -> Self {
        self.max_reflections = max_reflections;
        self
    }

    pub fn with_cast_shadows(mut self, cast_shadows: bool) -> Self {
        self.cast_shadows = cast_shadows;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(Error::InvalidOptions("threads must be at least 1"));
        }

        Ok(())
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_reflections: 7,
            cast_shadows: true,
            threads: 1,
        }
    }
}
