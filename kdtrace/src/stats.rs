use std::fmt;
use std::time::Duration;

/// Counters collected while resolving a single primary ray, including all of
/// the shadow and reflection rays it spawns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RayCounters {
    pub aabb_tests: u64,
    pub triangle_tests: u64,
    pub shadow_rays: u64,
    pub refl_rays: u64,
    pub brdf_evals: u64,
}

/// Statistics of a single full-frame pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderStats {
    pub prim_rays: u64,
    pub shadow_rays: u64,
    pub refl_rays: u64,
    pub rays_cast: u64,
    pub brdf_evals: u64,

    pub aabb_tests: u64,
    pub min_aabb_tests: u64,
    pub max_aabb_tests: u64,
    pub avg_aabb_tests: f32,

    pub triangle_tests: u64,
    pub min_triangle_tests: u64,
    pub max_triangle_tests: u64,
    pub avg_triangle_tests: f32,

    pub render_time: Duration,
    pub rays_per_sec: u64,
}

impl RenderStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Accounts for a primary ray.
    pub fn record(&mut self, counters: &RayCounters) {
        self.prim_rays += 1;
        self.shadow_rays += counters.shadow_rays;
        self.refl_rays += counters.refl_rays;
        self.brdf_evals += counters.brdf_evals;

        self.aabb_tests += counters.aabb_tests;
        self.min_aabb_tests = self.min_aabb_tests.min(counters.aabb_tests);
        self.max_aabb_tests = self.max_aabb_tests.max(counters.aabb_tests);

        self.triangle_tests += counters.triangle_tests;

        self.min_triangle_tests =
            self.min_triangle_tests.min(counters.triangle_tests);

        self.max_triangle_tests =
            self.max_triangle_tests.max(counters.triangle_tests);
    }

    /// Folds statistics collected by another worker of the same pass.
    pub fn merge(mut self, other: &Self) -> Self {
        self.prim_rays += other.prim_rays;
        self.shadow_rays += other.shadow_rays;
        self.refl_rays += other.refl_rays;
        self.brdf_evals += other.brdf_evals;

        self.aabb_tests += other.aabb_tests;
        self.min_aabb_tests = self.min_aabb_tests.min(other.min_aabb_tests);
        self.max_aabb_tests = self.max_aabb_tests.max(other.max_aabb_tests);

        self.triangle_tests += other.triangle_tests;

        self.min_triangle_tests =
            self.min_triangle_tests.min(other.min_triangle_tests);

        self.max_triangle_tests =
            self.max_triangle_tests.max(other.max_triangle_tests);

        self
    }

    /// Computes the derived fields once the pass is over.
    pub fn finish(&mut self, render_time: Duration) {
        self.render_time = render_time;
        self.rays_cast = self.prim_rays + self.shadow_rays + self.refl_rays;

        let secs = render_time.as_secs_f64();

        self.rays_per_sec = if secs > 0.0 {
            ((self.rays_cast as f64) / secs) as u64
        } else {
            0
        };

        if self.rays_cast > 0 {
            let rays_cast = self.rays_cast as f32;

            self.avg_aabb_tests = (self.aabb_tests as f32) / rays_cast;
            self.avg_triangle_tests = (self.triangle_tests as f32) / rays_cast;
        }
    }
}

impl Default for RenderStats {
    fn default() -> Self {
        Self {
            prim_rays: 0,
            shadow_rays: 0,
            refl_rays: 0,
            rays_cast: 0,
            brdf_evals: 0,
            aabb_tests: 0,
            min_aabb_tests: u64::MAX,
            max_aabb_tests: 0,
            avg_aabb_tests: 0.0,
            triangle_tests: 0,
            min_triangle_tests: u64::MAX,
            max_triangle_tests: 0,
            avg_triangle_tests: 0.0,
            render_time: Duration::ZERO,
            rays_per_sec: 0,
        }
    }
}

impl fmt::Display for RenderStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[cfg(feature = "metrics")]
        let render_time = humantime::format_duration(self.render_time);

        #[cfg(not(feature = "metrics"))]
        let render_time = format!("{:?}", self.render_time);

        writeln!(f, "render time ....... {}", render_time)?;
        writeln!(f, "rays cast ......... {}", self.rays_cast)?;
        writeln!(f, "  primary ......... {}", self.prim_rays)?;
        writeln!(f, "  shadow .......... {}", self.shadow_rays)?;
        writeln!(f, "  reflection ...... {}", self.refl_rays)?;
        writeln!(f, "rays per second ... {}", self.rays_per_sec)?;
        writeln!(f, "brdf evaluations .. {}", self.brdf_evals)?;

        writeln!(
            f,
            "aabb tests ........ {} (min: {}, max: {}, avg: {:.2})",
            self.aabb_tests,
            self.min_aabb_tests,
            self.max_aabb_tests,
            self.avg_aabb_tests,
        )?;

        write!(
            f,
            "triangle tests .... {} (min: {}, max: {}, avg: {:.2})",
            self.triangle_tests,
            self.min_triangle_tests,
            self.max_triangle_tests,
            self.avg_triangle_tests,
        )
    }
}
