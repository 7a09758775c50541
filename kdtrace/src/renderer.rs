mod frame;
mod options;

use std::thread;
use std::time::Instant;

use glam::Vec3;

pub use self::frame::*;
pub use self::options::*;
use crate::gpu::Ray;
use crate::{Error, RayTransform, RenderStats, Result, Scene, Tracer};

/// Renders whole frames on the CPU and keeps statistics of the latest pass.
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    options: RenderOptions,
    stats: RenderStats,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Result<Self> {
        options.validate()?;

        Ok(Self {
            options,
            stats: Default::default(),
        })
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Statistics of the most recent [`Self::render()`].
    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    /// Traces one ray per pixel; `rays` go in row-major order and get
    /// `transform` applied before being traced.
    pub fn render(
        &mut self,
        scene: &Scene,
        rays: &[Ray],
        transform: &RayTransform,
        width: u32,
        height: u32,
    ) -> Result<Frame> {
        let mut frame = Frame::new(width, height);

        if rays.len() != frame.pixels().len() {
            return Err(Error::RayCountMismatch {
                got: rays.len(),
                width,
                height,
            });
        }

        let tracer = Tracer::new(scene, &self.options)?;
        let tt = Instant::now();

        let band_rows = (height as usize).div_ceil(self.options.threads);
        let band_len = (band_rows * (width as usize)).max(1);

        log::debug!(
            "Rendering {}x{} frame; threads={}, band_rows={}",
            width,
            height,
            self.options.threads,
            band_rows,
        );

        let mut stats = thread::scope(|s| {
            let tracer = &tracer;

            let workers: Vec<_> = frame
                .pixels_mut()
                .chunks_mut(band_len)
                .zip(rays.chunks(band_len))
                .map(|(pixels, rays)| {
                    s.spawn(move || render_band(tracer, transform, pixels, rays))
                })
                .collect();

            workers
                .into_iter()
                .map(|worker| {
                    worker
                        .join()
                        .unwrap_or_else(|err| std::panic::resume_unwind(err))
                })
                .fold(RenderStats::default(), |stats, band| stats.merge(&band))
        });

        stats.finish(tt.elapsed());

        log::info!(
            "Frame rendered in {:?} ({} rays cast)",
            stats.render_time,
            stats.rays_cast,
        );

        self.stats = stats;

        Ok(frame)
    }
}

fn render_band(
    tracer: &Tracer<'_>,
    transform: &RayTransform,
    pixels: &mut [Vec3],
    rays: &[Ray],
) -> RenderStats {
    let mut stats = RenderStats::default();

    for (pixel, ray) in pixels.iter_mut().zip(rays) {
        let (color, counters) = tracer.trace_primary(transform.apply(*ray));

        *pixel = color;
        stats.record(&counters);
    }

    stats
}
