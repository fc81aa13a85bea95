//! Progressive render session.
//!
//! A session owns the scene, the camera and the accumulator. Each pass
//! takes one sample for every pixel in a patch of consecutive pixel
//! indices starting at the cursor, wrapping around the end of the image,
//! and writes the tone-mapped result into the caller's RGBA buffer. The
//! cursor then advances by the patch size, so repeated passes visit the
//! pixels round-robin.
//!
//! Within a pass the patch is split into fixed-size chunks that rayon
//! workers process independently. Every chunk draws from its own
//! generator seeded from the session seed, the pass number and the
//! chunk's first pixel, so results do not depend on scheduling.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Instant;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::accumulator::{color_to_rgba, Accumulator, PixelState};
use crate::camera::Camera;
use crate::error::{RenderError, RenderResult};
use crate::integrator::Integrator;
use crate::scene::Scene;

/// Default number of pixels sampled per pass.
pub const DEFAULT_PATCH_SIZE: usize = 50_000;

/// Pixels handed to a worker task at a time.
const PIXELS_PER_TASK: usize = 1024;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Light transport algorithm
    pub integrator: Integrator,
    /// Pixels sampled per pass (clamped to the pixel count)
    pub patch_size: usize,
    /// Worker threads, or 0 for one per core
    pub threads: usize,
    /// Base seed for the per-task random streams
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            integrator: Integrator::RayTrace,
            patch_size: DEFAULT_PATCH_SIZE,
            threads: 0,
            seed: 0,
        }
    }
}

impl RenderConfig {
    /// Set output resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = integrator;
        self
    }

    /// Use the path tracer when `path_tracing` is set, the ray tracer
    /// otherwise.
    pub fn with_path_tracing(self, path_tracing: bool) -> Self {
        self.with_integrator(Integrator::from_path_tracing(path_tracing))
    }

    pub fn with_patch_size(mut self, patch_size: usize) -> Self {
        self.patch_size = patch_size;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of pixels in the image.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Length in bytes of the RGBA buffer a session writes into.
    pub fn rgba_len(&self) -> usize {
        self.pixel_count() * 4
    }
}

/// Receives frames from [`Session::run`] and decides when to stop.
pub trait Presenter {
    /// Polled once before every pass.
    fn should_stop(&self) -> bool;

    /// Called after every pass with the updated buffer.
    fn present(&mut self, rgba: &[u8], width: u32, height: u32);
}

/// Progressive render of one scene from one camera.
pub struct Session {
    scene: Scene,
    camera: Camera,
    config: RenderConfig,
    accumulator: Accumulator,
    pool: ThreadPool,
    patch_size: usize,
    cursor: usize,
    passes: u64,
}

impl Session {
    /// Set up a session. The scene and camera are read-only afterwards.
    pub fn new(scene: Scene, camera: Camera, config: RenderConfig) -> RenderResult<Self> {
        if config.width == 0 || config.height == 0 {
            return Err(RenderError::InvalidResolution {
                width: config.width,
                height: config.height,
            });
        }
        if config.patch_size == 0 {
            return Err(RenderError::InvalidPatchSize);
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("glint-worker-{i}"))
            .build()?;
        let patch_size = config.patch_size.min(config.pixel_count());

        info!(
            "Render session: {}x{}, {}, {} pixels per pass, {} workers",
            config.width,
            config.height,
            config.integrator,
            patch_size,
            pool.current_num_threads()
        );

        Ok(Self {
            scene,
            camera,
            accumulator: Accumulator::new(config.width, config.height),
            config,
            pool,
            patch_size,
            cursor: 0,
            passes: 0,
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }

    /// Number of completed passes.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Index of the first pixel the next pass samples.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Pixels sampled per pass after clamping.
    pub fn patch_size(&self) -> usize {
        self.patch_size
    }

    fn check_buffer(&self, rgba: &[u8]) -> RenderResult<()> {
        let expected = self.config.rgba_len();
        if rgba.len() != expected {
            return Err(RenderError::BufferSize {
                expected,
                actual: rgba.len(),
            });
        }
        Ok(())
    }

    /// Take one sample for pixel (x, y) and update its bytes in `rgba`.
    pub fn advance(
        &mut self,
        x: u32,
        y: u32,
        rgba: &mut [u8],
        rng: &mut dyn RngCore,
    ) -> RenderResult<()> {
        self.check_buffer(rgba)?;
        let (width, height) = (self.config.width, self.config.height);
        if x >= width || y >= height {
            return Err(RenderError::PixelOutOfBounds {
                x,
                y,
                width,
                height,
            });
        }

        let index = y as usize * width as usize + x as usize;
        let pixel = PixelSampler {
            scene: &self.scene,
            camera: &self.camera,
            integrator: self.config.integrator,
            width,
            height,
        };
        pixel.sample(
            index,
            self.accumulator.get_mut(x, y),
            &mut rgba[index * 4..index * 4 + 4],
            rng,
        );
        Ok(())
    }

    /// Sample one patch in parallel and advance the cursor.
    pub fn pass(&mut self, rgba: &mut [u8]) -> RenderResult<()> {
        self.check_buffer(rgba)?;
        let start = Instant::now();
        let total = self.accumulator.len();
        let end = self.cursor + self.patch_size;

        if end <= total {
            self.render_range(self.cursor, end, rgba);
        } else {
            self.render_range(self.cursor, total, rgba);
            self.render_range(0, end - total, rgba);
        }

        self.cursor = end % total;
        self.passes += 1;
        debug!(
            "Pass {} done in {:.2?}, cursor at {}",
            self.passes,
            start.elapsed(),
            self.cursor
        );
        Ok(())
    }

    /// Sample pixel indices `first..last` on the worker pool.
    fn render_range(&mut self, first: usize, last: usize, rgba: &mut [u8]) {
        let pixel = PixelSampler {
            scene: &self.scene,
            camera: &self.camera,
            integrator: self.config.integrator,
            width: self.config.width,
            height: self.config.height,
        };
        let seed = self.config.seed;
        let pass = self.passes;
        let states = &mut self.accumulator.pixels_mut()[first..last];
        let bytes = &mut rgba[first * 4..last * 4];

        self.pool.install(|| {
            states
                .par_chunks_mut(PIXELS_PER_TASK)
                .zip(bytes.par_chunks_mut(PIXELS_PER_TASK * 4))
                .enumerate()
                .for_each(|(task, (states, bytes))| {
                    let task_first = first + task * PIXELS_PER_TASK;
                    let mut rng = task_rng(seed, pass, task_first);
                    for (offset, (state, out)) in
                        states.iter_mut().zip(bytes.chunks_exact_mut(4)).enumerate()
                    {
                        pixel.sample(task_first + offset, state, out, &mut rng);
                    }
                });
        });
    }

    /// Run passes until `presenter` asks to stop, presenting after each.
    ///
    /// Returns the number of passes run.
    pub fn run(&mut self, rgba: &mut [u8], presenter: &mut impl Presenter) -> RenderResult<u64> {
        let start = Instant::now();
        let mut passes = 0;

        while !presenter.should_stop() {
            self.pass(rgba)?;
            presenter.present(rgba, self.config.width, self.config.height);
            passes += 1;
        }

        info!(
            "Rendered {} passes ({} samples) in {:.2?}",
            passes,
            passes * self.patch_size as u64,
            start.elapsed()
        );
        Ok(passes)
    }
}

/// Read-only state shared by every pixel sample of a pass.
#[derive(Clone, Copy)]
struct PixelSampler<'a> {
    scene: &'a Scene,
    camera: &'a Camera,
    integrator: Integrator,
    width: u32,
    height: u32,
}

impl PixelSampler<'_> {
    /// Jitter a ray inside pixel `index`, fold its radiance into `state`
    /// and write the tone-mapped mean to `out`.
    fn sample(&self, index: usize, state: &mut PixelState, out: &mut [u8], rng: &mut dyn RngCore) {
        let x = (index % self.width as usize) as f32;
        let y = (index / self.width as usize) as f32;
        let sx = (x + rng.gen::<f32>()) / self.width as f32;
        let sy = (y + rng.gen::<f32>()) / self.height as f32;

        let ray = self.camera.generate_ray(sx, sy);
        let radiance = self.integrator.radiance(self.scene, ray, rng);
        let mean = state.fold(radiance);
        out.copy_from_slice(&color_to_rgba(mean));
    }
}

/// Random stream for the task starting at `first_pixel` in pass `pass`.
fn task_rng(seed: u64, pass: u64, first_pixel: usize) -> StdRng {
    let mut hasher = DefaultHasher::new();
    (seed, pass, first_pixel).hash(&mut hasher);
    StdRng::seed_from_u64(hasher.finish())
}
