//! Render orchestration.
//!
//! Turns a scene and camera into a finished image by:
//! - Enumerating one task per pixel from the camera viewport
//! - Tracing tasks on a worker pool (task queue or buckets)
//! - Averaging samples, tone mapping and gamma encoding each pixel

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult};
use crate::camera::Camera;
use crate::config::{Dispatch, RenderConfig};
use crate::error::{RenderError, RenderResult};
use crate::scene::Scene;
use crate::task::{generate_tasks, RenderTask, TaskQueue};
use crate::tracer::{TraceStats, Tracer};
use lux_core::{Color, ImageBuffer};

/// A finished render.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// Display-ready pixels (tone mapped and gamma encoded)
    pub image: ImageBuffer,
    /// Ray counters summed over all workers
    pub stats: TraceStats,
    pub elapsed: Duration,
}

/// Trace one task and finalize its color.
pub fn render_pixel(tracer: &mut Tracer<'_>, camera: &Camera, task: &RenderTask, config: &RenderConfig) -> Color {
    let mut pixel_color = Color::BLACK;
    for point in &task.samples {
        pixel_color += tracer.trace(&camera.ray_through(*point), 0).color;
    }

    // Average the samples
    finalize_pixel(pixel_color / task.samples.len() as f32, config)
}

/// Tone map (when enabled) and gamma encode an averaged pixel.
pub fn finalize_pixel(color: Color, config: &RenderConfig) -> Color {
    let color = if config.tone_mapping { color.tone_mapped() } else { color };
    color.gamma_encoded(config.gamma)
}

/// Multi-threaded renderer.
#[derive(Debug, Clone)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Create a renderer, rejecting an unusable configuration up front.
    pub fn new(config: RenderConfig) -> RenderResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render the scene as seen by the camera.
    ///
    /// Blocks until every pixel is done and every worker has been joined.
    pub fn render(&self, scene: &Scene, camera: &Camera) -> RenderResult<RenderOutput> {
        let config = &self.config;
        camera.validate()?;
        let start = Instant::now();

        log::info!(
            "Rendering {}x{} at {} spp, depth {}, {} threads ({:?})",
            config.width,
            config.height,
            config.samples_per_pixel,
            config.max_depth,
            config.threads,
            config.dispatch
        );
        log::info!("Scene: {} objects, {} lights", scene.objects.len(), scene.lights.len());

        let viewport = camera.viewport(config.aspect_ratio());
        let tasks = generate_tasks(config, &viewport);
        let mut image = ImageBuffer::new(config.width, config.height);

        let stats = match config.dispatch {
            Dispatch::TaskQueue => self.render_queue(scene, camera, tasks, &mut image.pixels)?,
            Dispatch::Buckets => self.render_buckets(scene, camera, &tasks, &mut image.pixels)?,
        };

        let elapsed = start.elapsed();
        log::info!(
            "Render finished in {:.2?}: {} rays, {} shadow rays, {} refraction rays",
            elapsed,
            stats.rays,
            stats.shadow_rays,
            stats.refraction_rays
        );

        Ok(RenderOutput { image, stats, elapsed })
    }

    /// Named OS threads pop tasks from one shared queue and send finished
    /// pixels back over a channel.
    fn render_queue(
        &self,
        scene: &Scene,
        camera: &Camera,
        tasks: Vec<RenderTask>,
        pixels: &mut [Color],
    ) -> RenderResult<TraceStats> {
        let config = &self.config;
        let queue = TaskQueue::new(tasks);
        let total = queue.len();
        let (sender, receiver) = mpsc::channel::<(usize, Color)>();

        thread::scope(|s| -> RenderResult<TraceStats> {
            let mut handles = Vec::with_capacity(config.threads);
            for index in 0..config.threads {
                let sender = sender.clone();
                let queue = &queue;
                let handle = thread::Builder::new()
                    .name(format!("lux-worker-{}", index))
                    .spawn_scoped(s, move || {
                        let mut tracer = Tracer::new(scene, config);
                        while let Some(task) = queue.pop() {
                            let color = render_pixel(&mut tracer, camera, &task, config);
                            if sender.send((task.index, color)).is_err() {
                                break;
                            }
                        }
                        tracer.stats()
                    })
                    .map_err(|source| RenderError::WorkerSpawn { index, source })?;
                handles.push(handle);
            }
            // Workers hold the remaining senders; the receive loop ends when they all exit
            drop(sender);

            let row = config.width as usize;
            for (done, (index, color)) in receiver.into_iter().enumerate() {
                pixels[index] = color;
                if (done + 1) % (row * 16) == 0 {
                    log::debug!("{}/{} pixels", done + 1, total);
                }
            }

            // Join every worker before reporting; an unjoined panicked thread
            // would make the scope itself panic
            let mut stats = TraceStats::default();
            let mut failed = None;
            for handle in handles {
                let name = handle.thread().name().unwrap_or("lux-worker").to_string();
                match handle.join() {
                    Ok(worker) => stats += worker,
                    Err(_) => {
                        log::error!("Render worker {} panicked", name);
                        failed.get_or_insert(name);
                    }
                }
            }
            match failed {
                Some(name) => Err(RenderError::WorkerPanicked(name)),
                None => Ok(stats),
            }
        })
    }

    /// Buckets rendered centre-out on a rayon pool of `config.threads`.
    fn render_buckets(
        &self,
        scene: &Scene,
        camera: &Camera,
        tasks: &[RenderTask],
        pixels: &mut [Color],
    ) -> RenderResult<TraceStats> {
        let config = &self.config;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("lux-bucket-{}", i))
            .build()?;

        let buckets = generate_buckets(config.width, config.height, config.bucket_size);
        log::debug!("{} buckets of {} px", buckets.len(), config.bucket_size);

        // rayon re-raises a bucket panic on this thread
        let results: Vec<BucketResult> = panic::catch_unwind(AssertUnwindSafe(|| {
            pool.install(|| {
                buckets
                    .par_iter()
                    .map(|bucket| render_bucket(bucket, tasks, scene, camera, config))
                    .collect()
            })
        }))
        .map_err(|_| {
            log::error!("Bucket render panicked");
            RenderError::WorkerPanicked("lux-bucket".to_string())
        })?;

        let mut stats = TraceStats::default();
        for result in results {
            for (index, color) in result.bucket.pixel_indices(config.width).zip(result.pixels) {
                pixels[index] = color;
            }
            stats += result.stats;
        }
        Ok(stats)
    }
}

/// Validate `config` and render in one call.
pub fn render(scene: &Scene, camera: &Camera, config: &RenderConfig) -> RenderResult<RenderOutput> {
    Renderer::new(config.clone())?.render(scene, camera)
}
