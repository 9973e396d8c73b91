//! Per-pixel render tasks and the shared task queue.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::camera::Viewport;
use crate::config::RenderConfig;
use lux_math::Vec3;

/// Sub-pixel positions used for two to four samples.
const GRID_2X2: [(f32, f32); 4] = [(0.25, 0.25), (0.75, 0.25), (0.75, 0.75), (0.25, 0.75)];

/// One pixel's worth of work.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTask {
    /// Row-major pixel index
    pub index: usize,
    /// Viewport points to shoot primary rays through
    pub samples: Vec<Vec3>,
}

/// Sub-pixel sample offsets in [0, 1) x [0, 1).
///
/// One sample sits at the pixel center, two to four use a fixed 2x2
/// pattern, more are jittered within strata that tile the whole pixel:
/// `floor(sqrt(count))` rows, with the columns of each row summing to
/// `count`.
pub fn sample_offsets(count: u32, rng: &mut impl Rng) -> Vec<(f32, f32)> {
    match count {
        0 => Vec::new(),
        1 => vec![(0.5, 0.5)],
        2..=4 => GRID_2X2[..count as usize].to_vec(),
        _ => {
            let rows = (count as f32).sqrt().floor() as u32;
            let row_height = 1.0 / rows as f32;
            let mut offsets = Vec::with_capacity(count as usize);
            for row in 0..rows {
                // Leftover samples go to the first rows
                let cols = count / rows + u32::from(row < count % rows);
                let col_width = 1.0 / cols as f32;
                for col in 0..cols {
                    offsets.push((
                        (col as f32 + rng.gen::<f32>()) * col_width,
                        (row as f32 + rng.gen::<f32>()) * row_height,
                    ));
                }
            }
            offsets
        }
    }
}

/// Enumerate one task per pixel in row-major order.
///
/// Jitter comes from a generator seeded with `config.seed`, so the same
/// config always yields the same sample points.
pub fn generate_tasks(config: &RenderConfig, viewport: &Viewport) -> Vec<RenderTask> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let (width, height) = (config.width as f32, config.height as f32);

    let mut tasks = Vec::with_capacity(config.pixel_count());
    for y in 0..config.height {
        for x in 0..config.width {
            let samples = sample_offsets(config.samples_per_pixel, &mut rng)
                .into_iter()
                .map(|(ox, oy)| viewport.point_at((x as f32 + ox) / width, (y as f32 + oy) / height))
                .collect();

            tasks.push(RenderTask {
                index: tasks.len(),
                samples,
            });
        }
    }
    tasks
}

/// FIFO of pending tasks shared by the render workers.
///
/// The lock is held only to pop; tracing happens outside it.
#[derive(Debug, Default)]
pub struct TaskQueue {
    tasks: Mutex<VecDeque<RenderTask>>,
}

impl TaskQueue {
    pub fn new(tasks: impl IntoIterator<Item = RenderTask>) -> Self {
        Self {
            tasks: Mutex::new(tasks.into_iter().collect()),
        }
    }

    /// Take the next task, `None` once the queue has drained.
    pub fn pop(&self) -> Option<RenderTask> {
        // Popping cannot leave the deque half-updated, so a poisoned lock is still usable
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner).pop_front()
    }

    pub fn len(&self) -> usize {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
