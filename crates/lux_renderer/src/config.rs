//! Render configuration.

use serde::{Deserialize, Serialize};

use crate::bucket::DEFAULT_BUCKET_SIZE;
use crate::error::ConfigError;
use lux_core::DEFAULT_GAMMA;

/// Default recursion bound for reflection and refraction.
pub const DEFAULT_MAX_DEPTH: u32 = 5;

/// How pixel work is handed to threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dispatch {
    /// Named OS threads pulling single-pixel tasks from a shared queue
    #[default]
    TaskQueue,
    /// Square buckets rendered centre-out on a rayon pool
    Buckets,
}

/// Render configuration.
///
/// Every field has a default, so a config file only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Worker thread count
    pub threads: usize,
    /// Maximum recursion depth; depth 1 traces primary rays only
    pub max_depth: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    pub dispatch: Dispatch,
    /// Bucket edge in pixels, used by [`Dispatch::Buckets`]
    pub bucket_size: u32,
    /// Display gamma applied when finalizing pixels
    pub gamma: f32,
    /// Apply Reinhard tone mapping before gamma
    pub tone_mapping: bool,
    /// Draw lights hit by primary rays
    pub show_lights: bool,
    /// Seed for jittered sample positions
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            threads: std::thread::available_parallelism().map(|n| n.get()).unwrap_or(4),
            max_depth: DEFAULT_MAX_DEPTH,
            samples_per_pixel: 1,
            dispatch: Dispatch::TaskQueue,
            bucket_size: DEFAULT_BUCKET_SIZE,
            gamma: DEFAULT_GAMMA,
            tone_mapping: true,
            show_lights: false,
            seed: 42,
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn with_bucket_size(mut self, bucket_size: u32) -> Self {
        self.bucket_size = bucket_size;
        self
    }

    pub fn with_gamma(mut self, gamma: f32) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_tone_mapping(mut self, enabled: bool) -> Self {
        self.tone_mapping = enabled;
        self
    }

    pub fn with_show_lights(mut self, enabled: bool) -> Self {
        self.show_lights = enabled;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Reject configurations that cannot produce an image.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.threads == 0 {
            return Err(ConfigError::ZeroThreads);
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if self.bucket_size == 0 {
            return Err(ConfigError::ZeroBucketSize);
        }
        if !(self.gamma.is_finite() && self.gamma > 0.0) {
            return Err(ConfigError::InvalidGamma(self.gamma));
        }
        Ok(())
    }
}
