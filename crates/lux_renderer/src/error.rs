//! Renderer error types.

use thiserror::Error;

/// A render configuration that cannot be used.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("image size must be non-zero, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    #[error("thread count must be at least 1")]
    ZeroThreads,

    #[error("max depth must be at least 1")]
    ZeroDepth,

    #[error("samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("bucket size must be at least 1")]
    ZeroBucketSize,

    #[error("gamma must be positive and finite, got {0}")]
    InvalidGamma(f32),

    #[error("camera cannot form a viewport: {0}")]
    DegenerateCamera(&'static str),
}

/// Errors raised while rendering.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid render configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("failed to spawn render worker {index}: {source}")]
    WorkerSpawn {
        index: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("render worker {0} panicked")]
    WorkerPanicked(String),

    #[error("failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
