//! Lux Renderer - Whitted-style CPU ray tracing
//!
//! A recursive ray tracer with mirror reflection, Fresnel-weighted
//! refraction, Phong direct lighting and binary shadows.
//!
//! Work is spread over a fixed thread pool either as single-pixel tasks
//! pulled from a shared queue or as centre-out buckets on rayon.

mod bucket;
mod camera;
mod config;
mod cuboid;
mod error;
mod hittable;
mod light;
mod plane;
mod renderer;
mod scene;
mod sphere;
mod task;
mod tracer;

pub mod presets;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, Viewport};
pub use config::{Dispatch, RenderConfig, DEFAULT_MAX_DEPTH};
pub use cuboid::{Cuboid, Face};
pub use error::{ConfigError, RenderError, RenderResult};
pub use hittable::{reflect_refract, Hittable, Intersection};
pub use light::{Light, GRID_LIGHT_RADIUS};
pub use plane::Plane;
pub use renderer::{finalize_pixel, render, render_pixel, RenderOutput, Renderer};
pub use scene::Scene;
pub use sphere::Sphere;
pub use task::{generate_tasks, sample_offsets, RenderTask, TaskQueue};
pub use tracer::{TraceStats, Traced, Tracer};

/// Re-export common types from the lower crates
pub use lux_core::{Color, ImageBuffer, Material};
pub use lux_math::{Ray, Vec3};
