//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel on a rayon pool, centre first.

use crate::camera::Camera;
use crate::renderer::render_pixel;
use crate::scene::Scene;
use crate::task::RenderTask;
use crate::tracer::{TraceStats, Tracer};
use crate::RenderConfig;
use lux_core::Color;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major image indices covered by this bucket, in bucket row order.
    pub fn pixel_indices(&self, image_width: u32) -> impl Iterator<Item = usize> + '_ {
        (self.y..self.y + self.height).flat_map(move |y| {
            (self.x..self.x + self.width).map(move |x| y as usize * image_width as usize + x as usize)
        })
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets covering the image, sorted from the center outward.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let mut buckets = Vec::new();

    for y in (0..height).step_by(bucket_size as usize) {
        for x in (0..width).step_by(bucket_size as usize) {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
        }
    }

    sort_spiral(&mut buckets, width, height);

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from the image center.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    let distance = |b: &Bucket| {
        let bx = b.x as f32 + b.width as f32 / 2.0;
        let by = b.y as f32 + b.height as f32 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    // Stable sort keeps row-major order between equidistant buckets
    buckets.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Finished pixel colors in row-major order within the bucket
    pub pixels: Vec<Color>,
    pub stats: TraceStats,
}

/// Render every pixel of a bucket.
///
/// `tasks` is the full row-major task list of the image.
pub fn render_bucket(
    bucket: &Bucket,
    tasks: &[RenderTask],
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
) -> BucketResult {
    let mut tracer = Tracer::new(scene, config);
    let pixels = bucket
        .pixel_indices(config.width)
        .map(|index| render_pixel(&mut tracer, camera, &tasks[index], config))
        .collect();

    BucketResult {
        bucket: *bucket,
        pixels,
        stats: tracer.stats(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid

        let total_pixels: usize = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 70, 64);
        assert_eq!(buckets.len(), 4);

        let total_pixels: usize = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 70);
    }

    #[test]
    fn test_spiral_order() {
        let buckets = generate_buckets(192, 192, 64);
        assert_eq!(buckets.len(), 9); // 3x3 grid

        // First bucket should be the center one
        assert_eq!((buckets[0].x, buckets[0].y), (64, 64));
        assert!(buckets.iter().enumerate().all(|(i, b)| b.index == i));
    }

    #[test]
    fn test_buckets_cover_every_pixel_once() {
        let (width, height) = (37, 23);
        let mut covered = vec![0u32; (width * height) as usize];
        for bucket in generate_buckets(width, height, 8) {
            for index in bucket.pixel_indices(width) {
                covered[index] += 1;
            }
        }
        assert!(covered.iter().all(|&n| n == 1));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_pixel_indices_past_u32() {
        // Row 70000 of a 70000 px wide image starts beyond u32::MAX
        let bucket = Bucket::new(5, 70_000, 2, 1, 0);
        let indices: Vec<usize> = bucket.pixel_indices(70_000).collect();

        assert_eq!(indices, vec![4_900_000_005, 4_900_000_006]);
        assert_eq!(Bucket::new(0, 0, 70_000, 70_000, 0).pixel_count(), 4_900_000_000);
    }
}
