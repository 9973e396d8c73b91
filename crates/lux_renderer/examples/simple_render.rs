//! Simple ray tracer example.
//!
//! Renders the open room preset with checkered walls and saves it as PNG.

use std::sync::Arc;

use lux_core::{save_png, Color, Texture};
use lux_renderer::{presets, Dispatch, RenderConfig, Renderer};

fn main() {
    println!("Lux Ray Tracer - Simple Example");
    println!("===============================");

    let start = std::time::Instant::now();
    let checker = Arc::new(Texture::checker(8, Color::splat(0.35), Color::splat(0.8)));
    let wall = presets::wall_material().with_texture(checker);
    let (scene, camera) = presets::open_room(wall);
    println!("Scene built in {:?}", start.elapsed());

    let config = RenderConfig::default()
        .with_resolution(640, 480)
        .with_quality(4, 5)
        .with_dispatch(Dispatch::Buckets);

    println!(
        "Rendering {}x{} @ {} spp on {} threads...",
        config.width, config.height, config.samples_per_pixel, config.threads
    );

    let renderer = Renderer::new(config).expect("Invalid render config");
    let output = renderer.render(&scene, &camera).expect("Render failed");

    println!("Rendered in {:?} ({} rays)", output.elapsed, output.stats.rays);

    let filename = "output.png";
    save_png(&output.image, filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}
