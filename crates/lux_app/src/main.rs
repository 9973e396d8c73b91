//! Lux command-line renderer.
//!
//! Usage: `lux [config.json]`. Every config field is optional.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use lux_core::{save_png, Material, TextureCache, DEFAULT_GAMMA};
use lux_renderer::{presets, Camera, RenderConfig, Renderer, Scene};

/// Which built-in scene to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ScenePreset {
    #[default]
    OpenRoom,
    SingleSphere,
}

/// Application configuration, read from JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct AppConfig {
    scene: ScenePreset,
    render: RenderConfig,
    /// PNG written after the render
    output: PathBuf,
    /// Texture for the room walls; a missing file leaves them white
    wall_texture: Option<String>,
    /// Gamma used to decode texture bytes into linear color
    texture_gamma: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scene: ScenePreset::default(),
            render: RenderConfig::default(),
            output: PathBuf::from("out.png"),
            wall_texture: None,
            texture_gamma: DEFAULT_GAMMA,
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let Some(path) = path else {
        log::info!("No config given, using defaults");
        return Ok(AppConfig::default());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;

    log::info!("Loaded config from {}", path.display());
    Ok(config)
}

fn build_scene(config: &AppConfig) -> (Scene, Camera) {
    match config.scene {
        ScenePreset::SingleSphere => presets::single_sphere(),
        ScenePreset::OpenRoom => presets::open_room(wall_material(config)),
    }
}

fn wall_material(config: &AppConfig) -> Material {
    let wall = presets::wall_material();
    match &config.wall_texture {
        Some(path) => {
            let mut textures = TextureCache::new(config.texture_gamma);
            wall.with_texture_or_white(textures.load(path))
        }
        None => wall,
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Lux");

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;

    let renderer = Renderer::new(config.render.clone()).context("Invalid render configuration")?;
    let (scene, camera) = build_scene(&config);

    let output = renderer.render(&scene, &camera).context("Render failed")?;
    save_png(&output.image, &config.output)
        .with_context(|| format!("Failed to save {}", config.output.display()))?;

    log::info!("Done in {:.2?}", output.elapsed);
    Ok(())
}
