use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Engine tuning, persisted as TOML. Unknown or missing keys fall back to
/// the defaults, so an old config file keeps working across releases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Fixed relaxation iteration count; the layout never runs to
    /// convergence, it runs exactly this long.
    pub layout_iterations: u32,
    pub link_distance: f32,
    /// Spring strength in [0, 1]; clamped at use.
    pub link_strength: f32,
    pub repulsion_strength: f32,
    pub collide_radius: f32,
    pub layout_damping: f32,
    pub max_step: f32,
    pub bounds_padding: f32,

    pub min_scale: f32,
    pub max_scale: f32,

    /// Fallback geometry when the presentation layer has not supplied real
    /// screen dimensions yet; also sizes the default bounds for an empty
    /// graph.
    pub default_screen_width: f32,
    pub default_screen_height: f32,
    pub default_chrome_height: f32,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            layout_iterations: 300,
            link_distance: 10.0,
            link_strength: 0.7,
            repulsion_strength: 10.0,
            collide_radius: 45.0,
            layout_damping: 0.9,
            max_step: 20.0,
            bounds_padding: 100.0,
            min_scale: 0.5,
            max_scale: 3.0,
            default_screen_width: 390.0,
            default_screen_height: 844.0,
            default_chrome_height: 160.0,
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "taggraph")?;
    Some(proj.config_dir().join("engine.toml"))
}

pub fn load_or_default() -> GraphConfig {
    let Some(path) = config_file_path() else {
        return GraphConfig::default();
    };
    load_or_default_from_path(&path)
}

fn load_or_default_from_path(path: &Path) -> GraphConfig {
    let Ok(contents) = fs::read_to_string(path) else {
        return GraphConfig::default();
    };
    toml::from_str(&contents).unwrap_or_else(|_| GraphConfig::default())
}

pub fn save(cfg: &GraphConfig) -> anyhow::Result<()> {
    let Some(path) = config_file_path() else {
        return Err(anyhow::anyhow!("no config directory available"));
    };
    save_to_path(cfg, &path)
}

fn save_to_path(cfg: &GraphConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    let data = toml::to_string_pretty(cfg).context("failed to serialize engine config")?;
    fs::write(path, data)
        .with_context(|| format!("failed to write engine config {}", path.display()))?;
    Ok(())
}
