use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 500,
            title: "GL ImageViewer".to_string(),
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub clear_color: [f32; 4],
    /// Shown when no path is given on the command line.
    pub image_path: PathBuf,
    pub window: WindowConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.2, 0.4, 0.8, 1.0],
            image_path: PathBuf::from("res/Asset.png"),
            window: WindowConfig::default(),
        }
    }
}

impl ViewerConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }
}

/// Reads the config at `config_path`, writing the defaults there first if it is missing.
pub fn load_or_create_config_at(config_path: &Path) -> Result<ViewerConfig> {
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    if !config_path.exists() {
        let default_config = ViewerConfig::default();
        let toml_content = toml::to_string_pretty(&default_config)?;
        std::fs::write(config_path, toml_content).context("Failed to write default config")?;
        return Ok(default_config);
    }

    let content = std::fs::read_to_string(config_path).context("Failed to read config file")?;
    ViewerConfig::from_toml(&content)
}

pub fn load_or_create_config() -> Result<ViewerConfig> {
    load_or_create_config_at(&get_config_path()?)
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("org", "imgview", "imgview")
        .context("Couldn't determine project directory")?;
    Ok(proj_dirs.config_dir().join("viewer.toml"))
}
