use clap::Parser;
use std::path::{Path, PathBuf};

/// Display a single image in an OpenGL window, keeping its aspect ratio.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct CliArgs {
    /// Image file to display. Defaults to `image_path` from the config file.
    pub image: Option<PathBuf>,
}

impl CliArgs {
    pub fn image_path<'a>(&'a self, configured: &'a Path) -> &'a Path {
        self.image.as_deref().unwrap_or(configured)
    }
}
