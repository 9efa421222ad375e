//! Loading shader sources and images from the asset directory.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use image::DynamicImage;

use crate::abs::ShaderProgram;

/// Resolves and reads files below an asset root directory.
#[derive(Debug, Clone)]
pub struct Assets {
    root: PathBuf,
}

impl Assets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of an asset given relative to the root.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    pub fn read_text(&self, relative: impl AsRef<Path>) -> anyhow::Result<String> {
        let path = self.path(relative);
        std::fs::read_to_string(&path).with_context(|| format!("failed to open {}", path.display()))
    }

    /// Decodes an image and flips it so that its first row is the bottom one, as
    /// OpenGL expects.
    pub fn load_image(&self, relative: impl AsRef<Path>) -> anyhow::Result<DynamicImage> {
        let path = self.path(relative);
        let image =
            image::open(&path).with_context(|| format!("failed to load {}", path.display()))?;
        log::debug!(
            "loaded {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(image.flipv())
    }

    /// Builds the program from `shaders/<name>/vert.glsl` and `shaders/<name>/frag.glsl`.
    pub fn load_program(&self, gl: &Arc<glow::Context>, name: &str) -> anyhow::Result<ShaderProgram> {
        let dir = Path::new("shaders").join(name);
        let vert = self.read_text(dir.join("vert.glsl"))?;
        let frag = self.read_text(dir.join("frag.glsl"))?;
        let program = ShaderProgram::from_sources(gl, &vert, &frag)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("failed to build shader program '{name}'"))?;
        log::debug!("built shader program '{name}'");
        Ok(program)
    }
}
