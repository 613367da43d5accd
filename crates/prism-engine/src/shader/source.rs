use std::path::{Path, PathBuf};

use super::ShaderError;

/// Vertex stage entry point every vertex shader must export.
pub const VERTEX_ENTRY: &str = "color_vertex";

/// Fragment stage entry point every pixel shader must export.
pub const PIXEL_ENTRY: &str = "color_pixel";

const DEFAULT_VERTEX_PATH: &str = "shaders/color.vs.wgsl";
const DEFAULT_PIXEL_PATH: &str = "shaders/color.ps.wgsl";

/// Locations of the vertex and pixel shader sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderPaths {
    pub vertex: PathBuf,
    pub pixel: PathBuf,
}

impl Default for ShaderPaths {
    fn default() -> Self {
        Self {
            vertex: PathBuf::from(DEFAULT_VERTEX_PATH),
            pixel: PathBuf::from(DEFAULT_PIXEL_PATH),
        }
    }
}

impl ShaderPaths {
    pub fn new(vertex: impl Into<PathBuf>, pixel: impl Into<PathBuf>) -> Self {
        Self {
            vertex: vertex.into(),
            pixel: pixel.into(),
        }
    }

    /// Relative paths are looked up in the working directory first, then
    /// under this crate's directory.
    pub fn resolve(&self) -> Self {
        Self {
            vertex: resolve_path(&self.vertex),
            pixel: resolve_path(&self.pixel),
        }
    }
}

fn resolve_path(path: &Path) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }
    let bundled = Path::new(env!("CARGO_MANIFEST_DIR")).join(path);
    if bundled.exists() {
        bundled
    } else {
        path.to_path_buf()
    }
}

/// Reads a shader file into memory.
pub fn load_source(path: &Path) -> Result<String, ShaderError> {
    std::fs::read_to_string(path).map_err(|source| ShaderError::MissingFile {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_shaders_resolve_from_any_directory() {
        let paths = ShaderPaths::default().resolve();
        assert!(paths.vertex.exists(), "{}", paths.vertex.display());
        assert!(paths.pixel.exists(), "{}", paths.pixel.display());
    }

    #[test]
    fn unknown_paths_are_left_untouched() {
        let paths = ShaderPaths::new("nowhere/a.wgsl", "nowhere/b.wgsl").resolve();
        assert_eq!(paths.vertex, PathBuf::from("nowhere/a.wgsl"));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = load_source(Path::new("nowhere/a.wgsl")).unwrap_err();
        assert!(matches!(
            &err,
            ShaderError::MissingFile { path, .. } if path == Path::new("nowhere/a.wgsl")
        ));
        assert!(err.to_string().contains("nowhere/a.wgsl"));
    }
}
