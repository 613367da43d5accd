use std::path::PathBuf;

use thiserror::Error;

/// Shader asset failures. All of them abort initialization.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("missing shader file {}", path.display())]
    MissingFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `report` is the compiler diagnostic rendered against the source text.
    #[error("error compiling shader {}:\n{report}", path.display())]
    Compile { path: PathBuf, report: String },

    #[error("shader {} has no {stage:?} entry point `{entry}`", path.display())]
    MissingEntryPoint {
        path: PathBuf,
        entry: &'static str,
        stage: naga::ShaderStage,
    },

    /// The stages compile on their own but do not form a valid pipeline,
    /// e.g. the pixel stage reads a location the vertex stage never writes.
    #[error(
        "shaders {} and {} do not link:\n{report}",
        vertex.display(),
        pixel.display()
    )]
    Link {
        vertex: PathBuf,
        pixel: PathBuf,
        report: String,
    },

    #[error("shader program is already initialized")]
    AlreadyInitialized,

    #[error("render device is not initialized")]
    DeviceNotReady,
}
