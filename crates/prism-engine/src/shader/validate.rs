use std::path::Path;

use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::ShaderError;

/// Parses and validates a WGSL source, and checks it exports `entry` for
/// `stage`.
///
/// Diagnostics are rendered against `source` so the report points at the
/// offending lines.
pub fn validate_wgsl(
    path: &Path,
    source: &str,
    stage: naga::ShaderStage,
    entry: &'static str,
) -> Result<naga::Module, ShaderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ShaderError::Compile {
        path: path.to_path_buf(),
        report: e.emit_to_string(source),
    })?;

    Validator::new(ValidationFlags::all(), Capabilities::default())
        .validate(&module)
        .map_err(|e| ShaderError::Compile {
            path: path.to_path_buf(),
            report: e.emit_to_string(source),
        })?;

    let exported = module
        .entry_points
        .iter()
        .any(|ep| ep.name == entry && ep.stage == stage);
    if !exported {
        return Err(ShaderError::MissingEntryPoint {
            path: path.to_path_buf(),
            entry,
            stage,
        });
    }

    Ok(module)
}
