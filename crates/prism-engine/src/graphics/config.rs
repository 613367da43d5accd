use crate::device::DeviceParams;
use crate::shader::ShaderPaths;

/// Far clip plane.
pub const SCREEN_DEPTH: f32 = 1000.0;

/// Near clip plane.
pub const SCREEN_NEAR: f32 = 0.1;

pub const ENV_VSYNC: &str = "PRISM_VSYNC";
pub const ENV_FULLSCREEN: &str = "PRISM_FULLSCREEN";

/// Startup configuration of the frame driver.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicsConfig {
    /// Windowed client size; fullscreen uses the monitor size instead.
    pub width: u32,
    pub height: u32,

    pub vsync: bool,
    pub fullscreen: bool,
    pub screen_depth: f32,
    pub screen_near: f32,

    /// RGBA the back buffer is cleared to every frame.
    pub clear_color: [f32; 4],

    pub shaders: ShaderPaths,
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            vsync: true,
            fullscreen: false,
            screen_depth: SCREEN_DEPTH,
            screen_near: SCREEN_NEAR,
            clear_color: [0.5, 0.5, 0.5, 1.0],
            shaders: ShaderPaths::default(),
        }
    }
}

impl GraphicsConfig {
    /// Defaults with `PRISM_VSYNC` / `PRISM_FULLSCREEN` applied.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`. Unparseable values are logged and
    /// ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = flag(&lookup, ENV_VSYNC) {
            self.vsync = v;
        }
        if let Some(v) = flag(&lookup, ENV_FULLSCREEN) {
            self.fullscreen = v;
        }
        self
    }

    pub fn device_params(&self) -> DeviceParams {
        DeviceParams {
            width: self.width,
            height: self.height,
            vsync: self.vsync,
            fullscreen: self.fullscreen,
            screen_depth: self.screen_depth,
            screen_near: self.screen_near,
        }
    }
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    let raw = lookup(key)?;
    let parsed = parse_flag(&raw);
    if parsed.is_none() {
        log::warn!("ignoring {key}={raw:?}: expected 0/1/true/false");
    }
    parsed
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults() {
        let c = GraphicsConfig::default();
        assert!(c.vsync);
        assert!(!c.fullscreen);
        assert_eq!((c.width, c.height), (800, 600));
        assert_eq!(c.screen_depth, 1000.0);
        assert_eq!(c.screen_near, 0.1);
        assert_eq!(c.clear_color, [0.5, 0.5, 0.5, 1.0]);
        c.device_params().validate().unwrap();
    }

    #[test]
    fn overrides_apply() {
        let c = GraphicsConfig::default()
            .with_overrides(env(&[(ENV_VSYNC, "0"), (ENV_FULLSCREEN, "TRUE")]));
        assert!(!c.vsync);
        assert!(c.fullscreen);

        let p = c.device_params();
        assert!(!p.vsync);
        assert!(p.fullscreen);
    }

    #[test]
    fn bad_values_are_ignored() {
        let c = GraphicsConfig::default().with_overrides(env(&[(ENV_VSYNC, "sometimes")]));
        assert!(c.vsync);
    }

    #[test]
    fn flag_spellings() {
        assert_eq!(parse_flag(" on "), Some(true));
        assert_eq!(parse_flag("No"), Some(false));
        assert_eq!(parse_flag(""), None);
    }
}
