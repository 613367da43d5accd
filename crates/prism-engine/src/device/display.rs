use winit::monitor::{MonitorHandle, VideoModeHandle};

/// Minimum color depth of modes considered during negotiation (8 bits per channel).
pub const MIN_MODE_BIT_DEPTH: u16 = 24;

/// Display refresh rate as a rational number of hertz.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RefreshRate {
    pub numerator: u32,
    pub denominator: u32,
}

impl RefreshRate {
    /// Used when no display mode matches the requested size.
    pub const DEFAULT: RefreshRate = RefreshRate {
        numerator: 60,
        denominator: 1,
    };

    /// Refresh rate of a non-vsync swap chain.
    pub const UNCAPPED: RefreshRate = RefreshRate {
        numerator: 0,
        denominator: 1,
    };

    #[inline]
    pub const fn from_millihertz(mhz: u32) -> Self {
        Self {
            numerator: mhz,
            denominator: 1000,
        }
    }

    pub fn hertz(self) -> f64 {
        if self.denominator == 0 {
            return 0.0;
        }
        self.numerator as f64 / self.denominator as f64
    }

    /// Time between two vertical blanks, `None` when uncapped.
    pub fn interval(self) -> Option<std::time::Duration> {
        let hz = self.hertz();
        (hz > 0.0).then(|| std::time::Duration::from_secs_f64(1.0 / hz))
    }
}

/// One display mode reported by an output.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DisplayMode {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u16,
    pub refresh_millihertz: u32,
}

impl DisplayMode {
    fn from_video_mode(mode: &VideoModeHandle) -> Self {
        let size = mode.size();
        Self {
            width: size.width,
            height: size.height,
            bit_depth: mode.bit_depth(),
            refresh_millihertz: mode.refresh_rate_millihertz(),
        }
    }
}

/// Result of scanning an output's mode list.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ModeNegotiation {
    pub refresh_rate: RefreshRate,

    /// Index into the scanned list of the mode that matched, if any.
    pub matched: Option<usize>,
}

/// Scans `modes` for the requested size and captures its refresh rate.
///
/// The scan is linear and the last match wins. Without a match the refresh
/// rate falls back to [`RefreshRate::DEFAULT`].
pub fn negotiate_refresh_rate(modes: &[DisplayMode], width: u32, height: u32) -> ModeNegotiation {
    let mut negotiated = ModeNegotiation {
        refresh_rate: RefreshRate::DEFAULT,
        matched: None,
    };

    for (i, mode) in modes.iter().enumerate() {
        if mode.bit_depth < MIN_MODE_BIT_DEPTH {
            continue;
        }
        if mode.width == width && mode.height == height && mode.refresh_millihertz > 0 {
            negotiated = ModeNegotiation {
                refresh_rate: RefreshRate::from_millihertz(mode.refresh_millihertz),
                matched: Some(i),
            };
        }
    }

    negotiated
}

/// Primary output of a window plus its enumerated modes.
///
/// Short-lived: dropped as soon as the refresh rate and fullscreen mode are
/// extracted.
pub(crate) struct OutputModes {
    pub name: Option<String>,
    pub modes: Vec<DisplayMode>,
    handles: Vec<VideoModeHandle>,
}

impl OutputModes {
    pub fn enumerate(monitor: &MonitorHandle) -> Self {
        let handles: Vec<VideoModeHandle> = monitor.video_modes().collect();
        let modes = handles.iter().map(DisplayMode::from_video_mode).collect();
        Self {
            name: monitor.name(),
            modes,
            handles,
        }
    }

    pub fn video_mode(&self, index: usize) -> Option<VideoModeHandle> {
        self.handles.get(index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode(width: u32, height: u32, hz: u32) -> DisplayMode {
        DisplayMode {
            width,
            height,
            bit_depth: 32,
            refresh_millihertz: hz * 1000,
        }
    }

    #[test]
    fn matching_mode_sets_refresh_rate() {
        let modes = [mode(1920, 1080, 60), mode(800, 600, 75), mode(1024, 768, 60)];
        let n = negotiate_refresh_rate(&modes, 800, 600);
        assert_eq!(n.matched, Some(1));
        assert_eq!(n.refresh_rate, RefreshRate::from_millihertz(75_000));
        assert_eq!(n.refresh_rate.hertz(), 75.0);
    }

    #[test]
    fn last_match_wins() {
        let modes = [mode(800, 600, 60), mode(1920, 1080, 60), mode(800, 600, 144)];
        let n = negotiate_refresh_rate(&modes, 800, 600);
        assert_eq!(n.matched, Some(2));
        assert_eq!(n.refresh_rate.numerator, 144_000);
        assert_eq!(n.refresh_rate.denominator, 1000);
    }

    #[test]
    fn no_match_defaults_to_60hz() {
        let modes = [mode(1920, 1080, 144)];
        let n = negotiate_refresh_rate(&modes, 800, 600);
        assert_eq!(n.matched, None);
        assert_eq!(n.refresh_rate, RefreshRate::DEFAULT);

        let empty = negotiate_refresh_rate(&[], 800, 600);
        assert_eq!(empty.refresh_rate, RefreshRate { numerator: 60, denominator: 1 });
    }

    #[test]
    fn low_color_depth_modes_are_skipped() {
        let modes = [DisplayMode {
            bit_depth: 16,
            ..mode(800, 600, 75)
        }];
        assert_eq!(negotiate_refresh_rate(&modes, 800, 600).matched, None);
    }

    #[test]
    fn fractional_rates_keep_precision() {
        let modes = [DisplayMode {
            refresh_millihertz: 59_940,
            ..mode(800, 600, 0)
        }];
        let n = negotiate_refresh_rate(&modes, 800, 600);
        assert_eq!(n.refresh_rate, RefreshRate { numerator: 59_940, denominator: 1000 });
        assert!((n.refresh_rate.hertz() - 59.94).abs() < 1e-9);
    }

    #[test]
    fn interval_is_one_over_rate() {
        let i = RefreshRate::DEFAULT.interval().unwrap();
        assert!((i.as_secs_f64() - 1.0 / 60.0).abs() < 1e-9);
        assert!(RefreshRate::UNCAPPED.interval().is_none());
    }
}
