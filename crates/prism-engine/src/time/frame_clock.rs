use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Unclamped time since the previous presented frame.
    pub interval: Duration,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Running statistics over presented-frame intervals.
///
/// With vsync on, the mean interval settles near the display's refresh
/// period; without it, it reflects how fast frames are produced.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FrameStats {
    pub frames: u64,
    pub total: Duration,
    pub min: Option<Duration>,
    pub max: Option<Duration>,
}

impl FrameStats {
    pub fn record(&mut self, interval: Duration) {
        self.frames += 1;
        self.total += interval;
        self.min = Some(self.min.map_or(interval, |m| m.min(interval)));
        self.max = Some(self.max.map_or(interval, |m| m.max(interval)));
    }

    pub fn mean(&self) -> Option<Duration> {
        let frames = u32::try_from(self.frames).ok().filter(|&n| n > 0)?;
        Some(self.total / frames)
    }

    /// Frames per second over the recorded window.
    pub fn rate(&self) -> Option<f64> {
        let mean = self.mean()?.as_secs_f64();
        (mean > 0.0).then(|| 1.0 / mean)
    }
}

/// Frame clock producing `FrameTime` snapshots and interval statistics.
///
/// Statistics are accumulated over a reporting window; the runtime drains
/// them with [`FrameClock::take_stats`] to log pacing.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    stats: FrameStats,
    window_start: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last: now,
            frame_index: 0,
            stats: FrameStats::default(),
            window_start: now,
        }
    }

    /// Advances the clock after a presented frame.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let interval = now.saturating_duration_since(self.last);
        self.last = now;

        // The first tick measures startup, not a frame interval.
        if self.frame_index > 0 {
            self.stats.record(interval);
        }

        let ft = FrameTime {
            interval,
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }

    /// Returns and clears the statistics once `period` has elapsed since the
    /// last drain.
    pub fn take_stats(&mut self, period: Duration) -> Option<FrameStats> {
        let elapsed = self.last.saturating_duration_since(self.window_start);
        if elapsed < period || self.stats.frames == 0 {
            return None;
        }
        self.window_start = self.last;
        Some(std::mem::take(&mut self.stats))
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn stats_track_min_max_mean() {
        let mut s = FrameStats::default();
        assert_eq!(s.mean(), None);

        s.record(ms(10));
        s.record(ms(20));
        s.record(ms(30));
        assert_eq!(s.frames, 3);
        assert_eq!(s.min, Some(ms(10)));
        assert_eq!(s.max, Some(ms(30)));
        assert_eq!(s.mean(), Some(ms(20)));
        assert!((s.rate().unwrap() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn first_tick_is_not_an_interval() {
        let mut clock = FrameClock::new();
        let start = clock.last;

        let first = clock.tick_at(start + ms(500));
        assert_eq!(first.frame_index, 0);
        assert_eq!(clock.stats.frames, 0);

        let second = clock.tick_at(start + ms(516));
        assert_eq!(second.frame_index, 1);
        assert_eq!(second.interval, ms(16));
        assert_eq!(clock.stats.frames, 1);
    }

    #[test]
    fn stats_drain_after_period() {
        let mut clock = FrameClock::new();
        let start = clock.last;
        for i in 1..=10 {
            clock.tick_at(start + ms(i * 100));
        }

        assert!(clock.take_stats(Duration::from_secs(2)).is_none());

        let stats = clock.take_stats(Duration::from_millis(900)).unwrap();
        assert_eq!(stats.frames, 9);
        assert_eq!(stats.mean(), Some(ms(100)));
        assert_eq!(clock.stats, FrameStats::default());
    }
}
