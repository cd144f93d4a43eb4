//! Frame rate statistics.

use tracing::info;

/// Min, max and average frame rate over a run.
#[derive(Debug, Clone, Copy)]
pub struct FrameStats {
    min_fps: f64,
    max_fps: f64,
    fps_sum: f64,
    frame_count: u64,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self {
            min_fps: f64::MAX,
            max_fps: 0.0,
            fps_sum: 0.0,
            frame_count: 0,
        }
    }
}

impl FrameStats {
    /// Record one frame that took `dt_ms` milliseconds.
    ///
    /// Zero-length frames are counted but do not contribute a rate.
    pub fn record(&mut self, dt_ms: f32) {
        self.frame_count += 1;
        if dt_ms > 0.0 {
            let fps = 1000.0 / f64::from(dt_ms);
            self.min_fps = self.min_fps.min(fps);
            self.max_fps = self.max_fps.max(fps);
            self.fps_sum += fps;
        }
    }

    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn average(&self) -> f64 {
        if self.frame_count == 0 {
            0.0
        } else {
            self.fps_sum / self.frame_count as f64
        }
    }

    pub fn log(&self) {
        if self.frame_count == 0 {
            return;
        }
        info!("FPS Statistics:");
        info!("  Min: {:.1}", self.min_fps);
        info!("  Max: {:.1}", self.max_fps);
        info!("  Avg: {:.1}", self.average());
        info!("  Total frames: {}", self.frame_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn tracks_min_max_avg() {
        let mut stats = FrameStats::default();
        stats.record(10.0);
        stats.record(20.0);

        assert_eq!(stats.frame_count(), 2);
        assert_relative_eq!(stats.min_fps, 50.0, epsilon = 1e-6);
        assert_relative_eq!(stats.max_fps, 100.0, epsilon = 1e-6);
        assert_relative_eq!(stats.average(), 75.0, epsilon = 1e-6);
    }

    #[test]
    fn empty_average_is_zero() {
        assert_relative_eq!(FrameStats::default().average(), 0.0);
    }
}
