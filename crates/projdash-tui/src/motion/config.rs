//! Atomic layer: motion configuration helpers

use std::time::Duration;

pub use projdash_core::{EasingType, MotionConfig};

/// Extension trait for MotionConfig with utility methods
pub trait MotionConfigExt {
    /// Transition duration of a single row
    fn transition_duration(&self) -> Duration;

    /// Delay step between consecutive rows, never zero
    fn stagger_unit(&self) -> Duration;

    /// Tick duration while rows are entering, at least 1ms
    fn animation_tick_duration(&self) -> Duration;

    /// Whether rows should animate at all
    fn is_animated(&self) -> bool;
}

impl MotionConfigExt for MotionConfig {
    #[inline]
    fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    #[inline]
    fn stagger_unit(&self) -> Duration {
        Duration::from_millis(self.stagger_ms.max(1))
    }

    #[inline]
    fn animation_tick_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis((1000 / self.animation_fps as u64).max(1))
        }
    }

    #[inline]
    fn is_animated(&self) -> bool {
        self.enabled
            && !self.reduced_motion
            && self.duration_ms > 0
            && self.easing != EasingType::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::timing::stagger_delay;

    #[test]
    fn test_default_config() {
        let config = MotionConfig::default();
        assert!(config.is_animated());
        assert_eq!(config.stagger_unit(), Duration::from_millis(50));
        assert_eq!(config.transition_duration(), Duration::from_millis(300));
        assert_eq!(config.animation_tick_duration(), Duration::from_millis(16));
    }

    #[test]
    fn test_is_animated() {
        let mut config = MotionConfig::default();

        config.reduced_motion = true;
        assert!(!config.is_animated());

        config.reduced_motion = false;
        config.enabled = false;
        assert!(!config.is_animated());

        config.enabled = true;
        config.duration_ms = 0;
        assert!(!config.is_animated());

        config.duration_ms = 300;
        config.easing = EasingType::None;
        assert!(!config.is_animated());
    }

    #[test]
    fn test_zero_fps_fallback() {
        let config = MotionConfig {
            animation_fps: 0,
            ..Default::default()
        };
        assert_eq!(config.animation_tick_duration(), Duration::from_millis(16));
    }

    #[test]
    fn test_zero_stagger_still_orders_rows() {
        let config = MotionConfig {
            stagger_ms: 0,
            ..Default::default()
        };
        let unit = config.stagger_unit();
        assert_eq!(unit, Duration::from_millis(1));

        let delays: Vec<Duration> = (0..4).map(|i| stagger_delay(i, unit)).collect();
        assert!(delays.windows(2).all(|pair| pair[1] > pair[0]));
    }

    #[test]
    fn test_high_fps_never_polls_zero() {
        for fps in [1000, 1001, 5000, u32::MAX] {
            let config = MotionConfig {
                animation_fps: fps,
                ..Default::default()
            };
            assert_eq!(config.animation_tick_duration(), Duration::from_millis(1), "{}", fps);
        }
    }
}
