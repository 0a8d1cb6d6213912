//! Atomic layer: time calculation utilities for row transitions
//!
//! Every function takes `now` explicitly so callers (and tests) control the clock.

use std::time::{Duration, Instant};

use projdash_core::EasingType;

/// Map linear progress onto the configured entrance curve
///
/// Input is clamped to 0.0..=1.0. `EasingType::None` jumps straight to the
/// settled state once the transition finishes.
pub fn ease(easing: EasingType, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    match easing {
        EasingType::None => {
            if t < 1.0 {
                0.0
            } else {
                1.0
            }
        }
        EasingType::Linear => t,
        EasingType::Cubic => 1.0 - (1.0 - t).powi(3),
        EasingType::Quintic => 1.0 - (1.0 - t).powi(5),
        EasingType::EaseOut => {
            if t >= 1.0 {
                1.0
            } else {
                1.0 - 2f64.powf(-10.0 * t)
            }
        }
    }
}

/// Entrance delay for the row at `index` in the rendered sequence
#[inline]
pub fn stagger_delay(index: usize, unit: Duration) -> Duration {
    unit.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
}

/// Progress (0.0 to 1.0) of a transition that starts `delay` after `start`
///
/// Returns 0.0 while the delay has not elapsed and 1.0 once the
/// transition is over. A zero duration completes as soon as the delay ends.
#[inline]
pub fn progress_at(start: Instant, delay: Duration, duration: Duration, now: Instant) -> f64 {
    let elapsed = now.saturating_duration_since(start);
    if elapsed < delay {
        return 0.0;
    }
    if duration.is_zero() {
        return 1.0;
    }
    let running = elapsed - delay;
    (running.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Check if a delayed transition is complete
#[inline]
pub fn is_complete_at(start: Instant, delay: Duration, duration: Duration, now: Instant) -> bool {
    now.saturating_duration_since(start) >= delay + duration
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Linear interpolation for u16 values (column offsets)
#[inline]
pub fn lerp_u16(from: u16, to: u16, t: f64) -> u16 {
    lerp(from as f64, to as f64, t).round() as u16
}

/// Linear interpolation for color channels
#[inline]
pub fn lerp_u8(from: u8, to: u8, t: f64) -> u8 {
    lerp(from as f64, to as f64, t).round().clamp(0.0, 255.0) as u8
}
