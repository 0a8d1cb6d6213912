//! Molecular layer: row entrance animation controller
//!
//! Tracks one transition per project id. Rows move through
//! `NotMounted -> Entering -> Settled`; there is no way back except leaving
//! the rendered set, which drops the row's state entirely.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use super::config::{MotionConfig, MotionConfigExt};
use super::timing::{ease, is_complete_at, lerp_u16, progress_at, stagger_delay};

/// Lifecycle phase of a row's entrance transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPhase {
    NotMounted,
    Entering,
    Settled,
}

/// Visual state of a row for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowFrame {
    /// Eased transition progress in [0, 1]
    pub progress: f64,
    /// 0.0 is invisible (background color), 1.0 fully opaque
    pub opacity: f64,
    /// Leading blank columns
    pub offset: u16,
}

impl RowFrame {
    pub const SETTLED: RowFrame = RowFrame {
        progress: 1.0,
        opacity: 1.0,
        offset: 0,
    };

    pub fn is_settled(&self) -> bool {
        self.progress >= 1.0
    }
}

#[derive(Debug, Clone)]
struct RowAnimation {
    start: Instant,
    delay: Duration,
    phase: RowPhase,
}

/// Entrance animation controller keyed by project id
///
/// Call `sync()` with the rendered ids on every render, `tick()` once per
/// frame, and `frame()` to style each row.
#[derive(Debug, Clone, Default)]
pub struct EntranceAnimator {
    config: MotionConfig,
    rows: HashMap<String, RowAnimation>,
}

impl EntranceAnimator {
    pub fn new(config: MotionConfig) -> Self {
        Self {
            config,
            rows: HashMap::new(),
        }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Update configuration; turning motion off settles in-flight rows
    pub fn set_config(&mut self, config: MotionConfig) {
        self.config = config;
        if !self.config.is_animated() {
            self.settle_all();
        }
    }

    /// Reconcile tracked rows with the ids about to be rendered, in order
    ///
    /// Ids seen for the first time start entering with the delay of their
    /// current index. Tracked ids that are missing are dropped, which
    /// cancels any transition still in flight. Returns how many rows entered.
    pub fn sync(&mut self, ids: &[&str], now: Instant) -> usize {
        let rendered: HashSet<&str> = ids.iter().copied().collect();

        let before = self.rows.len();
        self.rows.retain(|id, _| rendered.contains(id.as_str()));
        let dropped = before - self.rows.len();

        let animated = self.config.is_animated();
        let unit = self.config.stagger_unit();
        let mut entered = 0;

        for (index, id) in ids.iter().enumerate() {
            if self.rows.contains_key(*id) {
                continue;
            }
            let animation = if animated {
                entered += 1;
                RowAnimation {
                    start: now,
                    delay: stagger_delay(index, unit),
                    phase: RowPhase::Entering,
                }
            } else {
                RowAnimation {
                    start: now,
                    delay: Duration::ZERO,
                    phase: RowPhase::Settled,
                }
            };
            self.rows.insert((*id).to_string(), animation);
        }

        if entered > 0 || dropped > 0 {
            tracing::debug!("Row animations: {} entering, {} dropped", entered, dropped);
        }

        entered
    }

    /// Promote finished transitions to `Settled`; returns true while any row is entering
    pub fn tick(&mut self, now: Instant) -> bool {
        let duration = self.config.transition_duration();
        let mut entering = false;

        for animation in self.rows.values_mut() {
            if animation.phase != RowPhase::Entering {
                continue;
            }
            if is_complete_at(animation.start, animation.delay, duration, now) {
                animation.phase = RowPhase::Settled;
            } else {
                entering = true;
            }
        }

        entering
    }

    /// Visual state of the row with `id` at `now`
    ///
    /// Untracked and settled rows are always fully visible.
    pub fn frame(&self, id: &str, now: Instant) -> RowFrame {
        let Some(animation) = self.rows.get(id) else {
            return RowFrame::SETTLED;
        };
        if animation.phase != RowPhase::Entering {
            return RowFrame::SETTLED;
        }

        let t = progress_at(
            animation.start,
            animation.delay,
            self.config.transition_duration(),
            now,
        );
        let eased = ease(self.config.easing, t);

        RowFrame {
            progress: eased,
            opacity: eased,
            offset: lerp_u16(self.config.offset_cols, 0, eased),
        }
    }

    pub fn phase(&self, id: &str) -> RowPhase {
        self.rows
            .get(id)
            .map(|a| a.phase)
            .unwrap_or(RowPhase::NotMounted)
    }

    /// Entrance delay assigned to a tracked row
    pub fn delay(&self, id: &str) -> Option<Duration> {
        self.rows.get(id).map(|a| a.delay)
    }

    /// Check if any row is still entering
    /// Use this to determine if we need high frame rate
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.rows.values().any(|a| a.phase == RowPhase::Entering)
    }

    /// Finish every in-flight transition immediately
    pub fn settle_all(&mut self) {
        for animation in self.rows.values_mut() {
            animation.phase = RowPhase::Settled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use projdash_core::EasingType;

    fn animator() -> EntranceAnimator {
        EntranceAnimator::new(MotionConfig {
            stagger_ms: 50,
            duration_ms: 200,
            offset_cols: 2,
            easing: EasingType::Linear,
            ..Default::default()
        })
    }

    fn later(start: Instant, ms: u64) -> Instant {
        start + Duration::from_millis(ms)
    }

    #[test]
    fn test_first_appearance_enters() {
        let mut anim = animator();
        let t0 = Instant::now();

        assert_eq!(anim.phase("a"), RowPhase::NotMounted);
        assert_eq!(anim.sync(&["a", "b", "c"], t0), 3);
        for id in ["a", "b", "c"] {
            assert_eq!(anim.phase(id), RowPhase::Entering);
        }
        assert!(anim.is_animating());

        let frame = anim.frame("a", t0);
        assert_eq!(frame.opacity, 0.0);
        assert_eq!(frame.offset, 2);
    }

    #[test]
    fn test_staggered_delays_follow_index() {
        let mut anim = animator();
        let t0 = Instant::now();
        anim.sync(&["a", "b", "c", "d"], t0);

        let delays: Vec<Duration> = ["a", "b", "c", "d"]
            .iter()
            .map(|id| anim.delay(id).unwrap())
            .collect();
        assert_eq!(delays[0], Duration::ZERO);
        for pair in delays.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::from_millis(50));
        }

        // Halfway through b's transition, a is further along and c has not started
        let now = later(t0, 150);
        let a = anim.frame("a", now).progress;
        let b = anim.frame("b", now).progress;
        let c = anim.frame("c", now).progress;
        assert!(a > b && b > c);
        assert!((b - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_settles_after_duration() {
        let mut anim = animator();
        let t0 = Instant::now();
        anim.sync(&["a", "b"], t0);

        // b finishes at 50ms delay + 200ms
        assert!(anim.tick(later(t0, 220)));
        assert_eq!(anim.phase("a"), RowPhase::Settled);
        assert_eq!(anim.phase("b"), RowPhase::Entering);

        assert!(!anim.tick(later(t0, 250)));
        assert_eq!(anim.phase("b"), RowPhase::Settled);
        assert_eq!(anim.frame("b", later(t0, 250)), RowFrame::SETTLED);
    }

    #[test]
    fn test_stable_ids_do_not_replay() {
        let mut anim = animator();
        let t0 = Instant::now();
        anim.sync(&["a", "b", "c"], t0);
        anim.tick(later(t0, 1000));

        // Same rows rendered again (e.g. after a column visibility change)
        let t1 = later(t0, 2000);
        assert_eq!(anim.sync(&["a", "b", "c"], t1), 0);
        // Reordered rows keep their state too
        assert_eq!(anim.sync(&["c", "a", "b"], t1), 0);
        for id in ["a", "b", "c"] {
            assert_eq!(anim.phase(id), RowPhase::Settled);
            assert_eq!(anim.frame(id, t1), RowFrame::SETTLED);
        }
        assert!(!anim.is_animating());
    }

    #[test]
    fn test_new_row_enters_at_its_index() {
        let mut anim = animator();
        let t0 = Instant::now();
        anim.sync(&["a", "b"], t0);
        anim.tick(later(t0, 1000));

        let t1 = later(t0, 2000);
        assert_eq!(anim.sync(&["a", "new", "b"], t1), 1);
        assert_eq!(anim.phase("new"), RowPhase::Entering);
        assert_eq!(anim.delay("new"), Some(Duration::from_millis(50)));
        assert_eq!(anim.phase("a"), RowPhase::Settled);
        assert_eq!(anim.phase("b"), RowPhase::Settled);
    }

    #[test]
    fn test_removed_row_is_cancelled() {
        let mut anim = animator();
        let t0 = Instant::now();
        anim.sync(&["a", "b", "c"], t0);

        // b and c leave mid-transition
        anim.sync(&["a"], later(t0, 10));
        assert_eq!(anim.phase("c"), RowPhase::NotMounted);
        assert_eq!(anim.delay("c"), None);
        assert_eq!(anim.phase("b"), RowPhase::NotMounted);
        assert_eq!(anim.frame("b", later(t0, 10)), RowFrame::SETTLED);

        // Coming back counts as a fresh appearance
        let t1 = later(t0, 20);
        anim.sync(&["a", "b"], t1);
        assert_eq!(anim.phase("b"), RowPhase::Entering);
        assert_eq!(anim.frame("b", t1).opacity, 0.0);
    }

    #[test]
    fn test_reduced_motion_renders_settled() {
        let mut anim = EntranceAnimator::new(MotionConfig {
            reduced_motion: true,
            ..Default::default()
        });
        let t0 = Instant::now();
        assert_eq!(anim.sync(&["a", "b"], t0), 0);
        assert_eq!(anim.phase("a"), RowPhase::Settled);
        assert_eq!(anim.frame("b", t0), RowFrame::SETTLED);
        assert!(!anim.is_animating());
    }

    #[test]
    fn test_disabling_motion_settles_in_flight_rows() {
        let mut anim = animator();
        let t0 = Instant::now();
        anim.sync(&["a", "b"], t0);
        assert!(anim.is_animating());

        anim.set_config(MotionConfig {
            enabled: false,
            ..Default::default()
        });
        assert!(!anim.is_animating());
        assert_eq!(anim.frame("a", t0), RowFrame::SETTLED);
    }

    #[test]
    fn test_empty_render_then_refill_replays() {
        let mut anim = animator();
        let t0 = Instant::now();
        anim.sync(&["a"], t0);
        anim.tick(later(t0, 1000));

        anim.sync(&[], later(t0, 1500));
        assert_eq!(anim.sync(&["a"], later(t0, 2000)), 1);
    }
}
