use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    animation_tick_rate: Duration,
}

/// Result of a background avatar probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarLoadResult {
    Success {
        source: String,
    },
    Failure {
        source: String,
        error: String,
    },
}

impl EventHandler {
    /// Create a handler that polls every `animation_tick_rate` while rows are entering
    pub fn new(tick_rate_ms: u64, animation_tick_rate: Duration) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            animation_tick_rate,
        }
    }

    fn poll_timeout(&self, animating: bool) -> Duration {
        if animating {
            self.animation_tick_rate.min(self.tick_rate)
        } else {
            self.tick_rate
        }
    }

    /// Poll for the next event, waiting at most one tick
    pub fn next(&self, animating: bool) -> Result<Option<AppEvent>> {
        if event::poll(self.poll_timeout(animating))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    // (crossterm 0.27+ sends release events on some systems)
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}
