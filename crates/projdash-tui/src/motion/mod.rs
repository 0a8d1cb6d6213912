//! Row entrance animation for the project table
//!
//! Each project row fades and slides in the first time its id appears in the
//! rendered set. Delays are staggered by the row's rendered index.
//!
//! ## Atomic layer
//! - `timing` - Easing curves, progress, interpolation and stagger calculations
//! - `config` - `MotionConfig` helpers (config type lives in projdash-core)
//!
//! ## Molecular layer
//! - `entrance` - Per-row state tracked by project id
//!
//! # Usage
//!
//! ```ignore
//! use std::time::Instant;
//! use projdash_tui::motion::EntranceAnimator;
//!
//! let mut animator = EntranceAnimator::new(config.ui.motion.clone());
//!
//! // Each render, report the ids in rendered order
//! let now = Instant::now();
//! animator.sync(&view.row_ids(), now);
//!
//! // Then style every row from its frame
//! let frame = animator.frame("project-1", now);
//! ```

// Atomic layer
pub mod config;
pub mod timing;

// Molecular layer
pub mod entrance;

pub use config::{MotionConfig, MotionConfigExt};
pub use projdash_core::EasingType;
pub use entrance::{EntranceAnimator, RowFrame, RowPhase};
