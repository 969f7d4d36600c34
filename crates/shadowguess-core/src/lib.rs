//! # Shadowguess Core Library
//!
//! Core logic for the shadowguess silhouette quiz. The game loop itself lives
//! in a host (the CLI binary in this workspace); this library provides the
//! pieces the host composes:
//!
//! - **Question Scheduler**: a pure state machine that picks which subject to
//!   ask next, feeds missed subjects back with priority, and tracks the
//!   current streak
//! - **Badge Scale**: closed-form mapping from a streak count to a small
//!   fixed number of reward tiers
//! - **Catalog**: the ordered subject-name list backing the scheduler's
//!   item indices
//! - **Storage**: SQLite guess log and TOML configuration
//!
//! The scheduler and scale never perform I/O and never own a random number
//! generator -- hosts thread `[0, 1)` draws into the transitions, which keeps
//! every run replayable from a seed.

pub mod catalog;
pub mod error;
pub mod scale;
pub mod scheduler;
pub mod storage;

pub use catalog::Catalog;
pub use error::{ConfigError, CoreError, ValidationError};
pub use scale::{cumulative_scale, fit_step_increment, floor_to_tier, BadgeScale};
pub use scheduler::QuizState;
pub use storage::{Config, GuessDb, GuessTotals, SubjectResult};
