//! Badge tier scale.
//!
//! Maps an unbounded streak count onto a small fixed number of reward tiers.
//! The tier boundaries are the cumulative sums of an arithmetic sequence
//! fitted so that the last boundary lands on a target maximum:
//!
//! ```text
//! step(0) = x
//! step(i) = step(i - 1) + a
//! step(0) + ... + step(n - 1) = max
//!   =>  a = (max - n * x) / (n * (n - 1) / 2)
//! ```
//!
//! Boundaries are rounded on the *cumulative* sum, never on the per-term
//! increment -- rounding per term compounds the error and can miss the
//! target maximum on the last boundary.

use serde::{Deserialize, Serialize};

/// Solve for the common difference of an arithmetic sequence whose
/// `step_count` terms start at `initial_step` and sum to `max_value`.
///
/// A `max_value` below `initial_step * step_count` yields a negative
/// increment (shrinking steps); that is a legal fit, not an error.
///
/// # Panics
/// Panics if `step_count < 2` (the closed form divides by `n - 1`).
pub fn fit_step_increment(max_value: f64, step_count: usize, initial_step: f64) -> f64 {
    assert!(step_count >= 2, "increment fit needs at least two steps");

    let triangular = (step_count * (step_count - 1)) as f64 * 0.5;
    (max_value - initial_step * step_count as f64) / triangular
}

/// Compute the rounded cumulative tier boundaries of the sequence.
///
/// # Panics
/// Panics if `step_count` is zero.
pub fn cumulative_scale(step_count: usize, initial_step: f64, step_increment: f64) -> Vec<i64> {
    assert!(step_count >= 1, "a scale needs at least one tier");

    let mut boundaries = Vec::with_capacity(step_count);
    let mut term = initial_step;
    let mut sum = 0.0;
    for i in 0..step_count {
        if i > 0 {
            term += step_increment;
        }
        sum += term;
        boundaries.push(sum.round() as i64);
    }
    boundaries
}

/// Count how many boundaries `value` has reached: the smallest index `i`
/// with `value < scale[i]`, or `scale.len()` once the last boundary is
/// cleared.
///
/// Linear scan; tier counts are small constants.
pub fn floor_to_tier(scale: &[i64], value: f64) -> usize {
    scale
        .iter()
        .position(|&boundary| value < boundary as f64)
        .unwrap_or(scale.len())
}

/// Memoized tier scale for a badge display.
///
/// Hosts rebuild the boundaries only when the target maximum changes (e.g.
/// a different catalog was loaded) and query [`BadgeScale::unlocked`] on
/// every streak update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeScale {
    max_value: f64,
    step_count: usize,
    initial_step: f64,
    boundaries: Vec<i64>,
}

impl BadgeScale {
    /// Fit a scale of `step_count` tiers topping out at `max_value`.
    ///
    /// # Panics
    /// Panics if `step_count < 2`.
    pub fn new(max_value: f64, step_count: usize, initial_step: f64) -> Self {
        let increment = fit_step_increment(max_value, step_count, initial_step);
        Self {
            max_value,
            step_count,
            initial_step,
            boundaries: cumulative_scale(step_count, initial_step, increment),
        }
    }

    pub fn boundaries(&self) -> &[i64] {
        &self.boundaries
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// Number of tiers a streak of `streak` has unlocked.
    pub fn unlocked(&self, streak: usize) -> usize {
        floor_to_tier(&self.boundaries, streak as f64)
    }

    /// Refit the boundaries for a new maximum. A no-op when the maximum is
    /// unchanged, so callers can feed this on every render.
    pub fn set_max_value(&mut self, max_value: f64) {
        if max_value == self.max_value {
            return;
        }
        *self = Self::new(max_value, self.step_count, self.initial_step);
    }
}
