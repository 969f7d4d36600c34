//! Adaptive question scheduler.
//!
//! The scheduler is a pure state machine over subject indices. It does not
//! own a random number generator -- the caller threads uniform `[0, 1)`
//! draws into each transition, so a whole session can be replayed from a
//! seed.
//!
//! ## Queues
//!
//! ```text
//! pending --draw--> current --correct--> streak
//!    ^                      --wrong----> missed
//!    |                                     |
//!    +------- refill (missed first) -------+
//! ```
//!
//! Every subject is asked exactly once per pass: draws remove from `pending`
//! and answered subjects park in `streak` or `missed` until the pool runs
//! dry. The refill prefers `missed`, so recently failed subjects come back
//! before a fresh pass over everything answered correctly. A wrong answer
//! forfeits the in-flight streak into `missed` as well -- the streak is
//! re-queued for near-term re-asking, not discarded.
//!
//! ## Usage
//!
//! ```ignore
//! let state = QuizState::new(catalog.len());
//! let state = state.start(rng.gen(), rng.gen());
//! // per answer:
//! let state = state.advance(rng.gen(), was_correct);
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Scheduler state snapshot.
///
/// Transitions consume the `Arc` handle and return a new allocation rather
/// than mutating in place (keep a second handle via `Arc::clone` to retain
/// the old snapshot). The one exception is the idempotent guard in
/// [`QuizState::start`], which hands the same allocation back so hosts can
/// short-circuit on `Arc::ptr_eq` when an initialization effect fires
/// twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizState {
    /// Subject currently being asked. Absent only before the first draw.
    current: Option<usize>,
    /// Subject pre-selected to follow `current`, for prefetching.
    upcoming: Option<usize>,
    /// Subjects not yet asked in the current pass.
    pending: Vec<usize>,
    /// Subjects answered incorrectly since their last correct answer.
    missed: Vec<usize>,
    /// Subjects answered correctly in the current unbroken streak.
    streak: Vec<usize>,
}

impl QuizState {
    /// Create the initial state over `item_count` subjects.
    ///
    /// The pool starts as `[0, item_count)` in index order; the order is
    /// only meaningful for deterministic tests.
    ///
    /// # Panics
    /// Panics if `item_count` is zero -- a draw from an empty universe is
    /// undefined.
    pub fn new(item_count: usize) -> Arc<Self> {
        assert!(item_count >= 1, "scheduler needs at least one subject");
        Arc::new(Self {
            current: None,
            upcoming: None,
            pending: (0..item_count).collect(),
            missed: Vec::new(),
            streak: Vec::new(),
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Subject currently being asked.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Subject that will follow `current`, when known.
    pub fn upcoming(&self) -> Option<usize> {
        self.upcoming
    }

    /// Length of the current unbroken streak.
    pub fn streak_count(&self) -> usize {
        self.streak.len()
    }

    pub fn pending(&self) -> &[usize] {
        &self.pending
    }

    pub fn missed(&self) -> &[usize] {
        &self.missed
    }

    pub fn streak(&self) -> &[usize] {
        &self.streak
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Draw the first `current` and `upcoming` subjects.
    ///
    /// Idempotent: once `current` is present this returns the same `Arc`
    /// unchanged (`Arc::ptr_eq` holds), so a double-invoked initialization
    /// effect cannot reshuffle the opening question.
    ///
    /// # Panics
    /// Panics if either random draw is outside `[0, 1)`.
    pub fn start(self: Arc<Self>, first: f64, second: f64) -> Arc<Self> {
        assert_unit(first);
        assert_unit(second);

        if self.current.is_some() {
            return self;
        }

        let mut next = (*self).clone();
        next.current = next.take_from_pending(first);
        // With a single-subject universe the pool is already dry here, so
        // the refill rule applies inside start too.
        next.refill_pending();
        next.upcoming = next.take_from_pending(second);

        Arc::new(next)
    }

    /// Record an answer for `current` and move to the next subject.
    ///
    /// The answered subject parks in `streak` or `missed`, `upcoming`
    /// becomes `current`, a wrong answer forfeits the whole streak into
    /// `missed`, the pool refills when dry (missed first, then streak), and
    /// a fresh `upcoming` is drawn.
    ///
    /// # Panics
    /// Panics if `random` is outside `[0, 1)`.
    pub fn advance(self: Arc<Self>, random: f64, was_correct: bool) -> Arc<Self> {
        assert_unit(random);

        let mut next = (*self).clone();

        if let Some(answered) = next.current.take() {
            if was_correct {
                next.streak.push(answered);
            } else {
                next.missed.push(answered);
            }
        }
        next.current = next.upcoming.take();

        if !was_correct {
            let forfeited = std::mem::take(&mut next.streak);
            next.missed.extend(forfeited);
        }

        next.refill_pending();
        next.upcoming = next.take_from_pending(random);

        // Single-subject universe: there was no upcoming to promote, so the
        // fresh draw becomes current and we try once more for an upcoming.
        if next.current.is_none() {
            next.current = next.upcoming.take();
            next.refill_pending();
            next.upcoming = next.take_from_pending(random);
        }

        Arc::new(next)
    }

    // ── Internals ────────────────────────────────────────────────────

    /// Remove and return the subject at `floor(random * len)`, or `None`
    /// when the pool is empty.
    fn take_from_pending(&mut self, random: f64) -> Option<usize> {
        if self.pending.is_empty() {
            return None;
        }
        let slot = draw_slot(random, self.pending.len());
        Some(self.pending.remove(slot))
    }

    /// Refill an empty pool, consuming `missed` first so failed subjects
    /// are revisited before a fresh pass over the streak.
    fn refill_pending(&mut self) {
        if !self.pending.is_empty() {
            return;
        }
        if !self.missed.is_empty() {
            self.pending = std::mem::take(&mut self.missed);
        } else {
            self.pending = std::mem::take(&mut self.streak);
        }
    }
}

/// Map a uniform `[0, 1)` draw onto a slot in `0..len`.
///
/// The clamp only matters for draws rounding up against `len` at the very
/// top of the interval.
fn draw_slot(random: f64, len: usize) -> usize {
    ((random * len as f64) as usize).min(len - 1)
}

fn assert_unit(random: f64) {
    assert!(
        (0.0..1.0).contains(&random),
        "random draw outside [0, 1): {random}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn state(
        current: Option<usize>,
        upcoming: Option<usize>,
        pending: &[usize],
        missed: &[usize],
        streak: &[usize],
    ) -> Arc<QuizState> {
        Arc::new(QuizState {
            current,
            upcoming,
            pending: pending.to_vec(),
            missed: missed.to_vec(),
            streak: streak.to_vec(),
        })
    }

    #[test]
    fn new_state_holds_every_subject_in_order() {
        let state = QuizState::new(5);

        assert_eq!(state.current(), None);
        assert_eq!(state.upcoming(), None);
        assert_eq!(state.pending(), &[0, 1, 2, 3, 4]);
        assert!(state.missed().is_empty());
        assert_eq!(state.streak_count(), 0);
    }

    #[test]
    #[should_panic(expected = "at least one subject")]
    fn new_rejects_empty_universe() {
        QuizState::new(0);
    }

    #[test]
    fn draw_slot_spans_the_whole_pool() {
        assert_eq!(draw_slot(0.0, 151), 0);
        assert_eq!(draw_slot(0.5, 151), 75);
        assert_eq!(draw_slot(1.0 - 1e-10, 151), 150);
    }

    #[test]
    fn start_draws_current_and_upcoming() {
        let state = QuizState::new(5).start(0.0, 0.99);

        assert_eq!(state.current(), Some(0));
        assert_eq!(state.upcoming(), Some(4));
        assert_eq!(state.pending(), &[1, 2, 3]);
    }

    #[test]
    fn start_is_identity_preserving_once_started() {
        let first = QuizState::new(5).start(0.0, 0.75);
        let second = Arc::clone(&first).start(0.99, 0.25);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
    }

    #[test]
    fn start_with_single_subject_does_not_panic() {
        let state = QuizState::new(1).start(0.0, 0.0);

        assert_eq!(state.current(), Some(0));
        assert_eq!(state.upcoming(), None);
        assert!(state.pending().is_empty());
    }

    #[test]
    #[should_panic(expected = "outside [0, 1)")]
    fn start_rejects_out_of_range_draw() {
        QuizState::new(3).start(1.0, 0.5);
    }

    #[test]
    fn correct_answer_joins_the_streak() {
        let state = QuizState::new(5).start(0.0, 0.99).advance(0.5, true);

        assert_eq!(state.current(), Some(4));
        assert_eq!(state.upcoming(), Some(2));
        assert_eq!(state.pending(), &[1, 3]);
        assert_eq!(state.streak(), &[0]);
        assert!(state.missed().is_empty());
    }

    #[test]
    fn wrong_answer_joins_the_backlog() {
        let state = QuizState::new(5).start(0.0, 0.99).advance(0.5, false);

        assert_eq!(state.current(), Some(4));
        assert_eq!(state.upcoming(), Some(2));
        assert_eq!(state.pending(), &[1, 3]);
        assert!(state.streak().is_empty());
        assert_eq!(state.missed(), &[0]);
    }

    #[test]
    fn wrong_answer_forfeits_the_streak_into_the_backlog() {
        let state = state(Some(0), Some(1), &[2], &[3, 4], &[5, 6]);

        let state = state.advance(0.5, false);

        assert_eq!(state.current(), Some(1));
        assert_eq!(state.upcoming(), Some(2));
        assert!(state.pending().is_empty());
        assert_eq!(state.missed(), &[3, 4, 0, 5, 6]);
        assert!(state.streak().is_empty());
    }

    #[test]
    fn empty_pool_refills_from_the_backlog_first() {
        let state = state(Some(0), Some(1), &[], &[2, 3], &[4, 5]);

        let state = state.advance(0.99, true);

        assert_eq!(state.current(), Some(1));
        assert_eq!(state.upcoming(), Some(3));
        assert_eq!(state.pending(), &[2]);
        assert!(state.missed().is_empty());
        assert_eq!(state.streak(), &[4, 5, 0]);
    }

    #[test]
    fn wrong_answer_on_a_dry_pool_refills_from_the_forfeited_streak() {
        let state = state(Some(0), Some(1), &[], &[2, 3], &[4, 5]);

        let state = state.advance(0.99, false);

        assert_eq!(state.current(), Some(1));
        assert_eq!(state.upcoming(), Some(5));
        assert_eq!(state.pending(), &[2, 3, 0, 4]);
        assert!(state.missed().is_empty());
        assert!(state.streak().is_empty());
    }

    #[test]
    fn perfect_pass_refills_from_the_streak_and_resets_it() {
        let state = state(Some(0), Some(1), &[], &[], &[2, 3]);

        let state = state.advance(0.5, true);

        assert_eq!(state.current(), Some(1));
        assert_eq!(state.upcoming(), Some(3));
        assert_eq!(state.pending(), &[2, 0]);
        assert!(state.missed().is_empty());
        assert!(state.streak().is_empty());
    }

    #[test]
    fn single_subject_universe_keeps_cycling() {
        let mut state = QuizState::new(1).start(0.0, 0.0);

        for was_correct in [true, false, true, true] {
            state = state.advance(0.3, was_correct);
            assert_eq!(state.current(), Some(0));
            assert_eq!(state.upcoming(), None);
        }
    }

    #[test]
    fn reference_session() {
        // Full scenario: 5 subjects, one correct then one wrong answer.
        let state = QuizState::new(5).start(0.0, 0.99);
        assert_eq!(state.current(), Some(0));
        assert_eq!(state.upcoming(), Some(4));
        assert_eq!(state.pending(), &[1, 2, 3]);

        let state = state.advance(0.5, true);
        assert_eq!(state.current(), Some(4));
        assert_eq!(state.upcoming(), Some(2));
        assert_eq!(state.pending(), &[1, 3]);
        assert_eq!(state.streak(), &[0]);

        let state = state.advance(0.99, false);
        assert_eq!(state.current(), Some(2));
        assert_eq!(state.upcoming(), Some(3));
        assert_eq!(state.pending(), &[1]);
        assert!(state.streak().is_empty());
        // Just-missed subject first, then the forfeited streak.
        assert_eq!(state.missed(), &[4, 0]);
    }

    /// Every subject appears exactly once across the queues and slots.
    fn assert_full_coverage(state: &QuizState, item_count: usize) {
        let mut seen: Vec<usize> = state
            .pending()
            .iter()
            .chain(state.missed())
            .chain(state.streak())
            .copied()
            .chain(state.current())
            .chain(state.upcoming())
            .collect();
        seen.sort_unstable();

        let expected: Vec<usize> = (0..item_count).collect();
        assert_eq!(seen, expected, "queues lost or duplicated a subject");
    }

    proptest! {
        #[test]
        fn any_answer_sequence_preserves_coverage(
            item_count in 1usize..12,
            first in 0.0f64..1.0,
            second in 0.0f64..1.0,
            answers in proptest::collection::vec((0.0f64..1.0, any::<bool>()), 0..40),
        ) {
            let mut state = QuizState::new(item_count).start(first, second);
            assert_full_coverage(&state, item_count);

            for (random, was_correct) in answers {
                state = state.advance(random, was_correct);
                assert_full_coverage(&state, item_count);

                prop_assert!(state.current().is_some());
                if let (Some(c), Some(u)) = (state.current(), state.upcoming()) {
                    prop_assert_ne!(c, u);
                }
            }
        }

        #[test]
        fn streak_counter_tracks_correct_runs(
            answers in proptest::collection::vec(0.0f64..1.0, 1..20),
        ) {
            // All-wrong answers pin the streak at zero.
            let mut state = QuizState::new(6).start(0.1, 0.2);
            for random in &answers {
                state = state.advance(*random, false);
                prop_assert_eq!(state.streak_count(), 0);
            }
        }
    }
}
