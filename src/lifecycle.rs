//! Match lifecycle state machine.
//!
//! `Planned -> InProgress -> Finished(result)`, strict and append-only: a
//! method invoked on a mismatched state fails fast with [`IllegalTransition`]
//! and leaves the state untouched, and no transition ever reverses.

use crate::domain::{MatchResult, MatchState};
use crate::error::IllegalTransition;

/// Drives a single match through its lifecycle.
///
/// `start()` is invoked by the convocation reconciler after a successful
/// commit; viewing the convocation always precedes starting a match, even
/// when the commit carried zero changes. What happens between `start()` and
/// `finish()` (clock, events, scoring) is an extension point; nothing in
/// this client drives it yet.
#[derive(Debug, Clone)]
pub struct MatchLifecycle {
    state: MatchState,
}

impl MatchLifecycle {
    pub fn new(state: MatchState) -> Self {
        MatchLifecycle { state }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// `Planned -> InProgress`. Returns the new state.
    pub fn start(&mut self) -> Result<MatchState, IllegalTransition> {
        match self.state {
            MatchState::Planned => {
                self.state = MatchState::InProgress;
                Ok(self.state.clone())
            }
            ref other => Err(IllegalTransition {
                from: other.clone(),
                attempted: "start",
            }),
        }
    }

    /// `InProgress -> Finished(result)`. Returns the new state.
    ///
    /// Nothing in the CLI drives this yet; live-match behavior is an
    /// extension point.
    #[allow(dead_code)]
    pub fn finish(&mut self, result: MatchResult) -> Result<MatchState, IllegalTransition> {
        match self.state {
            MatchState::InProgress => {
                self.state = MatchState::Finished(result);
                Ok(self.state.clone())
            }
            ref other => Err(IllegalTransition {
                from: other.clone(),
                attempted: "finish",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(goals_for: u32, goals_against: u32) -> MatchResult {
        MatchResult {
            goals_for,
            goals_against,
        }
    }

    #[test]
    fn test_start_from_planned() {
        let mut lifecycle = MatchLifecycle::new(MatchState::Planned);
        assert_eq!(lifecycle.start().unwrap(), MatchState::InProgress);
        assert_eq!(lifecycle.state(), &MatchState::InProgress);
    }

    #[test]
    fn test_start_on_in_progress_fails_and_preserves_state() {
        let mut lifecycle = MatchLifecycle::new(MatchState::InProgress);
        let err = lifecycle.start().unwrap_err();
        assert_eq!(err.from, MatchState::InProgress);
        assert_eq!(err.attempted, "start");
        assert_eq!(lifecycle.state(), &MatchState::InProgress);
    }

    #[test]
    fn test_finish_from_in_progress() {
        let mut lifecycle = MatchLifecycle::new(MatchState::InProgress);
        let state = lifecycle.finish(result(3, 1)).unwrap();
        assert_eq!(state, MatchState::Finished(result(3, 1)));
    }

    #[test]
    fn test_finish_requires_in_progress() {
        let mut lifecycle = MatchLifecycle::new(MatchState::Planned);
        assert!(lifecycle.finish(result(0, 0)).is_err());
        assert_eq!(lifecycle.state(), &MatchState::Planned);
    }

    #[test]
    fn test_no_transition_out_of_finished() {
        let mut lifecycle = MatchLifecycle::new(MatchState::Finished(result(2, 2)));
        assert!(lifecycle.start().is_err());
        assert!(lifecycle.finish(result(5, 0)).is_err());
        assert_eq!(lifecycle.state(), &MatchState::Finished(result(2, 2)));
    }
}
