//! Pushing a convocation diff to the backend.
//!
//! A commit is an ordered, non-transactional three-step sequence: batch
//! removals, batch additions, then the Planned → InProgress transition.
//! Removals go first so a backend enforcing a maximum convoked count never
//! observes a transient overshoot. Partial application is possible and is
//! reported through [`CommitError`], never hidden; no step is retried
//! internally, because retrying a partially applied batch risks double
//! application. A caller that abandons a commit mid-sequence leaves the
//! remote store at whichever step last completed.

use tracing::{debug, info};

use crate::api::ConvocationApi;
use crate::convocation::partition::ConvocationDiff;
use crate::domain::GameId;
use crate::error::CommitError;
use crate::lifecycle::MatchLifecycle;

/// Apply `diff` to the remote convocation for `game_id`, then start the
/// match.
///
/// An empty diff skips both batches but still performs the start transition:
/// opening the convocation always precedes starting a match. The local
/// lifecycle transition is validated before the state call goes out, so an
/// illegal start never reaches the wire; if the remote state call then
/// fails, the local controller is ahead of the remote store and the caller's
/// mandatory post-commit reload re-derives truth.
pub async fn commit(
    game_id: GameId,
    diff: &ConvocationDiff,
    lifecycle: &mut MatchLifecycle,
    transport: &dyn ConvocationApi,
) -> Result<(), CommitError> {
    if !diff.removed.is_empty() {
        debug!(
            "Removing {} convoked player(s) from game {}",
            diff.removed.len(),
            game_id
        );
        transport
            .remove_convoked(game_id, &diff.removed)
            .await
            .map_err(|cause| CommitError::RemovalFailed { cause })?;
    }

    let removals_applied = !diff.removed.is_empty();

    if !diff.added.is_empty() {
        debug!(
            "Adding {} convoked player(s) to game {}",
            diff.added.len(),
            game_id
        );
        transport
            .add_convoked(game_id, &diff.added)
            .await
            .map_err(|cause| CommitError::AdditionFailed {
                removals_applied,
                cause,
            })?;
    }

    let next = lifecycle
        .start()
        .map_err(|cause| CommitError::StateTransitionFailed {
            cause: anyhow::Error::new(cause),
        })?;
    transport
        .set_match_state(game_id, next)
        .await
        .map_err(|cause| CommitError::StateTransitionFailed { cause })?;

    info!(
        "Convocation committed for game {} (+{}/-{}), match started",
        game_id,
        diff.added.len(),
        diff.removed.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convocation::partition::RosterPartition;
    use crate::domain::{Game, MatchState, Player, PlayerId, Position};
    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::collections::BTreeSet;
    use std::sync::Mutex;

    /// Scripted transport that records calls in order and fails on demand.
    #[derive(Default)]
    struct ScriptedTransport {
        calls: Mutex<Vec<String>>,
        fail_remove: bool,
        fail_add: bool,
        fail_state: bool,
    }

    impl ScriptedTransport {
        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ConvocationApi for ScriptedTransport {
        async fn fetch_eligible_players(&self, _: &str, _: &str) -> Result<Vec<Player>> {
            Ok(vec![])
        }

        async fn fetch_convoked(&self, _: GameId) -> Result<Vec<Player>> {
            Ok(vec![])
        }

        async fn remove_convoked(&self, game_id: GameId, ids: &BTreeSet<PlayerId>) -> Result<()> {
            self.record(format!("remove:{}:{:?}", game_id, ids));
            if self.fail_remove {
                anyhow::bail!("backend rejected removal");
            }
            Ok(())
        }

        async fn add_convoked(&self, game_id: GameId, ids: &BTreeSet<PlayerId>) -> Result<()> {
            self.record(format!("add:{}:{:?}", game_id, ids));
            if self.fail_add {
                anyhow::bail!("backend rejected addition");
            }
            Ok(())
        }

        async fn set_match_state(&self, game_id: GameId, state: MatchState) -> Result<()> {
            self.record(format!("state:{}:{}", game_id, state));
            if self.fail_state {
                anyhow::bail!("backend rejected state change");
            }
            Ok(())
        }
    }

    fn player(id: PlayerId, number: u32, name: &str) -> Player {
        Player {
            id,
            name: name.into(),
            number,
            position: Position::Winger,
            age_group: "U12".into(),
            club: "A".into(),
            photo: None,
            goals: 0,
            assists: 0,
            minutes_played: 0,
            matches_played: 0,
            yellow_cards: 0,
            red_cards: 0,
        }
    }

    fn game() -> Game {
        Game {
            id: 7,
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            opponent: "FC Porto".into(),
            age_group: "U12".into(),
            club: "A".into(),
            state: MatchState::Planned,
        }
    }

    /// Eligible P1..P3, P1 already convoked.
    fn seeded() -> RosterPartition {
        RosterPartition::seed(
            &game(),
            vec![player(1, 1, "P1"), player(2, 2, "P2"), player(3, 3, "P3")],
            vec![player(1, 1, "P1")],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_add_only_commit_issues_single_add_batch_then_starts() {
        let mut partition = seeded();
        partition.move_to_convoked(2).unwrap();

        let transport = ScriptedTransport::default();
        let mut lifecycle = MatchLifecycle::new(MatchState::Planned);
        commit(7, &partition.diff(), &mut lifecycle, &transport)
            .await
            .unwrap();

        assert_eq!(
            transport.calls(),
            vec!["add:7:{2}".to_string(), "state:7:in progress".to_string()]
        );
        assert_eq!(lifecycle.state(), &MatchState::InProgress);
    }

    #[tokio::test]
    async fn test_remove_only_commit_issues_single_remove_batch() {
        let mut partition = seeded();
        partition.move_to_available(1).unwrap();

        let transport = ScriptedTransport::default();
        let mut lifecycle = MatchLifecycle::new(MatchState::Planned);
        commit(7, &partition.diff(), &mut lifecycle, &transport)
            .await
            .unwrap();

        assert_eq!(
            transport.calls(),
            vec![
                "remove:7:{1}".to_string(),
                "state:7:in progress".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_diff_still_starts_the_match() {
        let transport = ScriptedTransport::default();
        let mut lifecycle = MatchLifecycle::new(MatchState::Planned);
        commit(7, &ConvocationDiff::default(), &mut lifecycle, &transport)
            .await
            .unwrap();

        assert_eq!(transport.calls(), vec!["state:7:in progress".to_string()]);
        assert_eq!(lifecycle.state(), &MatchState::InProgress);
    }

    #[tokio::test]
    async fn test_removal_failure_aborts_before_any_other_step() {
        let mut partition = seeded();
        partition.move_to_available(1).unwrap();
        partition.move_to_convoked(2).unwrap();

        let transport = ScriptedTransport {
            fail_remove: true,
            ..Default::default()
        };
        let mut lifecycle = MatchLifecycle::new(MatchState::Planned);
        let err = commit(7, &partition.diff(), &mut lifecycle, &transport)
            .await
            .unwrap_err();

        assert!(matches!(err, CommitError::RemovalFailed { .. }));
        // Only the failed removal was attempted; additions and the state
        // transition never went out
        assert_eq!(transport.calls(), vec!["remove:7:{1}".to_string()]);
        assert_eq!(lifecycle.state(), &MatchState::Planned);
    }

    #[tokio::test]
    async fn test_addition_failure_reports_applied_removals() {
        let mut partition = seeded();
        partition.move_to_available(1).unwrap();
        partition.move_to_convoked(2).unwrap();

        let transport = ScriptedTransport {
            fail_add: true,
            ..Default::default()
        };
        let mut lifecycle = MatchLifecycle::new(MatchState::Planned);
        let err = commit(7, &partition.diff(), &mut lifecycle, &transport)
            .await
            .unwrap_err();

        match err {
            CommitError::AdditionFailed {
                removals_applied, ..
            } => assert!(removals_applied),
            other => panic!("Expected AdditionFailed, got {:?}", other),
        }
        assert_eq!(
            transport.calls(),
            vec!["remove:7:{1}".to_string(), "add:7:{2}".to_string()]
        );
        assert_eq!(lifecycle.state(), &MatchState::Planned);
    }

    #[tokio::test]
    async fn test_addition_failure_without_prior_removals() {
        let mut partition = seeded();
        partition.move_to_convoked(3).unwrap();

        let transport = ScriptedTransport {
            fail_add: true,
            ..Default::default()
        };
        let mut lifecycle = MatchLifecycle::new(MatchState::Planned);
        let err = commit(7, &partition.diff(), &mut lifecycle, &transport)
            .await
            .unwrap_err();

        match err {
            CommitError::AdditionFailed {
                removals_applied, ..
            } => assert!(!removals_applied),
            other => panic!("Expected AdditionFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_remote_state_failure_after_committed_batches() {
        let mut partition = seeded();
        partition.move_to_convoked(2).unwrap();

        let transport = ScriptedTransport {
            fail_state: true,
            ..Default::default()
        };
        let mut lifecycle = MatchLifecycle::new(MatchState::Planned);
        let err = commit(7, &partition.diff(), &mut lifecycle, &transport)
            .await
            .unwrap_err();

        assert!(matches!(err, CommitError::StateTransitionFailed { .. }));
        // The add batch went through before the failure
        assert_eq!(
            transport.calls(),
            vec!["add:7:{2}".to_string(), "state:7:in progress".to_string()]
        );
    }

    #[tokio::test]
    async fn test_illegal_start_never_reaches_the_wire() {
        let transport = ScriptedTransport::default();
        let mut lifecycle = MatchLifecycle::new(MatchState::InProgress);
        let err = commit(7, &ConvocationDiff::default(), &mut lifecycle, &transport)
            .await
            .unwrap_err();

        assert!(matches!(err, CommitError::StateTransitionFailed { .. }));
        assert!(transport.calls().is_empty());
        assert_eq!(lifecycle.state(), &MatchState::InProgress);
    }
}
