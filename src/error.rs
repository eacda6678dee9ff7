use thiserror::Error;

use crate::domain::{MatchState, PlayerId};

/// Contract violations against the roster partition store.
///
/// These are programmer errors: the caller moved a player that is not in the
/// set it named, or seeded the partition with players outside the match
/// scope. They abort the operation and are never retried internally.
#[derive(Debug, Error)]
pub enum PartitionError {
    #[error("player {id} ({name}) is outside the match scope {age_group}/{club}")]
    OutOfScope {
        id: PlayerId,
        name: String,
        age_group: String,
        club: String,
    },

    #[error("player {0} is not in the available set")]
    NotAvailable(PlayerId),

    #[error("player {0} is not in the convoked set")]
    NotConvoked(PlayerId),
}

/// A lifecycle method was invoked on a match in the wrong state.
///
/// The state machine is strict and append-only; a mismatched call fails fast
/// and leaves the state untouched.
#[derive(Debug, Error)]
#[error("cannot {attempted} a match that is {from}")]
pub struct IllegalTransition {
    pub from: MatchState,
    pub attempted: &'static str,
}

/// Failure of the three-step convocation commit sequence.
///
/// The sequence is ordered and non-transactional; each variant names the step
/// that failed and whether earlier steps already took effect remotely. The
/// only recovery is reloading the roster view and recomputing a fresh diff;
/// retrying a partially applied batch risks double application.
#[derive(Debug, Error)]
pub enum CommitError {
    /// The removal batch failed. No remote changes were applied.
    #[error("removal batch failed, no remote changes applied: {cause}")]
    RemovalFailed { cause: anyhow::Error },

    /// The addition batch failed. If `removals_applied` is true the removal
    /// batch already succeeded and the remote convocation is now partially
    /// committed.
    #[error("addition batch failed (removals already applied remotely: {removals_applied}): {cause}")]
    AdditionFailed {
        removals_applied: bool,
        cause: anyhow::Error,
    },

    /// Both batches succeeded (or the diff was empty) but the match could not
    /// be started. The convocation itself is committed.
    #[error("convocation committed, but the match could not be started: {cause}")]
    StateTransitionFailed { cause: anyhow::Error },
}
