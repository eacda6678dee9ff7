//! The per-match roster partition: who is available, who is convoked.
//!
//! One partition exists per open roster view. It holds two disjoint player
//! lists plus a frozen snapshot of the convoked ids taken at seed time; the
//! snapshot is only ever read by [`RosterPartition::diff`]. A partition is
//! discarded after a commit attempt: the snapshot is stale from that point
//! and edits require a fresh load.

use std::collections::BTreeSet;

use crate::domain::{Game, Player, PlayerId};
use crate::error::PartitionError;

/// Net changes between the seed-time convocation snapshot and the current
/// partition, as disjoint ordered id sets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConvocationDiff {
    pub added: BTreeSet<PlayerId>,
    pub removed: BTreeSet<PlayerId>,
}

impl ConvocationDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// In-memory partition of one match's eligible roster into `available` and
/// `convoked`.
///
/// Invariants: the two lists are disjoint; their union is constant under
/// moves (every eligible player is in exactly one of them); every player is
/// inside the match's age-group/club scope.
#[derive(Debug, Clone)]
pub struct RosterPartition {
    available: Vec<Player>,
    convoked: Vec<Player>,
    original_convoked: BTreeSet<PlayerId>,
}

impl RosterPartition {
    /// Seed from fetch results: `available = eligible - already_convoked`
    /// (set difference by id), and the convoked-id snapshot is frozen here.
    ///
    /// Fails if any player in either input falls outside the game's scope.
    pub fn seed(
        game: &Game,
        eligible: Vec<Player>,
        already_convoked: Vec<Player>,
    ) -> Result<Self, PartitionError> {
        for player in eligible.iter().chain(already_convoked.iter()) {
            if player.age_group != game.age_group || player.club != game.club {
                return Err(PartitionError::OutOfScope {
                    id: player.id,
                    name: player.name.clone(),
                    age_group: game.age_group.clone(),
                    club: game.club.clone(),
                });
            }
        }

        let original_convoked: BTreeSet<PlayerId> =
            already_convoked.iter().map(|p| p.id).collect();
        let available = eligible
            .into_iter()
            .filter(|p| !original_convoked.contains(&p.id))
            .collect();

        Ok(RosterPartition {
            available,
            convoked: already_convoked,
            original_convoked,
        })
    }

    pub fn available(&self) -> &[Player] {
        &self.available
    }

    pub fn convoked(&self) -> &[Player] {
        &self.convoked
    }

    /// Move a player from `available` to `convoked`.
    ///
    /// Strict: moving a player that is not currently available (including a
    /// second identical move) is an error, not a silent success.
    pub fn move_to_convoked(&mut self, id: PlayerId) -> Result<(), PartitionError> {
        let idx = self
            .available
            .iter()
            .position(|p| p.id == id)
            .ok_or(PartitionError::NotAvailable(id))?;
        let player = self.available.remove(idx);
        self.convoked.push(player);
        Ok(())
    }

    /// Move a player from `convoked` back to `available`. Strict, symmetric
    /// to [`RosterPartition::move_to_convoked`].
    pub fn move_to_available(&mut self, id: PlayerId) -> Result<(), PartitionError> {
        let idx = self
            .convoked
            .iter()
            .position(|p| p.id == id)
            .ok_or(PartitionError::NotConvoked(id))?;
        let player = self.convoked.remove(idx);
        self.available.push(player);
        Ok(())
    }

    /// Net add/remove id sets against the seed-time snapshot.
    ///
    /// Pure: callable repeatedly without mutating state.
    pub fn diff(&self) -> ConvocationDiff {
        let current: BTreeSet<PlayerId> = self.convoked.iter().map(|p| p.id).collect();
        ConvocationDiff {
            added: current.difference(&self.original_convoked).copied().collect(),
            removed: self.original_convoked.difference(&current).copied().collect(),
        }
    }
}
