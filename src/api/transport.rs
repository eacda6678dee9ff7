use std::collections::BTreeSet;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{GameId, MatchState, Player, PlayerId};

/// Remote capabilities the convocation core depends on.
///
/// All calls are request/response; authentication is attached by the
/// implementation and opaque to callers. Batch operations apply their whole
/// id set in a single round trip.
#[async_trait]
pub trait ConvocationApi: Send + Sync {
    /// Players eligible for convocation under the given scope.
    async fn fetch_eligible_players(&self, age_group: &str, club: &str) -> Result<Vec<Player>>;

    /// Players currently convoked for the match.
    async fn fetch_convoked(&self, game_id: GameId) -> Result<Vec<Player>>;

    /// Remove the given players from the match convocation, as one batch.
    async fn remove_convoked(&self, game_id: GameId, ids: &BTreeSet<PlayerId>) -> Result<()>;

    /// Add the given players to the match convocation, as one batch.
    async fn add_convoked(&self, game_id: GameId, ids: &BTreeSet<PlayerId>) -> Result<()>;

    /// Overwrite the match lifecycle state.
    async fn set_match_state(&self, game_id: GameId, state: MatchState) -> Result<()>;
}
