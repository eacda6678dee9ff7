//! Match convocation: partitioned roster editing and remote reconciliation.

pub mod partition;
pub mod reconciler;

pub use partition::{ConvocationDiff, RosterPartition};
pub use reconciler::commit;

use anyhow::Result;
use futures_util::future::try_join;

use crate::api::ConvocationApi;
use crate::domain::Game;

/// Open a roster view for `game`: fetch the eligible roster and the current
/// convocation in parallel, then seed a partition.
///
/// The partition is a per-view snapshot. Reload after every commit attempt,
/// successful or not: the seed-time snapshot goes stale the moment a commit
/// touches the remote store.
pub async fn load_roster(game: &Game, api: &dyn ConvocationApi) -> Result<RosterPartition> {
    let (eligible, convoked) = try_join(
        api.fetch_eligible_players(&game.age_group, &game.club),
        api.fetch_convoked(game.id),
    )
    .await?;
    let partition = RosterPartition::seed(game, eligible, convoked)?;
    Ok(partition)
}
