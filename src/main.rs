use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};

mod api;
mod config;
mod convocation;
mod domain;
mod error;
mod filter;
mod lifecycle;
mod selection;

use api::TeamTrackerApi;
use config::{Command, Config};
use domain::{GameId, NewPlayer, Position, AGE_GROUPS};
use error::CommitError;
use filter::{filter_by_scope, ScopeFilter};
use lifecycle::MatchLifecycle;
use selection::{RowSelection, SelectionTracker};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let api = TeamTrackerApi::new(
        &config.api_url,
        config.api_token.clone(),
        config.timeout_secs,
    )?;

    match &config.command {
        Command::Me => show_me(&api).await,
        Command::Players => list_players(&config, &api).await,
        Command::Games => list_games(&config, &api).await,
        Command::Roster { game } => show_roster(*game, &api).await,
        Command::Convoke { game, call, drop } => convoke(*game, call, drop, &api).await,
        Command::AddPlayer {
            name,
            number,
            position,
            age_group,
            club,
        } => add_player(name, *number, position, age_group, club, &api).await,
        Command::RemovePlayer { player } => remove_player(player, &api).await,
    }
}

async fn show_me(api: &TeamTrackerApi) -> Result<()> {
    let user = api.fetch_user_scope().await?;
    println!("User:      {}", user.username);
    println!("Role:      {}", user.role);
    println!("Club:      {}", user.club);
    println!("Age-group: {}", user.age_group);
    Ok(())
}

/// Explicit scope flags win; otherwise the user's own scope applies.
async fn effective_scope(config: &Config, api: &TeamTrackerApi) -> Result<ScopeFilter> {
    if let (Some(age_group), Some(club)) = (&config.age_group, &config.club) {
        return Ok(ScopeFilter::new(age_group.clone(), club.clone()));
    }
    let user = api
        .fetch_user_scope()
        .await
        .context("Scope flags not set and the user scope could not be fetched")?;
    Ok(config.scope_or(&user))
}

async fn list_players(config: &Config, api: &TeamTrackerApi) -> Result<()> {
    let scope = effective_scope(config, api).await?;
    let players = api.list_players().await?;
    let players = filter_by_scope(&players, &scope);
    info!("{} player(s) in scope {}/{}", players.len(), scope.age_group, scope.club);
    for p in &players {
        println!(
            "{:>3}  {:<24} {:<16} {:<24} {}",
            p.number, p.name, p.position, p.age_group, p.club
        );
    }
    Ok(())
}

async fn list_games(config: &Config, api: &TeamTrackerApi) -> Result<()> {
    let scope = effective_scope(config, api).await?;
    let games = api.list_games().await?;
    let games = filter_by_scope(&games, &scope);
    info!("{} match(es) in scope {}/{}", games.len(), scope.age_group, scope.club);
    for g in &games {
        println!(
            "{:>4}  {}  vs {:<24} {:<24} {}  [{}]",
            g.id, g.date, g.opponent, g.age_group, g.club, g.state
        );
    }
    Ok(())
}

async fn show_roster(game_id: GameId, api: &TeamTrackerApi) -> Result<()> {
    let game = api.fetch_game(game_id).await?;
    let partition = convocation::load_roster(&game, api).await?;

    println!(
        "Game {}: vs {} on {} ({}/{})",
        game.id, game.opponent, game.date, game.age_group, game.club
    );
    println!("Convoked ({}):", partition.convoked().len());
    for p in partition.convoked() {
        println!("  {:>3}  {:<24} {}", p.number, p.name, p.position);
    }
    println!("Available ({}):", partition.available().len());
    for p in partition.available() {
        println!("  {:>3}  {:<24} {}", p.number, p.name, p.position);
    }
    Ok(())
}

async fn convoke(
    game_id: GameId,
    calls: &[String],
    drops: &[String],
    api: &TeamTrackerApi,
) -> Result<()> {
    let game = api.fetch_game(game_id).await?;
    let mut lifecycle = MatchLifecycle::new(game.state.clone());
    let mut partition = convocation::load_roster(&game, api).await?;

    for spec in calls {
        let sel = parse_selection(spec)?;
        let id = selection::resolve(&sel, partition.available())
            .map(|p| p.id)
            .with_context(|| format!("no available player matches '{}'", spec))?;
        partition.move_to_convoked(id)?;
    }
    for spec in drops {
        let sel = parse_selection(spec)?;
        let id = selection::resolve(&sel, partition.convoked())
            .map(|p| p.id)
            .with_context(|| format!("no convoked player matches '{}'", spec))?;
        partition.move_to_available(id)?;
    }

    let diff = partition.diff();
    if diff.is_empty() {
        info!("No convocation changes for game {}; starting the match", game_id);
    }

    match convocation::commit(game_id, &diff, &mut lifecycle, api).await {
        Ok(()) => {
            println!(
                "Convocation committed (+{}/-{}); game {} is now {}.",
                diff.added.len(),
                diff.removed.len(),
                game_id,
                lifecycle.state()
            );
            Ok(())
        }
        Err(e) => {
            match &e {
                CommitError::RemovalFailed { .. } => {
                    warn!("No changes were applied remotely.");
                }
                CommitError::AdditionFailed {
                    removals_applied: true,
                    ..
                } => {
                    warn!(
                        "The removal batch WAS applied remotely; the convocation is partially \
                         committed. Reload the roster before editing again."
                    );
                }
                CommitError::AdditionFailed { .. } => {
                    warn!("No changes were applied remotely.");
                }
                CommitError::StateTransitionFailed { .. } => {
                    warn!("Convocation changes are committed; only the match start failed.");
                }
            }
            Err(e.into())
        }
    }
}

async fn add_player(
    name: &str,
    number: u32,
    position: &str,
    age_group: &str,
    club: &str,
    api: &TeamTrackerApi,
) -> Result<()> {
    let position = Position::from_catalogue(position).with_context(|| {
        format!(
            "unknown position '{}'; expected one of {:?}",
            position,
            Position::CATALOGUE
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<_>>()
        )
    })?;
    if !AGE_GROUPS.contains(&age_group) {
        bail!("unknown age-group '{}'; expected one of {:?}", age_group, AGE_GROUPS);
    }

    let created = api
        .create_player(&NewPlayer {
            name: name.to_string(),
            number,
            position,
            age_group: age_group.to_string(),
            club: club.to_string(),
        })
        .await?;
    println!("Player {} {} registered with id {}.", created.number, created.name, created.id);
    Ok(())
}

async fn remove_player(spec: &str, api: &TeamTrackerApi) -> Result<()> {
    let sel = parse_selection(spec)?;
    let players = api.list_players().await?;

    let mut tracker = SelectionTracker::new();
    if let Some(player) = selection::resolve(&sel, &players) {
        tracker.select(player.clone());
    }
    let target = match tracker.target() {
        Some(p) => p.clone(),
        None => bail!("no player matches '{}'", spec),
    };

    api.delete_player(target.id).await?;
    tracker.complete_action();
    println!("Player {} {} removed.", target.number, target.name);
    Ok(())
}

/// Parse a NUMBER=NAME selection spec into row display fields.
fn parse_selection(spec: &str) -> Result<RowSelection> {
    match spec.split_once('=') {
        Some((number, name)) if !number.trim().is_empty() && !name.trim().is_empty() => {
            Ok(RowSelection::new(number.trim(), name.trim()))
        }
        _ => bail!("expected NUMBER=NAME, got '{}'", spec),
    }
}
