use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::domain::{UserScope, AGE_GROUPS};
use crate::filter::{ScopeFilter, SCOPE_ANY};

/// Team Tracker command-line client
#[derive(Parser, Debug, Clone)]
#[command(name = "teamtracker", version, about)]
pub struct Config {
    /// Team Tracker API base URL
    #[arg(
        long,
        env = "TEAMTRACKER_API_URL",
        default_value = "https://teamtracker-production.up.railway.app"
    )]
    pub api_url: String,

    /// Bearer token for authenticated endpoints
    #[arg(long, env = "TEAMTRACKER_API_TOKEN")]
    pub api_token: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, env = "TEAMTRACKER_TIMEOUT_SECS", default_value = "10")]
    pub timeout_secs: u64,

    /// Age-group scope for listings ("Todos" = all); defaults to the user's own scope
    #[arg(long, env = "TEAMTRACKER_AGE_GROUP")]
    pub age_group: Option<String>,

    /// Club scope for listings ("Todos" = all); defaults to the user's own scope
    #[arg(long, env = "TEAMTRACKER_CLUB")]
    pub club: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the authenticated user's scope
    Me,
    /// List players in scope
    Players,
    /// List matches in scope
    Games,
    /// Show the convocation roster for a match
    Roster {
        /// Match id
        #[arg(long)]
        game: i64,
    },
    /// Edit a match convocation, commit it, and start the match
    Convoke {
        /// Match id
        #[arg(long)]
        game: i64,
        /// Call up an available player, as NUMBER=NAME (repeatable)
        #[arg(long = "call", value_name = "NUMBER=NAME")]
        call: Vec<String>,
        /// Send a convoked player back to available, as NUMBER=NAME (repeatable)
        #[arg(long = "drop", value_name = "NUMBER=NAME")]
        drop: Vec<String>,
    },
    /// Register a new player
    AddPlayer {
        #[arg(long)]
        name: String,
        #[arg(long)]
        number: u32,
        /// Field position, by its backend name (e.g. "Guarda-Redes")
        #[arg(long)]
        position: String,
        #[arg(long)]
        age_group: String,
        #[arg(long)]
        club: String,
    },
    /// Remove a player from the roster
    RemovePlayer {
        /// Player to remove, as NUMBER=NAME
        #[arg(long, value_name = "NUMBER=NAME")]
        player: String,
    },
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        url::Url::parse(&self.api_url).context("api_url is not a valid URL")?;
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be positive");
        }
        if let Some(age_group) = &self.age_group {
            if age_group != SCOPE_ANY && !AGE_GROUPS.contains(&age_group.as_str()) {
                anyhow::bail!(
                    "unknown age-group '{}'; expected one of {:?} or \"{}\"",
                    age_group,
                    AGE_GROUPS,
                    SCOPE_ANY
                );
            }
        }
        Ok(())
    }

    /// Effective listing scope: explicit flags win, the user's own scope
    /// fills the gaps.
    pub fn scope_or(&self, user: &UserScope) -> ScopeFilter {
        ScopeFilter::new(
            self.age_group
                .clone()
                .unwrap_or_else(|| user.age_group.clone()),
            self.club.clone().unwrap_or_else(|| user.club.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(age_group: Option<&str>, club: Option<&str>) -> Config {
        Config {
            api_url: "https://teamtracker-production.up.railway.app".into(),
            api_token: None,
            timeout_secs: 10,
            age_group: age_group.map(str::to_string),
            club: club.map(str::to_string),
            command: Command::Players,
        }
    }

    fn user() -> UserScope {
        UserScope {
            username: "coach".into(),
            role: "Treinador".into(),
            club: "Sporting".into(),
            age_group: "Infantis 1ºano(Sub-12)".into(),
        }
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(config(None, None).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut cfg = config(None, None);
        cfg.api_url = "not a url".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_age_group() {
        assert!(config(Some("Sub-99"), None).validate().is_err());
        assert!(config(Some("Todos"), None).validate().is_ok());
        assert!(config(Some("Infantis 1ºano(Sub-12)"), None).validate().is_ok());
    }

    #[test]
    fn test_scope_defaults_to_user_scope() {
        let scope = config(None, None).scope_or(&user());
        assert_eq!(
            scope,
            ScopeFilter::new("Infantis 1ºano(Sub-12)", "Sporting")
        );
    }

    #[test]
    fn test_explicit_flags_override_user_scope() {
        let scope = config(Some("Todos"), Some("Porto")).scope_or(&user());
        assert_eq!(scope, ScopeFilter::new("Todos", "Porto"));
    }
}
