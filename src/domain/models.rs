use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Remote-assigned player identifier, unique within a roster fetch.
pub type PlayerId = i64;
/// Remote-assigned match identifier.
pub type GameId = i64;

/// A rostered player as returned by the Team Tracker backend.
///
/// Wire field names are the backend's Portuguese ones; statistics default to
/// zero when the backend omits them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    #[serde(rename = "nome")]
    pub name: String,
    /// Jersey number. Not unique across clubs/age-groups; only a fallback
    /// matching key together with the name.
    #[serde(rename = "numero")]
    pub number: u32,
    #[serde(rename = "posicao")]
    pub position: Position,
    #[serde(rename = "escalao")]
    pub age_group: String,
    #[serde(rename = "clube")]
    pub club: String,
    #[serde(rename = "foto", default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(rename = "golosMarcados", default)]
    pub goals: u32,
    #[serde(rename = "assistencias", default)]
    pub assists: u32,
    /// Cumulative minutes played ("tempo total de utilização").
    #[serde(rename = "TTU", default)]
    pub minutes_played: u32,
    #[serde(rename = "jogosParticipados", default)]
    pub matches_played: u32,
    /// Yellow cards.
    #[serde(rename = "CA", default)]
    pub yellow_cards: u32,
    /// Red cards.
    #[serde(rename = "CV", default)]
    pub red_cards: u32,
}

/// Payload for registering a new player.
#[derive(Debug, Clone, Serialize)]
pub struct NewPlayer {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "numero")]
    pub number: u32,
    #[serde(rename = "posicao")]
    pub position: Position,
    #[serde(rename = "escalao")]
    pub age_group: String,
    #[serde(rename = "clube")]
    pub club: String,
}

/// Field positions recognised by the backend's player form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "Guarda-Redes")]
    Goalkeeper,
    #[serde(rename = "Defesa Central")]
    CentreBack,
    #[serde(rename = "Defesa Lateral")]
    FullBack,
    #[serde(rename = "Médio Centro")]
    CentralMidfielder,
    #[serde(rename = "Médio Lateral")]
    WideMidfielder,
    #[serde(rename = "Extremo")]
    Winger,
    #[serde(rename = "Ponta de Lança")]
    Striker,
}

impl Position {
    pub const CATALOGUE: &'static [Position] = &[
        Position::Goalkeeper,
        Position::CentreBack,
        Position::FullBack,
        Position::CentralMidfielder,
        Position::WideMidfielder,
        Position::Winger,
        Position::Striker,
    ];

    /// The backend's display name for this position.
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "Guarda-Redes",
            Position::CentreBack => "Defesa Central",
            Position::FullBack => "Defesa Lateral",
            Position::CentralMidfielder => "Médio Centro",
            Position::WideMidfielder => "Médio Lateral",
            Position::Winger => "Extremo",
            Position::Striker => "Ponta de Lança",
        }
    }

    /// Look a position up by its backend display name.
    pub fn from_catalogue(name: &str) -> Option<Position> {
        Position::CATALOGUE.iter().copied().find(|p| p.as_str() == name)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled match.
///
/// Age-group and club are immutable after creation; they scope which players
/// may be convoked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "adversario")]
    pub opponent: String,
    #[serde(rename = "escalao")]
    pub age_group: String,
    #[serde(rename = "clube")]
    pub club: String,
    #[serde(flatten)]
    pub state: MatchState,
}

/// Lifecycle state of a match. `Finished` carries the final result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "estado", content = "resultado")]
pub enum MatchState {
    #[serde(rename = "planeado")]
    Planned,
    #[serde(rename = "aDecorrer")]
    InProgress,
    #[serde(rename = "terminado")]
    Finished(MatchResult),
}

impl fmt::Display for MatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchState::Planned => write!(f, "planned"),
            MatchState::InProgress => write!(f, "in progress"),
            MatchState::Finished(result) => write!(f, "finished {}", result),
        }
    }
}

/// Final score from the convoking team's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "golosMarcados")]
    pub goals_for: u32,
    #[serde(rename = "golosSofridos")]
    pub goals_against: u32,
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.goals_for, self.goals_against)
    }
}

/// The authenticated user's scope as reported by `/api/auth/me`.
///
/// Either dimension may be the wildcard `"Todos"`, granting visibility over
/// every club or age-group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserScope {
    pub username: String,
    #[serde(rename = "cargo")]
    pub role: String,
    #[serde(rename = "clube")]
    pub club: String,
    #[serde(rename = "escalao")]
    pub age_group: String,
}

/// Competitive age groups (escalões) recognised by the backend.
pub const AGE_GROUPS: &[&str] = &[
    "Petizes 1ºano(Sub-6)",
    "Petizes 2ºano(Sub-7)",
    "Traquinas 1ºano(Sub-8)",
    "Traquinas 2ºano(Sub-9)",
    "Benjamins 1ºano(Sub-10)",
    "Benjamins 2ºano(Sub-11)",
    "Infantis 1ºano(Sub-12)",
    "Infantis 2ºano(Sub-13)",
    "Iniciados 1ºano(Sub-14)",
    "Iniciados 2ºano(Sub-15)",
    "Juvenis 1ºano(Sub-16)",
    "Juvenis 2ºano(Sub-17)",
    "Juniores 1ºano(Sub-18)",
    "Juniores 2ºano(Sub-19)",
];
