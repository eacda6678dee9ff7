pub mod models;

pub use models::{
    Game, GameId, MatchResult, MatchState, NewPlayer, Player, PlayerId, Position, UserScope,
    AGE_GROUPS,
};
