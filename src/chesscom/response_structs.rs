//! Response structures for the chess.com public API.
//!
//! chess.com only includes the categories a player has played, so every
//! category is optional.

use serde::Deserialize;
use std::fmt;

/// Statistics from `/pub/player/{username}/stats`.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct PlayerStats {
    pub chess_blitz: Option<GameStats>,
    pub chess_bullet: Option<GameStats>,
    pub chess_rapid: Option<GameStats>,
    pub chess_daily: Option<GameStats>,
    pub puzzle_rush: Option<PuzzleRush>,
    pub tactics: Option<Tactics>,
}

impl fmt::Display for PlayerStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "blitz={}, bullet={}, rapid={}, daily={}, puzzle_rush={}, tactics={}",
            self.chess_blitz.is_some(),
            self.chess_bullet.is_some(),
            self.chess_rapid.is_some(),
            self.chess_daily.is_some(),
            self.puzzle_rush.is_some(),
            self.tactics.is_some()
        )
    }
}

/// Ratings and record of a game category.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct GameStats {
    pub last: RatingPoint,
    /// Absent until the player wins a game in the category
    pub best: Option<RatingPoint>,
    pub record: Record,
}

/// A rating at a point in time.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RatingPoint {
    pub rating: u32,
}

/// Win/draw/loss counters.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Record {
    #[serde(default)]
    pub win: u64,
    #[serde(default)]
    pub loss: u64,
    #[serde(default)]
    pub draw: u64,
}

impl Record {
    pub fn total(&self) -> u64 {
        self.win + self.draw + self.loss
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PuzzleRush {
    pub best: Option<PuzzleRushBest>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PuzzleRushBest {
    pub total_attempts: u64,
    pub score: u64,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Tactics {
    pub highest: Option<RatingPoint>,
}
