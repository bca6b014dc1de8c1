use std::str::FromStr;

use crate::commands::CommandError;

/// Rating service queried by `!stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    ChessCom,
    Lichess,
}

impl FromStr for Platform {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chess.com" => Ok(Platform::ChessCom),
            "lichess.org" => Ok(Platform::Lichess),
            _ => Err(CommandError::InvalidPlatform),
        }
    }
}
