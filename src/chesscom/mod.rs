//! chess.com integration.
//!
//! # Modules
//!
//! - `requester` - HTTP client for the chess.com public API
//! - `response_structs` - Data structures for API responses

mod requester;
mod response_structs;

#[cfg(test)]
pub use crate::chesscom::requester::MockChessComApi;
pub use crate::chesscom::requester::{ChessComApi, ChessComRequester};
pub use crate::chesscom::response_structs::{
    GameStats, PlayerStats, PuzzleRush, PuzzleRushBest, RatingPoint, Record, Tactics,
};
