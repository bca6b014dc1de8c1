//! lichess.org integration.
//!
//! lichess is both a rating service (public profiles) and the place where the
//! bot creates game challenges.
//!
//! # Modules
//!
//! - `challenge` - Challenge requests, variants and their validation
//! - `requester` - HTTP client for the lichess API
//! - `response_structs` - Data structures for API responses

mod challenge;
mod requester;
mod response_structs;

pub use crate::lichess::challenge::{ChallengeError, ChallengeRequest, Variant};
#[cfg(test)]
pub use crate::lichess::requester::MockLichessApi;
pub use crate::lichess::requester::{LichessApi, LichessRequester};
pub use crate::lichess::response_structs::{
    ChallengeResponse, GameCount, GamePerf, Perfs, PlayTime, StormPerf, UserPublicData,
};
