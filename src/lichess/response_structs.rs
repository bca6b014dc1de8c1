//! Response structures for the lichess API endpoints.
//!
//! Every field lichess may omit is an `Option`, so a closed account or a
//! player who never played a category still decodes.

use serde::Deserialize;
use std::fmt;

/// Public profile from `/api/user/{username}`.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserPublicData {
    pub username: Option<String>,
    pub play_time: Option<PlayTime>,
    pub count: Option<GameCount>,
    pub perfs: Option<Perfs>,
}

impl fmt::Display for UserPublicData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "username={:?}, play_time={:?}, count={:?}",
            self.username, self.play_time, self.count
        )
    }
}

/// Time spent playing, in seconds.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct PlayTime {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub tv: u64,
}

/// Aggregate game counters.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct GameCount {
    #[serde(default)]
    pub all: u64,
    #[serde(default)]
    pub win: u64,
    #[serde(default)]
    pub loss: u64,
    #[serde(default)]
    pub draw: u64,
}

/// Per-category performances.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Perfs {
    pub blitz: Option<GamePerf>,
    pub bullet: Option<GamePerf>,
    pub ultra_bullet: Option<GamePerf>,
    pub rapid: Option<GamePerf>,
    pub classical: Option<GamePerf>,
    pub correspondence: Option<GamePerf>,
    pub puzzle: Option<GamePerf>,
    pub storm: Option<StormPerf>,
}

/// Rating of a game or puzzle category.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct GamePerf {
    pub rating: u32,
    #[serde(default)]
    pub games: u64,
}

/// Puzzle Storm record.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct StormPerf {
    #[serde(default)]
    pub runs: u64,
    #[serde(default)]
    pub score: u64,
}

/// Challenge returned by `/api/challenge/open`.
///
/// The links come either at the top level or inside a nested `challenge`
/// object.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResponse {
    pub id: Option<String>,
    pub url: Option<String>,
    pub url_white: Option<String>,
    pub url_black: Option<String>,
    pub challenge: Option<NestedChallenge>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NestedChallenge {
    pub url: Option<String>,
    pub url_white: Option<String>,
    pub url_black: Option<String>,
}

impl ChallengeResponse {
    /// Join links for each color, when both are present.
    pub fn color_links(&self) -> Option<(String, String)> {
        let nested = self.challenge.as_ref();
        let white = self
            .url_white
            .clone()
            .or_else(|| nested.and_then(|c| c.url_white.clone()))?;
        let black = self
            .url_black
            .clone()
            .or_else(|| nested.and_then(|c| c.url_black.clone()))?;
        Some((white, black))
    }

    /// Link of the challenge page.
    pub fn game_url(&self) -> Option<String> {
        self.challenge
            .as_ref()
            .and_then(|c| c.url.clone())
            .or_else(|| self.url.clone())
    }
}

impl fmt::Display for ChallengeResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "id={:?}, url={:?}", self.id, self.game_url())
    }
}
