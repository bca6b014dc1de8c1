//! Open challenge requests.
//!
//! A [`ChallengeRequest`] is everything lichess needs to create an open
//! challenge: the clock, the variant and whether the game is rated. Requests
//! built from user input go through [`ChallengeRequest::parse`], which
//! enforces that only standard games can be rated.

use std::{fmt, str::FromStr};

use log::debug;
use thiserror::Error;

/// Chess variants accepted by `!create_game`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Standard,
    Atomic,
    Chess960,
    Antichess,
    Horde,
    KingOfTheHill,
    RacingKings,
    ThreeCheck,
}

impl Variant {
    /// Key expected by the lichess API for this variant.
    pub fn api_key(&self) -> &'static str {
        match self {
            Variant::Standard => "standard",
            Variant::Atomic => "atomic",
            Variant::Chess960 => "chess960",
            Variant::Antichess => "antichess",
            Variant::Horde => "horde",
            Variant::KingOfTheHill => "kingOfTheHill",
            Variant::RacingKings => "racingKings",
            Variant::ThreeCheck => "threeCheck",
        }
    }
}

impl FromStr for Variant {
    type Err = ChallengeError;

    /// Parses the names users type in chat, not the lichess API keys.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Variant::Standard),
            "atomic" => Ok(Variant::Atomic),
            "chess960" => Ok(Variant::Chess960),
            "antichess" => Ok(Variant::Antichess),
            "horde" => Ok(Variant::Horde),
            "koth" => Ok(Variant::KingOfTheHill),
            "racingkings" => Ok(Variant::RacingKings),
            "3check" | "threecheck" => Ok(Variant::ThreeCheck),
            _ => Err(ChallengeError::InvalidVariant),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.api_key())
    }
}

/// Reasons a `!create_game` request is rejected before reaching lichess.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChallengeError {
    #[error("Please enter whole numbers for the time (minutes) and increment (seconds)")]
    InvalidNumber,
    #[error("Invalid variant, please enter a valid variant (standard, chess960, etc.)")]
    InvalidVariant,
    #[error("Cannot create a rated game of a non-standard variant")]
    RatedNonStandard,
    #[error("Please enter 'rated' or 'unrated' for your game type")]
    InvalidRatedFlag,
}

/// Parameters of an open challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeRequest {
    /// Initial clock in seconds
    pub clock_limit: u32,
    /// Increment per move in seconds
    pub clock_increment: u32,
    pub variant: Variant,
    pub rated: bool,
    /// Name displayed on the challenge page
    pub name: String,
}

impl ChallengeRequest {
    /// Builds an unrated standard challenge, as created by the `!challenge` menu.
    pub fn open_unrated(base_minutes: u32, increment_seconds: u32, name: &str) -> Self {
        ChallengeRequest {
            clock_limit: base_minutes * 60,
            clock_increment: increment_seconds,
            variant: Variant::Standard,
            rated: false,
            name: name.to_owned(),
        }
    }

    /// Builds a challenge from the raw `!create_game` arguments.
    ///
    /// Numbers are parsed first, then the checks run in this order:
    /// 1. the variant must be known
    /// 2. a rated game must be standard
    /// 3. the game type must be exactly `rated` or `unrated`
    ///
    /// # Errors
    ///
    /// Returns the [`ChallengeError`] of the first failing check.
    pub fn parse(
        time: &str,
        increment: &str,
        variant: &str,
        game_type: &str,
        name: &str,
    ) -> Result<Self, ChallengeError> {
        let minutes = time
            .parse::<u32>()
            .map_err(|_| ChallengeError::InvalidNumber)?;
        let clock_increment = increment
            .parse::<u32>()
            .map_err(|_| ChallengeError::InvalidNumber)?;
        let clock_limit = minutes
            .checked_mul(60)
            .ok_or(ChallengeError::InvalidNumber)?;

        let variant = variant.parse::<Variant>()?;

        if game_type == "rated" && variant != Variant::Standard {
            return Err(ChallengeError::RatedNonStandard);
        }
        let rated = match game_type {
            "rated" => true,
            "unrated" => false,
            _ => return Err(ChallengeError::InvalidRatedFlag),
        };

        debug!(
            "parsed challenge: {}s+{}s, variant={}, rated={}",
            clock_limit, clock_increment, variant, rated
        );

        Ok(ChallengeRequest {
            clock_limit,
            clock_increment,
            variant,
            rated,
            name: name.to_owned(),
        })
    }

    /// Form fields of `POST /api/challenge/open`.
    pub fn form(&self) -> Vec<(&'static str, String)> {
        vec![
            ("rated", self.rated.to_string()),
            ("clock.limit", self.clock_limit.to_string()),
            ("clock.increment", self.clock_increment.to_string()),
            ("variant", self.variant.api_key().to_owned()),
            ("name", self.name.clone()),
        ]
    }
}
