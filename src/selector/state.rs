//! State machine of a single time-control prompt.

use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

use crate::selector::preset::{TimeControlPreset, find_preset};

/// Lifecycle of a [`Selector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorState {
    AwaitingSelection,
    /// A preset was picked and its challenge dispatched
    Dispatched,
    /// The timeout elapsed without a selection
    Expired,
}

/// Reasons a reaction does not select a preset.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("only the user who asked for the challenge can pick a time control")]
    NotIssuer,
    #[error("{0} is not one of the offered time controls")]
    UnknownOption(String),
    #[error("the time control selection timed out")]
    TimedOut,
    #[error("the time control selection is closed")]
    Closed,
}

/// A time-control prompt bound to the user who issued `!challenge`.
#[derive(Debug, Clone)]
pub struct Selector {
    /// Matrix user who issued the command
    pub issuer: String,
    /// Room the prompt was posted in
    pub room_id: String,
    opened_at: Instant,
    timeout: Duration,
    state: SelectorState,
}

impl Selector {
    pub fn new(issuer: &str, room_id: &str, opened_at: Instant, timeout: Duration) -> Self {
        Selector {
            issuer: issuer.to_owned(),
            room_id: room_id.to_owned(),
            opened_at,
            timeout,
            state: SelectorState::AwaitingSelection,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> SelectorState {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state != SelectorState::AwaitingSelection
    }

    /// Applies a reaction of `user_id` with `key` received at `now`.
    ///
    /// A selection at or after `opened_at + timeout` expires the selector,
    /// whether or not the expiry task already ran.
    pub fn select(
        &mut self,
        user_id: &str,
        key: &str,
        now: Instant,
    ) -> Result<&'static TimeControlPreset, SelectError> {
        if self.is_terminal() {
            return Err(SelectError::Closed);
        }
        if now >= self.opened_at + self.timeout {
            self.state = SelectorState::Expired;
            return Err(SelectError::TimedOut);
        }
        if user_id != self.issuer {
            return Err(SelectError::NotIssuer);
        }

        let preset = find_preset(key).ok_or_else(|| SelectError::UnknownOption(key.to_owned()))?;
        self.state = SelectorState::Dispatched;
        Ok(preset)
    }

    /// Expires the selector if it is still waiting. Returns whether it did.
    pub fn expire(&mut self) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.state = SelectorState::Expired;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(180);

    fn selector(opened_at: Instant) -> Selector {
        Selector::new("@alice:example.com", "!room:example.com", opened_at, TIMEOUT)
    }

    #[test]
    fn test_select_preset() {
        let opened_at = Instant::now();
        let mut selector = selector(opened_at);

        let preset = selector
            .select(
                "@alice:example.com",
                "4\u{fe0f}\u{20e3}",
                opened_at + Duration::from_secs(10),
            )
            .unwrap();

        assert_eq!(preset.label, "3+0 blitz");
        assert_eq!(selector.state(), SelectorState::Dispatched);
    }

    #[test]
    fn test_select_by_other_user() {
        let opened_at = Instant::now();
        let mut selector = selector(opened_at);

        let result = selector.select("@bob:example.com", "4\u{fe0f}\u{20e3}", opened_at);

        assert_eq!(result, Err(SelectError::NotIssuer));
        assert_eq!(selector.state(), SelectorState::AwaitingSelection);
    }

    #[test]
    fn test_select_unknown_option() {
        let opened_at = Instant::now();
        let mut selector = selector(opened_at);

        let result = selector.select("@alice:example.com", "👍", opened_at);

        assert_eq!(result, Err(SelectError::UnknownOption("👍".to_owned())));
        assert_eq!(selector.state(), SelectorState::AwaitingSelection);
    }

    #[test]
    fn test_select_after_timeout() {
        let opened_at = Instant::now();
        let mut selector = selector(opened_at);

        let result = selector.select(
            "@alice:example.com",
            "1\u{fe0f}\u{20e3}",
            opened_at + TIMEOUT,
        );

        assert_eq!(result, Err(SelectError::TimedOut));
        assert_eq!(selector.state(), SelectorState::Expired);
    }

    #[test]
    fn test_select_twice() {
        let opened_at = Instant::now();
        let mut selector = selector(opened_at);

        selector
            .select("@alice:example.com", "1\u{fe0f}\u{20e3}", opened_at)
            .unwrap();
        let result = selector.select("@alice:example.com", "2\u{fe0f}\u{20e3}", opened_at);

        assert_eq!(result, Err(SelectError::Closed));
        assert_eq!(selector.state(), SelectorState::Dispatched);
    }

    #[test]
    fn test_expire() {
        let opened_at = Instant::now();
        let mut selector = selector(opened_at);

        assert!(selector.expire());
        assert!(!selector.expire());
        assert_eq!(selector.state(), SelectorState::Expired);
        assert_eq!(
            selector.select("@alice:example.com", "1\u{fe0f}\u{20e3}", opened_at),
            Err(SelectError::Closed)
        );
    }

    #[test]
    fn test_expire_after_dispatch() {
        let opened_at = Instant::now();
        let mut selector = selector(opened_at);

        selector
            .select("@alice:example.com", "1\u{fe0f}\u{20e3}", opened_at)
            .unwrap();

        assert!(!selector.expire());
        assert_eq!(selector.state(), SelectorState::Dispatched);
    }
}
