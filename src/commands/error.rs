//! Errors raised while executing a command.

use thiserror::Error;

use crate::lichess::ChallengeError;

/// Failure of a command handler.
///
/// Every variant is reported to the user the same way, as
/// `An error occurred: {error}`.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Please enter a valid platform ('chess.com', 'lichess.org')")]
    InvalidPlatform,
    /// Rejected `!create_game` arguments
    #[error(transparent)]
    Challenge(#[from] ChallengeError),
    /// lichess answered without the expected links
    #[error("lichess returned a challenge without {0}")]
    MalformedResponse(&'static str),
    /// Transport error, non-2xx status or undecodable body
    #[error(transparent)]
    Remote(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            CommandError::InvalidPlatform.to_string(),
            "Please enter a valid platform ('chess.com', 'lichess.org')"
        );
        assert_eq!(
            CommandError::from(ChallengeError::RatedNonStandard).to_string(),
            "Cannot create a rated game of a non-standard variant"
        );
        assert_eq!(
            CommandError::from(anyhow::anyhow!("HTTP status client error (404 Not Found)"))
                .to_string(),
            "HTTP status client error (404 Not Found)"
        );
    }
}
