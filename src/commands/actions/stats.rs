//! Stats command handler.
//!
//! Looks a player up on the requested platform and formats the profile as a
//! card. The platform is checked before any request is sent.

use log::debug;

use crate::{
    chesscom::ChessComApi,
    commands::{CommandError, Platform, Reply},
    formatter::{format_chesscom_stats, format_lichess_stats},
    lichess::LichessApi,
};

/// Returns the stats card of `username` on `platform`.
///
/// # Errors
///
/// - [`CommandError::InvalidPlatform`] if `platform` is neither `chess.com`
///   nor `lichess.org`
/// - [`CommandError::Remote`] if the lookup fails
pub async fn handle_stats<L: LichessApi, C: ChessComApi>(
    lichess: &L,
    chesscom: &C,
    platform: &str,
    username: &str,
) -> Result<Reply, CommandError> {
    debug!("handling stats command: {} {}", platform, username);

    let card = match platform.parse::<Platform>()? {
        Platform::ChessCom => {
            let stats = chesscom.get_player_stats(username).await?;
            format_chesscom_stats(username, &stats)
        }
        Platform::Lichess => {
            let user = lichess.get_user(username).await?;
            format_lichess_stats(username, &user)
        }
    };

    Ok(Reply::Card(card))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        chesscom::{GameStats, MockChessComApi, PlayerStats, RatingPoint, Record},
        formatter::{Accent, NO_DATA},
        lichess::{GameCount, MockLichessApi, PlayTime, UserPublicData},
    };

    #[tokio::test]
    async fn test_chesscom_stats() {
        let mock_lichess = MockLichessApi::new();
        let mut mock_chesscom = MockChessComApi::new();
        mock_chesscom
            .expect_get_player_stats()
            .with(mockall::predicate::eq("alice"))
            .times(1)
            .returning(|_| {
                Ok(PlayerStats {
                    chess_blitz: Some(GameStats {
                        last: RatingPoint { rating: 1500 },
                        best: Some(RatingPoint { rating: 1600 }),
                        record: Record {
                            win: 5,
                            loss: 3,
                            draw: 2,
                        },
                    }),
                    ..Default::default()
                })
            });

        let reply = handle_stats(&mock_lichess, &mock_chesscom, "chess.com", "alice")
            .await
            .unwrap();

        let Reply::Card(card) = reply else {
            panic!("Expected a card");
        };
        assert_eq!(card.title, "Stats for alice");
        assert_eq!(card.accent, Accent::Green);
        assert_eq!(card.field("Daily"), Some(NO_DATA));
        assert!(card.field("Blitz").unwrap().contains("Current: 1500"));
    }

    #[tokio::test]
    async fn test_lichess_stats() {
        let mut mock_lichess = MockLichessApi::new();
        let mock_chesscom = MockChessComApi::new();
        mock_lichess
            .expect_get_user()
            .with(mockall::predicate::eq("bob"))
            .times(1)
            .returning(|_| {
                Ok(UserPublicData {
                    username: Some("Bob".to_owned()),
                    play_time: Some(PlayTime { total: 0, tv: 0 }),
                    count: Some(GameCount::default()),
                    perfs: None,
                })
            });

        let reply = handle_stats(&mock_lichess, &mock_chesscom, "lichess.org", "bob")
            .await
            .unwrap();

        let Reply::Card(card) = reply else {
            panic!("Expected a card");
        };
        assert_eq!(card.accent, Accent::LighterGrey);
        assert!(card.field("General").unwrap().ends_with("W/D/L: 0% / 0% / 0%"));
    }

    #[tokio::test]
    async fn test_invalid_platform_sends_nothing() {
        let mut mock_lichess = MockLichessApi::new();
        let mut mock_chesscom = MockChessComApi::new();
        mock_lichess.expect_get_user().times(0);
        mock_chesscom.expect_get_player_stats().times(0);

        let result = handle_stats(&mock_lichess, &mock_chesscom, "chess24", "alice").await;

        assert!(matches!(result, Err(CommandError::InvalidPlatform)));
    }

    #[tokio::test]
    async fn test_unknown_player() {
        let mock_lichess = MockLichessApi::new();
        let mut mock_chesscom = MockChessComApi::new();
        mock_chesscom
            .expect_get_player_stats()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("HTTP status client error (404 Not Found)")));

        let result = handle_stats(&mock_lichess, &mock_chesscom, "chess.com", "nobody").await;

        assert!(matches!(result, Err(CommandError::Remote(_))));
    }
}
