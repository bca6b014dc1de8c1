//! chess.com stats card.

use log::debug;

use crate::{
    chesscom::{GameStats, PlayerStats, PuzzleRush, Tactics},
    formatter::{Accent, Card, Field, Logo, NO_DATA, format_wdl},
};

/// Builds the stats card of a chess.com player.
///
/// Fields, in order: Blitz, Bullet, Rapid, Daily, Puzzle Rush Survival and
/// Puzzles. The card turns green as soon as one game category is present.
pub fn format_chesscom_stats(username: &str, stats: &PlayerStats) -> Card {
    let mut card = Card::new(&format!("Stats for {}", username), Accent::Default);
    card.thumbnail = Some(Logo::ChessCom);

    let game_categories = [
        ("Blitz", &stats.chess_blitz),
        ("Bullet", &stats.chess_bullet),
        ("Rapid", &stats.chess_rapid),
        ("Daily", &stats.chess_daily),
    ];

    for (label, category) in game_categories {
        match category {
            Some(game_stats) => {
                card.fields.push(Field::new(label, format_game_stats(game_stats)));
                card.accent = Accent::Green;
            }
            None => card.fields.push(Field::new(label, NO_DATA)),
        }
    }

    card.fields.push(Field::new(
        "Puzzle Rush Survival",
        format_puzzle_rush(stats.puzzle_rush.as_ref()),
    ));
    card.fields
        .push(Field::new("Puzzles", format_tactics(stats.tactics.as_ref())));

    debug!("chess.com card for {}: {:?}", username, card);

    card
}

fn format_game_stats(game_stats: &GameStats) -> String {
    let record = &game_stats.record;
    let peak = game_stats
        .best
        .as_ref()
        .map(|best| best.rating.to_string())
        .unwrap_or_else(|| "N/A".to_owned());

    format!(
        "{}\nCurrent: {}\nPeak: {}\nGames: {}",
        format_wdl(record.win, record.draw, record.loss),
        game_stats.last.rating,
        peak,
        record.total()
    )
}

fn format_puzzle_rush(puzzle_rush: Option<&PuzzleRush>) -> String {
    match puzzle_rush.and_then(|p| p.best.as_ref()) {
        Some(best) => format!(
            "Best Score: {}\nTotal Attempts: {}",
            best.score, best.total_attempts
        ),
        None => NO_DATA.to_owned(),
    }
}

fn format_tactics(tactics: Option<&Tactics>) -> String {
    match tactics.and_then(|t| t.highest.as_ref()) {
        Some(highest) => format!("Highest Rating: {}", highest.rating),
        None => NO_DATA.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chesscom::{PuzzleRushBest, RatingPoint, Record};

    fn game_stats(last: u32, best: Option<u32>, win: u64, draw: u64, loss: u64) -> GameStats {
        GameStats {
            last: RatingPoint { rating: last },
            best: best.map(|rating| RatingPoint { rating }),
            record: Record { win, loss, draw },
        }
    }

    fn full_stats() -> PlayerStats {
        PlayerStats {
            chess_blitz: Some(game_stats(1500, Some(1600), 5, 2, 3)),
            chess_bullet: Some(game_stats(1400, Some(1450), 1, 1, 1)),
            chess_rapid: Some(game_stats(1700, Some(1750), 10, 0, 10)),
            chess_daily: Some(game_stats(1300, Some(1350), 2, 0, 0)),
            puzzle_rush: Some(PuzzleRush {
                best: Some(PuzzleRushBest {
                    total_attempts: 30,
                    score: 27,
                }),
            }),
            tactics: Some(Tactics {
                highest: Some(RatingPoint { rating: 2100 }),
            }),
        }
    }

    #[test]
    fn test_full_stats() {
        let card = format_chesscom_stats("alice", &full_stats());

        assert_eq!(card.title, "Stats for alice");
        assert_eq!(card.accent, Accent::Green);
        assert_eq!(card.thumbnail, Some(Logo::ChessCom));

        let labels: Vec<&str> = card.fields.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Blitz",
                "Bullet",
                "Rapid",
                "Daily",
                "Puzzle Rush Survival",
                "Puzzles"
            ]
        );

        assert_eq!(
            card.field("Blitz"),
            Some("W/D/L: 50.0% / 20.0% / 30.0%\nCurrent: 1500\nPeak: 1600\nGames: 10")
        );
        assert_eq!(
            card.field("Bullet"),
            Some("W/D/L: 33.33% / 33.33% / 33.33%\nCurrent: 1400\nPeak: 1450\nGames: 3")
        );
        assert_eq!(
            card.field("Puzzle Rush Survival"),
            Some("Best Score: 27\nTotal Attempts: 30")
        );
        assert_eq!(card.field("Puzzles"), Some("Highest Rating: 2100"));
    }

    #[test]
    fn test_missing_daily() {
        let mut stats = full_stats();
        stats.chess_daily = None;

        let card = format_chesscom_stats("alice", &stats);

        assert_eq!(card.field("Daily"), Some(NO_DATA));
        assert_ne!(card.field("Blitz"), Some(NO_DATA));
        assert_ne!(card.field("Bullet"), Some(NO_DATA));
        assert_ne!(card.field("Rapid"), Some(NO_DATA));
        assert_ne!(card.field("Puzzles"), Some(NO_DATA));
        assert_eq!(card.fields.len(), 6);
    }

    #[test]
    fn test_no_games_keeps_default_accent() {
        let card = format_chesscom_stats("newcomer", &PlayerStats::default());

        assert_eq!(card.accent, Accent::Default);
        assert!(card.fields.iter().all(|f| f.value == NO_DATA));
    }

    #[test]
    fn test_only_daily_turns_green() {
        let stats = PlayerStats {
            chess_daily: Some(game_stats(1200, None, 0, 0, 1)),
            ..Default::default()
        };

        let card = format_chesscom_stats("alice", &stats);
        assert_eq!(card.accent, Accent::Green);
    }

    #[test]
    fn test_category_without_games() {
        let stats = PlayerStats {
            chess_rapid: Some(game_stats(800, None, 0, 0, 0)),
            ..Default::default()
        };

        let card = format_chesscom_stats("alice", &stats);
        assert_eq!(
            card.field("Rapid"),
            Some("W/D/L: 0% / 0% / 0%\nCurrent: 800\nPeak: N/A\nGames: 0")
        );
    }

    #[test]
    fn test_puzzle_rush_without_best() {
        let stats = PlayerStats {
            puzzle_rush: Some(PuzzleRush { best: None }),
            ..Default::default()
        };

        let card = format_chesscom_stats("alice", &stats);
        assert_eq!(card.field("Puzzle Rush Survival"), Some(NO_DATA));
    }
}
