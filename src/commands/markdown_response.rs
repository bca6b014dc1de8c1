//! Text response formatters for bot commands.
//!
//! Plain replies keep their line breaks as typed, the selector prompt is the
//! only Markdown message.

use crate::selector::PRESETS;

/// Formats the link to the club schedule.
pub fn format_events(events_url: &str) -> String {
    format!(
        "Here's a link to our club website which contains our tournament and club meeting schedule: \n{}",
        events_url
    )
}

/// Formats the `!challenge` prompt listing every preset with its reaction key.
///
/// # Examples
///
/// ```text
/// Select a time format for the unrated game challenge:
///
/// - 1️⃣ 🚀 **1+0 bullet**: 1 minute bullet with no increment
/// - 2️⃣ 🚀 **1+1 bullet**: 1 minute + 1 second increment
/// ```
pub fn format_selector_prompt() -> String {
    let mut body = String::from("Select a time format for the unrated game challenge:\n\n");

    for preset in &PRESETS {
        body.push_str(&format!(
            "- {} {} **{}**: {}\n",
            preset.key, preset.emoji, preset.label, preset.description
        ));
    }

    body
}

/// Formats the reply of a challenge created from the selector.
pub fn format_menu_challenge(label: &str, url_white: &str, url_black: &str) -> String {
    format!(
        "Unrated {} game challenge created! \nPlay as white: {} \nPlay as black: {}",
        label, url_white, url_black
    )
}

/// Formats the reply of a challenge created by `!create_game`.
pub fn format_created_game(url: &str) -> String {
    format!("Challenge created! \nLink: \n{}", url)
}

/// Formats a handler failure.
pub fn format_error(details: &str) -> String {
    format!("An error occurred: {}", details)
}

pub fn format_create_game_usage() -> String {
    "Usage: !create_game (time) (increment) (variant) (rated or unrated)".to_owned()
}

pub fn format_stats_usage() -> String {
    "Usage: !stats (platform) (username)".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_events() {
        assert_eq!(
            format_events("https://club.example.com/events"),
            "Here's a link to our club website which contains our tournament and club meeting schedule: \nhttps://club.example.com/events"
        );
    }

    #[test]
    fn test_format_selector_prompt() {
        let prompt = format_selector_prompt();

        assert!(prompt.starts_with("Select a time format for the unrated game challenge:"));
        assert_eq!(prompt.lines().filter(|l| l.starts_with("- ")).count(), 10);
        assert!(prompt.contains("**3+2 blitz**: 3 minutes + 2 seconds increment"));
        assert!(prompt.contains("\u{1f51f} ⏳ **30+0 classical**"));
    }

    #[test]
    fn test_format_menu_challenge() {
        assert_eq!(
            format_menu_challenge("3+2 blitz", "https://lichess.org/a?color=white", "https://lichess.org/a?color=black"),
            "Unrated 3+2 blitz game challenge created! \nPlay as white: https://lichess.org/a?color=white \nPlay as black: https://lichess.org/a?color=black"
        );
    }

    #[test]
    fn test_format_created_game() {
        assert_eq!(
            format_created_game("https://lichess.org/AbCdEfGh"),
            "Challenge created! \nLink: \nhttps://lichess.org/AbCdEfGh"
        );
    }

    #[test]
    fn test_format_error() {
        assert_eq!(format_error("boom"), "An error occurred: boom");
    }
}
