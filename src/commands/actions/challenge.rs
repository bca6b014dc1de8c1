//! Challenge command handlers.
//!
//! `!challenge` only opens the time-control prompt. The challenge itself is
//! created by [`handle_preset`] once the issuer picked a preset.

use log::{debug, info};

use crate::{
    commands::{
        CommandError, Reply,
        markdown_response::{format_menu_challenge, format_selector_prompt},
    },
    lichess::{ChallengeRequest, LichessApi},
    selector::{PRESETS, TimeControlPreset},
};

/// Returns the time-control prompt.
pub fn handle_challenge() -> Reply {
    debug!("handling challenge command");

    Reply::Selector {
        prompt: format_selector_prompt(),
        keys: PRESETS.iter().map(|preset| preset.key).collect(),
    }
}

/// Creates an unrated standard open challenge with the selected preset.
///
/// # Errors
///
/// - [`CommandError::Remote`] if lichess rejects the request
/// - [`CommandError::MalformedResponse`] if the answer lacks a color link
pub async fn handle_preset<L: LichessApi>(
    lichess: &L,
    preset: &TimeControlPreset,
    challenge_name: &str,
) -> Result<Reply, CommandError> {
    debug!("handling preset {}", preset.label);

    let request = ChallengeRequest::open_unrated(
        preset.base_minutes,
        preset.increment_seconds,
        challenge_name,
    );
    let response = lichess.create_open_challenge(&request).await?;

    let (url_white, url_black) = response
        .color_links()
        .ok_or(CommandError::MalformedResponse("color links"))?;

    info!("{} challenge created: {}", preset.label, response);

    Ok(Reply::Text(format_menu_challenge(
        preset.label,
        &url_white,
        &url_black,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        lichess::{ChallengeResponse, MockLichessApi, Variant},
        selector::find_preset,
    };

    fn challenge_response() -> ChallengeResponse {
        ChallengeResponse {
            id: Some("AbCdEfGh".to_owned()),
            url: Some("https://lichess.org/AbCdEfGh".to_owned()),
            url_white: Some("https://lichess.org/AbCdEfGh?color=white".to_owned()),
            url_black: Some("https://lichess.org/AbCdEfGh?color=black".to_owned()),
            challenge: None,
        }
    }

    #[test]
    fn test_handle_challenge() {
        let Reply::Selector { prompt, keys } = handle_challenge() else {
            panic!("Expected a selector");
        };

        assert!(prompt.starts_with("Select a time format for the unrated game challenge:"));
        assert_eq!(keys.len(), 10);
        assert_eq!(keys[9], "\u{1f51f}");
    }

    #[tokio::test]
    async fn test_every_preset_creates_matching_challenge() {
        for preset in &PRESETS {
            let mut mock_lichess = MockLichessApi::new();
            let expected_limit = preset.base_minutes * 60;
            let expected_increment = preset.increment_seconds;

            mock_lichess
                .expect_create_open_challenge()
                .withf(move |request| {
                    request.clock_limit == expected_limit
                        && request.clock_increment == expected_increment
                        && request.variant == Variant::Standard
                        && !request.rated
                        && request.name == "Club Challenge"
                })
                .times(1)
                .returning(|_| Ok(challenge_response()));

            let reply = handle_preset(&mock_lichess, preset, "Club Challenge")
                .await
                .unwrap();

            assert_eq!(
                reply,
                Reply::Text(format!(
                    "Unrated {} game challenge created! \nPlay as white: https://lichess.org/AbCdEfGh?color=white \nPlay as black: https://lichess.org/AbCdEfGh?color=black",
                    preset.label
                ))
            );
        }
    }

    #[tokio::test]
    async fn test_preset_without_color_links() {
        let mut mock_lichess = MockLichessApi::new();
        mock_lichess
            .expect_create_open_challenge()
            .times(1)
            .returning(|_| {
                Ok(ChallengeResponse {
                    url_black: None,
                    ..challenge_response()
                })
            });

        let preset = find_preset("1\u{fe0f}\u{20e3}").unwrap();
        let result = handle_preset(&mock_lichess, preset, "Club Challenge").await;

        assert!(matches!(result, Err(CommandError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_preset_remote_error() {
        let mut mock_lichess = MockLichessApi::new();
        mock_lichess
            .expect_create_open_challenge()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("HTTP status client error (401 Unauthorized)")));

        let preset = find_preset("1\u{fe0f}\u{20e3}").unwrap();
        let result = handle_preset(&mock_lichess, preset, "Club Challenge").await;

        assert!(matches!(result, Err(CommandError::Remote(_))));
    }
}
