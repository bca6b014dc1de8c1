//! Custom challenge command handler.
//!
//! # Validation
//!
//! The arguments are checked before any request is sent, in this order:
//! - **Numbers**: time (minutes) and increment (seconds) are whole numbers
//! - **Variant**: one of the supported lichess variants
//! - **Rated**: only standard games can be rated
//! - **Game type**: exactly `rated` or `unrated`

use log::{debug, info};

use crate::{
    commands::{CommandError, Reply, markdown_response::format_created_game},
    lichess::{ChallengeRequest, LichessApi},
};

/// Creates an open challenge from the raw `!create_game` arguments.
///
/// # Errors
///
/// - [`CommandError::Challenge`] if an argument is rejected, lichess is not called
/// - [`CommandError::Remote`] if lichess rejects the request
/// - [`CommandError::MalformedResponse`] if the answer has no challenge url
pub async fn handle_create_game<L: LichessApi>(
    lichess: &L,
    time: &str,
    increment: &str,
    variant: &str,
    game_type: &str,
    challenge_name: &str,
) -> Result<Reply, CommandError> {
    debug!(
        "handling create_game command: {} {} {} {}",
        time, increment, variant, game_type
    );

    let request = ChallengeRequest::parse(time, increment, variant, game_type, challenge_name)?;
    let response = lichess.create_open_challenge(&request).await?;

    let url = response
        .game_url()
        .ok_or(CommandError::MalformedResponse("url"))?;

    info!("custom challenge created: {}", response);

    Ok(Reply::Text(format_created_game(&url)))
}
