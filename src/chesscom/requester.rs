//! HTTP client for the chess.com public API.

use anyhow::{anyhow, bail};
use log::{debug, info};
use mockall::automock;
use reqwest::{Client, Url, header::USER_AGENT};

use crate::chesscom::response_structs::PlayerStats;

/// HTTP client for the chess.com public API.
///
/// The public API needs no authentication but expects every client to send
/// an identifying user agent.
pub struct ChessComRequester {
    /// chess.com API url
    url: String,
    /// User agent sent with every request
    user_agent: String,
    /// HTTP client
    client: Client,
}

/// Trait for making requests to chess.com.
///
/// This trait abstracts the HTTP operations for easier testing with mocks.
#[automock]
pub trait ChessComApi {
    /// Fetches the rating statistics of a player.
    async fn get_player_stats(&self, username: &str) -> Result<PlayerStats, anyhow::Error>;
}

impl ChessComRequester {
    /// Create a new [ChessComRequester].
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL of the API, without trailing slash.
    /// * `user_agent` - The user agent identifying the bot.
    pub fn new(url: &str, user_agent: &str) -> Self {
        ChessComRequester {
            url: url.to_string(),
            user_agent: user_agent.to_string(),
            client: Client::new(),
        }
    }

    /// URL of the stats endpoint of `username`, with the name percent-encoded.
    fn stats_url(&self, username: &str) -> Result<Url, anyhow::Error> {
        if username.is_empty() || username == "." || username == ".." {
            bail!("invalid username {:?}", username);
        }

        let username = username.to_lowercase();
        let mut url = Url::parse(&self.url)?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("{} cannot be a base url", self.url))?
            .pop_if_empty()
            .extend(["pub", "player", username.as_str(), "stats"]);
        Ok(url)
    }
}

impl ChessComApi for ChessComRequester {
    /// Request `/pub/player/{username}/stats`.
    ///
    /// chess.com usernames are case-insensitive but the endpoint only
    /// accepts lowercase names.
    async fn get_player_stats(&self, username: &str) -> Result<PlayerStats, anyhow::Error> {
        let url = self.stats_url(username)?;
        info!("request chess.com stats of {}", username);

        let stats: PlayerStats = self
            .client
            .get(url.clone())
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!("response from {} -> {}", &url, &stats);

        Ok(stats)
    }
}
