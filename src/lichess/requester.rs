//! HTTP client for the lichess API.
//!
//! This module provides the [`LichessRequester`] struct for looking up public
//! profiles and creating open challenges on lichess.org.

use anyhow::{anyhow, bail};
use log::{debug, info};
use mockall::automock;
use reqwest::{Client, Url};

use crate::lichess::{
    challenge::ChallengeRequest,
    response_structs::{ChallengeResponse, UserPublicData},
};

/// HTTP client for the lichess API, authenticated with a personal token.
///
/// # Examples
///
/// ```no_run
/// let lichess = LichessRequester::new("https://lichess.org", "lip_token");
/// let user = lichess.get_user("DrNykterstein").await.unwrap();
/// println!("User: {}", user);
/// ```
pub struct LichessRequester {
    /// lichess server url
    url: String,
    /// Personal API token
    token: String,
    /// HTTP client
    client: Client,
}

/// Trait for making requests to lichess.
///
/// This trait abstracts the HTTP operations for easier testing with mocks.
#[automock]
pub trait LichessApi {
    /// Fetches the public profile of a user.
    async fn get_user(&self, username: &str) -> Result<UserPublicData, anyhow::Error>;
    /// Creates an open challenge anyone can join.
    async fn create_open_challenge(
        &self,
        request: &ChallengeRequest,
    ) -> Result<ChallengeResponse, anyhow::Error>;
}

impl LichessRequester {
    /// Create a new [LichessRequester].
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL of the lichess server, without trailing slash.
    /// * `token` - The personal API token.
    pub fn new(url: &str, token: &str) -> Self {
        LichessRequester {
            url: url.to_string(),
            token: token.to_string(),
            client: Client::new(),
        }
    }

    /// Builds `{url}/{segments}`, percent-encoding each segment.
    ///
    /// Segments typed in chat can't escape the endpoint: `/` is encoded and
    /// empty, `.` or `..` segments are refused.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, anyhow::Error> {
        if let Some(segment) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            bail!("invalid path segment {:?}", segment);
        }

        let mut url = Url::parse(&self.url)?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("{} cannot be a base url", self.url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl LichessApi for LichessRequester {
    /// Request `/api/user/{username}`.
    ///
    /// Unknown users answer with a 404, which is turned into an error.
    async fn get_user(&self, username: &str) -> Result<UserPublicData, anyhow::Error> {
        let url = self.endpoint(&["api", "user", username])?;
        info!("request lichess profile of {}", username);

        let user: UserPublicData = self
            .client
            .get(url.clone())
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!("response from {} -> {}", &url, &user);

        Ok(user)
    }

    /// Request `POST /api/challenge/open`.
    ///
    /// The challenge parameters are sent as a form:
    /// ```text
    /// rated=false&clock.limit=300&clock.increment=3&variant=standard&name=...
    /// ```
    async fn create_open_challenge(
        &self,
        request: &ChallengeRequest,
    ) -> Result<ChallengeResponse, anyhow::Error> {
        let url = self.endpoint(&["api", "challenge", "open"])?;
        info!(
            "create open challenge {}+{} {} rated={}",
            request.clock_limit, request.clock_increment, request.variant, request.rated
        );

        let challenge: ChallengeResponse = self
            .client
            .post(url.clone())
            .bearer_auth(&self.token)
            .form(&request.form())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!("response from {} -> {}", &url, &challenge);

        Ok(challenge)
    }
}
