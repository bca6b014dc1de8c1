//! Configuration file structures for the Sparky bot.
//!
//! The configuration is read from a YAML file and can be overridden with
//! environment variables prefixed by `SPARKY_`. Nested keys are separated by
//! a double underscore, e.g. `SPARKY_LICHESS__TOKEN`.
//!
//! # Configuration File Format
//!
//! ```yaml
//! matrix:
//!   user_id: "@sparky:matrix.org"
//!   password: "secret-password"
//!
//! lichess:
//!   token: "lip_xxxxxxxxxxxx"
//!   # url: "https://lichess.org"
//!
//! chesscom:
//!   # url: "https://api.chess.com"
//!   user_agent: "sparky-bot (contact: admin@example.com)"
//!
//! club:
//!   events_url: "https://example.com/events"
//!   # challenge_name: "Chess Club Challenge"
//!
//! selector:
//!   # Seconds before a `!challenge` menu stops accepting selections
//!   timeout: 180
//! ```
//!
//! The configuration holds every secret the bot needs. It is loaded once at
//! start-up and never mutated afterwards; a configuration that cannot be
//! loaded stops the process before it connects to Matrix.

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

/// Prefix of the environment variables overriding the YAML file.
const ENV_PREFIX: &str = "SPARKY_";

/// Root configuration structure for the Sparky bot.
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// Matrix account configuration
    pub matrix: Matrix,
    /// lichess.org API configuration
    pub lichess: Lichess,
    /// chess.com API configuration
    #[serde(default)]
    pub chesscom: ChessCom,
    /// Club information exposed by the bot
    pub club: Club,
    /// `!challenge` menu configuration
    #[serde(default)]
    pub selector: Selector,
}

/// Matrix account configuration.
#[derive(Deserialize, Debug, Clone)]
pub struct Matrix {
    /// Fully qualified Matrix user ID, e.g. `@sparky:matrix.org`.
    pub user_id: String,

    /// Matrix account password.
    ///
    /// Only used for the first login, the session is persisted in the data
    /// directory afterwards.
    pub password: String,
}

/// lichess.org API configuration.
#[derive(Deserialize, Debug, Clone)]
pub struct Lichess {
    /// Personal API token with the `challenge:write` scope.
    pub token: String,

    /// Base URL of the lichess server.
    #[serde(default = "default_lichess_url")]
    pub url: String,
}

/// chess.com public API configuration.
#[derive(Deserialize, Debug, Clone)]
pub struct ChessCom {
    /// Base URL of the chess.com public API.
    #[serde(default = "default_chesscom_url")]
    pub url: String,

    /// User agent sent with every request.
    ///
    /// chess.com asks API clients to identify themselves and may block
    /// requests without one.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ChessCom {
    fn default() -> Self {
        ChessCom {
            url: default_chesscom_url(),
            user_agent: default_user_agent(),
        }
    }
}

/// Club information exposed by the bot.
#[derive(Deserialize, Debug, Clone)]
pub struct Club {
    /// Website listing the club tournaments and meetings, sent by `!events`.
    pub events_url: String,

    /// Name given to the lichess challenges created by the bot.
    #[serde(default = "default_challenge_name")]
    pub challenge_name: String,
}

/// `!challenge` menu configuration.
#[derive(Deserialize, Debug, Clone)]
pub struct Selector {
    /// Seconds during which the menu accepts a selection.
    #[serde(default = "default_selector_timeout")]
    pub timeout: u64,
}

impl Default for Selector {
    fn default() -> Self {
        Selector {
            timeout: default_selector_timeout(),
        }
    }
}

impl Selector {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

fn default_lichess_url() -> String {
    "https://lichess.org".to_owned()
}

fn default_chesscom_url() -> String {
    "https://api.chess.com".to_owned()
}

fn default_user_agent() -> String {
    format!("sparky/{}", env!("CARGO_PKG_VERSION"))
}

fn default_challenge_name() -> String {
    "Chess Club Challenge".to_owned()
}

fn default_selector_timeout() -> u64 {
    180
}

impl Config {
    /// Loads the configuration from a YAML file, then applies the `SPARKY_`
    /// environment overrides.
    ///
    /// Trailing slashes of the service URLs are removed so request paths can
    /// be appended directly.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid YAML, or a
    /// required key is missing from both the file and the environment.
    pub fn load(path: &str) -> Result<Self, anyhow::Error> {
        let mut config: Config = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        trim_trailing_slash(&mut config.lichess.url);
        trim_trailing_slash(&mut config.chesscom.url);

        Ok(config)
    }
}

fn trim_trailing_slash(url: &mut String) {
    while url.ends_with('/') {
        url.pop();
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    const FULL_CONFIG: &str = r#"
matrix:
  user_id: "@sparky:example.com"
  password: "secret"
lichess:
  token: "lip_token"
  url: "https://lichess.example.com/"
chesscom:
  url: "https://chesscom.example.com"
  user_agent: "test-agent"
club:
  events_url: "https://club.example.com/events"
  challenge_name: "Club Night"
selector:
  timeout: 60
"#;

    const MINIMAL_CONFIG: &str = r#"
matrix:
  user_id: "@sparky:example.com"
  password: "secret"
lichess:
  token: "lip_token"
club:
  events_url: "https://club.example.com/events"
"#;

    #[test]
    fn test_load_full_config() {
        Jail::expect_with(|jail| {
            jail.create_file("config.yaml", FULL_CONFIG)?;

            let config = Config::load("config.yaml").unwrap();
            assert_eq!(config.matrix.user_id, "@sparky:example.com");
            assert_eq!(config.matrix.password, "secret");
            assert_eq!(config.lichess.token, "lip_token");
            assert_eq!(config.lichess.url, "https://lichess.example.com");
            assert_eq!(config.chesscom.url, "https://chesscom.example.com");
            assert_eq!(config.chesscom.user_agent, "test-agent");
            assert_eq!(config.club.events_url, "https://club.example.com/events");
            assert_eq!(config.club.challenge_name, "Club Night");
            assert_eq!(config.selector.timeout(), Duration::from_secs(60));
            Ok(())
        });
    }

    #[test]
    fn test_load_minimal_config_uses_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file("config.yaml", MINIMAL_CONFIG)?;

            let config = Config::load("config.yaml").unwrap();
            assert_eq!(config.lichess.url, "https://lichess.org");
            assert_eq!(config.chesscom.url, "https://api.chess.com");
            assert!(config.chesscom.user_agent.starts_with("sparky/"));
            assert_eq!(config.club.challenge_name, "Chess Club Challenge");
            assert_eq!(config.selector.timeout, 180);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.yaml", MINIMAL_CONFIG)?;
            jail.set_env("SPARKY_LICHESS__TOKEN", "lip_from_env");
            jail.set_env("SPARKY_SELECTOR__TIMEOUT", "30");

            let config = Config::load("config.yaml").unwrap();
            assert_eq!(config.lichess.token, "lip_from_env");
            assert_eq!(config.selector.timeout, 30);
            Ok(())
        });
    }

    #[test]
    fn test_missing_token_fails() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r#"
matrix:
  user_id: "@sparky:example.com"
  password: "secret"
club:
  events_url: "https://club.example.com/events"
"#,
            )?;

            assert!(Config::load("config.yaml").is_err());
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_fails() {
        Jail::expect_with(|_jail| {
            assert!(Config::load("does-not-exist.yaml").is_err());
            Ok(())
        });
    }

    #[test]
    fn test_trim_trailing_slash() {
        let mut url = "https://lichess.org//".to_owned();
        trim_trailing_slash(&mut url);
        assert_eq!(url, "https://lichess.org");
    }
}
