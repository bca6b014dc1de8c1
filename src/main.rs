//! Sparky - A Matrix bot for a chess club.
//!
//! Sparky answers chess commands in the club's Matrix rooms. It looks up
//! player statistics on chess.com and lichess.org and creates open lichess
//! challenges that any two members can join.
//!
//! # Bot Commands
//!
//! - `!info` - Display the list of commands
//! - `!events` - Link to the club events page
//! - `!challenge` - Open a menu of time controls, pick one with a reaction
//! - `!create_game <time> <increment> <variant> <rated|unrated>` - Create a custom challenge
//! - `!stats <chess.com|lichess.org> <username>` - Show a player's statistics
//!
//! # Configuration
//!
//! See the [`config`] module for the YAML format. Any value can be overridden
//! with an environment variable prefixed by `SPARKY_`:
//!
//! ```bash
//! export SPARKY_MATRIX__PASSWORD="your-password"
//! export SPARKY_LICHESS__TOKEN="lip_xxxxxxxxxxxx"
//! ```
//!
//! # Usage
//!
//! ```bash
//! sparky --config config.yaml --data ./sparky-data
//! ```
//!
//! # Architecture
//!
//! - [`bot`] - Event loop tying Matrix to the command dispatcher
//! - [`chesscom`] - chess.com public API client
//! - [`commands`] - Command parsing and execution
//! - [`config`] - YAML configuration with environment variable overrides
//! - [`formatter`] - Statistics cards
//! - [`lichess`] - lichess.org API client and challenge parameters
//! - [`matrix`] - Matrix login, session persistence and messaging
//! - [`selector`] - Reaction menus opened by `!challenge`
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{bot::Bot, config::Config};

mod bot;
mod chesscom;
mod commands;
mod config;
mod formatter;
mod lichess;
mod matrix;
mod selector;

/// Command-line arguments for the Sparky bot.
///
/// # Examples
///
/// ```bash
/// sparky --config config.yaml --data ./sparky-data
/// ```
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    #[arg(short, long)]
    config: String,

    /// Path to the directory for storing persistent data.
    ///
    /// This directory will contain:
    /// - `session.json` - Matrix access token and last sync token
    /// - `store/` - Matrix SDK state store
    ///
    /// The access token allows impersonation of the bot, keep the directory
    /// readable only by the bot user.
    #[arg(short, long)]
    data: String,
}

/// Main entry point for the Sparky bot.
///
/// A configuration that cannot be loaded or a failed Matrix login is logged
/// and ends the process before any command is handled.
#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting sparky {}...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config file: {}", e);
            return;
        }
    };

    let avatar_bytes = include_bytes!("../assets/sparky.png");

    let bot = match Bot::new(config, args, avatar_bytes).await {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to initialize bot: {}", e);
            return;
        }
    };
    bot.start().await;
}
