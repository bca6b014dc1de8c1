//! Command orchestration and execution.
//!
//! This module provides the [`Dispatcher`] struct, the entry point for
//! processing bot commands. It parses messages, routes commands to their
//! handlers and acts as the error boundary of every handler.
//!
//! # Flow
//!
//! ```text
//! Matrix Message → parse() → Command → execute() → Reply
//! Reaction → SelectorRegistry → TimeControlPreset → select_preset() → Reply
//! ```

use command_parser::Parser;
use log::warn;

use crate::{
    chesscom::ChessComApi,
    commands::{
        CommandError, CommandParseError, Reply,
        actions::{
            handle_challenge, handle_create_game, handle_events, handle_info, handle_preset,
            handle_stats,
        },
        command::{Command, format_command_error},
        markdown_response::format_error,
    },
    config::Club,
    lichess::LichessApi,
    selector::TimeControlPreset,
};

/// Command orchestrator for parsing and executing bot commands.
///
/// The Dispatcher is responsible for:
/// - Parsing raw message text into structured commands
/// - Routing commands to the action handlers
/// - Converting handler errors into user-friendly replies
///
/// # Command Prefix
///
/// Commands start with `!`. Messages without it, and `!` commands the bot
/// doesn't know, are silently ignored (returning [`CommandParseError::NotForBot`]).
pub struct Dispatcher<L: LichessApi, C: ChessComApi> {
    /// Command parser for processing user commands
    parser: Parser,
    lichess: L,
    chesscom: C,
    club: Club,
}

impl<L: LichessApi, C: ChessComApi> Dispatcher<L, C> {
    /// Creates a new Dispatcher over the given service clients.
    ///
    /// The parser recognizes `!` as the command prefix and `-` as the option
    /// prefix.
    pub fn new(lichess: L, chesscom: C, club: Club) -> Self {
        let parser = Parser::new('!', '-');
        Dispatcher {
            parser,
            lichess,
            chesscom,
            club,
        }
    }

    /// Parses a Matrix message body into a structured command.
    ///
    /// # Returns
    ///
    /// * `Ok(Command)` - Successfully parsed command
    /// * `Err(CommandParseError::NotForBot)` - Regular chat or unknown command
    /// * `Err(CommandParseError::InvalidCommand)` - Missing arguments, with the usage line
    pub fn parse(&self, body: &str) -> Result<Command, CommandParseError> {
        Command::parse(&self.parser, body).map_err(|error| match format_command_error(error) {
            Some(message) => CommandParseError::InvalidCommand(message),
            None => CommandParseError::NotForBot,
        })
    }

    /// Executes a parsed command and returns the reply to send.
    ///
    /// Never fails: any handler error becomes an `An error occurred` reply.
    pub async fn execute(&self, command: &Command) -> Reply {
        let result = match command {
            Command::Info => Ok(handle_info()),
            Command::Events => Ok(handle_events(&self.club.events_url)),
            Command::Challenge => Ok(handle_challenge()),
            Command::CreateGame {
                time,
                increment,
                variant,
                game_type,
            } => {
                handle_create_game(
                    &self.lichess,
                    time,
                    increment,
                    variant,
                    game_type,
                    &self.club.challenge_name,
                )
                .await
            }
            Command::Stats { platform, username } => {
                handle_stats(&self.lichess, &self.chesscom, platform, username).await
            }
        };

        Self::report(result)
    }

    /// Creates the open challenge of a preset picked in the selector.
    pub async fn select_preset(&self, preset: &TimeControlPreset) -> Reply {
        Self::report(handle_preset(&self.lichess, preset, &self.club.challenge_name).await)
    }

    fn report(result: Result<Reply, CommandError>) -> Reply {
        result.unwrap_or_else(|error| {
            warn!("command failed: {:?}", error);
            Reply::Text(format_error(&error.to_string()))
        })
    }
}
