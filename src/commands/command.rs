//! Command parsing.
//!
//! This module converts Matrix message text into structured [`Command`]
//! enums. Only the shape of a command is checked here, argument values are
//! validated by the action handlers.

use command_parser::{Command as ParserCommand, Parser};
use log::debug;

use crate::commands::markdown_response::{format_create_game_usage, format_stats_usage};

/// Represents a parsed bot command.
#[derive(Debug, Hash, PartialEq, Eq)]
pub enum Command {
    /// Display the list of commands
    Info,
    /// Link to the club schedule
    Events,
    /// Open the time-control selector
    Challenge,
    /// Create a custom open challenge
    ///
    /// # Fields
    ///
    /// * `time` - Initial clock in minutes, unparsed
    /// * `increment` - Increment in seconds, unparsed
    /// * `variant` - Variant token
    /// * `game_type` - `rated` or `unrated`
    CreateGame {
        time: String,
        increment: String,
        variant: String,
        game_type: String,
    },
    /// Display the stats of a player
    Stats { platform: String, username: String },
}

/// Errors that can occur during command parsing.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandParsingError {
    /// The message could not be parsed as a command
    UnableToParse,
    /// The command is not recognized
    Unknown,
    /// `!create_game` has missing arguments
    InvalidCreateGame,
    /// `!stats` has missing arguments
    InvalidStats,
}

impl Command {
    /// Parses a message string into a Command.
    ///
    /// Extra arguments are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The message is not a command format - [`CommandParsingError::UnableToParse`]
    /// - The command is not recognized - [`CommandParsingError::Unknown`]
    /// - `!create_game` lacks arguments - [`CommandParsingError::InvalidCreateGame`]
    /// - `!stats` lacks arguments - [`CommandParsingError::InvalidStats`]
    pub fn parse(parser: &Parser, body: &str) -> Result<Self, CommandParsingError> {
        // The parser drops the last word, a dummy word keeps the real arguments
        let body = body.trim().to_string() + " dummy";

        // This is normal to fail if the message is not a command
        let command = match parser.parse(&body) {
            Ok(cmd) => cmd,
            Err(_) => return Err(CommandParsingError::UnableToParse),
        };

        debug!("Parsing command: {:?}", command);

        match command.name.as_str() {
            "info" => Ok(Command::Info),
            "events" => Ok(Command::Events),
            "challenge" => Ok(Command::Challenge),
            "create_game" => Self::parse_create_game(&command),
            "stats" => Self::parse_stats(&command),
            _ => Err(CommandParsingError::Unknown),
        }
    }

    fn parse_create_game(command: &ParserCommand) -> Result<Self, CommandParsingError> {
        // 4 arguments: time, increment, variant and game type
        if command.arguments.len() < 4 {
            return Err(CommandParsingError::InvalidCreateGame);
        }

        Ok(Command::CreateGame {
            time: command.arguments[0].clone(),
            increment: command.arguments[1].clone(),
            variant: command.arguments[2].clone(),
            game_type: command.arguments[3].clone(),
        })
    }

    fn parse_stats(command: &ParserCommand) -> Result<Self, CommandParsingError> {
        // 2 arguments: platform and username
        if command.arguments.len() < 2 {
            return Err(CommandParsingError::InvalidStats);
        }

        Ok(Command::Stats {
            platform: command.arguments[0].clone(),
            username: command.arguments[1].clone(),
        })
    }
}

/// Formats a parsing error into a usage message.
///
/// Returns `None` for messages the bot must not answer: regular chat and
/// unknown commands, which may belong to another bot of the room.
pub fn format_command_error(error: CommandParsingError) -> Option<String> {
    match error {
        CommandParsingError::InvalidCreateGame => Some(format_create_game_usage()),
        CommandParsingError::InvalidStats => Some(format_stats_usage()),
        _ => None,
    }
}
