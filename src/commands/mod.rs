//! Bot command parsing, execution and response formatting.
//!
//! # Overview
//!
//! The commands module handles the lifecycle of a chat command:
//! 1. **Parsing** - Converting Matrix messages into structured [`Command`] enums
//! 2. **Execution** - Routing commands to the action handlers
//! 3. **Error boundary** - Turning any handler failure into a plain reply
//! 4. **Response** - Returning a [`Reply`] for the Matrix layer to send
//!
//! # Architecture
//!
//! ```text
//! Matrix Message
//!      │
//!      ▼
//! ┌─────────────┐
//! │ Dispatcher  │  ← Entry point: parse() + execute() + select_preset()
//! └─────────────┘
//!      │
//!      ├── parse() ──────────► Command
//!      │
//!      └── execute() ────────► Action Handlers
//!                               - handle_info
//!                               - handle_events
//!                               - handle_challenge
//!                               - handle_create_game
//!                               - handle_stats
//!                                     │
//!                                     ▼
//!                                   Reply
//! ```
//!
//! # Available Commands
//!
//! | Command | Arguments | Description |
//! |---------|-----------|-------------|
//! | `!info` | None | Display the list of commands |
//! | `!events` | None | Link to the club schedule |
//! | `!challenge` | None | Pick a time control for an unrated open challenge |
//! | `!create_game` | `<time> <increment> <variant> <rated\|unrated>` | Create a custom open challenge |
//! | `!stats` | `<chess.com\|lichess.org> <username>` | Display the stats of a player |
//!
//! # Error Handling
//!
//! - **Silent Errors** ([`CommandParseError::NotForBot`]): regular chat and
//!   unknown `!` commands. These never produce a response.
//! - **Usage Errors** ([`CommandParseError::InvalidCommand`]): a known command
//!   with missing arguments, answered with its usage line.
//! - **Execution Errors** ([`CommandError`]): reported as
//!   `An error occurred: {details}`.

mod actions;
mod command;
mod dispatcher;
mod error;
mod markdown_response;
mod platform;

pub use crate::commands::dispatcher::Dispatcher;
pub use crate::commands::error::CommandError;
pub use crate::commands::platform::Platform;
use crate::formatter::Card;

/// Response produced by a command.
///
/// Handlers don't talk to Matrix directly, the caller sends the reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Plain text message
    Text(String),
    /// Structured card, rendered to Markdown
    Card(Card),
    /// Time-control prompt. The caller posts `prompt`, seeds one reaction per
    /// key and registers the prompt in the selector registry.
    Selector {
        prompt: String,
        keys: Vec<&'static str>,
    },
}

/// Errors that can occur during command parsing.
///
/// # Variants
///
/// * `NotForBot` - Message is not a command the bot knows.
///   Handled silently without responding to the user.
///
/// * `InvalidCommand` - A known command with missing arguments.
///   Contains the usage line to display.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandParseError {
    /// Message is not for this bot (silent error)
    NotForBot,
    /// Invalid command syntax with usage message
    InvalidCommand(String),
}
