//! Command action handlers.
//!
//! Individual handler functions for each bot command. Handlers that reach a
//! remote service are generic over its API trait and return a
//! `Result<Reply, CommandError>`, the [`Dispatcher`](crate::commands::Dispatcher)
//! turns errors into replies.
//!
//! # Available Handlers
//!
//! - [`handle_info`] - Display the list of commands
//! - [`handle_events`] - Link to the club schedule
//! - [`handle_challenge`] - Open the time-control prompt
//! - [`handle_preset`] - Create the challenge of a selected preset
//! - [`handle_create_game`] - Create a custom challenge
//! - [`handle_stats`] - Display the stats of a player

mod challenge;
mod create_game;
mod events;
mod info;
mod stats;

pub use crate::commands::actions::{
    challenge::{handle_challenge, handle_preset},
    create_game::handle_create_game,
    events::handle_events,
    info::handle_info,
    stats::handle_stats,
};
