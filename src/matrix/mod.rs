//! Matrix protocol integration for the bot.
//!
//! This module provides the chat gateway of the bot:
//! - Login and session persistence in the data directory
//! - Real-time synchronization of messages and reactions
//! - Replies as plain text, Markdown cards, images and reaction prompts
//!
//! # Architecture
//!
//! The module is structured around the [`MatrixClient`] which coordinates:
//! - **Login**: Password login or session restoration via the login submodule
//! - **Session**: Session and sync token persistence via the session submodule
//! - **Sync**: Event handling and room auto-join via the sync submodule

mod client;
mod login;
mod session;
mod sync;

#[cfg(test)]
pub use crate::matrix::client::MockPromptApi;
pub use crate::matrix::client::{MatrixClient, PromptApi, ReplyTarget};
pub use crate::matrix::sync::ChatEvent;

/// User credentials for a Matrix account
#[derive(Debug, Clone)]
pub struct UserCredentials {
    /// User ID of the matrix account
    pub user_id: String,
    /// Password of the matrix account
    pub password: String,
}
