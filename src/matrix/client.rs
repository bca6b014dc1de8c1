//! Matrix client wrapper for bot messaging and synchronization.
//!
//! This module provides a high-level [`MatrixClient`] interface that wraps the
//! Matrix SDK client and handles replies, cards, reaction prompts and
//! synchronization.

use std::{path::Path, sync::Arc};

use log::{debug, error, info, warn};
use matrix_sdk::{
    Client, Room,
    attachment::AttachmentConfig,
    ruma::{
        EventId, OwnedEventId, RoomId, UserId,
        events::{
            reaction::ReactionEventContent,
            relation::Annotation,
            room::message::{AddMentions, ForwardThread, ReplyMetadata, RoomMessageEventContent},
        },
    },
};
use mockall::automock;

use crate::matrix::{
    UserCredentials,
    login::setup_client,
    session::MatrixSession,
    sync::{ChatEvent, MatrixSync},
};

/// Display name of the bot account.
const DISPLAY_NAME: &str = "Sparky";

/// High-level Matrix client for bot messaging operations.
pub struct MatrixClient {
    /// Synchronization service for handling real-time events
    matrix_sync: MatrixSync,
    /// Underlying Matrix SDK client
    client: Client,
}

/// Posting of reaction prompts.
///
/// The prompt and its reactions are sent in two steps so the caller can start
/// listening for choices before the reactions are seeded.
#[automock]
pub trait PromptApi {
    /// Replies to `event_id` with a Markdown prompt and returns its event id.
    async fn send_prompt(
        &self,
        room_id: &str,
        sender_id: &str,
        event_id: &str,
        prompt: &str,
    ) -> anyhow::Result<String>;

    /// Reacts to a prompt once per key so users only have to click.
    async fn seed_reactions(
        &self,
        room_id: &str,
        prompt_id: &str,
        keys: &[&'static str],
    ) -> anyhow::Result<()>;
}

/// Message being answered.
#[derive(Debug, Clone, Copy)]
pub struct ReplyTarget<'a> {
    pub room_id: &'a str,
    pub sender_id: &'a str,
    pub event_id: &'a str,
}

impl MatrixClient {
    /// Logs in (or restores the stored session) and prepares synchronization.
    ///
    /// The display name is set on every start, the avatar only when the
    /// account has none.
    ///
    /// # Arguments
    ///
    /// * `user_credentials` - User ID and password of the bot account
    /// * `data_dir` - Directory holding the session file and the SQLite store
    /// * `avatar_bytes` - PNG image used as avatar
    pub async fn new(
        user_credentials: &UserCredentials,
        data_dir: &Path,
        avatar_bytes: &[u8],
    ) -> Result<Self, anyhow::Error> {
        let matrix_session = Arc::new(MatrixSession::new(data_dir).await.map_err(|e| {
            error!("failed to open matrix session: {:?}", e);
            e
        })?);

        let client = setup_client(user_credentials, &matrix_session)
            .await
            .map_err(|e| {
                error!("failed to setup matrix client: {:?}", e);
                e
            })?;

        client.account().set_display_name(Some(DISPLAY_NAME)).await?;

        if client.account().get_avatar_url().await?.is_none()
            && let Err(e) = client
                .account()
                .upload_avatar(&mime::IMAGE_PNG, avatar_bytes.to_vec())
                .await
        {
            warn!("failed to upload avatar: {:?}", e);
        }

        let matrix_sync = MatrixSync::new(&client, matrix_session);

        Ok(MatrixClient {
            matrix_sync,
            client,
        })
    }

    /// Starts the Matrix synchronization loop.
    ///
    /// `on_event` is invoked for each text message and reaction received in a
    /// joined room, except those sent by the bot. Never returns under normal
    /// operation.
    pub async fn sync<F>(&self, on_event: F) -> Result<(), anyhow::Error>
    where
        F: Fn(ChatEvent) + Send + Sync + 'static,
    {
        match self.matrix_sync.sync(on_event).await {
            Ok(_) => info!("matrix sync ended successfully"),
            Err(e) => error!("matrix sync ended with error: {:?}", e),
        }

        Ok(())
    }

    /// Replies to a message with plain text, line breaks are kept as typed.
    pub async fn send_text_reply(&self, target: ReplyTarget<'_>, body: &str) -> anyhow::Result<()> {
        let content = RoomMessageEventContent::text_plain(body);
        self.send_reply_content(target, content).await?;
        Ok(())
    }

    /// Sends plain text to a room without replying to a message.
    pub async fn send_text(&self, room_id: &str, body: &str) -> anyhow::Result<()> {
        let room = self.get_room(room_id)?;
        room.send(RoomMessageEventContent::text_plain(body)).await?;
        Ok(())
    }

    /// Replies to a message with a Markdown card, preceded by an optional image.
    ///
    /// # Arguments
    ///
    /// * `target` - Message being answered
    /// * `card` - Markdown body of the card
    /// * `image` - File name and PNG bytes sent before the card
    pub async fn send_card(
        &self,
        target: ReplyTarget<'_>,
        card: &str,
        image: Option<(&str, &[u8])>,
    ) -> anyhow::Result<()> {
        if let Some((filename, bytes)) = image {
            let room = self.get_room(target.room_id)?;
            // A missing logo should not prevent the stats from being sent
            if let Err(e) = room
                .send_attachment(
                    filename,
                    &mime::IMAGE_PNG,
                    bytes.to_vec(),
                    AttachmentConfig::new(),
                )
                .await
            {
                warn!("failed to send {}: {:?}", filename, e);
            }
        }

        let content = RoomMessageEventContent::text_markdown(card);
        self.send_reply_content(target, content).await?;
        Ok(())
    }

    /// Sends `content` as a reply to the target message.
    async fn send_reply_content(
        &self,
        target: ReplyTarget<'_>,
        content: RoomMessageEventContent,
    ) -> anyhow::Result<OwnedEventId> {
        let sender = UserId::parse(target.sender_id)?;
        let event = EventId::parse(target.event_id)?;

        let content = content.make_reply_to(
            ReplyMetadata::new(&event, &sender, None),
            ForwardThread::No,
            AddMentions::No,
        );

        let room = self.get_room(target.room_id)?;
        let response = room.send(content).await?;
        Ok(response.event_id)
    }

    fn get_room(&self, room_id: &str) -> anyhow::Result<Room> {
        let room_id = RoomId::parse(room_id)?;
        self.client
            .get_room(&room_id)
            .ok_or_else(|| anyhow::anyhow!("unknown room {}", room_id))
    }
}

impl PromptApi for MatrixClient {
    async fn send_prompt(
        &self,
        room_id: &str,
        sender_id: &str,
        event_id: &str,
        prompt: &str,
    ) -> anyhow::Result<String> {
        let target = ReplyTarget {
            room_id,
            sender_id,
            event_id,
        };
        let content = RoomMessageEventContent::text_markdown(prompt);
        let prompt_id = self.send_reply_content(target, content).await?;
        Ok(prompt_id.to_string())
    }

    /// A reaction that fails to send is logged and skipped.
    async fn seed_reactions(
        &self,
        room_id: &str,
        prompt_id: &str,
        keys: &[&'static str],
    ) -> anyhow::Result<()> {
        let room = self.get_room(room_id)?;
        let prompt_event = EventId::parse(prompt_id)?;

        for key in keys {
            let reaction = ReactionEventContent::new(Annotation::new(
                prompt_event.clone(),
                (*key).to_owned(),
            ));
            if let Err(e) = room.send(reaction).await {
                warn!("failed to seed reaction {} on {}: {:?}", key, prompt_id, e);
            }
        }

        debug!("prompt {} seeded with {} reactions", prompt_id, keys.len());
        Ok(())
    }
}
