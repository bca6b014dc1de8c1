//! Matrix client synchronization and event handling.
//!
//! The [`MatrixSync::sync`] method:
//! 1. Performs an initial sync to catch up on offline events (especially invites)
//! 2. Sets up event handlers for auto-joining rooms, messages and reactions
//! 3. Enters a continuous sync loop with automatic token persistence
//!
//! Events sent by the bot itself are dropped, its own seeded reactions would
//! otherwise reach the selector.

use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, info, warn};
use matrix_sdk::{
    Client, LoopCtrl, Room, RoomState,
    config::SyncSettings,
    ruma::{
        api::client::filter::FilterDefinition,
        events::{
            reaction::OriginalSyncReactionEvent,
            room::{
                member::StrippedRoomMemberEvent,
                message::{MessageType, OriginalSyncRoomMessageEvent},
            },
        },
    },
};
use tokio::time::{Duration, sleep};

use crate::matrix::session::MatrixSession;

/// Event of a joined room relevant to the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// Text message
    Message {
        body: String,
        room_id: String,
        sender_id: String,
        event_id: String,
    },
    /// Reaction to a message
    Reaction {
        /// Reaction key, usually an emoji
        key: String,
        /// Event id of the message reacted to
        relates_to: String,
        room_id: String,
        sender_id: String,
    },
}

/// Manages Matrix client synchronization and event processing.
pub struct MatrixSync {
    /// The matrix client
    client: Client,
    /// The matrix session
    session: Arc<MatrixSession>,
}

impl MatrixSync {
    /// Creates a new MatrixSync instance.
    ///
    /// This does not start the synchronization process; call [`MatrixSync::sync`]
    /// to begin syncing.
    pub fn new(client: &Client, session: Arc<MatrixSession>) -> Self {
        MatrixSync {
            client: client.to_owned(),
            session,
        }
    }

    /// Starts the synchronization process and enters an infinite loop.
    ///
    /// Only events received after the initial sync reach `on_event`, commands
    /// sent while the bot was offline are not replayed.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync loop encounters a fatal error. Sync token
    /// persistence errors are logged but don't stop the sync.
    pub async fn sync<F>(&self, on_event: F) -> Result<()>
    where
        F: Fn(ChatEvent) + Send + Sync + 'static,
    {
        info!("start syncing");

        // Auto join rooms when invited
        self.client.add_event_handler(auto_join_rooms);

        // Enable room members lazy-loading
        let filter = FilterDefinition::with_lazy_loading();
        let mut sync_settings = SyncSettings::default().filter(filter.into());

        if let Some(sync_token) = self.session.sync_token().await {
            sync_settings = sync_settings.token(sync_token);
        }

        // First sync to only get the invitations received while offline
        loop {
            match self.client.sync_once(sync_settings.clone()).await {
                Ok(response) => {
                    sync_settings = sync_settings.token(response.next_batch.clone());
                    self.persist_sync_token(response.next_batch).await;
                    break;
                }
                Err(error) => {
                    error!("an error occurred during initial sync: {error}, trying again");
                    sleep(Duration::from_secs(5)).await;
                }
            }
        }

        let on_event = Arc::new(on_event);

        self.client.add_event_handler({
            let on_event = Arc::clone(&on_event);
            move |event: OriginalSyncRoomMessageEvent, room: Room, client: Client| async move {
                on_room_message(event, room, client, &on_event).await
            }
        });

        self.client.add_event_handler({
            let on_event = Arc::clone(&on_event);
            move |event: OriginalSyncReactionEvent, room: Room, client: Client| async move {
                on_reaction(event, room, client, &on_event).await
            }
        });

        self.client
            .sync_with_result_callback(sync_settings, |sync_result| async move {
                let response = sync_result?;

                // We persist the token each time to be able to restore our session
                self.persist_sync_token(response.next_batch).await;

                Ok(LoopCtrl::Continue)
            })
            .await?;

        Ok(())
    }

    async fn persist_sync_token(&self, sync_token: String) {
        if let Err(err) = self.session.persist_sync_token(sync_token).await {
            error!("failed to persist sync token: {:?}", err);
        }
    }
}

/// Automatically joins rooms when the bot receives an invitation.
///
/// Synapse may send the invite before the room can be joined, so joining is
/// retried with an exponential delay.
async fn auto_join_rooms(room_member: StrippedRoomMemberEvent, client: Client, room: Room) {
    let Some(user_id) = client.user_id() else {
        warn!("could not get user id from client");
        return;
    };

    // Ignore if the invite is not for us
    if room_member.state_key != user_id {
        return;
    }

    tokio::spawn(async move {
        info!("auto joining room {}", room.room_id());
        let mut delay = 2;

        while let Err(err) = room.join().await {
            error!(
                "failed to join room {} ({err:?}), retrying in {delay}s",
                room.room_id()
            );

            sleep(Duration::from_secs(delay)).await;
            delay *= 2;

            if delay > 3600 {
                error!("can't join room {} ({err:?})", room.room_id());
                return;
            }
        }
        info!("successfully joined room {}", room.room_id());
    });
}

fn is_own_event(client: &Client, sender: &matrix_sdk::ruma::UserId) -> bool {
    client.user_id().is_some_and(|own| own == sender)
}

async fn on_room_message<F>(
    event: OriginalSyncRoomMessageEvent,
    room: Room,
    client: Client,
    on_event: &Arc<F>,
) where
    F: Fn(ChatEvent) + Send + Sync + 'static,
{
    if room.state() != RoomState::Joined || is_own_event(&client, &event.sender) {
        return;
    }

    // Only handle text messages
    let MessageType::Text(text_content) = event.content.msgtype else {
        return;
    };

    on_event(ChatEvent::Message {
        body: text_content.body,
        room_id: room.room_id().to_string(),
        sender_id: event.sender.to_string(),
        event_id: event.event_id.to_string(),
    });
}

async fn on_reaction<F>(event: OriginalSyncReactionEvent, room: Room, client: Client, on_event: &Arc<F>)
where
    F: Fn(ChatEvent) + Send + Sync + 'static,
{
    if room.state() != RoomState::Joined || is_own_event(&client, &event.sender) {
        return;
    }

    debug!(
        "reaction {} from {} on {}",
        event.content.relates_to.key, event.sender, event.content.relates_to.event_id
    );

    on_event(ChatEvent::Reaction {
        key: event.content.relates_to.key,
        relates_to: event.content.relates_to.event_id.to_string(),
        room_id: room.room_id().to_string(),
        sender_id: event.sender.to_string(),
    });
}
