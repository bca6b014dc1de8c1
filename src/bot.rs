//! Bot module connecting the Matrix client with the chess services.
//!
//! This module provides the main [`Bot`] implementation. It listens to Matrix
//! events, runs commands through the [`Dispatcher`] and sends the replies back.
//!
//! # Event Processing Flow
//!
//! ```text
//! Message  → Parse Command → Execute → Reply (text, card or prompt)
//! Reaction → SelectorRegistry → Selected preset → Create challenge → Reply
//! ```
//!
//! Each event is handled in its own task, a slow lookup never blocks the sync
//! loop or other users.

use std::{path::Path, sync::Arc};

use log::{debug, error, info};

use crate::{
    Args,
    chesscom::ChessComRequester,
    commands::{CommandParseError, Dispatcher, Reply},
    config::Config,
    formatter::render_card,
    lichess::LichessRequester,
    matrix::{ChatEvent, MatrixClient, PromptApi, ReplyTarget, UserCredentials},
    selector::SelectorRegistry,
};

type SparkyDispatcher = Dispatcher<LichessRequester, ChessComRequester>;

/// Everything needed to handle one Matrix event.
#[derive(Clone)]
struct EventContext {
    /// Thread-safe reference to the Matrix client
    matrix_client: Arc<MatrixClient>,
    /// Thread-safe reference to the command dispatcher
    dispatcher: Arc<SparkyDispatcher>,
    /// Open time-control prompts
    selectors: SelectorRegistry,
}

/// Main bot structure.
///
/// # Thread Safety
///
/// The Matrix client and the dispatcher are shared read-only behind `Arc`.
/// The selector registry is the only mutable state, guarded by its own lock.
pub struct Bot {
    matrix_client: Arc<MatrixClient>,
    dispatcher: Arc<SparkyDispatcher>,
    selectors: SelectorRegistry,
}

impl Bot {
    /// Creates the service clients and logs in to Matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if the Matrix login or session restoration fails.
    pub async fn new(
        config: Config,
        args: Args,
        avatar_bytes: &[u8],
    ) -> Result<Self, anyhow::Error> {
        let lichess = LichessRequester::new(&config.lichess.url, &config.lichess.token);
        let chesscom = ChessComRequester::new(&config.chesscom.url, &config.chesscom.user_agent);
        let selectors = SelectorRegistry::new(config.selector.timeout());
        let dispatcher = Arc::new(Dispatcher::new(lichess, chesscom, config.club));

        let matrix_client = Arc::new(
            MatrixClient::new(
                &UserCredentials {
                    user_id: config.matrix.user_id,
                    password: config.matrix.password,
                },
                Path::new(&args.data),
                avatar_bytes,
            )
            .await?,
        );

        Ok(Bot {
            matrix_client,
            dispatcher,
            selectors,
        })
    }

    /// Listens to Matrix events until the sync loop ends.
    pub async fn start(self) {
        let ctx = EventContext {
            matrix_client: Arc::clone(&self.matrix_client),
            dispatcher: Arc::clone(&self.dispatcher),
            selectors: self.selectors.clone(),
        };

        info!("sparky is online");

        let on_event = move |event: ChatEvent| {
            let ctx = ctx.clone();
            tokio::spawn(async move {
                match event {
                    ChatEvent::Message {
                        body,
                        room_id,
                        sender_id,
                        event_id,
                    } => {
                        let target = ReplyTarget {
                            room_id: &room_id,
                            sender_id: &sender_id,
                            event_id: &event_id,
                        };
                        handle_message(&ctx, target, &body).await
                    }
                    ChatEvent::Reaction {
                        key,
                        relates_to,
                        room_id,
                        sender_id,
                    } => handle_reaction(&ctx, &key, &relates_to, &room_id, &sender_id).await,
                }
            });
        };

        if let Err(e) = self.matrix_client.sync(on_event).await {
            error!("matrix sync failed: {:?}", e);
        }
    }
}

/// Parses and executes a command, then sends its reply.
async fn handle_message(ctx: &EventContext, target: ReplyTarget<'_>, body: &str) {
    let command = match ctx.dispatcher.parse(body) {
        Ok(command) => command,
        // Return silently if the message is not a command for the bot
        Err(CommandParseError::NotForBot) => return,
        Err(CommandParseError::InvalidCommand(usage)) => {
            if let Err(e) = ctx.matrix_client.send_text_reply(target, &usage).await {
                error!("failed to send usage: {:?}", e);
            }
            return;
        }
    };

    info!("{} in {}: {:?}", target.sender_id, target.room_id, command);
    let reply = ctx.dispatcher.execute(&command).await;

    if let Err(e) = send_reply(ctx, target, reply).await {
        error!("failed to reply to {}: {:?}", target.event_id, e);
    }
}

async fn send_reply(
    ctx: &EventContext,
    target: ReplyTarget<'_>,
    reply: Reply,
) -> anyhow::Result<()> {
    match reply {
        Reply::Text(text) => ctx.matrix_client.send_text_reply(target, &text).await,
        Reply::Card(card) => {
            let image = card.thumbnail.map(|logo| (logo.filename(), logo.bytes()));
            ctx.matrix_client
                .send_card(target, &render_card(&card), image)
                .await
        }
        Reply::Selector { prompt, keys } => {
            open_prompt(
                ctx.matrix_client.as_ref(),
                &ctx.selectors,
                target,
                &prompt,
                &keys,
            )
            .await
        }
    }
}

/// Posts a selector prompt and opens its selector.
///
/// The selector is open before the reactions are seeded, the issuer may pick
/// a preset as soon as the prompt is visible.
async fn open_prompt<P: PromptApi>(
    prompts: &P,
    selectors: &SelectorRegistry,
    target: ReplyTarget<'_>,
    prompt: &str,
    keys: &[&'static str],
) -> anyhow::Result<()> {
    let prompt_id = prompts
        .send_prompt(target.room_id, target.sender_id, target.event_id, prompt)
        .await?;

    selectors
        .open(&prompt_id, target.sender_id, target.room_id)
        .await;

    prompts
        .seed_reactions(target.room_id, &prompt_id, keys)
        .await
}

/// Dispatches the preset picked by a reaction to an open prompt.
///
/// Reactions to other messages, from other users or with unknown keys are
/// ignored.
async fn handle_reaction(
    ctx: &EventContext,
    key: &str,
    prompt_id: &str,
    room_id: &str,
    sender_id: &str,
) {
    let selection = match ctx.selectors.select(prompt_id, sender_id, key).await {
        None => return,
        Some(Ok(selection)) => selection,
        Some(Err(e)) => {
            debug!("reaction {} by {} on {} ignored: {}", key, sender_id, prompt_id, e);
            return;
        }
    };

    info!(
        "{} selected {} in {}",
        sender_id, selection.preset.label, room_id
    );

    let Reply::Text(text) = ctx.dispatcher.select_preset(selection.preset).await else {
        return;
    };
    if let Err(e) = ctx.matrix_client.send_text(&selection.room_id, &text).await {
        error!("failed to send challenge links: {:?}", e);
    }
}
