//! Registry of the open time-control prompts.

use std::{collections::HashMap, sync::Arc, time::Duration};

use log::{debug, info};
use tokio::{
    sync::Mutex,
    time::{self, Instant},
};

use crate::selector::{
    preset::TimeControlPreset,
    state::{SelectError, Selector},
};

/// A preset picked by the issuer of a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub preset: &'static TimeControlPreset,
    /// Room the prompt was posted in
    pub room_id: String,
}

/// Open prompts, keyed by the event id of the prompt message.
///
/// A selector leaves the registry as soon as it is dispatched or expired, so
/// reactions to a closed prompt find nothing. The lock makes sure a prompt is
/// dispatched at most once and never after it expired.
#[derive(Clone)]
pub struct SelectorRegistry {
    selectors: Arc<Mutex<HashMap<String, Selector>>>,
    timeout: Duration,
}

impl SelectorRegistry {
    /// Creates an empty registry whose prompts expire after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        SelectorRegistry {
            selectors: Arc::new(Mutex::new(HashMap::new())),
            timeout,
        }
    }

    /// Registers the prompt `event_id` and schedules its expiry.
    pub async fn open(&self, event_id: &str, issuer: &str, room_id: &str) {
        let selector = Selector::new(issuer, room_id, Instant::now(), self.timeout);
        self.selectors
            .lock()
            .await
            .insert(event_id.to_owned(), selector);
        info!(
            "time control prompt {} opened for {} in {}",
            event_id, issuer, room_id
        );

        let selectors = Arc::clone(&self.selectors);
        let event_id = event_id.to_owned();
        let timeout = self.timeout;
        tokio::spawn(async move {
            time::sleep(timeout).await;
            let mut selectors = selectors.lock().await;
            if let Some(mut selector) = selectors.remove(&event_id)
                && selector.expire()
            {
                info!("time control prompt {} expired", event_id);
            }
        });
    }

    /// Applies a reaction to the prompt `event_id`.
    ///
    /// Returns `None` when no prompt is open under this id. Terminal outcomes
    /// remove the prompt from the registry.
    pub async fn select(
        &self,
        event_id: &str,
        user_id: &str,
        key: &str,
    ) -> Option<Result<Selection, SelectError>> {
        let mut selectors = self.selectors.lock().await;
        let selector = selectors.get_mut(event_id)?;

        let result = selector
            .select(user_id, key, Instant::now())
            .map(|preset| Selection {
                preset,
                room_id: selector.room_id.clone(),
            });

        if selector.is_terminal() {
            selectors.remove(event_id);
        }
        debug!("reaction {} by {} on {}: {:?}", key, user_id, event_id, result);

        Some(result)
    }

    /// Number of prompts still waiting for a selection.
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.selectors.lock().await.len()
    }

    /// Whether the prompt `event_id` is open, without waiting for the lock.
    #[cfg(test)]
    pub fn is_open(&self, event_id: &str) -> bool {
        self.selectors
            .try_lock()
            .is_ok_and(|selectors| selectors.contains_key(event_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "@alice:example.com";
    const ROOM: &str = "!room:example.com";

    #[tokio::test]
    async fn test_select_and_remove() {
        let registry = SelectorRegistry::new(Duration::from_secs(180));
        registry.open("$prompt", ALICE, ROOM).await;

        let selection = registry
            .select("$prompt", ALICE, "6\u{fe0f}\u{20e3}")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(selection.preset.label, "5+0 blitz");
        assert_eq!(selection.room_id, ROOM);
        assert_eq!(registry.len().await, 0);
        assert!(
            registry
                .select("$prompt", ALICE, "6\u{fe0f}\u{20e3}")
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_reaction_from_other_user_keeps_prompt_open() {
        let registry = SelectorRegistry::new(Duration::from_secs(180));
        registry.open("$prompt", ALICE, ROOM).await;

        let result = registry
            .select("$prompt", "@bob:example.com", "1\u{fe0f}\u{20e3}")
            .await
            .unwrap();

        assert_eq!(result, Err(SelectError::NotIssuer));
        assert_eq!(registry.len().await, 1);

        let selection = registry
            .select("$prompt", ALICE, "1\u{fe0f}\u{20e3}")
            .await
            .unwrap();
        assert!(selection.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_prompt() {
        let registry = SelectorRegistry::new(Duration::from_secs(180));

        assert!(
            registry
                .select("$missing", ALICE, "1\u{fe0f}\u{20e3}")
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_selection_after_timeout() {
        let registry = SelectorRegistry::new(Duration::from_millis(20));
        registry.open("$prompt", ALICE, ROOM).await;

        time::sleep(Duration::from_millis(60)).await;

        // Either the expiry task already removed the prompt or the late
        // selection is rejected, nothing is ever dispatched.
        let result = registry.select("$prompt", ALICE, "1\u{fe0f}\u{20e3}").await;
        assert!(matches!(result, None | Some(Err(SelectError::TimedOut))));
        assert_eq!(registry.len().await, 0);
    }

    #[tokio::test]
    async fn test_late_selection_before_expiry_task() {
        let registry = SelectorRegistry::new(Duration::from_millis(20));
        registry.open("$prompt", ALICE, ROOM).await;

        // Hold the lock past the deadline so the expiry task cannot run first.
        let guard = registry.selectors.lock().await;
        std::thread::sleep(Duration::from_millis(40));
        drop(guard);

        let result = registry.select("$prompt", ALICE, "1\u{fe0f}\u{20e3}").await;
        assert_eq!(result, Some(Err(SelectError::TimedOut)));
        assert_eq!(registry.len().await, 0);
    }
}
