//! Interactive time-control selection for `!challenge`.
//!
//! The bot answers `!challenge` with a prompt listing the [`PRESETS`] and seeds
//! one reaction per preset. The issuer picks a time control by reacting to the
//! prompt. Each prompt is tracked by a selector in the
//! [`SelectorRegistry`] until it is dispatched or expires.
//!
//! # Modules
//!
//! - `preset` - The ten offered time controls
//! - `state` - State machine of a single prompt
//! - `registry` - Shared map of open prompts and their expiry

mod preset;
mod registry;
mod state;

#[cfg(test)]
pub use crate::selector::preset::find_preset;
pub use crate::selector::preset::{PRESETS, TimeControlPreset};
pub use crate::selector::registry::SelectorRegistry;
