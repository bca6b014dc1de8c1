//! Events command handler.

use log::debug;

use crate::commands::{Reply, markdown_response::format_events};

/// Returns the link to the club schedule.
pub fn handle_events(events_url: &str) -> Reply {
    debug!("handling events command");

    Reply::Text(format_events(events_url))
}
