//! Info command handler.
//!
//! Displays the list of commands as a card. This is a stateless command that
//! always returns the same card.

use log::debug;

use crate::{commands::Reply, formatter::help_card};

/// Returns the help card listing every command.
pub fn handle_info() -> Reply {
    debug!("handling info command");

    Reply::Card(help_card())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::Accent;

    #[test]
    fn test_handle_info() {
        let Reply::Card(card) = handle_info() else {
            panic!("Expected a card");
        };

        assert_eq!(card.title, "List of Valid Commands");
        assert_eq!(card.accent, Accent::Blue);
        assert_eq!(card.fields.len(), 5);
    }
}
