//! Renders a [`Card`] into a Matrix Markdown body.

use crate::formatter::Card;

/// Renders a card as Markdown.
///
/// The title is a heading, colored with `data-mx-color` when the card has an
/// accent. Each field is a bold label followed by its value, one hard line
/// break per line of the value.
pub fn render_card(card: &Card) -> String {
    let mut body = match card.accent.hex() {
        Some(color) => format!(
            "#### <font data-mx-color=\"{}\">{}</font>",
            color, card.title
        ),
        None => format!("#### {}", card.title),
    };

    for field in &card.fields {
        body.push_str(&format!("\n\n**{}**", field.label));
        for line in field.value.lines() {
            body.push_str("\\\n");
            body.push_str(line);
        }
    }

    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::{Accent, Field};

    #[test]
    fn test_render_card() {
        let mut card = Card::new("Stats for alice", Accent::Green);
        card.fields
            .push(Field::new("Blitz", "Current: 1500\nGames: 10"));
        card.fields.push(Field::new("Daily", "No data available"));

        assert_eq!(
            render_card(&card),
            "#### <font data-mx-color=\"#2ecc71\">Stats for alice</font>\n\n\
             **Blitz**\\\nCurrent: 1500\\\nGames: 10\n\n\
             **Daily**\\\nNo data available"
        );
    }

    #[test]
    fn test_render_card_default_accent() {
        let card = Card::new("Stats for bob", Accent::Default);

        assert_eq!(render_card(&card), "#### Stats for bob");
    }

    #[test]
    fn test_render_help_card() {
        let body = render_card(&crate::formatter::help_card());

        assert!(body.starts_with("#### <font data-mx-color="));
        assert!(body.contains("**!info**\\\nDisplays this help message."));
    }
}
