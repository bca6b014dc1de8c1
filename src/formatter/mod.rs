//! Response formatting for stats and help messages.
//!
//! Service payloads are reshaped into a [`Card`]: a title, an accent color, an
//! optional platform logo and an ordered list of labeled fields. Cards are
//! then rendered into Matrix Markdown by [`render`].
//!
//! # Percentages
//!
//! Win/draw/loss percentages are rounded to two decimals. A category without
//! any game renders `0%` for each percentage instead of failing.

mod chesscom;
mod lichess;
mod render;

pub use crate::formatter::chesscom::format_chesscom_stats;
pub use crate::formatter::lichess::format_lichess_stats;
pub use crate::formatter::render::render_card;

/// Value displayed for a category missing from the payload.
pub const NO_DATA: &str = "No data available";

/// Accent color of a card, drawn on its title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    /// No color, the client default is used
    Default,
    Blue,
    Green,
    LighterGrey,
}

impl Accent {
    /// Hex color code, `None` for [`Accent::Default`].
    pub fn hex(&self) -> Option<&'static str> {
        match self {
            Accent::Default => None,
            Accent::Blue => Some("#3498db"),
            Accent::Green => Some("#2ecc71"),
            Accent::LighterGrey => Some("#95a5a6"),
        }
    }
}

/// Platform logo sent alongside a stats card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Logo {
    ChessCom,
    Lichess,
}

impl Logo {
    pub fn filename(&self) -> &'static str {
        match self {
            Logo::ChessCom => "chessdotcom_logo.png",
            Logo::Lichess => "lichess_logo.png",
        }
    }

    /// PNG bytes bundled in the binary.
    pub fn bytes(&self) -> &'static [u8] {
        match self {
            Logo::ChessCom => include_bytes!("../../assets/chessdotcom_logo.png"),
            Logo::Lichess => include_bytes!("../../assets/lichess_logo.png"),
        }
    }
}

/// A labeled entry of a card. The value may span several lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: String,
    pub value: String,
}

impl Field {
    pub fn new(label: &str, value: impl Into<String>) -> Self {
        Field {
            label: label.to_owned(),
            value: value.into(),
        }
    }
}

/// Structured message sent in reply to `!stats` and `!info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub accent: Accent,
    pub thumbnail: Option<Logo>,
    pub fields: Vec<Field>,
}

impl Card {
    pub fn new(title: &str, accent: Accent) -> Self {
        Card {
            title: title.to_owned(),
            accent,
            thumbnail: None,
            fields: Vec::new(),
        }
    }

    /// Value of the first field with the given label.
    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }
}

/// `count / total * 100` rounded to two decimals, `0` when `total` is `0`.
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(count as f64 / total as f64 * 100.0)
}

/// Rounds a non-negative value to two decimals, ties to even.
///
/// The tie is decided on the exact binary value of `value`, so `3.125`
/// (exactly representable) rounds to `3.12` while `2.675` (stored slightly
/// below) rounds to `2.67`.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 0.0;
    }

    // value == mantissa * 2^exponent
    let bits = value.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = (bits & ((1 << 52) - 1)) as u128;
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1 << 52), biased - 1075)
    };

    let scaled = mantissa * 100;
    let hundredths = if exponent >= 0 {
        scaled << exponent
    } else if exponent <= -120 {
        0
    } else {
        let shift = -exponent as u32;
        let quotient = scaled >> shift;
        let remainder = scaled & ((1u128 << shift) - 1);
        let half = 1u128 << (shift - 1);
        if remainder > half || (remainder == half && quotient % 2 == 1) {
            quotient + 1
        } else {
            quotient
        }
    };

    hundredths as f64 / 100.0
}

/// Formats a number the way rounded floats are usually read: integral values
/// keep one decimal (`50.0`), others print their shortest form (`33.33`).
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// `W/D/L: {win}% / {draw}% / {loss}%` line shared by both platforms.
pub fn format_wdl(win: u64, draw: u64, loss: u64) -> String {
    let total = win + draw + loss;
    if total == 0 {
        return "W/D/L: 0% / 0% / 0%".to_owned();
    }
    format!(
        "W/D/L: {}% / {}% / {}%",
        format_number(percentage(win, total)),
        format_number(percentage(draw, total)),
        format_number(percentage(loss, total))
    )
}

/// Help card listing every command.
pub fn help_card() -> Card {
    let mut card = Card::new("List of Valid Commands", Accent::Blue);
    card.fields = vec![
        Field::new("!info", "Displays this help message."),
        Field::new(
            "!events",
            "Directs you to our club website which contains our tournament and club meeting schedule.",
        ),
        Field::new(
            "!stats (platform) (username)",
            "Displays the stats of a specific user on chess.com or lichess.org.",
        ),
        Field::new(
            "!challenge",
            "Creates an unrated, open challenge anyone can join on lichess.org.",
        ),
        Field::new(
            "!create_game (time) (increment) (variant) (rated or unrated)",
            "Creates a custom open game on Lichess. Valid variants include: standard, chess960, atomic, antichess, horde, koth, racingkings and 3check. Only standard games can be rated.",
        ),
    ];
    card
}
