//! Time controls offered by the `!challenge` selector.

/// Variation selector appended to emoji by some Matrix clients.
const VARIATION_SELECTOR: char = '\u{fe0f}';

/// A time control the issuer can pick for an unrated open challenge.
#[derive(Debug, PartialEq, Eq)]
pub struct TimeControlPreset {
    /// Reaction key selecting this preset
    pub key: &'static str,
    /// Short label, e.g. `3+2 blitz`
    pub label: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    pub base_minutes: u32,
    pub increment_seconds: u32,
}

/// Every preset, in the order they are offered.
pub const PRESETS: [TimeControlPreset; 10] = [
    TimeControlPreset {
        key: "1\u{fe0f}\u{20e3}",
        label: "1+0 bullet",
        emoji: "🚀",
        description: "1 minute bullet with no increment",
        base_minutes: 1,
        increment_seconds: 0,
    },
    TimeControlPreset {
        key: "2\u{fe0f}\u{20e3}",
        label: "1+1 bullet",
        emoji: "🚀",
        description: "1 minute + 1 second increment",
        base_minutes: 1,
        increment_seconds: 1,
    },
    TimeControlPreset {
        key: "3\u{fe0f}\u{20e3}",
        label: "2+1 bullet",
        emoji: "🚀",
        description: "2 minutes + 1 second increment",
        base_minutes: 2,
        increment_seconds: 1,
    },
    TimeControlPreset {
        key: "4\u{fe0f}\u{20e3}",
        label: "3+0 blitz",
        emoji: "⚡",
        description: "3 minutes blitz with no increment",
        base_minutes: 3,
        increment_seconds: 0,
    },
    TimeControlPreset {
        key: "5\u{fe0f}\u{20e3}",
        label: "3+2 blitz",
        emoji: "⚡",
        description: "3 minutes + 2 seconds increment",
        base_minutes: 3,
        increment_seconds: 2,
    },
    TimeControlPreset {
        key: "6\u{fe0f}\u{20e3}",
        label: "5+0 blitz",
        emoji: "⚡",
        description: "5 minutes blitz with no increment",
        base_minutes: 5,
        increment_seconds: 0,
    },
    TimeControlPreset {
        key: "7\u{fe0f}\u{20e3}",
        label: "5+3 blitz",
        emoji: "⚡",
        description: "5 minutes + 3 seconds increment",
        base_minutes: 5,
        increment_seconds: 3,
    },
    TimeControlPreset {
        key: "8\u{fe0f}\u{20e3}",
        label: "10+0 rapid",
        emoji: "🕒",
        description: "10 minutes rapid with no increment",
        base_minutes: 10,
        increment_seconds: 0,
    },
    TimeControlPreset {
        key: "9\u{fe0f}\u{20e3}",
        label: "15+10 rapid",
        emoji: "🕒",
        description: "15 minutes + 10 seconds increment",
        base_minutes: 15,
        increment_seconds: 10,
    },
    TimeControlPreset {
        key: "\u{1f51f}",
        label: "30+0 classical",
        emoji: "⏳",
        description: "30 minutes classical with no increment",
        base_minutes: 30,
        increment_seconds: 0,
    },
];

/// Finds the preset selected by a reaction key.
///
/// Keys are compared without variation selectors, clients don't agree on
/// whether to send them.
pub fn find_preset(key: &str) -> Option<&'static TimeControlPreset> {
    let key = normalize(key);
    PRESETS.iter().find(|preset| normalize(preset.key) == key)
}

fn normalize(key: &str) -> String {
    key.chars().filter(|c| *c != VARIATION_SELECTOR).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_unique() {
        for (i, preset) in PRESETS.iter().enumerate() {
            for other in &PRESETS[i + 1..] {
                assert_ne!(preset.key, other.key);
                assert_ne!(preset.label, other.label);
            }
        }
    }

    #[test]
    fn test_find_preset() {
        let preset = find_preset("5\u{fe0f}\u{20e3}").unwrap();
        assert_eq!(preset.label, "3+2 blitz");
        assert_eq!(preset.base_minutes, 3);
        assert_eq!(preset.increment_seconds, 2);

        let preset = find_preset("\u{1f51f}").unwrap();
        assert_eq!(preset.label, "30+0 classical");
    }

    #[test]
    fn test_find_preset_without_variation_selector() {
        let preset = find_preset("9\u{20e3}").unwrap();
        assert_eq!(preset.label, "15+10 rapid");
    }

    #[test]
    fn test_find_unknown_preset() {
        assert!(find_preset("👍").is_none());
        assert!(find_preset("1").is_none());
        assert!(find_preset("").is_none());
    }
}
