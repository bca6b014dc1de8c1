//! lichess stats card.

use log::debug;

use crate::{
    formatter::{Accent, Card, Field, Logo, NO_DATA, format_number, format_wdl, round2},
    lichess::{GameCount, GamePerf, Perfs, PlayTime, StormPerf, UserPublicData},
};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Labels of the rated categories, in display order.
const GAME_CATEGORIES: [&str; 6] = [
    "Blitz",
    "Bullet",
    "Ultrabullet",
    "Rapid",
    "Classical",
    "Correspondence",
];

/// Builds the stats card of a lichess player.
///
/// Fields, in order: General, Blitz, Bullet, Ultrabullet, Rapid, Classical,
/// Correspondence, Puzzles and Puzzle Storm.
pub fn format_lichess_stats(username: &str, user: &UserPublicData) -> Card {
    let mut card = Card::new(&format!("Stats for {}", username), Accent::LighterGrey);
    card.thumbnail = Some(Logo::Lichess);

    card.fields.push(Field::new(
        "General",
        format_general(user.play_time.as_ref(), user.count.as_ref()),
    ));

    let default_perfs = Perfs::default();
    let perfs = user.perfs.as_ref().unwrap_or(&default_perfs);

    let game_perfs = [
        &perfs.blitz,
        &perfs.bullet,
        &perfs.ultra_bullet,
        &perfs.rapid,
        &perfs.classical,
        &perfs.correspondence,
    ];
    for (label, perf) in GAME_CATEGORIES.iter().zip(game_perfs) {
        card.fields.push(Field::new(
            label,
            format_perf(perf.as_ref(), "Games Played"),
        ));
    }

    card.fields.push(Field::new(
        "Puzzles",
        format_perf(perfs.puzzle.as_ref(), "Puzzles Completed"),
    ));
    card.fields.push(Field::new(
        "Puzzle Storm",
        format_storm(perfs.storm.as_ref()),
    ));

    debug!("lichess card for {}: {:?}", username, card);

    card
}

fn format_general(play_time: Option<&PlayTime>, count: Option<&GameCount>) -> String {
    let (Some(play_time), Some(count)) = (play_time, count) else {
        return NO_DATA.to_owned();
    };

    format!(
        "Total Playtime: {} hours\nTime on TV: {} hours\nTotal # of Games: {}\n{}",
        format_number(round2(play_time.total as f64 / SECONDS_PER_HOUR)),
        format_number(round2(play_time.tv as f64 / SECONDS_PER_HOUR)),
        count.all,
        format_wdl(count.win, count.draw, count.loss)
    )
}

fn format_perf(perf: Option<&GamePerf>, games_label: &str) -> String {
    match perf {
        Some(perf) => format!(
            "Current Rating: {}\n{}: {}",
            perf.rating, games_label, perf.games
        ),
        None => NO_DATA.to_owned(),
    }
}

fn format_storm(storm: Option<&StormPerf>) -> String {
    match storm {
        Some(storm) => format!(
            "Highest Score: {}\nRuns Completed: {}",
            storm.score, storm.runs
        ),
        None => NO_DATA.to_owned(),
    }
}
