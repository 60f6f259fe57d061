//! Parsers for game text: numbers, times, battle reports, tournament imports.

mod number;
mod stats_text;
mod time;
mod tournament_csv;

pub use number::{format_compact, parse_number, parse_number_or_zero};
pub use stats_text::{column_for_label, parse_stat_value, parse_stats_text};
pub use time::{is_valid_time_format, parse_game_time, GameDuration};
pub use tournament_csv::parse_tournament_csv;
