//! Data structures for tower stats: runs, brackets, labs, and errors.

mod bracket;
mod error;
mod labs;
mod run;

pub use bracket::{median, normalize_league, Bracket, BracketInput, BracketPlayer};
pub use error::StatsError;
pub use labs::{UserLabs, MAX_LAB_LEVEL};
pub use run::{Run, RunCategory, RunId, RunStats, StatValue, TournamentResult};
