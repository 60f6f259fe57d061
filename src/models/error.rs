//! StatsError: everything a submission, query, or analysis can reject.

use crate::models::run::RunId;

/// Errors that can occur while parsing, validating, or analyzing stats.
#[derive(Clone, Debug, PartialEq)]
pub enum StatsError {
    /// A required field was absent from a submission.
    MissingField(&'static str),
    /// A field was present but held an unusable value.
    InvalidField { field: String, reason: String },
    /// A game/real time string did not match `1d 2h 3m 4s` style.
    InvalidTimeFormat(String),
    /// Run category outside milestone / tournament / farm.
    InvalidCategory(String),
    /// Progress metric not in the supported list.
    InvalidMetric(String),
    /// Lab focus outside damage / health / economy / all.
    InvalidFocus(String),
    RunNotFound(RunId),
    /// No bracket snapshot has been imported for the league.
    NoBracketData,
    /// Player id not present in any bracket of the latest snapshot.
    PlayerNotInBrackets(String),
    /// Subreddit name outside `[A-Za-z0-9_]{2,21}`.
    InvalidSubreddit(String),
    /// Nothing parseable in the given text.
    EmptyInput,
    SessionNameTooLong,
}

impl std::fmt::Display for StatsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsError::MissingField(field) => {
                write!(f, "Invalid statistics data - missing required field: {}", field)
            }
            StatsError::InvalidField { field, reason } => {
                write!(f, "Invalid statistics data - {} {}", field, reason)
            }
            StatsError::InvalidTimeFormat(field) => {
                write!(f, "Invalid statistics data - {} has invalid time format", field)
            }
            StatsError::InvalidCategory(c) => write!(
                f,
                "Invalid category '{}'. Must be: milestone, tournament, farm, or empty",
                c
            ),
            StatsError::InvalidMetric(m) => write!(
                f,
                "Invalid metric '{}'. Valid options are: {}",
                m,
                crate::logic::ProgressMetric::NAMES.join(", ")
            ),
            StatsError::InvalidFocus(focus) => write!(
                f,
                "Invalid focus '{}'. Valid options are: damage, health, economy, all",
                focus
            ),
            StatsError::RunNotFound(_) => write!(f, "Run not found"),
            StatsError::NoBracketData => write!(f, "No tournament data available for this league"),
            StatsError::PlayerNotInBrackets(id) => {
                write!(f, "Player {} not found in the latest tournament", id)
            }
            StatsError::InvalidSubreddit(name) => write!(f, "Invalid subreddit name '{}'", name),
            StatsError::EmptyInput => write!(f, "No statistics found in the provided text"),
            StatsError::SessionNameTooLong => {
                write!(f, "Session name must be 100 characters or less")
            }
        }
    }
}

impl std::error::Error for StatsError {}
