//! Validation of JSON run submissions and query parameters.

use crate::models::{Run, RunCategory, RunStats, StatValue, StatsError};
use crate::parse::{is_valid_time_format, parse_number};
use serde::Deserialize;

/// Fields that must be non-negative numbers when present.
const NUMERIC_FIELDS: &[&str] = &[
    "coins_earned",
    "cells_earned",
    "damage_dealt",
    "damage_taken",
    "total_enemies",
    "gems_earned",
    "medals_earned",
];

const TIME_FIELDS: &[&str] = &["game_time", "real_time"];

const MAX_SESSION_NAME_LEN: usize = 100;

/// A run submitted as JSON. Everything besides the named fields lands in `stats`.
#[derive(Clone, Debug, Deserialize)]
pub struct SubmitRun {
    #[serde(default)]
    pub discord_user_id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub session_name: Option<String>,
    #[serde(default)]
    pub tier: Option<f64>,
    #[serde(default)]
    pub wave: Option<f64>,
    #[serde(flatten)]
    pub stats: RunStats,
}

impl SubmitRun {
    /// Validate and turn into a stored run.
    pub fn into_run(self) -> Result<Run, StatsError> {
        validate_submission(&self)?;
        let category = match self.category.as_deref() {
            Some(c) => RunCategory::parse(c)?,
            None => None,
        };
        let tier = whole_number("tier", self.tier)?;
        let wave = whole_number("wave", self.wave)?;
        let mut stats = self.stats;
        // Blank numeric fields are stored as 0, as the report parser does.
        for &field in NUMERIC_FIELDS {
            if let Some(value) = stats.get_mut(field) {
                if matches!(value, StatValue::Text(s) if s.trim().is_empty()) {
                    *value = StatValue::Number(0.0);
                }
            }
        }
        let mut run = Run::new(self.discord_user_id, tier, wave, stats);
        run.category = category;
        run.session_name = self.session_name.filter(|s| !s.trim().is_empty());
        Ok(run)
    }
}

/// Build a run from a parsed battle report; tier and wave are lifted out of the stats.
pub fn run_from_report(
    discord_user_id: Option<String>,
    mut stats: RunStats,
) -> Result<Run, StatsError> {
    let tier = stats.remove("tier").map(|v| v.as_number().trunc());
    let wave = stats.remove("wave").map(|v| v.as_number().trunc());
    let tier = whole_number("tier", tier)?;
    let wave = whole_number("wave", wave)?;
    Ok(Run::new(discord_user_id, tier, wave, stats))
}

fn whole_number(field: &'static str, value: Option<f64>) -> Result<u32, StatsError> {
    let v = value.ok_or(StatsError::MissingField(field))?;
    if !v.is_finite() || v < 0.0 {
        return Err(StatsError::InvalidField {
            field: field.to_string(),
            reason: "must be a non-negative number".to_string(),
        });
    }
    if v.fract() != 0.0 || v > u32::MAX as f64 {
        return Err(StatsError::InvalidField {
            field: field.to_string(),
            reason: "must be a whole number".to_string(),
        });
    }
    Ok(v as u32)
}

pub fn validate_submission(run: &SubmitRun) -> Result<(), StatsError> {
    validate_session_name(run.session_name.as_deref())?;
    whole_number("tier", run.tier)?;
    whole_number("wave", run.wave)?;

    for &field in NUMERIC_FIELDS {
        let value = match run.stats.get(field) {
            Some(StatValue::Number(n)) => Some(*n),
            Some(StatValue::Text(s)) if s.trim().is_empty() => Some(0.0),
            Some(StatValue::Text(s)) => parse_number(s),
            None => continue,
        };
        if !value.is_some_and(|v| v >= 0.0) {
            return Err(StatsError::InvalidField {
                field: field.to_string(),
                reason: "must be a non-negative number".to_string(),
            });
        }
    }

    for &field in TIME_FIELDS {
        if let Some(StatValue::Text(s)) = run.stats.get(field) {
            if !s.trim().is_empty() && !is_valid_time_format(s) {
                return Err(StatsError::InvalidTimeFormat(field.to_string()));
            }
        }
    }
    Ok(())
}

/// Session names are optional but capped at 100 characters.
pub fn validate_session_name(name: Option<&str>) -> Result<(), StatsError> {
    match name {
        Some(n) if n.chars().count() > MAX_SESSION_NAME_LEN => Err(StatsError::SessionNameTooLong),
        _ => Ok(()),
    }
}

/// List window for run queries.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pagination {
    pub limit: usize,
    pub offset: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
        }
    }
}

impl Pagination {
    /// Missing limit -> 50, clamped to 1..=1000; missing offset -> 0.
    pub fn clamp(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: limit.unwrap_or(50).clamp(1, 1000) as usize,
            offset: offset.unwrap_or(0).max(0) as usize,
        }
    }
}
