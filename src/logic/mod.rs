//! Stats business logic: bracket difficulty, league overview, rates, summaries, validation
//! and lab advice.

mod difficulty;
mod lab_advice;
mod league;
mod rates;
mod summary;
mod validation;

pub use difficulty::{
    analyze_bracket_difficulty, BracketComparison, DifficultyAnalysis, DifficultyLabel,
};
pub use lab_advice::{lab_priorities, LabAdvice, LabCategory, LabFocus, LabSpec, LABS};
pub use league::{league_stats, BracketSummary, LeagueStats, WaveRange};
pub use rates::{calculate_rates, calculate_totals, RunRates, RunTotals};
pub use summary::{
    progress, stats_summary, tier_distribution, ProgressMetric, ProgressPoint, StatsSummary,
    TierCount,
};
pub use validation::{
    run_from_report, validate_session_name, validate_submission, Pagination, SubmitRun,
};
