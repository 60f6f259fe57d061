//! Bracket difficulty: where would this wave have placed in every other bracket of the tournament?

use crate::models::{Bracket, StatsError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Brackets listed in the easiest/hardest sections of an analysis.
const TOP_N: usize = 5;

/// How the player's wave would have ranked in one bracket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BracketComparison {
    pub bracket_id: String,
    pub hypothetical_rank: u32,
    pub median_wave: f64,
    pub total_waves: u64,
    pub winner_wave: u32,
}

/// Difficulty label for the player's own bracket relative to the rest.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum DifficultyLabel {
    #[serde(rename = "Very Easy")]
    VeryEasy,
    Easy,
    Medium,
    Hard,
    #[serde(rename = "Very Hard")]
    VeryHard,
}

impl DifficultyLabel {
    /// Score buckets of 20 points; a high score means other brackets would have been worse.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            DifficultyLabel::VeryEasy
        } else if score >= 60.0 {
            DifficultyLabel::Easy
        } else if score >= 40.0 {
            DifficultyLabel::Medium
        } else if score >= 20.0 {
            DifficultyLabel::Hard
        } else {
            DifficultyLabel::VeryHard
        }
    }
}

/// Full difficulty analysis for one player's tournament result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyAnalysis {
    pub player_id: String,
    pub player_wave: u32,
    /// 1-based position in the player's own bracket (1 when the player isn't found).
    pub actual_rank: u32,
    pub actual_bracket_id: Option<String>,
    pub total_brackets_analyzed: usize,
    pub best_possible_rank: u32,
    pub worst_possible_rank: u32,
    pub average_rank: f64,
    /// 0-100: share of brackets where the player would have ranked worse than they did.
    pub difficulty_score: f64,
    pub difficulty_label: DifficultyLabel,
    /// Hypothetical rank -> number of brackets.
    pub rank_distribution: BTreeMap<u32, u32>,
    pub easiest_brackets: Vec<BracketComparison>,
    pub hardest_brackets: Vec<BracketComparison>,
    /// Share of bracket winners whose wave is below the player's.
    pub percentile_better_than_winners: f64,
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Rank the player's wave against every bracket and score their own bracket's difficulty.
pub fn analyze_bracket_difficulty(
    player_id: &str,
    player_wave: u32,
    brackets: &[Bracket],
) -> Result<DifficultyAnalysis, StatsError> {
    if brackets.is_empty() {
        return Err(StatsError::NoBracketData);
    }

    let mut rankings: Vec<BracketComparison> = brackets
        .iter()
        .map(|b| BracketComparison {
            bracket_id: b.bracket_id.clone(),
            hypothetical_rank: b.players.iter().filter(|p| p.wave > player_wave).count() as u32 + 1,
            median_wave: b.median_wave,
            total_waves: b.total_waves,
            winner_wave: b.winner_wave(),
        })
        .collect();
    rankings.sort_by_key(|r| r.hypothetical_rank);

    let count = rankings.len();
    let best_possible_rank = rankings[0].hypothetical_rank;
    let worst_possible_rank = rankings[count - 1].hypothetical_rank;
    let rank_sum: u64 = rankings.iter().map(|r| r.hypothetical_rank as u64).sum();
    let average_rank = round_to(rank_sum as f64 / count as f64, 1);

    let mut rank_distribution = BTreeMap::new();
    for r in &rankings {
        *rank_distribution.entry(r.hypothetical_rank).or_insert(0) += 1;
    }

    let actual = brackets
        .iter()
        .find_map(|b| b.position_of(player_id).map(|pos| (b.bracket_id.clone(), pos)));
    let (actual_bracket_id, actual_rank) = match actual {
        Some((id, pos)) => (Some(id), pos),
        None => (None, 1),
    };

    let would_do_worse = rankings
        .iter()
        .filter(|r| r.hypothetical_rank > actual_rank)
        .count();
    let raw_score = would_do_worse as f64 / count as f64 * 100.0;

    let winners_below = brackets
        .iter()
        .filter(|b| b.winner_wave() < player_wave)
        .count();

    let easiest_brackets = rankings.iter().take(TOP_N).cloned().collect();
    let hardest_brackets = rankings.iter().rev().take(TOP_N).cloned().collect();

    Ok(DifficultyAnalysis {
        player_id: player_id.to_string(),
        player_wave,
        actual_rank,
        actual_bracket_id,
        total_brackets_analyzed: count,
        best_possible_rank,
        worst_possible_rank,
        average_rank,
        difficulty_score: round_to(raw_score, 1),
        difficulty_label: DifficultyLabel::from_score(raw_score),
        rank_distribution,
        easiest_brackets,
        hardest_brackets,
        percentile_better_than_winners: round_to(winners_below as f64 / count as f64 * 100.0, 1),
    })
}
