//! League overview across all brackets of the latest tournament.

use crate::models::{Bracket, StatsError};
use serde::{Deserialize, Serialize};

const TOP_N: usize = 5;

/// Min / max / rounded average of a series of waves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveRange {
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

impl WaveRange {
    fn of(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let average = (values.iter().sum::<f64>() / values.len() as f64).round();
        Self { min, max, average }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BracketSummary {
    pub bracket_id: String,
    pub total_waves: u64,
    pub median_wave: f64,
    pub winner_wave: u32,
}

impl From<&Bracket> for BracketSummary {
    fn from(b: &Bracket) -> Self {
        Self {
            bracket_id: b.bracket_id.clone(),
            total_waves: b.total_waves,
            median_wave: b.median_wave,
            winner_wave: b.winner_wave(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeagueStats {
    pub total_brackets: usize,
    pub total_players: usize,
    pub wave_stats: WaveRange,
    pub winner_stats: WaveRange,
    pub median_stats: WaveRange,
    /// Highest total waves first.
    pub hardest_brackets: Vec<BracketSummary>,
    /// Lowest total waves first.
    pub easiest_brackets: Vec<BracketSummary>,
}

pub fn league_stats(brackets: &[Bracket]) -> Result<LeagueStats, StatsError> {
    if brackets.is_empty() {
        return Err(StatsError::NoBracketData);
    }
    let all_waves: Vec<f64> = brackets
        .iter()
        .flat_map(|b| b.players.iter().map(|p| p.wave as f64))
        .collect();
    let winner_waves: Vec<f64> = brackets.iter().map(|b| b.winner_wave() as f64).collect();
    let median_waves: Vec<f64> = brackets.iter().map(|b| b.median_wave).collect();

    let mut by_total: Vec<&Bracket> = brackets.iter().collect();
    by_total.sort_by_key(|b| b.total_waves);

    Ok(LeagueStats {
        total_brackets: brackets.len(),
        total_players: brackets.iter().map(|b| b.players.len()).sum(),
        wave_stats: WaveRange::of(&all_waves),
        winner_stats: WaveRange::of(&winner_waves),
        median_stats: WaveRange::of(&median_waves),
        hardest_brackets: by_total.iter().rev().take(TOP_N).map(|b| (*b).into()).collect(),
        easiest_brackets: by_total.iter().take(TOP_N).map(|b| (*b).into()).collect(),
    })
}
