//! Bracket and BracketPlayer: one tournament instance of ~30 players.

use serde::{Deserialize, Serialize};

/// A player's placement inside a bracket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BracketPlayer {
    /// In-game player id (e.g. `188EAC641A3EBC7A`).
    pub player_id: String,
    pub name: String,
    #[serde(default)]
    pub real_name: Option<String>,
    pub wave: u32,
    pub rank: u32,
    #[serde(default)]
    pub relic: Option<String>,
}

/// A bracket with its players sorted by rank and its wave statistics precomputed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub bracket_id: String,
    pub players: Vec<BracketPlayer>,
    pub median_wave: f64,
    pub total_waves: u64,
}

impl Bracket {
    /// Sorts players by rank and computes median/total wave.
    pub fn new(bracket_id: impl Into<String>, mut players: Vec<BracketPlayer>) -> Self {
        players.sort_by_key(|p| p.rank);
        let waves: Vec<u32> = players.iter().map(|p| p.wave).collect();
        Self {
            bracket_id: bracket_id.into(),
            median_wave: median(&waves),
            total_waves: waves.iter().map(|&w| w as u64).sum(),
            players,
        }
    }

    /// Wave of the rank-1 player (0 for an empty bracket).
    pub fn winner_wave(&self) -> u32 {
        self.players.first().map(|p| p.wave).unwrap_or(0)
    }

    /// 1-based position of the player in this bracket, if present.
    pub fn position_of(&self, player_id: &str) -> Option<u32> {
        self.players
            .iter()
            .position(|p| p.player_id == player_id)
            .map(|i| i as u32 + 1)
    }
}

/// Median of the values; mean of the two middle values for even counts, 0 when empty.
pub fn median(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    } else {
        sorted[mid] as f64
    }
}

/// Bracket upload body: players arrive unsorted, stats are computed on import.
#[derive(Clone, Debug, Deserialize)]
pub struct BracketInput {
    pub bracket_id: String,
    pub players: Vec<BracketPlayer>,
}

impl From<BracketInput> for Bracket {
    fn from(input: BracketInput) -> Self {
        Bracket::new(input.bracket_id, input.players)
    }
}

/// League names are compared case-insensitively.
pub fn normalize_league(league: &str) -> String {
    league.trim().to_lowercase()
}
