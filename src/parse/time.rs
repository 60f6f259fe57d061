//! Game-time strings such as `2d 14h 15m 14s` or `14h 38m 50s Real Time`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A parsed game/real time, stored as whole seconds.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct GameDuration(pub u64);

impl GameDuration {
    pub fn seconds(self) -> u64 {
        self.0
    }

    pub fn hours(self) -> f64 {
        self.0 as f64 / 3600.0
    }
}

impl std::fmt::Display for GameDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (d, rem) = (self.0 / 86_400, self.0 % 86_400);
        let (h, rem) = (rem / 3600, rem % 3600);
        let (m, s) = (rem / 60, rem % 60);
        let parts: Vec<String> = [(d, 'd'), (h, 'h'), (m, 'm'), (s, 's')]
            .iter()
            .filter(|(n, _)| *n > 0)
            .map(|(n, unit)| format!("{}{}", n, unit))
            .collect();
        if parts.is_empty() {
            write!(f, "0s")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\s*([dhms])").expect("valid time token regex"))
}

fn trailing_label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\s+(real time|tier|game time).*$").expect("valid trailing label regex")
    })
}

fn strict_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+[dhms]\s*)+$").expect("valid strict time regex"))
}

/// Parse any subset of `Nd Nh Nm Ns` tokens. Trailing labels like `Real Time` are ignored.
///
/// Returns `None` when no token is found.
pub fn parse_game_time(input: &str) -> Option<GameDuration> {
    let cleaned = trailing_label_re().replace(input.trim(), "");
    let mut total: u64 = 0;
    let mut found = false;
    for cap in token_re().captures_iter(&cleaned) {
        let n: u64 = cap[1].parse().ok()?;
        let unit = match &cap[2] {
            "d" => 86_400,
            "h" => 3600,
            "m" => 60,
            _ => 1,
        };
        total = total.saturating_add(n.saturating_mul(unit));
        found = true;
    }
    found.then_some(GameDuration(total))
}

/// Whole-string check used by submission validation (`1h 30m`, `45m 12s`, ...).
pub fn is_valid_time_format(input: &str) -> bool {
    strict_re().is_match(input.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_skips_zero_units() {
        assert_eq!(GameDuration(0).to_string(), "0s");
        assert_eq!(GameDuration(86_400 + 5).to_string(), "1d 5s");
        assert_eq!(GameDuration(3600 * 14 + 60 * 38 + 50).to_string(), "14h 38m 50s");
    }
}
