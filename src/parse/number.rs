//! Numeric strings from the game: magnitude suffixes (K, M, B, T, q, Q, ...) and European decimals.

/// Magnitude suffixes, longest first so `Qnd` wins over shorter matches. Case-sensitive.
const SUFFIXES: &[(&str, f64)] = &[
    ("Qnd", 1e48),
    ("Spd", 1e54),
    ("Dd", 1e39),
    ("Td", 1e42),
    ("Qd", 1e45),
    ("Sd", 1e51),
    ("Od", 1e57),
    ("Nd", 1e60),
    ("Uv", 1e66),
    ("Dv", 1e69),
    ("Tv", 1e72),
    ("K", 1e3),
    ("M", 1e6),
    ("B", 1e9),
    ("T", 1e12),
    ("q", 1e15),
    ("Q", 1e18),
    ("s", 1e21),
    ("S", 1e24),
    ("O", 1e27),
    ("N", 1e30),
    ("D", 1e33),
    ("U", 1e36),
    ("V", 1e63),
];

/// Suffixes used when formatting back for display, smallest first.
const DISPLAY_STEPS: &[(&str, f64)] = &[
    ("K", 1e3),
    ("M", 1e6),
    ("B", 1e9),
    ("T", 1e12),
    ("q", 1e15),
    ("Q", 1e18),
    ("s", 1e21),
    ("S", 1e24),
    ("O", 1e27),
    ("N", 1e30),
    ("D", 1e33),
];

/// Parse a game number such as `1.23M`, `217,87`, `$4.5B`, `95%`, or `1.234.567`.
///
/// Returns `None` when the body is empty or not numeric.
pub fn parse_number(input: &str) -> Option<f64> {
    let mut s: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '$')
        .collect();
    if s.ends_with('%') {
        s.pop();
    }
    let (body, multiplier) = split_suffix(&s);
    let normalized = normalize_separators(body)?;
    normalized.parse::<f64>().ok().map(|n| n * multiplier)
}

/// Like `parse_number`, but anything unparseable counts as 0.
pub fn parse_number_or_zero(input: &str) -> f64 {
    parse_number(input).unwrap_or(0.0)
}

fn split_suffix(s: &str) -> (&str, f64) {
    for (suffix, mult) in SUFFIXES {
        if let Some(body) = s.strip_suffix(suffix) {
            return (body, *mult);
        }
    }
    (s, 1.0)
}

/// Rewrite `,`/`.` usage into a plain `f64` literal.
///
/// With both separators present the last one is the decimal point. A repeated separator is
/// digit grouping; a lone one is always the decimal point (`0.125`, `217,87`).
fn normalize_separators(body: &str) -> Option<String> {
    let digits = body.strip_prefix('-').unwrap_or(body);
    if !digits.chars().any(|c| c.is_ascii_digit())
        || !digits.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.')
    {
        return None;
    }
    let negative = digits.len() != body.len();
    let commas = digits.matches(',').count();
    let dots = digits.matches('.').count();

    let (decimal, grouping) = match (commas, dots) {
        (0, 0) => (None, None),
        (1, 0) => (Some(','), None),
        (_, 0) => (None, Some(',')),
        (0, 1) => (Some('.'), None),
        (0, _) => (None, Some('.')),
        _ => {
            let last_comma = digits.rfind(',')?;
            let last_dot = digits.rfind('.')?;
            if last_comma > last_dot {
                (Some(','), Some('.'))
            } else {
                (Some('.'), Some(','))
            }
        }
    };
    if let Some(d) = decimal {
        if digits.matches(d).count() > 1 {
            return None;
        }
    }

    let mut out = String::with_capacity(body.len());
    if negative {
        out.push('-');
    }
    for c in digits.chars() {
        if Some(c) == grouping {
            continue;
        }
        out.push(if Some(c) == decimal { '.' } else { c });
    }
    Some(out)
}

/// Format a number with one magnitude suffix and two decimals (`1.50M`); small values stay plain.
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    let step = DISPLAY_STEPS.iter().rev().find(|(_, mult)| abs >= *mult);
    match step {
        Some((suffix, mult)) => format!("{:.2}{}", value / mult, suffix),
        None if value.fract() == 0.0 => format!("{:.0}", value),
        None => format!("{:.2}", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_suffix_wins() {
        assert_eq!(split_suffix("2Qnd"), ("2", 1e48));
        assert_eq!(split_suffix("2Q"), ("2", 1e18));
        assert_eq!(split_suffix("2"), ("2", 1.0));
    }

    #[test]
    fn rejects_non_numeric_bodies() {
        assert_eq!(normalize_separators("inf"), None);
        assert_eq!(normalize_separators(""), None);
        assert_eq!(normalize_separators(",."), None);
    }

    #[test]
    fn repeated_decimal_is_invalid() {
        assert_eq!(normalize_separators("1.2.3,4,5"), None);
    }
}
