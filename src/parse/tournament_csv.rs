//! Tournament-result imports: `date,name,rank,score,tier,wave[,rewards]`, comma- or tab-separated.

use crate::models::TournamentResult;
use csv::{ReaderBuilder, StringRecord, Trim};

/// Parse tournament rows. Malformed rows are skipped (and logged), not fatal.
///
/// The delimiter is chosen per line: a line with a tab is tab-separated, so commas inside
/// its fields (`Gems x 50, Stones x 10`) stay part of the value.
pub fn parse_tournament_csv(content: &str) -> Vec<TournamentResult> {
    let mut results = Vec::new();
    for (line, text) in content.lines().enumerate() {
        if text.trim().is_empty() {
            continue;
        }
        let record = match read_line(text) {
            Some(Ok(r)) => r,
            Some(Err(e)) => {
                log::warn!("Skipping tournament line {}: {}", line + 1, e);
                continue;
            }
            None => continue,
        };
        match row_to_result(&record) {
            Some(r) => results.push(r),
            None => log::warn!("Skipping tournament line {}: {:?}", line + 1, record),
        }
    }
    results
}

fn read_line(text: &str) -> Option<csv::Result<StringRecord>> {
    let delimiter = if text.contains('\t') { b'\t' } else { b',' };
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .delimiter(delimiter)
        .from_reader(text.as_bytes())
        .records()
        .next()
}

fn row_to_result(record: &StringRecord) -> Option<TournamentResult> {
    if record.len() < 6 || record.iter().all(str::is_empty) {
        return None;
    }
    Some(TournamentResult {
        date: record.get(0)?.to_string(),
        name: record.get(1)?.to_string(),
        rank: record.get(2)?.parse().ok()?,
        score: record.get(3)?.parse().ok()?,
        tier: record.get(4)?.parse().ok()?,
        wave: record.get(5)?.parse().ok()?,
        rewards: record.get(6).unwrap_or_default().to_string(),
    })
}
