//! Ranking and percentage normalization over aggregated language totals.

use indexmap::IndexMap;

/// One language retained for rendering, with its share of the truncated total.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedLanguage {
    pub name: String,
    pub bytes: u64,
    pub percent: f64,
}

/// Sort totals by byte count descending, keep the top `count`, and compute
/// each entry's percentage of the retained subset's total.
///
/// The sort is stable, so languages with equal byte counts keep the order in
/// which they were first seen during aggregation. Percentages therefore sum
/// to 100.0 (within rounding) over the rendered bars, even though the bars
/// cover only a subset of the account's languages.
pub fn rank(totals: &IndexMap<String, u64>, count: usize) -> Vec<RankedLanguage> {
    let mut entries: Vec<(&String, u64)> = totals.iter().map(|(k, v)| (k, *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(count);

    let total: u64 = entries.iter().map(|(_, bytes)| bytes).sum();
    if total == 0 {
        return Vec::new();
    }

    entries
        .into_iter()
        .map(|(name, bytes)| RankedLanguage {
            name: name.clone(),
            bytes,
            percent: round1(bytes as f64 / total as f64 * 100.0),
        })
        .collect()
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
