use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::filter::{filtered_indices, FilterCriteria};
use super::model::{Record, Table};

/// Maximum number of entries in the top-genre ranking.
pub const TOP_GENRE_LIMIT: usize = 5;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// One (label, count) row of a chart table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

impl LabelCount {
    fn new(label: &str, count: usize) -> Self {
        LabelCount {
            label: label.to_string(),
            count,
        }
    }
}

/// The filtered subset plus everything derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOutcome {
    /// Records that passed, in original table order.
    pub subset: Table,
    /// Titles per type, in order of first appearance in the subset.
    pub type_counts: Vec<LabelCount>,
    /// Most frequent genre tokens, highest count first.
    pub top_genres: Vec<LabelCount>,
    /// Titles per release year, ascending. Years without titles are absent.
    pub releases_by_year: BTreeMap<i32, usize>,
}

impl FilterOutcome {
    /// Number of titles that passed the filters.
    pub fn len(&self) -> usize {
        self.subset.len()
    }

    /// Whether no title passed; an empty outcome is a normal result.
    pub fn is_empty(&self) -> bool {
        self.subset.is_empty()
    }

    /// Count for a single type, `None` when no title of that type passed.
    pub fn type_count(&self, kind: &str) -> Option<usize> {
        self.type_counts
            .iter()
            .find(|entry| entry.label == kind)
            .map(|entry| entry.count)
    }
}

// ---------------------------------------------------------------------------
// Engine entry-point
// ---------------------------------------------------------------------------

/// Filter `table` with `criteria` and compute the three aggregates over the
/// result. Total: degenerate criteria give an empty outcome, never an error.
pub fn apply(table: &Table, criteria: &FilterCriteria) -> FilterOutcome {
    let indices = filtered_indices(table, criteria);
    let subset = table.select(&indices);

    log::debug!("{} of {} titles pass the filters", subset.len(), table.len());

    FilterOutcome {
        type_counts: type_histogram(subset.records()),
        top_genres: top_genres(subset.records(), TOP_GENRE_LIMIT),
        releases_by_year: releases_by_year(subset.records()),
        subset,
    }
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Count records per type. Only types present in `records` appear.
pub fn type_histogram(records: &[Record]) -> Vec<LabelCount> {
    count_in_order(records.iter().map(|r| r.kind.as_str()))
}

/// Count genre tokens across `records` (once per token carried, not once per
/// record), sort by count descending with ties in first-seen order, and keep
/// at most `limit` entries.
pub fn top_genres(records: &[Record], limit: usize) -> Vec<LabelCount> {
    let mut counts = count_in_order(records.iter().flat_map(|r| r.genres()));
    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

/// Count records per release year.
pub fn releases_by_year(records: &[Record]) -> BTreeMap<i32, usize> {
    let mut by_year = BTreeMap::new();
    for record in records {
        *by_year.entry(record.release_year).or_insert(0) += 1;
    }
    by_year
}

fn count_in_order<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<LabelCount> {
    let mut counts: Vec<LabelCount> = Vec::new();
    let mut position: HashMap<&'a str, usize> = HashMap::new();
    for label in labels {
        match position.get(label) {
            Some(&i) => counts[i].count += 1,
            None => {
                position.insert(label, counts.len());
                counts.push(LabelCount::new(label, 1));
            }
        }
    }
    counts
}
