use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::model::{Record, Table};

/// Full range of the rating slider.
pub const RATING_SCALE: Span<f64> = Span { lo: 0.0, hi: 10.0 };

/// Initial rating selection of the dashboard.
pub const DEFAULT_RATING_RANGE: Span<f64> = Span { lo: 4.0, hi: 9.5 };

/// How many genres of the sorted vocabulary start out selected.
pub const DEFAULT_GENRE_COUNT: usize = 4;

// ---------------------------------------------------------------------------
// Span – closed interval
// ---------------------------------------------------------------------------

/// Closed interval `[lo, hi]`. An inverted span (`lo > hi`) contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span<T> {
    pub lo: T,
    pub hi: T,
}

impl<T: PartialOrd + Copy> Span<T> {
    pub fn new(lo: T, hi: T) -> Self {
        Span { lo, hi }
    }

    pub fn contains(&self, value: T) -> bool {
        self.lo <= value && value <= self.hi
    }

    pub fn is_inverted(&self) -> bool {
        self.lo > self.hi
    }
}

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// User-chosen constraints. All four clauses must hold for a record to pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub allowed_types: BTreeSet<String>,
    pub allowed_genres: BTreeSet<String>,
    pub rating_range: Span<f64>,
    pub year_range: Span<i32>,
}

impl FilterCriteria {
    /// Criteria that every record of `table` satisfies.
    pub fn select_all(table: &Table) -> Self {
        FilterCriteria {
            allowed_types: table.type_values().into_iter().collect(),
            allowed_genres: table.genre_vocabulary(),
            rating_range: RATING_SCALE,
            year_range: observed_years(table),
        }
    }

    /// The dashboard's initial widget values: every type, the first few
    /// genres of the sorted vocabulary, a narrowed rating window and the
    /// observed year bounds.
    pub fn dashboard_defaults(table: &Table) -> Self {
        FilterCriteria {
            allowed_types: table.type_values().into_iter().collect(),
            allowed_genres: table
                .genre_vocabulary()
                .into_iter()
                .take(DEFAULT_GENRE_COUNT)
                .collect(),
            rating_range: DEFAULT_RATING_RANGE,
            year_range: observed_years(table),
        }
    }
}

fn observed_years(table: &Table) -> Span<i32> {
    // An empty table has no years; an inverted span keeps it matching nothing.
    let (lo, hi) = table.year_bounds().unwrap_or((1, 0));
    Span::new(lo, hi)
}

/// Whether `record` passes every clause of `criteria`.
///
/// The genre clause is satisfied by any overlap between the record's genre
/// tokens and the allowed set; tokens are compared exactly, never as substrings.
pub fn matches(record: &Record, criteria: &FilterCriteria) -> bool {
    criteria.allowed_types.contains(&record.kind)
        && criteria.year_range.contains(record.release_year)
        && criteria.rating_range.contains(record.simulated_rating)
        && record
            .genres()
            .any(|genre| criteria.allowed_genres.contains(genre))
}

/// Return indices of records that pass the criteria, in table order.
pub fn filtered_indices(table: &Table, criteria: &FilterCriteria) -> Vec<usize> {
    table
        .iter()
        .enumerate()
        .filter(|(_, record)| matches(record, criteria))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog;

    #[test]
    fn span_bounds_are_inclusive() {
        let span = Span::new(2016, 2019);
        assert!(span.contains(2016));
        assert!(span.contains(2019));
        assert!(!span.contains(2020));

        let point = Span::new(7.1, 7.1);
        assert!(point.contains(7.1));
        assert!(!point.is_inverted());

        let inverted = Span::new(9.0, 4.0);
        assert!(inverted.is_inverted());
        assert!(!inverted.contains(5.0));
        assert!(!inverted.contains(9.0));
    }

    #[test]
    fn genre_match_is_exact_token() {
        let table = catalog::build();
        let mut criteria = FilterCriteria::select_all(&table);
        criteria.allowed_genres = ["Docs".to_string()].into();
        assert!(filtered_indices(&table, &criteria).is_empty());

        criteria.allowed_genres = ["Crime".to_string()].into();
        let titles: Vec<&str> = filtered_indices(&table, &criteria)
            .into_iter()
            .map(|i| table[i].title.as_str())
            .collect();
        // "Crime TV Shows" is a different token.
        assert_eq!(titles, vec!["The Irishman", "Narcos"]);
    }

    #[test]
    fn empty_selections_match_nothing() {
        let table = catalog::build();
        let mut criteria = FilterCriteria::select_all(&table);
        criteria.allowed_types.clear();
        assert!(filtered_indices(&table, &criteria).is_empty());

        let mut criteria = FilterCriteria::select_all(&table);
        criteria.allowed_genres.clear();
        assert!(filtered_indices(&table, &criteria).is_empty());
    }

    #[test]
    fn dashboard_defaults_follow_the_widgets() {
        let table = catalog::build();
        let criteria = FilterCriteria::dashboard_defaults(&table);
        let genres: Vec<&str> = criteria.allowed_genres.iter().map(String::as_str).collect();
        assert_eq!(genres, vec!["Animated", "British", "Comedy", "Crime"]);
        assert_eq!(criteria.rating_range, Span::new(4.0, 9.5));
        assert_eq!(criteria.year_range, Span::new(2008, 2020));
        assert_eq!(criteria.allowed_types.len(), 2);
    }

    #[test]
    fn select_all_on_empty_table_matches_nothing() {
        let criteria = FilterCriteria::select_all(&Table::default());
        assert!(criteria.year_range.is_inverted());
        assert!(criteria.allowed_genres.is_empty());
    }
}
