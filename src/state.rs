use crate::data::aggregate::{apply, FilterOutcome};
use crate::data::filter::{FilterCriteria, Span};
use crate::data::model::Table;

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// The dashboard state, independent of rendering. Every interaction replaces
/// part of the criteria and recomputes the outcome from scratch.
pub struct DashboardState<'a> {
    /// Shared, read-only title table.
    pub table: &'a Table,

    /// Current filter selections.
    pub criteria: FilterCriteria,

    /// Subset and aggregates for the current criteria.
    pub outcome: FilterOutcome,
}

impl<'a> DashboardState<'a> {
    /// Start from the dashboard's initial widget values.
    pub fn new(table: &'a Table) -> Self {
        Self::with_criteria(table, FilterCriteria::dashboard_defaults(table))
    }

    pub fn with_criteria(table: &'a Table, criteria: FilterCriteria) -> Self {
        let outcome = apply(table, &criteria);
        Self {
            table,
            criteria,
            outcome,
        }
    }

    /// Recompute the outcome after a criteria change.
    pub fn refilter(&mut self) {
        self.outcome = apply(self.table, &self.criteria);
        log::debug!("{}", self.status_message());
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.refilter();
    }

    /// Toggle a single type in the selection.
    pub fn toggle_type(&mut self, kind: &str) {
        toggle(&mut self.criteria.allowed_types, kind);
        self.refilter();
    }

    /// Toggle a single genre in the selection.
    pub fn toggle_genre(&mut self, genre: &str) {
        toggle(&mut self.criteria.allowed_genres, genre);
        self.refilter();
    }

    /// Select the full genre vocabulary.
    pub fn select_all_genres(&mut self) {
        self.criteria.allowed_genres = self.table.genre_vocabulary();
        self.refilter();
    }

    /// Deselect every genre.
    pub fn select_no_genres(&mut self) {
        self.criteria.allowed_genres.clear();
        self.refilter();
    }

    pub fn set_rating_range(&mut self, lo: f64, hi: f64) {
        self.criteria.rating_range = Span::new(lo, hi);
        self.refilter();
    }

    pub fn set_year_range(&mut self, lo: i32, hi: i32) {
        self.criteria.year_range = Span::new(lo, hi);
        self.refilter();
    }

    /// One-line summary shown above the results.
    pub fn status_message(&self) -> String {
        format!("{} titles found matching your filters.", self.outcome.len())
    }
}

fn toggle(selected: &mut std::collections::BTreeSet<String>, value: &str) {
    if !selected.remove(value) {
        selected.insert(value.to_string());
    }
}
