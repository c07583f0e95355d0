use std::collections::BTreeSet;
use std::ops::Index;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Record – one title
// ---------------------------------------------------------------------------

/// One title of the catalogue (one row of the table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub title: String,
    /// Content category, e.g. "Movie" or "TV Show". Open set.
    #[serde(rename = "type")]
    pub kind: String,
    pub release_year: i32,
    /// Content rating, e.g. "PG-13" or "TV-MA".
    pub rating: String,
    /// Comma-separated genre list as stored in the source data.
    pub listed_in: String,
    /// Seeded pseudo-random score in [3.5, 9.5], one decimal.
    pub simulated_rating: f64,
}

impl Record {
    /// Genre tokens in declaration order: split on `,`, trimmed, empty tokens dropped.
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        genre_tokens(&self.listed_in)
    }
}

/// Tokenize a delimited genre list.
pub fn genre_tokens(listed_in: &str) -> impl Iterator<Item = &str> {
    listed_in
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

// ---------------------------------------------------------------------------
// TitleRow – a record as it arrives from a data source
// ---------------------------------------------------------------------------

/// A raw row before the simulated rating has been attached.
/// Sources that already carry a rating keep it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TitleRow {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub release_year: i32,
    pub rating: String,
    pub listed_in: String,
    #[serde(default)]
    pub simulated_rating: Option<f64>,
}

impl TitleRow {
    pub fn new(title: &str, kind: &str, release_year: i32, rating: &str, listed_in: &str) -> Self {
        TitleRow {
            title: title.to_string(),
            kind: kind.to_string(),
            release_year,
            rating: rating.to_string(),
            listed_in: listed_in.to_string(),
            simulated_rating: None,
        }
    }

    /// Attach the simulated rating and produce the final record.
    pub fn into_record(self, simulated_rating: f64) -> Record {
        Record {
            title: self.title,
            kind: self.kind,
            release_year: self.release_year,
            rating: self.rating,
            listed_in: self.listed_in,
            simulated_rating,
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the immutable collection of records
// ---------------------------------------------------------------------------

/// Ordered collection of records. Insertion order is preserved everywhere.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    pub fn new(records: Vec<Record>) -> Self {
        Table { records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Copy out the records at `indices`, in the order given.
    pub fn select(&self, indices: &[usize]) -> Table {
        Table {
            records: indices
                .iter()
                .filter_map(|&i| self.records.get(i).cloned())
                .collect(),
        }
    }

    /// Distinct `type` values in order of first appearance.
    pub fn type_values(&self) -> Vec<String> {
        let mut values: Vec<String> = Vec::new();
        for record in &self.records {
            if !values.contains(&record.kind) {
                values.push(record.kind.clone());
            }
        }
        values
    }

    /// Union of all genre tokens, sorted.
    pub fn genre_vocabulary(&self) -> BTreeSet<String> {
        self.records
            .iter()
            .flat_map(|r| r.genres())
            .map(str::to_string)
            .collect()
    }

    /// Smallest and largest release year, `None` for an empty table.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let min = self.records.iter().map(|r| r.release_year).min()?;
        let max = self.records.iter().map(|r| r.release_year).max()?;
        Some((min, max))
    }
}

impl Index<usize> for Table {
    type Output = Record;

    fn index(&self, index: usize) -> &Record {
        &self.records[index]
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<Record> for Table {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Table {
            records: iter.into_iter().collect(),
        }
    }
}
