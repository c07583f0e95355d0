use std::sync::OnceLock;

use super::model::{Table, TitleRow};
use super::rng::{round1, RatingSampler};

// ---------------------------------------------------------------------------
// Embedded catalogue
// ---------------------------------------------------------------------------

/// The built-in titles: (title, type, release_year, rating, listed_in).
const TITLES: [(&str, &str, i32, &str, &str); 10] = [
    ("The Social Dilemma", "Movie", 2020, "PG-13", "Documentaries, Social & Cultural Docs"),
    ("Breaking Bad", "TV Show", 2008, "TV-MA", "Crime TV Shows, Drama"),
    ("Stranger Things", "TV Show", 2016, "TV-14", "Horror, Drama"),
    ("The Crown", "TV Show", 2016, "TV-MA", "Drama, British"),
    ("Our Planet", "TV Show", 2019, "TV-G", "Science & Nature Docs"),
    ("Bridgerton", "TV Show", 2020, "TV-MA", "Romance, Drama"),
    ("The Irishman", "Movie", 2019, "R", "Crime, Drama"),
    ("Black Mirror", "TV Show", 2011, "TV-MA", "Sci-Fi & Fantasy, Drama"),
    ("Narcos", "TV Show", 2015, "TV-MA", "Crime, Thriller"),
    ("The Magic Pencil", "TV Show", 2018, "TV-Y7", "Animated, Comedy"),
];

static CATALOG: OnceLock<Table> = OnceLock::new();

/// The process-wide catalogue, built on first use and shared afterwards.
pub fn load() -> &'static Table {
    CATALOG.get_or_init(|| {
        let table = build();
        log::info!("Built embedded catalogue with {} titles", table.len());
        table
    })
}

/// Build a fresh copy of the embedded catalogue.
pub fn build() -> Table {
    let rows = TITLES
        .iter()
        .map(|&(title, kind, year, rating, listed_in)| {
            TitleRow::new(title, kind, year, rating, listed_in)
        })
        .collect();
    assemble(rows)
}

/// Turn raw rows into a table. Rows without a simulated rating draw the next
/// value of the seeded stream, in row order; supplied ratings are rounded to
/// one decimal.
pub fn assemble(rows: Vec<TitleRow>) -> Table {
    let mut sampler = RatingSampler::default();
    rows.into_iter()
        .map(|row| {
            let rating = match row.simulated_rating {
                Some(value) => round1(value),
                None => sampler.next_rating(),
            };
            row.into_record(rating)
        })
        .collect()
}
