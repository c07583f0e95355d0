use std::collections::BTreeSet;

use netflix_explorer::data::catalog;
use netflix_explorer::{apply, FilterCriteria, FilterOutcome, Span, Table, TitleRow};

fn titles(outcome: &FilterOutcome) -> Vec<&str> {
    outcome.subset.iter().map(|r| r.title.as_str()).collect()
}

fn open_criteria(table: &Table) -> FilterCriteria {
    FilterCriteria {
        allowed_types: ["Movie", "TV Show"].iter().map(|s| s.to_string()).collect(),
        allowed_genres: table.genre_vocabulary(),
        rating_range: Span::new(0.0, 10.0),
        year_range: Span::new(2008, 2020),
    }
}

fn assert_empty(outcome: &FilterOutcome) {
    assert!(outcome.subset.is_empty());
    assert!(outcome.type_counts.is_empty());
    assert!(outcome.top_genres.is_empty());
    assert!(outcome.releases_by_year.is_empty());
}

/// Whether `sub` appears in `table` in the same relative order.
fn is_subsequence(sub: &Table, table: &Table) -> bool {
    let mut rest = table.iter();
    sub.iter().all(|wanted| rest.any(|r| r == wanted))
}

/// A spread of criteria over the embedded table.
fn criteria_grid(table: &Table) -> Vec<FilterCriteria> {
    let vocabulary: Vec<String> = table.genre_vocabulary().into_iter().collect();
    let mut grid = Vec::new();
    for types in [vec!["Movie"], vec!["TV Show"], vec!["Movie", "TV Show"]] {
        for genres in [&vocabulary[..3], &vocabulary[3..8], &vocabulary[..]] {
            for (rating_lo, rating_hi) in [(0.0, 10.0), (4.0, 8.0), (7.1, 7.1), (9.0, 5.0)] {
                for (year_lo, year_hi) in [(2008, 2020), (2015, 2019), (2016, 2016), (2020, 2010)] {
                    grid.push(FilterCriteria {
                        allowed_types: types.iter().map(|s| s.to_string()).collect(),
                        allowed_genres: genres.iter().cloned().collect(),
                        rating_range: Span::new(rating_lo, rating_hi),
                        year_range: Span::new(year_lo, year_hi),
                    });
                }
            }
        }
    }
    grid
}

#[test]
fn everything_selected_returns_the_whole_catalogue() {
    let table = catalog::load();
    let outcome = apply(table, &open_criteria(table));

    assert_eq!(outcome.subset, *table);
    assert_eq!(outcome.type_count("TV Show"), Some(8));
    assert_eq!(outcome.type_count("Movie"), Some(2));
    assert_eq!(outcome.type_counts.len(), 2);

    let top: Vec<(&str, usize)> = outcome
        .top_genres
        .iter()
        .map(|e| (e.label.as_str(), e.count))
        .collect();
    assert_eq!(
        top,
        vec![
            ("Drama", 6),
            ("Crime", 2),
            ("Documentaries", 1),
            ("Social & Cultural Docs", 1),
            ("Crime TV Shows", 1),
        ]
    );

    let years: Vec<(i32, usize)> = outcome.releases_by_year.into_iter().collect();
    assert_eq!(
        years,
        vec![(2008, 1), (2011, 1), (2015, 1), (2016, 2), (2018, 1), (2019, 2), (2020, 2)]
    );
}

#[test]
fn documentaries_matches_exact_token_only() {
    let table = catalog::load();
    let mut criteria = open_criteria(table);
    criteria.allowed_genres = BTreeSet::from(["Documentaries".to_string()]);

    let outcome = apply(table, &criteria);
    assert_eq!(titles(&outcome), vec!["The Social Dilemma"]);
    assert_eq!(outcome.type_count("Movie"), Some(1));
}

#[test]
fn years_outside_the_catalogue_give_empty_results() {
    let table = catalog::load();
    let mut criteria = open_criteria(table);
    criteria.year_range = Span::new(2021, 2022);
    assert_empty(&apply(table, &criteria));
}

#[test]
fn inverted_ranges_give_empty_results() {
    let table = catalog::load();

    let mut criteria = open_criteria(table);
    criteria.rating_range = Span::new(9.5, 3.5);
    assert_empty(&apply(table, &criteria));

    let mut criteria = open_criteria(table);
    criteria.year_range = Span::new(2020, 2008);
    assert_empty(&apply(table, &criteria));
}

#[test]
fn empty_table_is_not_an_error() {
    let table = Table::default();
    assert_empty(&apply(&table, &FilterCriteria::select_all(&table)));
    assert_empty(&apply(&table, &open_criteria(catalog::load())));
}

#[test]
fn degenerate_rating_range_selects_exact_values() {
    let table = catalog::load();
    let mut criteria = open_criteria(table);
    criteria.rating_range = Span::new(7.1, 7.1);
    assert_eq!(titles(&apply(table, &criteria)), vec!["The Crown", "Narcos"]);
}

#[test]
fn malformed_genre_lists_drop_empty_tokens() {
    let rows = vec![
        TitleRow::new("a", "Movie", 2001, "R", " ,Drama,, "),
        TitleRow::new("b", "Movie", 2002, "R", ", ,"),
    ];
    let table = catalog::assemble(rows);
    let criteria = FilterCriteria::select_all(&table);

    assert_eq!(table.genre_vocabulary(), BTreeSet::from(["Drama".to_string()]));
    let outcome = apply(&table, &criteria);
    assert_eq!(titles(&outcome), vec!["a"]);
    assert_eq!(outcome.top_genres.len(), 1);
}

#[test]
fn subset_is_an_ordered_subsequence() {
    let table = catalog::load();
    for criteria in criteria_grid(table) {
        let outcome = apply(table, &criteria);
        assert!(is_subsequence(&outcome.subset, table), "{criteria:?}");
    }
}

#[test]
fn apply_is_idempotent() {
    let table = catalog::load();
    for criteria in criteria_grid(table) {
        assert_eq!(apply(table, &criteria), apply(table, &criteria));
    }
}

#[test]
fn widening_a_range_never_shrinks_the_subset() {
    let table = catalog::load();
    for criteria in criteria_grid(table) {
        let base = apply(table, &criteria).len();

        let mut wider_years = criteria.clone();
        wider_years.year_range = Span::new(criteria.year_range.lo - 1, criteria.year_range.hi + 1);
        assert!(apply(table, &wider_years).len() >= base, "{criteria:?}");

        let mut wider_ratings = criteria.clone();
        wider_ratings.rating_range =
            Span::new(criteria.rating_range.lo - 0.5, criteria.rating_range.hi + 0.5);
        assert!(apply(table, &wider_ratings).len() >= base, "{criteria:?}");
    }
}

#[test]
fn aggregates_are_consistent_with_the_subset() {
    let table = catalog::load();
    for criteria in criteria_grid(table) {
        let outcome = apply(table, &criteria);

        let histogram_total: usize = outcome.type_counts.iter().map(|e| e.count).sum();
        assert_eq!(histogram_total, outcome.len());
        assert!(outcome.type_counts.iter().all(|e| e.count > 0));

        let year_total: usize = outcome.releases_by_year.values().sum();
        assert_eq!(year_total, outcome.len());

        assert!(outcome.top_genres.len() <= 5);
        let mut all_counts = std::collections::HashMap::new();
        for genre in outcome.subset.iter().flat_map(|r| r.genres()) {
            *all_counts.entry(genre.to_string()).or_insert(0usize) += 1;
        }
        let min_listed = outcome.top_genres.iter().map(|e| e.count).min().unwrap_or(0);
        for (genre, count) in &all_counts {
            if !outcome.top_genres.iter().any(|e| &e.label == genre) {
                assert!(*count <= min_listed, "{genre} ({count}) outranks the top list");
            }
        }
        assert!(outcome.top_genres.windows(2).all(|w| w[0].count >= w[1].count));
    }
}
