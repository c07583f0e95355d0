use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::data::filter::{FilterCriteria, Span};
use crate::data::model::Table;
use crate::data::{catalog, loader};
use crate::report;
use crate::state::DashboardState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "netflix-explorer",
    about = "Filter a catalogue of titles by type, genre, rating and year"
)]
pub struct Cli {
    /// Title table to load (parquet, json or csv). Defaults to the embedded catalogue.
    #[arg(long, env = "NETFLIX_EXPLORER_DATA")]
    pub data: Option<PathBuf>,

    /// Allowed content type (repeatable). Defaults to every type.
    #[arg(long = "type", value_name = "TYPE")]
    pub types: Vec<String>,

    /// Allowed genre (repeatable). Defaults to the first four genres.
    #[arg(long = "genre", value_name = "GENRE", conflicts_with = "all_genres")]
    pub genres: Vec<String>,

    /// Allow every genre in the table.
    #[arg(long)]
    pub all_genres: bool,

    #[arg(long)]
    pub min_rating: Option<f64>,

    #[arg(long)]
    pub max_rating: Option<f64>,

    #[arg(long)]
    pub from_year: Option<i32>,

    #[arg(long)]
    pub to_year: Option<i32>,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Also write titles and chart tables as CSV files into this directory
    #[arg(long, value_name = "DIR")]
    pub export: Option<PathBuf>,
}

impl Cli {
    /// Criteria from the dashboard defaults, overridden by any flag given.
    pub fn criteria(&self, table: &Table) -> FilterCriteria {
        let mut criteria = FilterCriteria::dashboard_defaults(table);

        if !self.types.is_empty() {
            criteria.allowed_types = self.types.iter().cloned().collect();
        }
        if self.all_genres {
            criteria.allowed_genres = table.genre_vocabulary();
        } else if !self.genres.is_empty() {
            criteria.allowed_genres = self.genres.iter().cloned().collect();
        }

        let rating = criteria.rating_range;
        criteria.rating_range = Span::new(
            self.min_rating.unwrap_or(rating.lo),
            self.max_rating.unwrap_or(rating.hi),
        );
        let years = criteria.year_range;
        criteria.year_range = Span::new(
            self.from_year.unwrap_or(years.lo),
            self.to_year.unwrap_or(years.hi),
        );

        if criteria.rating_range.is_inverted() || criteria.year_range.is_inverted() {
            log::warn!("Inverted range selected; no titles can match");
        }
        criteria
    }
}

/// Load the table, apply the criteria and print or export the outcome.
pub fn run(args: &Cli) -> Result<()> {
    let loaded;
    let table: &Table = match &args.data {
        Some(path) => {
            loaded = loader::load_file(path)?;
            &loaded
        }
        None => catalog::load(),
    };

    let state = DashboardState::with_criteria(table, args.criteria(table));
    let status = state.status_message();
    log::info!("{status}");

    match args.format {
        OutputFormat::Text => print!("{}", report::render_text(&state.outcome, &status)?),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report::to_json(&state.outcome, &status))?
        ),
    }

    if let Some(dir) = &args.export {
        report::export_dir(&state.outcome, dir)?;
    }
    Ok(())
}
