//! Filter and aggregate engine for a small catalogue of streaming titles.
//!
//! The [`data`] layer provides the title table (embedded or file-backed),
//! the filter criteria and the aggregates; [`state`] reruns the engine on
//! every interaction and [`report`] turns outcomes into plain tables.

pub mod cli;
pub mod data;
pub mod error;
pub mod report;
pub mod state;

pub use data::aggregate::{apply, FilterOutcome, LabelCount, TOP_GENRE_LIMIT};
pub use data::filter::{FilterCriteria, Span};
pub use data::model::{Record, Table, TitleRow};
pub use error::DataError;
