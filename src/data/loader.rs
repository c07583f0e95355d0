use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::catalog::assemble;
use super::model::{Table, TitleRow};
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a title table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – columns `title`, `type`, `release_year`, `rating`, `listed_in`
/// * `.json`    – `[{ "title": ..., "type": ..., "release_year": ..., ... }, ...]`
/// * `.csv`     – header row with the same column names
///
/// `simulated_rating` is optional everywhere; missing values are drawn from
/// the seeded rating stream.
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => Err(DataError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!("Loaded {} titles from {}", rows.len(), path.display());
    Ok(assemble(rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "title": "Narcos", "type": "TV Show", "release_year": 2015,
///     "rating": "TV-MA", "listed_in": "Crime, Thriller" },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<TitleRow>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    serde_json::from_str(&text).context("parsing JSON")
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<TitleRow>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    reader
        .deserialize::<TitleRow>()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {row_no}")))
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Works with files written by **Pandas** (`df.to_parquet()`), **Polars**
/// and [`super::export::save_file`].
fn load_parquet(path: &Path) -> Result<Vec<TitleRow>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let offset = rows.len();
        rows.extend(rows_from_batch(&batch, offset)?);
    }
    Ok(rows)
}

fn rows_from_batch(batch: &RecordBatch, offset: usize) -> Result<Vec<TitleRow>> {
    let titles = string_values(required(batch, "title")?, "title")?;
    let kinds = string_values(required(batch, "type")?, "type")?;
    let years = int_values(required(batch, "release_year")?, "release_year")?;
    let ratings = string_values(required(batch, "rating")?, "rating")?;
    let genres = string_values(required(batch, "listed_in")?, "listed_in")?;
    let simulated = match batch.column_by_name("simulated_rating") {
        Some(col) => float_values(col, "simulated_rating")?,
        None => vec![None; batch.num_rows()],
    };

    (0..batch.num_rows())
        .map(|i| -> Result<TitleRow> {
            let row = offset + i;
            let year = not_null(years[i], row, "release_year")?;
            Ok(TitleRow {
                title: not_null(titles[i].clone(), row, "title")?,
                kind: not_null(kinds[i].clone(), row, "type")?,
                release_year: i32::try_from(year)
                    .map_err(|_| DataError::YearOutOfRange { row, value: year })?,
                rating: not_null(ratings[i].clone(), row, "rating")?,
                listed_in: not_null(genres[i].clone(), row, "listed_in")?,
                simulated_rating: simulated[i],
            })
        })
        .collect()
}

// -- Parquet / Arrow helpers --

fn required<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    batch
        .column_by_name(name)
        .ok_or_else(|| DataError::MissingColumn(name.to_string()).into())
}

fn not_null<T>(value: Option<T>, row: usize, column: &str) -> Result<T> {
    value.ok_or_else(|| {
        DataError::NullValue {
            row,
            column: column.to_string(),
        }
        .into()
    })
}

fn unsupported(col: &ArrayRef, column: &str) -> anyhow::Error {
    DataError::ColumnType {
        column: column.to_string(),
        data_type: format!("{:?}", col.data_type()),
    }
    .into()
}

fn string_values(col: &ArrayRef, column: &str) -> Result<Vec<Option<String>>> {
    let values = match col.data_type() {
        DataType::Utf8 => col
            .as_string::<i32>()
            .iter()
            .map(|v| v.map(str::to_string))
            .collect(),
        DataType::LargeUtf8 => col
            .as_string::<i64>()
            .iter()
            .map(|v| v.map(str::to_string))
            .collect(),
        _ => return Err(unsupported(col, column)),
    };
    Ok(values)
}

fn int_values(col: &ArrayRef, column: &str) -> Result<Vec<Option<i64>>> {
    let values = match col.data_type() {
        DataType::Int32 => col
            .as_primitive::<Int32Type>()
            .iter()
            .map(|v| v.map(i64::from))
            .collect(),
        DataType::Int64 => col.as_primitive::<Int64Type>().iter().collect(),
        _ => return Err(unsupported(col, column)),
    };
    Ok(values)
}

fn float_values(col: &ArrayRef, column: &str) -> Result<Vec<Option<f64>>> {
    let values = match col.data_type() {
        DataType::Float32 => col
            .as_primitive::<Float32Type>()
            .iter()
            .map(|v| v.map(f64::from))
            .collect(),
        DataType::Float64 => col.as_primitive::<Float64Type>().iter().collect(),
        _ => return Err(unsupported(col, column)),
    };
    Ok(values)
}
