use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use super::aggregate::LabelCount;
use super::model::Table;
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Write a title table to a file.  Dispatch by extension, mirroring
/// [`super::loader::load_file`].
pub fn save_file(table: &Table, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => save_parquet(table, path),
        "json" => save_json(table, path),
        "csv" => save_csv(table, path),
        other => Err(DataError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("writing {}", path.display()))?;

    log::info!("Wrote {} titles to {}", table.len(), path.display());
    Ok(())
}

fn save_json(table: &Table, path: &Path) -> Result<()> {
    let text = serde_json::to_string_pretty(table).context("serializing JSON")?;
    std::fs::write(path, text).context("writing JSON file")
}

fn save_csv(table: &Table, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    for record in table {
        writer.serialize(record).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")
}

fn save_parquet(table: &Table, path: &Path) -> Result<()> {
    let batch = table_batch(table)?;
    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Arrow projections
// ---------------------------------------------------------------------------

/// The display projection of a table: title, type, release_year, rating,
/// listed_in, simulated_rating.
pub fn table_batch(table: &Table) -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("title", DataType::Utf8, false),
        Field::new("type", DataType::Utf8, false),
        Field::new("release_year", DataType::Int64, false),
        Field::new("rating", DataType::Utf8, false),
        Field::new("listed_in", DataType::Utf8, false),
        Field::new("simulated_rating", DataType::Float64, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(table.iter().map(|r| r.title.as_str()))),
        Arc::new(StringArray::from_iter_values(table.iter().map(|r| r.kind.as_str()))),
        Arc::new(Int64Array::from_iter_values(
            table.iter().map(|r| i64::from(r.release_year)),
        )),
        Arc::new(StringArray::from_iter_values(table.iter().map(|r| r.rating.as_str()))),
        Arc::new(StringArray::from_iter_values(table.iter().map(|r| r.listed_in.as_str()))),
        Arc::new(Float64Array::from_iter_values(
            table.iter().map(|r| r.simulated_rating),
        )),
    ];

    RecordBatch::try_new(schema, columns).context("building title batch")
}

/// A two-column (label, count) chart table.
pub fn label_count_batch(label: &str, rows: &[LabelCount]) -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![
        Field::new(label, DataType::Utf8, false),
        Field::new("count", DataType::UInt64, false),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.label.as_str()))),
        Arc::new(UInt64Array::from_iter_values(
            rows.iter().map(|r| r.count as u64),
        )),
    ];
    RecordBatch::try_new(schema, columns).with_context(|| format!("building {label} batch"))
}
