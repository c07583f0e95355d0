use std::path::Path;

use anyhow::{Context, Result};
use arrow::util::pretty::pretty_format_batches;
use serde_json::{json, Value as JsonValue};

use crate::data::aggregate::{FilterOutcome, LabelCount};
use crate::data::export::{label_count_batch, save_file, table_batch};

// ---------------------------------------------------------------------------
// Chart tables handed to the display side
// ---------------------------------------------------------------------------

/// Releases per year as (label, count) rows, oldest year first.
pub fn year_rows(outcome: &FilterOutcome) -> Vec<LabelCount> {
    outcome
        .releases_by_year
        .iter()
        .map(|(year, &count)| LabelCount {
            label: year.to_string(),
            count,
        })
        .collect()
}

/// Fixed-width text: the title table followed by the three chart tables.
pub fn render_text(outcome: &FilterOutcome, status: &str) -> Result<String> {
    let mut out = format!("{status}\n\n");
    if outcome.is_empty() {
        return Ok(out);
    }

    out.push_str("Filtered titles\n");
    out.push_str(&pretty_format_batches(&[table_batch(&outcome.subset)?])?.to_string());

    let charts = [
        ("Content type distribution", "type", outcome.type_counts.clone()),
        ("Top genres", "genre", outcome.top_genres.clone()),
        ("Releases over the years", "release_year", year_rows(outcome)),
    ];
    for (heading, label, rows) in charts {
        let batch = label_count_batch(label, &rows)?;
        out.push_str(&format!("\n\n{heading}\n"));
        out.push_str(&pretty_format_batches(&[batch])?.to_string());
    }
    out.push('\n');
    Ok(out)
}

/// JSON document with the subset and the three chart tables.
pub fn to_json(outcome: &FilterOutcome, status: &str) -> JsonValue {
    json!({
        "status": status,
        "count": outcome.len(),
        "titles": outcome.subset,
        "type_counts": outcome.type_counts,
        "top_genres": outcome.top_genres,
        "releases_by_year": year_rows(outcome),
    })
}

/// Write `titles.csv` plus one CSV per chart table into `dir`.
pub fn export_dir(outcome: &FilterOutcome, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating export directory {}", dir.display()))?;

    save_file(&outcome.subset, &dir.join("titles.csv"))?;
    write_label_counts(&dir.join("type_counts.csv"), "type", &outcome.type_counts)?;
    write_label_counts(&dir.join("top_genres.csv"), "genre", &outcome.top_genres)?;
    write_label_counts(
        &dir.join("releases_by_year.csv"),
        "release_year",
        &year_rows(outcome),
    )?;

    log::info!("Exported filtered titles and chart tables to {}", dir.display());
    Ok(())
}

fn write_label_counts(path: &Path, label: &str, rows: &[LabelCount]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record([label, "count"])?;
    for row in rows {
        writer.write_record([row.label.as_str(), row.count.to_string().as_str()])?;
    }
    writer.flush()?;
    Ok(())
}
