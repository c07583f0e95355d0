use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use netflix_explorer::data::{catalog, export};

/// Write the embedded catalogue, simulated ratings included, to disk.
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
struct Args {
    /// Output file; the extension selects the format (parquet, json or csv)
    #[arg(default_value = "sample_titles.parquet")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let table = catalog::build();
    export::save_file(&table, &args.output)?;

    println!("Wrote {} titles to {}", table.len(), args.output.display());
    Ok(())
}
