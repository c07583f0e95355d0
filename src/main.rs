use clap::Parser;

use netflix_explorer::cli::{self, Cli};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    cli::run(&Cli::parse())
}
