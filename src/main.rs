use anyhow::Result;
use clap::Parser;

mod app;
mod cli;

fn main() -> Result<()> {
    pretty_env_logger::init();

    app::run(cli::Args::parse())?;

    Ok(())
}
