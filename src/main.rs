mod cli;
mod config;
mod error;
mod forms;
mod model;
mod output;
mod store;
mod views;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    info!("Starting Orkestra");
    cli.execute()?;

    Ok(())
}
