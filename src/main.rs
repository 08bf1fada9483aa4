use anyhow::Context;
use clap::Parser;
use station_climate_api::cli::{run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli).await.context("station-climate-api failed")
}
