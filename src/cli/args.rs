use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "station-climate-api")]
#[command(about = "Read-only JSON API over weather station measurements")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(
        short,
        long,
        global = true,
        help = "Settings file [default: ./climate-api.toml if present]"
    )]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Database URL, e.g. sqlite://hawaii.sqlite")]
    pub database_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Verify the database schema and start the HTTP server
    Serve {
        #[arg(short, long, help = "Address to listen on, e.g. 127.0.0.1:5000")]
        bind: Option<String>,

        #[arg(long)]
        max_connections: Option<u32>,
    },

    /// Verify the database schema and report row counts
    Check,

    /// Load station and measurement CSV files into the database
    Import {
        #[arg(short, long, help = "Stations CSV (station,name,latitude,longitude,elevation)")]
        stations: PathBuf,

        #[arg(short, long, help = "Measurements CSV (station,date,prcp,tobs)")]
        measurements: PathBuf,

        #[arg(long, default_value = "1000")]
        batch_size: usize,

        #[arg(long, default_value = "false", help = "Skip rows that fail validation")]
        skip_invalid: bool,
    },
}
