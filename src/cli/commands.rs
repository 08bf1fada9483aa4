use tracing::{debug, info};

use crate::api;
use crate::cli::args::{Cli, Commands};
use crate::config::{Settings, SettingsOverrides};
use crate::error::Result;
use crate::import::Importer;
use crate::store::SqliteStore;

/// Set up structured logging; `RUST_LOG` wins over `--verbose`.
pub fn setup_logging(verbose: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let log_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("station_climate_api={}", log_level)));

    // A second init (e.g. from tests) is not an error worth failing on.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();

    debug!("Logging initialized at level: {}", log_level);
}

pub async fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Serve {
            bind,
            max_connections,
        } => {
            let settings = Settings::load(
                cli.config.as_deref(),
                SettingsOverrides {
                    database_url: cli.database_url,
                    bind_address: bind,
                    max_connections,
                },
            )?;

            let store =
                SqliteStore::connect(&settings.database_url, settings.max_connections).await?;
            store.verify_schema().await?;

            api::serve(store.clone(), &settings.bind_address).await?;
            store.close().await;
        }

        Commands::Check => {
            let settings = Settings::load(
                cli.config.as_deref(),
                SettingsOverrides {
                    database_url: cli.database_url,
                    ..Default::default()
                },
            )?;

            let store = SqliteStore::connect(&settings.database_url, 1).await?;
            store.verify_schema().await?;
            let counts = store.table_counts().await?;
            store.close().await;

            println!("Schema OK: {}", settings.database_url);
            println!("Stations:     {}", counts.stations);
            println!("Measurements: {}", counts.measurements);
        }

        Commands::Import {
            stations,
            measurements,
            batch_size,
            skip_invalid,
        } => {
            let settings = Settings::load(
                cli.config.as_deref(),
                SettingsOverrides {
                    database_url: cli.database_url,
                    ..Default::default()
                },
            )?;
            info!("Importing into {}", settings.database_url);

            let store = SqliteStore::connect_writable(&settings.database_url).await?;
            let summary = Importer::new()
                .with_batch_size(batch_size)
                .with_skip_invalid(skip_invalid)
                .import(&store, &stations, &measurements)
                .await?;
            store.close().await;

            println!("{}", summary.summary());
        }
    }

    Ok(())
}
