//! Loads station and measurement CSV exports into a SQLite database laid out
//! the way the query layer expects. Used for local setup and tests; the HTTP
//! service itself never writes.

pub mod csv_reader;

use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::store::SqliteStore;
use crate::utils::constants::DEFAULT_IMPORT_BATCH_SIZE;
use crate::utils::progress::ProgressReporter;

pub use csv_reader::CsvReader;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub stations: u64,
    pub measurements: u64,
}

impl ImportSummary {
    pub fn summary(&self) -> String {
        format!(
            "Imported {} new stations and {} new measurements",
            self.stations, self.measurements
        )
    }
}

pub struct Importer {
    reader: CsvReader,
    batch_size: usize,
    silent: bool,
}

impl Default for Importer {
    fn default() -> Self {
        Self::new()
    }
}

impl Importer {
    pub fn new() -> Self {
        Self {
            reader: CsvReader::new(),
            batch_size: DEFAULT_IMPORT_BATCH_SIZE,
            silent: false,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_skip_invalid(mut self, skip_invalid: bool) -> Self {
        self.reader = CsvReader::with_skip_invalid(skip_invalid);
        self
    }

    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Read and validate both files, then write them in a single
    /// transaction. Rows already in the database are left alone, so running
    /// the same import twice adds nothing the second time.
    pub async fn import(
        &self,
        store: &SqliteStore,
        stations_csv: &Path,
        measurements_csv: &Path,
    ) -> Result<ImportSummary> {
        let reading = ProgressReporter::new_spinner("Reading stations...", self.silent);
        let stations = self.reader.read_stations(stations_csv)?;
        info!("Read {} stations from {}", stations.len(), stations_csv.display());

        reading.set_message("Reading measurements...");
        let measurements = self.reader.read_measurements(measurements_csv)?;
        reading.finish_with_message("CSV files read");
        info!(
            "Read {} measurements from {}",
            measurements.len(),
            measurements_csv.display()
        );

        let progress = ProgressReporter::new(
            measurements.len() as u64,
            "Importing measurements...",
            self.silent,
        );
        let inserted = store
            .import_rows(&stations, &measurements, self.batch_size, |n| {
                progress.increment(n as u64)
            })
            .await?;

        let summary = ImportSummary {
            stations: inserted.stations,
            measurements: inserted.measurements,
        };
        progress.finish_with_message(&summary.summary());
        info!("{}", summary.summary());
        Ok(summary)
    }
}
