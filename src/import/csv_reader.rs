use serde::Deserialize;
use std::path::Path;
use validator::Validate;

use crate::calendar;
use crate::error::{ClimateError, Result};
use crate::models::{Measurement, Station};

/// `hawaii_measurements.csv` layout: station,date,prcp,tobs
#[derive(Debug, Deserialize)]
struct MeasurementCsvRow {
    station: String,
    date: String,
    prcp: Option<f64>,
    tobs: Option<f64>,
}

pub struct CsvReader {
    skip_invalid: bool,
}

impl Default for CsvReader {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvReader {
    pub fn new() -> Self {
        Self {
            skip_invalid: false,
        }
    }

    /// Drop rows that fail validation instead of aborting the whole file.
    pub fn with_skip_invalid(skip_invalid: bool) -> Self {
        Self { skip_invalid }
    }

    /// Read station metadata (station,name,latitude,longitude,elevation).
    pub fn read_stations(&self, path: &Path) -> Result<Vec<Station>> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut stations = Vec::new();

        for (line, row) in reader.deserialize::<Station>().enumerate() {
            let station = row?;
            match station.validate() {
                Ok(()) => stations.push(station),
                Err(e) if self.skip_invalid => {
                    tracing::warn!("Skipping station on line {}: {}", line + 2, e);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(stations)
    }

    /// Read measurements; every date goes through the calendar validator.
    pub fn read_measurements(&self, path: &Path) -> Result<Vec<Measurement>> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut measurements = Vec::new();

        for (line, row) in reader.deserialize::<MeasurementCsvRow>().enumerate() {
            let row = row?;
            match self.parse_measurement(row) {
                Ok(measurement) => measurements.push(measurement),
                Err(e) if self.skip_invalid => {
                    tracing::warn!("Skipping measurement on line {}: {}", line + 2, e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(measurements)
    }

    fn parse_measurement(&self, row: MeasurementCsvRow) -> Result<Measurement> {
        if row.station.trim().is_empty() {
            return Err(ClimateError::InvalidFormat(format!(
                "Empty station id for date '{}'",
                row.date
            )));
        }
        let date = calendar::validate(row.date.trim())?;
        Ok(Measurement::new(row.station.trim(), date, row.prcp, row.tobs))
    }
}
