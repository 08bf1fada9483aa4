//! Read-only access to measurement and station data.
//!
//! The query core never talks to a database directly; it is handed a
//! [`MeasurementStore`] for the duration of one request. [`SqliteStore`]
//! backs the running service and [`MemoryStore`] backs tests and fixtures.

pub mod memory;
pub mod sqlite;

use std::future::Future;

use crate::calendar::CalendarDate;
use crate::error::Result;
use crate::models::{Measurement, StationCount};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub trait MeasurementStore: Send + Sync {
    /// Most recent measurement date, optionally for one station.
    fn latest_date(
        &self,
        station: Option<&str>,
    ) -> impl Future<Output = Result<Option<CalendarDate>>> + Send;

    /// Measurements, optionally for one station and on or after `since`,
    /// newest date first.
    fn measurements_by_date_desc(
        &self,
        station: Option<&str>,
        since: Option<CalendarDate>,
    ) -> impl Future<Output = Result<Vec<Measurement>>> + Send;

    /// Measurements with `start <= date` and, when given, `date <= end`.
    fn measurements_in_range(
        &self,
        start: CalendarDate,
        end: Option<CalendarDate>,
    ) -> impl Future<Output = Result<Vec<Measurement>>> + Send;

    /// Distinct station identifiers, sorted.
    fn station_ids(&self) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Measurement counts per station, highest count first.
    fn station_counts(&self) -> impl Future<Output = Result<Vec<StationCount>>> + Send;
}
