pub mod measurement;
pub mod metrics;
pub mod station;

pub use measurement::{stored_date, Measurement, MeasurementRow, StationCount};
pub use metrics::RangeMetrics;
pub use station::Station;
