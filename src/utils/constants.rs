/// Days per month in a common year; February gains a day in leap years
pub const MONTH_LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Length of the recency window, a fixed day offset rather than a calendar year
pub const RECENCY_WINDOW_DAYS: i64 = 365;

/// Table names
pub const MEASUREMENT_TABLE: &str = "measurement";
pub const STATION_TABLE: &str = "station";

/// Columns the query layer reads
pub const MEASUREMENT_COLUMNS: &[&str] = &["station", "date", "prcp", "tobs"];
pub const STATION_COLUMNS: &[&str] = &["station"];

/// Route prefix
pub const API_PREFIX: &str = "/api/v1.0";

/// Configuration defaults
pub const DEFAULT_DATABASE_URL: &str = "sqlite://Resources/hawaii.sqlite";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_CONFIG_FILE: &str = "climate-api";
pub const ENV_PREFIX: &str = "CLIMATE_API";

/// Rows per transaction when importing CSV data
pub const DEFAULT_IMPORT_BATCH_SIZE: usize = 1000;
