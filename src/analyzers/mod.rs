pub mod activity;
pub mod range_metrics;
pub mod recency;

pub use activity::{most_active_station, select_most_active};
pub use range_metrics::{range_metrics, summarize_temperatures};
pub use recency::{last_year_window, window_start};
