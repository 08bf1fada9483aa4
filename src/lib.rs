pub mod analyzers;
pub mod api;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod error;
pub mod import;
pub mod models;
pub mod store;
pub mod utils;

pub use calendar::CalendarDate;
pub use error::{ClimateError, Result};
