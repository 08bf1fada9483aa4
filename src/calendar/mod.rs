pub mod date;
pub mod validator;

pub use date::CalendarDate;
pub use validator::{validate, validate_range, validate_value};
