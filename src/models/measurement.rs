use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::calendar::{self, CalendarDate};
use crate::error::{ClimateError, Result};

/// One reading of precipitation and/or observed temperature at a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub station: String,
    pub date: CalendarDate,
    pub prcp: Option<f64>,
    pub tobs: Option<f64>,
}

impl Measurement {
    pub fn new(
        station: impl Into<String>,
        date: CalendarDate,
        prcp: Option<f64>,
        tobs: Option<f64>,
    ) -> Self {
        Self {
            station: station.into(),
            date,
            prcp,
            tobs,
        }
    }
}

/// Parse a date read back from the store. A stored value that is not a valid
/// `YYYY-MM-DD` day is a corrupt row, not a caller mistake.
pub fn stored_date(value: &str) -> Result<CalendarDate> {
    calendar::validate(value).map_err(|e| match e {
        ClimateError::InvalidDate { value, reason } => ClimateError::CorruptRow {
            value: format!("measurement date '{}'", value),
            reason: reason.to_string(),
        },
        other => other,
    })
}

/// Raw `measurement` row as stored; the date is still text.
#[derive(Debug, Clone, FromRow)]
pub struct MeasurementRow {
    pub station: String,
    pub date: String,
    pub prcp: Option<f64>,
    pub tobs: Option<f64>,
}

impl TryFrom<MeasurementRow> for Measurement {
    type Error = ClimateError;

    fn try_from(row: MeasurementRow) -> Result<Self> {
        let date = stored_date(&row.date)?;
        Ok(Measurement {
            station: row.station,
            date,
            prcp: row.prcp,
            tobs: row.tobs,
        })
    }
}

/// Number of measurements recorded by one station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct StationCount {
    pub station: String,
    pub count: i64,
}

impl StationCount {
    pub fn new(station: impl Into<String>, count: i64) -> Self {
        Self {
            station: station.into(),
            count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_stored_date_is_a_corrupt_row() {
        let row = MeasurementRow {
            station: "USC00519397".to_string(),
            date: "2010-01-01".to_string(),
            prcp: Some(0.08),
            tobs: Some(65.0),
        };
        let measurement = Measurement::try_from(row).unwrap();
        assert_eq!(measurement.date.to_string(), "2010-01-01");
        assert_eq!(measurement.tobs, Some(65.0));

        let bad = MeasurementRow {
            station: "USC00519397".to_string(),
            date: "2010-1-1".to_string(),
            prcp: None,
            tobs: None,
        };
        match Measurement::try_from(bad) {
            Err(ClimateError::CorruptRow { value, .. }) => assert!(value.contains("2010-1-1")),
            other => panic!("expected CorruptRow, got {:?}", other),
        }
    }

    #[test]
    fn test_measurement_serializes_date_as_string() {
        let date = CalendarDate::from_ymd(2017, 8, 23).unwrap();
        let measurement = Measurement::new("USC00519397", date, None, Some(81.0));
        let json = serde_json::to_value(&measurement).unwrap();
        assert_eq!(json["date"], "2017-08-23");
        assert!(json["prcp"].is_null());
    }
}
