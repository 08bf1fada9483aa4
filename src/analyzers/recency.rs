use tracing::debug;

use crate::calendar::CalendarDate;
use crate::error::{ClimateError, Result};
use crate::models::Measurement;
use crate::store::MeasurementStore;
use crate::utils::constants::RECENCY_WINDOW_DAYS;

/// First day of the recency window ending at `latest`.
pub fn window_start(latest: CalendarDate) -> CalendarDate {
    latest.days_before(RECENCY_WINDOW_DAYS)
}

/// Every measurement (optionally for one station) dated within 365 days of
/// the most recent one, newest first.
pub async fn last_year_window<S: MeasurementStore>(
    store: &S,
    station: Option<&str>,
) -> Result<Vec<Measurement>> {
    let latest = store.latest_date(station).await?.ok_or_else(|| match station {
        Some(station) => ClimateError::no_data(format!("no measurements for station {}", station)),
        None => ClimateError::no_data("no measurements recorded"),
    })?;

    let lower_bound = window_start(latest);
    debug!(
        "Recency window {}..={} (station {:?})",
        lower_bound, latest, station
    );

    store
        .measurements_by_date_desc(station, Some(lower_bound))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::validate;
    use crate::store::MemoryStore;

    fn m(station: &str, date: &str) -> Measurement {
        Measurement::new(station, validate(date).unwrap(), Some(0.0), Some(75.0))
    }

    #[test]
    fn test_window_start_is_365_days() {
        let start = window_start(validate("2017-08-23").unwrap());
        assert_eq!(start.to_string(), "2016-08-23");

        // Crossing a leap day: the offset is not corrected.
        let start = window_start(validate("2016-08-23").unwrap());
        assert_eq!(start.to_string(), "2015-08-24");
    }

    #[tokio::test]
    async fn test_window_includes_lower_bound() {
        let store = MemoryStore::new(vec![
            m("A", "2017-08-23"),
            m("A", "2016-08-23"),
            m("A", "2016-08-22"),
            m("B", "2017-01-01"),
        ]);
        let window = last_year_window(&store, None).await.unwrap();
        let dates: Vec<String> = window.iter().map(|m| m.date.to_string()).collect();
        assert_eq!(dates, vec!["2017-08-23", "2017-01-01", "2016-08-23"]);
    }

    #[tokio::test]
    async fn test_station_window_anchors_on_that_station() {
        let store = MemoryStore::new(vec![
            m("A", "2017-08-23"),
            m("B", "2015-06-01"),
            m("B", "2014-06-02"),
            m("B", "2014-05-31"),
        ]);
        let window = last_year_window(&store, Some("B")).await.unwrap();
        assert_eq!(window.len(), 2);
        assert!(window.iter().all(|m| m.station == "B"));
        assert_eq!(window[1].date.to_string(), "2014-06-02");
    }

    #[tokio::test]
    async fn test_empty_store_is_no_data() {
        let store = MemoryStore::default();
        assert!(matches!(
            last_year_window(&store, None).await,
            Err(ClimateError::NoData { .. })
        ));
    }

    #[tokio::test]
    async fn test_unknown_station_is_no_data() {
        let store = MemoryStore::new(vec![m("A", "2017-08-23")]);
        match last_year_window(&store, Some("Z")).await {
            Err(ClimateError::NoData { context }) => assert!(context.contains('Z')),
            other => panic!("expected NoData, got {:?}", other),
        }
    }
}
