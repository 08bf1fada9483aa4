use tracing::debug;

use crate::calendar::CalendarDate;
use crate::error::{ClimateError, Result};
use crate::models::{Measurement, RangeMetrics};
use crate::store::MeasurementStore;

/// Temperature min/mean/max for every measurement on or after `start` and,
/// when given, on or before `end`.
///
/// The caller is responsible for `start <= end` (see
/// [`crate::calendar::validate_range`]). Records without a temperature are
/// dropped first; if nothing is left the result is [`ClimateError::NoData`]
/// rather than NaN.
pub async fn range_metrics<S: MeasurementStore>(
    store: &S,
    start: CalendarDate,
    end: Option<CalendarDate>,
) -> Result<RangeMetrics> {
    let records = store.measurements_in_range(start, end).await?;
    debug!("Reducing {} records from {}", records.len(), start);

    summarize_temperatures(&records).ok_or_else(|| {
        let context = match end {
            Some(end) => format!("no temperature readings between {} and {}", start, end),
            None => format!("no temperature readings on or after {}", start),
        };
        ClimateError::no_data(context)
    })
}

pub fn summarize_temperatures(records: &[Measurement]) -> Option<RangeMetrics> {
    RangeMetrics::from_temperatures(records.iter().filter_map(|m| m.tobs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::validate;
    use crate::store::MemoryStore;

    fn store() -> MemoryStore {
        MemoryStore::new(vec![
            Measurement::new("A", validate("2020-01-01").unwrap(), Some(0.1), Some(60.0)),
            Measurement::new("A", validate("2020-01-02").unwrap(), None, Some(62.0)),
            Measurement::new("B", validate("2020-01-01").unwrap(), Some(0.2), Some(58.0)),
            Measurement::new("B", validate("2020-01-05").unwrap(), Some(0.0), None),
        ])
    }

    #[tokio::test]
    async fn test_open_ended_range() {
        let metrics = range_metrics(&store(), validate("2020-01-01").unwrap(), None)
            .await
            .unwrap();
        assert_eq!(metrics.tmin, 58.0);
        assert_eq!(metrics.tavg, 60.0);
        assert_eq!(metrics.tmax, 62.0);
    }

    #[tokio::test]
    async fn test_bounded_range() {
        let start = validate("2020-01-02").unwrap();
        let metrics = range_metrics(&store(), start, Some(start)).await.unwrap();
        assert_eq!(metrics.tmin, 62.0);
        assert_eq!(metrics.tmax, 62.0);
    }

    #[tokio::test]
    async fn test_only_null_temperatures_is_no_data() {
        let start = validate("2020-01-03").unwrap();
        let result = range_metrics(&store(), start, None).await;
        assert!(matches!(result, Err(ClimateError::NoData { .. })));
    }

    #[tokio::test]
    async fn test_empty_range_is_no_data() {
        let start = validate("2021-01-01").unwrap();
        let end = validate("2021-12-31").unwrap();
        match range_metrics(&store(), start, Some(end)).await {
            Err(ClimateError::NoData { context }) => {
                assert!(context.contains("2021-01-01"));
                assert!(context.contains("2021-12-31"));
            }
            other => panic!("expected NoData, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_repeated_calls_agree() {
        let store = store();
        let start = validate("2020-01-01").unwrap();
        let first = range_metrics(&store, start, None).await.unwrap();
        let second = range_metrics(&store, start, None).await.unwrap();
        assert_eq!(first, second);
    }
}
