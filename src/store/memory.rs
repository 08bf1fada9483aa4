use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::calendar::CalendarDate;
use crate::error::Result;
use crate::models::{Measurement, StationCount};
use crate::store::MeasurementStore;

/// Immutable in-memory dataset. Cloning shares the underlying rows.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    measurements: Arc<[Measurement]>,
    stations: Arc<[String]>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl MemoryStore {
    /// Station ids are taken from the measurements themselves.
    pub fn new(measurements: Vec<Measurement>) -> Self {
        let stations: BTreeSet<String> = measurements.iter().map(|m| m.station.clone()).collect();
        Self {
            measurements: measurements.into(),
            stations: stations.into_iter().collect(),
        }
    }

    /// Use an explicit station list, as the station table may list stations
    /// that never reported.
    pub fn with_stations(mut self, stations: Vec<String>) -> Self {
        let stations: BTreeSet<String> = stations.into_iter().collect();
        self.stations = stations.into_iter().collect();
        self
    }
}

impl MemoryStore {
    fn for_station<'a>(
        &'a self,
        station: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Measurement> {
        self.measurements
            .iter()
            .filter(move |m| station.map_or(true, |s| m.station == s))
    }
}

impl MeasurementStore for MemoryStore {
    async fn latest_date(&self, station: Option<&str>) -> Result<Option<CalendarDate>> {
        Ok(self.for_station(station).map(|m| m.date).max())
    }

    async fn measurements_by_date_desc(
        &self,
        station: Option<&str>,
        since: Option<CalendarDate>,
    ) -> Result<Vec<Measurement>> {
        let mut rows: Vec<Measurement> = self
            .for_station(station)
            .filter(|m| since.map_or(true, |since| m.date >= since))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }

    async fn measurements_in_range(
        &self,
        start: CalendarDate,
        end: Option<CalendarDate>,
    ) -> Result<Vec<Measurement>> {
        Ok(self
            .measurements
            .iter()
            .filter(|m| m.date >= start && end.map_or(true, |end| m.date <= end))
            .cloned()
            .collect())
    }

    async fn station_ids(&self) -> Result<Vec<String>> {
        Ok(self.stations.to_vec())
    }

    async fn station_counts(&self) -> Result<Vec<StationCount>> {
        let mut counts: BTreeMap<&str, i64> = BTreeMap::new();
        for m in self.measurements.iter() {
            *counts.entry(m.station.as_str()).or_insert(0) += 1;
        }

        let mut counts: Vec<StationCount> = counts
            .into_iter()
            .map(|(station, count)| StationCount::new(station, count))
            .collect();
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        crate::calendar::validate(s).unwrap()
    }

    fn sample() -> MemoryStore {
        MemoryStore::new(vec![
            Measurement::new("A", date("2020-01-01"), Some(0.1), Some(60.0)),
            Measurement::new("A", date("2020-01-03"), None, Some(62.0)),
            Measurement::new("B", date("2020-01-02"), Some(0.2), Some(58.0)),
        ])
    }

    #[tokio::test]
    async fn test_by_date_desc_orders_and_filters() {
        let store = sample();
        let all = store.measurements_by_date_desc(None, None).await.unwrap();
        let dates: Vec<String> = all.iter().map(|m| m.date.to_string()).collect();
        assert_eq!(dates, vec!["2020-01-03", "2020-01-02", "2020-01-01"]);

        let only_b = store.measurements_by_date_desc(Some("B"), None).await.unwrap();
        assert_eq!(only_b.len(), 1);
        assert_eq!(only_b[0].station, "B");

        let since = store
            .measurements_by_date_desc(Some("A"), Some(date("2020-01-02")))
            .await
            .unwrap();
        assert_eq!(since.len(), 1);
        assert_eq!(since[0].date.to_string(), "2020-01-03");
    }

    #[tokio::test]
    async fn test_latest_date() {
        let store = sample();
        assert_eq!(store.latest_date(None).await.unwrap(), Some(date("2020-01-03")));
        assert_eq!(store.latest_date(Some("B")).await.unwrap(), Some(date("2020-01-02")));
        assert_eq!(store.latest_date(Some("Z")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_range_bounds_are_inclusive() {
        let store = sample();
        let rows = store
            .measurements_in_range(date("2020-01-02"), Some(date("2020-01-03")))
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);

        let open = store
            .measurements_in_range(date("2020-01-01"), None)
            .await
            .unwrap();
        assert_eq!(open.len(), 3);
    }

    #[tokio::test]
    async fn test_station_counts_descending() {
        let counts = sample().station_counts().await.unwrap();
        assert_eq!(
            counts,
            vec![StationCount::new("A", 2), StationCount::new("B", 1)]
        );
    }

    #[tokio::test]
    async fn test_explicit_station_list() {
        let store = sample().with_stations(vec!["C".into(), "A".into(), "B".into(), "A".into()]);
        assert_eq!(store.station_ids().await.unwrap(), vec!["A", "B", "C"]);
        assert_eq!(store.measurements.len(), 3);
    }
}
