use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::response::Html;
use axum::Json;
use tracing::info;

use crate::analyzers::{last_year_window, most_active_station, range_metrics};
use crate::calendar;
use crate::error::Result;
use crate::models::{Measurement, RangeMetrics};
use crate::store::MeasurementStore;
use crate::utils::constants::API_PREFIX;

/// Date to value, for whichever reading `pick` selects. Missing readings are
/// skipped; when a date repeats, the later record wins.
fn by_date<F>(records: &[Measurement], pick: F) -> BTreeMap<String, f64>
where
    F: Fn(&Measurement) -> Option<f64>,
{
    let mut out = BTreeMap::new();
    for record in records {
        if let Some(value) = pick(record) {
            out.insert(record.date.to_iso_string(), value);
        }
    }
    out
}

pub async fn index() -> Html<String> {
    Html(format!(
        r#"
        <h1>Available routes</h1>
        <ol>
            <li>Last 12 months of precipitation data ({p}/precipitation)</li>
            <li>JSON list of all stations ({p}/stations)</li>
            <li>Last year of dates and temperatures at the most active station ({p}/tobs)</li>
            <li>Min, average and max temperature for a date range ({p}/&lt;start&gt;/&lt;end&gt;)</li>
            <li>Min, average and max temperature from a date onwards ({p}/&lt;start&gt;)</li>
        </ol>
        "#,
        p = API_PREFIX
    ))
}

pub async fn precipitation<S: MeasurementStore>(
    State(store): State<S>,
) -> Result<Json<BTreeMap<String, f64>>> {
    let window = last_year_window(&store, None).await?;
    let values = by_date(&window, |m| m.prcp);
    info!("precipitation: {} dates", values.len());
    Ok(Json(values))
}

pub async fn stations<S: MeasurementStore>(State(store): State<S>) -> Result<Json<Vec<String>>> {
    let ids = store.station_ids().await?;
    info!("stations: {} ids", ids.len());
    Ok(Json(ids))
}

pub async fn tobs<S: MeasurementStore>(
    State(store): State<S>,
) -> Result<Json<BTreeMap<String, f64>>> {
    let station = most_active_station(&store).await?;
    let window = last_year_window(&store, Some(station.as_str())).await?;
    let values = by_date(&window, |m| m.tobs);
    info!("tobs: {} dates at {}", values.len(), station);
    Ok(Json(values))
}

pub async fn metrics_from<S: MeasurementStore>(
    State(store): State<S>,
    Path(start): Path<String>,
) -> Result<Json<RangeMetrics>> {
    let start = calendar::validate(&start)?;
    let metrics = range_metrics(&store, start, None).await?;
    info!("metrics from {}: {:?}", start, metrics);
    Ok(Json(metrics))
}

pub async fn metrics_between<S: MeasurementStore>(
    State(store): State<S>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<RangeMetrics>> {
    let (start, end) = calendar::validate_range(&start, &end)?;
    let metrics = range_metrics(&store, start, Some(end)).await?;
    info!("metrics {}..={}: {:?}", start, end, metrics);
    Ok(Json(metrics))
}
