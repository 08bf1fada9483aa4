use tracing::debug;

use crate::error::{ClimateError, Result};
use crate::models::StationCount;
use crate::store::MeasurementStore;

/// Pick the station with the highest count. Ties go to the lexicographically
/// smallest station id, whatever order the store returned them in.
pub fn select_most_active(counts: &[StationCount]) -> Option<&StationCount> {
    counts
        .iter()
        .filter(|c| c.count > 0)
        .min_by(|a, b| b.count.cmp(&a.count).then_with(|| a.station.cmp(&b.station)))
}

/// Identifier of the station with the most measurements.
pub async fn most_active_station<S: MeasurementStore>(store: &S) -> Result<String> {
    let counts = store.station_counts().await?;
    let winner = select_most_active(&counts)
        .ok_or_else(|| ClimateError::no_data("no measurements to rank stations by"))?;

    debug!(
        "Most active station {} with {} measurements",
        winner.station, winner.count
    );
    Ok(winner.station.clone())
}
