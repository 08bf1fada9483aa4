use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::calendar::CalendarDate;
use crate::error::{ClimateError, Result};
use crate::models::{stored_date, Measurement, MeasurementRow, Station, StationCount};
use crate::store::MeasurementStore;
use crate::utils::constants::{
    MEASUREMENT_COLUMNS, MEASUREMENT_TABLE, STATION_COLUMNS, STATION_TABLE,
};

const SELECT_LATEST_DATE: &str = r#"
    SELECT MAX(date)
    FROM measurement
    WHERE (?1 IS NULL OR station = ?1)
"#;

const SELECT_BY_DATE_DESC: &str = r#"
    SELECT station, date, prcp, tobs
    FROM measurement
    WHERE (?1 IS NULL OR station = ?1)
      AND (?2 IS NULL OR date >= ?2)
    ORDER BY date DESC
"#;

const SELECT_IN_RANGE: &str = r#"
    SELECT station, date, prcp, tobs
    FROM measurement
    WHERE date >= ?1
      AND (?2 IS NULL OR date <= ?2)
"#;

const SELECT_STATION_IDS: &str = r#"
    SELECT DISTINCT station
    FROM station
    ORDER BY station
"#;

const SELECT_STATION_COUNTS: &str = r#"
    SELECT station, COUNT(date) AS count
    FROM measurement
    GROUP BY station
    ORDER BY count DESC, station ASC
"#;

const CREATE_STATION_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS station (
        id INTEGER PRIMARY KEY,
        station TEXT NOT NULL,
        name TEXT,
        latitude REAL,
        longitude REAL,
        elevation REAL
    )
"#;

const CREATE_MEASUREMENT_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS measurement (
        id INTEGER PRIMARY KEY,
        station TEXT NOT NULL,
        date TEXT NOT NULL,
        prcp REAL,
        tobs REAL
    )
"#;

// Unique keys make a repeated import a no-op instead of duplicating rows.
const CREATE_STATION_INDEX: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_station_station ON station (station)";

const CREATE_MEASUREMENT_INDEX: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_measurement_station_date ON measurement (station, date)";

const INSERT_STATION: &str = r#"
    INSERT OR IGNORE INTO station (station, name, latitude, longitude, elevation)
    VALUES (?1, ?2, ?3, ?4, ?5)
"#;

const INSERT_MEASUREMENT: &str = r#"
    INSERT OR IGNORE INTO measurement (station, date, prcp, tobs)
    VALUES (?1, ?2, ?3, ?4)
"#;

/// Rows newly written by [`SqliteStore::import_rows`]; rows already present
/// are not counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InsertedRows {
    pub stations: u64,
    pub measurements: u64,
}

/// Row totals reported by the `check` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCounts {
    pub stations: i64,
    pub measurements: i64,
}

/// SQLite-backed store. Each query checks a connection out of the pool and
/// returns it when the query finishes, whether it succeeded or not.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open an existing database read-only.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.read_only(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        info!("Opened {} read-only ({} connections)", url, max_connections);
        Ok(Self { pool })
    }

    /// Open a database for writing, creating the file when missing.
    pub async fn connect_writable(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        info!("Opened {} for writing", url);
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check that both tables exist with the columns the query layer reads.
    pub async fn verify_schema(&self) -> Result<()> {
        self.verify_table(STATION_TABLE, STATION_COLUMNS).await?;
        self.verify_table(MEASUREMENT_TABLE, MEASUREMENT_COLUMNS).await?;
        debug!("Schema verified");
        Ok(())
    }

    async fn verify_table(&self, table: &str, expected: &[&str]) -> Result<()> {
        let columns: Vec<String> =
            sqlx::query_scalar("SELECT name FROM pragma_table_info(?1)")
                .bind(table)
                .fetch_all(&self.pool)
                .await?;

        let missing: Vec<String> = expected
            .iter()
            .filter(|column| !columns.iter().any(|c| c.eq_ignore_ascii_case(column)))
            .map(|column| column.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(ClimateError::SchemaMismatch {
                table: table.to_string(),
                missing,
            });
        }
        Ok(())
    }

    pub async fn table_counts(&self) -> Result<TableCounts> {
        let stations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM station")
            .fetch_one(&self.pool)
            .await?;
        let measurements: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM measurement")
            .fetch_one(&self.pool)
            .await?;
        Ok(TableCounts {
            stations,
            measurements,
        })
    }

    /// Create the station and measurement tables if they do not exist.
    pub async fn create_schema(&self) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        create_tables(&mut *conn).await
    }

    /// Create the schema and write both row sets in one transaction. Either
    /// everything lands or, on any error, nothing does. `on_batch` is called
    /// with the size of each measurement batch once it is written.
    pub async fn import_rows<F>(
        &self,
        stations: &[Station],
        measurements: &[Measurement],
        batch_size: usize,
        mut on_batch: F,
    ) -> Result<InsertedRows>
    where
        F: FnMut(usize),
    {
        let mut tx = self.pool.begin().await?;
        create_tables(&mut *tx).await?;

        let mut inserted = InsertedRows {
            stations: insert_stations(&mut *tx, stations).await?,
            measurements: 0,
        };
        for batch in measurements.chunks(batch_size.max(1)) {
            inserted.measurements += insert_measurements(&mut *tx, batch).await?;
            on_batch(batch.len());
        }

        tx.commit().await?;
        debug!(
            "Committed {} stations and {} measurements",
            inserted.stations, inserted.measurements
        );
        Ok(inserted)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

async fn create_tables(conn: &mut SqliteConnection) -> Result<()> {
    for statement in [
        CREATE_STATION_TABLE,
        CREATE_MEASUREMENT_TABLE,
        CREATE_STATION_INDEX,
        CREATE_MEASUREMENT_INDEX,
    ] {
        sqlx::query(statement).execute(&mut *conn).await?;
    }
    Ok(())
}

async fn insert_stations(conn: &mut SqliteConnection, stations: &[Station]) -> Result<u64> {
    let mut inserted = 0;
    for station in stations {
        let result = sqlx::query(INSERT_STATION)
            .bind(&station.station)
            .bind(&station.name)
            .bind(station.latitude)
            .bind(station.longitude)
            .bind(station.elevation)
            .execute(&mut *conn)
            .await?;
        inserted += result.rows_affected();
    }
    Ok(inserted)
}

async fn insert_measurements(
    conn: &mut SqliteConnection,
    measurements: &[Measurement],
) -> Result<u64> {
    let mut inserted = 0;
    for m in measurements {
        let result = sqlx::query(INSERT_MEASUREMENT)
            .bind(&m.station)
            .bind(m.date.to_iso_string())
            .bind(m.prcp)
            .bind(m.tobs)
            .execute(&mut *conn)
            .await?;
        inserted += result.rows_affected();
    }
    Ok(inserted)
}

fn into_measurements(rows: Vec<MeasurementRow>) -> Result<Vec<Measurement>> {
    rows.into_iter().map(Measurement::try_from).collect()
}

impl MeasurementStore for SqliteStore {
    async fn latest_date(&self, station: Option<&str>) -> Result<Option<CalendarDate>> {
        let latest: Option<String> = sqlx::query_scalar(SELECT_LATEST_DATE)
            .bind(station)
            .fetch_one(&self.pool)
            .await?;
        latest.as_deref().map(stored_date).transpose()
    }

    async fn measurements_by_date_desc(
        &self,
        station: Option<&str>,
        since: Option<CalendarDate>,
    ) -> Result<Vec<Measurement>> {
        let rows: Vec<MeasurementRow> = sqlx::query_as(SELECT_BY_DATE_DESC)
            .bind(station)
            .bind(since.map(|d| d.to_iso_string()))
            .fetch_all(&self.pool)
            .await?;
        debug!(
            "Fetched {} rows by date (station {:?}, since {:?})",
            rows.len(),
            station,
            since
        );
        into_measurements(rows)
    }

    async fn measurements_in_range(
        &self,
        start: CalendarDate,
        end: Option<CalendarDate>,
    ) -> Result<Vec<Measurement>> {
        let rows: Vec<MeasurementRow> = sqlx::query_as(SELECT_IN_RANGE)
            .bind(start.to_iso_string())
            .bind(end.map(|d| d.to_iso_string()))
            .fetch_all(&self.pool)
            .await?;
        debug!("Fetched {} rows in range {}..{:?}", rows.len(), start, end);
        into_measurements(rows)
    }

    async fn station_ids(&self) -> Result<Vec<String>> {
        let ids: Vec<String> = sqlx::query_scalar(SELECT_STATION_IDS)
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }

    async fn station_counts(&self) -> Result<Vec<StationCount>> {
        let counts: Vec<StationCount> = sqlx::query_as(SELECT_STATION_COUNTS)
            .fetch_all(&self.pool)
            .await?;
        Ok(counts)
    }
}
