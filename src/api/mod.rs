//! HTTP surface: one router, five read-only JSON routes and an index page.

pub mod error;
pub mod handlers;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::error::Result;
use crate::store::MeasurementStore;
use crate::utils::constants::API_PREFIX;

pub use error::ErrorBody;

pub fn router<S>(store: S) -> Router
where
    S: MeasurementStore + Clone + 'static,
{
    let api = Router::new()
        .route("/precipitation", get(handlers::precipitation::<S>))
        .route("/stations", get(handlers::stations::<S>))
        .route("/tobs", get(handlers::tobs::<S>))
        .route("/{start}", get(handlers::metrics_from::<S>))
        .route("/{start}/{end}", get(handlers::metrics_between::<S>));

    Router::new()
        .route("/", get(handlers::index))
        .nest(API_PREFIX, api)
        .with_state(store)
}

/// Serve until Ctrl-C.
pub async fn serve<S>(store: S, bind_address: &str) -> Result<()>
where
    S: MeasurementStore + Clone + 'static,
{
    let listener = TcpListener::bind(bind_address).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
