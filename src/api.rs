use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    response::Json,
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::GatewayError;
use crate::forecast::ForecastGateway;
use crate::models::{Coordinate, ForecastEntry};

/// Raw forecast query; values are parsed by the gateway so a bad number is
/// reported like any other failure instead of as an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct WeatherParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CoordinatesParams {
    pub location: Option<String>,
}

pub fn router(gateway: Arc<ForecastGateway>) -> Router {
    Router::new()
        .route("/weather", get(get_weather))
        .route("/coordinates", get(get_coordinates))
        .with_state(gateway)
}

#[instrument(skip(gateway))]
async fn get_weather(
    State(gateway): State<Arc<ForecastGateway>>,
    Query(params): Query<WeatherParams>,
) -> Result<Json<Vec<ForecastEntry>>, GatewayError> {
    let forecast = gateway
        .get_weather(params.lat.as_deref(), params.lon.as_deref())
        .await?;
    Ok(Json(forecast))
}

#[instrument(skip(gateway))]
async fn get_coordinates(
    State(gateway): State<Arc<ForecastGateway>>,
    Query(params): Query<CoordinatesParams>,
) -> Result<Json<Coordinate>, GatewayError> {
    let coordinate = gateway.get_coordinates(params.location.as_deref()).await?;
    Ok(Json(coordinate))
}
