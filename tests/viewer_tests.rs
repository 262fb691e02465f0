//! Viewer tests against a mocked gateway and against the real router

use std::sync::Arc;

use forecast_gateway::config::{GatewayConfig, GeocodingConfig, WeatherConfig};
use forecast_gateway::viewer::{GatewayClient, Locale, Viewer, render};
use forecast_gateway::{Coordinate, ForecastGateway, web};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn forecast_body() -> Value {
    json!([{
        "time": "2023-05-01T11:00:00Z",
        "data": {
            "instant": { "details": {
                "air_temperature": 15,
                "air_pressure_at_sea_level": 1012,
                "relative_humidity": 60,
                "wind_speed": 5,
                "wind_from_direction": 180,
                "cloud_area_fraction": 20
            } },
            "next_12_hours": { "summary": { "symbol_code": "partly_cloudy" } }
        }
    }])
}

async fn mock_gateway() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&server)
        .await;
    server
}

async fn weather_queries(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == "/api/weather")
        .map(|request| request.url.query().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn test_mount_fetches_once_with_default_coordinates() {
    let server = mock_gateway().await;
    let mut viewer = Viewer::new(GatewayClient::new(&server.uri()).unwrap(), Locale::En);

    viewer.mount().await;

    assert_eq!(weather_queries(&server).await, ["lat=55.7558&lon=37.6176"]);
    let view = render(viewer.state());
    assert!(view.contains("Weather Forecast"));
    assert!(view.contains("Enter location: Moscow"));
    assert!(view.contains("Temperature: 15°C"));
}

#[tokio::test]
async fn test_staged_coordinates_trigger_second_fetch() {
    let server = mock_gateway().await;
    let mut viewer = Viewer::new(GatewayClient::new(&server.uri()).unwrap(), Locale::En);
    viewer.mount().await;

    viewer.stage_latitude(40.7128);
    viewer.stage_longitude(-74.006);
    viewer.fetch_by_coordinates().await;

    let queries = weather_queries(&server).await;
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[1], "lat=40.7128&lon=-74.006");
}

#[tokio::test]
async fn test_language_toggle_swaps_labels_without_refetch() {
    let server = mock_gateway().await;
    let mut viewer = Viewer::new(GatewayClient::new(&server.uri()).unwrap(), Locale::En);
    viewer.mount().await;

    viewer.toggle_language();

    let view = render(viewer.state());
    assert!(view.contains("Прогноз погоды"));
    assert!(view.contains("Введите местоположение"));
    assert!(!view.contains("Weather Forecast"));
    assert_eq!(weather_queries(&server).await.len(), 1);
}

#[tokio::test]
async fn test_gateway_error_renders_no_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "Upstream request failed" })),
        )
        .mount(&server)
        .await;

    let mut viewer = Viewer::new(GatewayClient::new(&server.uri()).unwrap(), Locale::En);
    viewer.mount().await;

    let view = render(viewer.state());
    assert!(view.contains("No weather data available"));
    assert!(!view.contains("Upstream request failed"));
}

#[tokio::test]
async fn test_place_search_against_real_gateway() {
    let weather = MockServer::start().await;
    let geocoding = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .and(query_param("q", "New York"))
        .and(query_param("key", "viewer-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "geometry": { "lat": 40.7128, "lng": -74.006 } }]
        })))
        .expect(1)
        .mount(&geocoding)
        .await;

    Mock::given(method("GET"))
        .and(path("/compact"))
        .and(query_param("lat", "40.7128"))
        .and(query_param("lon", "-74.006"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "properties": { "timeseries": [
                { "time": "2024-06-01T10:00:00Z", "data": {} },
                { "time": "2024-06-01T11:00:00Z", "data": { "instant": { "details": { "air_temperature": 24.5 } } } }
            ] }
        })))
        .expect(1)
        .mount(&weather)
        .await;

    let config = GatewayConfig {
        weather: WeatherConfig {
            base_url: weather.uri(),
            user_agent: "forecast-viewer-it/1.0".to_string(),
        },
        geocoding: GeocodingConfig {
            base_url: geocoding.uri(),
            api_key: Some("viewer-key".to_string()),
        },
        ..GatewayConfig::default()
    };
    let app = web::app(Arc::new(ForecastGateway::from_config(&config).unwrap()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let gateway_url = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move { axum::serve(listener, app).await });

    let mut viewer = Viewer::new(GatewayClient::new(&gateway_url).unwrap(), Locale::En);
    viewer.set_search_text("New York");
    viewer.fetch_by_place().await;

    assert_eq!(viewer.state().active, Coordinate::new(40.7128, -74.006));
    assert_eq!(viewer.state().forecast.len(), 1);
    assert!(render(viewer.state()).contains("Temperature: 24.5°C"));
}
