//! OpenWeatherBackend against a mock current-weather endpoint.

use dashboard_core::{Coordinates, WeatherBackend, backend::openweather::OpenWeatherBackend};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn current_json() -> serde_json::Value {
    serde_json::json!({
        "name": "Kuala Lumpur",
        "main": { "temp": 31.4, "feels_like": 37.6, "humidity": 66 },
        "weather": [{ "main": "Rain", "description": "light rain", "icon": "10d" }],
        "wind": { "speed": 2.06 },
        "visibility": 8000
    })
}

#[tokio::test]
async fn test_fetch_by_city_formats_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Kuala Lumpur"))
        .and(query_param("appid", "KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let endpoint = format!("{}/data/2.5/weather", mock_server.uri());
    let backend = OpenWeatherBackend::with_endpoint("KEY".into(), &endpoint);
    let record = backend.fetch_by_city("Kuala Lumpur").await.unwrap();

    assert_eq!(record.city, "Kuala Lumpur");
    assert_eq!(record.temperature, "31°C");
    assert_eq!(record.feels_like.as_deref(), Some("38°C"));
    assert_eq!(record.humidity, "66%");
    assert_eq!(record.wind_speed, "7 km/h");
    assert_eq!(record.visibility.as_deref(), Some("8.0 km"));
    assert_eq!(record.description, "light rain");
    assert_eq!(record.icon_code, "10d");
}

#[tokio::test]
async fn test_fetch_by_location_sends_lat_lon() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "3.139"))
        .and(query_param("lon", "101.6869"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let endpoint = format!("{}/data/2.5/weather", mock_server.uri());
    let backend = OpenWeatherBackend::with_endpoint("KEY".into(), &endpoint);
    let record = backend
        .fetch_by_location(Coordinates::new(3.139, 101.6869).unwrap())
        .await
        .unwrap();

    assert_eq!(record.condition, "Rain");
}

#[tokio::test]
async fn test_not_found_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&mock_server)
        .await;

    let endpoint = format!("{}/data/2.5/weather", mock_server.uri());
    let backend = OpenWeatherBackend::with_endpoint("KEY".into(), &endpoint);
    let err = backend.fetch_by_city("Atlantis").await.unwrap_err();

    assert_eq!(err.message(), "City not found. Please check the spelling.");
}

#[tokio::test]
async fn test_bad_key_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let endpoint = format!("{}/data/2.5/weather", mock_server.uri());
    let backend = OpenWeatherBackend::with_endpoint("WRONG".into(), &endpoint);
    let err = backend.fetch_by_city("London").await.unwrap_err();

    assert_eq!(
        err.message(),
        "Invalid API key. Please check your OpenWeatherMap API key."
    );
}
