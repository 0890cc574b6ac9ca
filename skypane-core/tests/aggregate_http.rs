//! End-to-end aggregation against mock forecast and UV servers.

use skypane_core::{
    AggregateError, Aggregator, LocationQuery, PayloadError,
    provider::{epa::EpaUvProvider, yahoo::YahooForecastProvider},
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn channel(country: &str, city: &str, region: &str) -> serde_json::Value {
    serde_json::json!({
        "query": {
            "count": 1,
            "results": {
                "channel": {
                    "link": "http://weather.example/forecast",
                    "location": { "city": city, "country": country, "region": region },
                    "astronomy": { "sunrise": "6:14 am", "sunset": "7:51 pm" },
                    "item": {
                        "lat": "40.01",
                        "long": "-75.13",
                        "condition": {
                            "code": "30",
                            "date": "Tue, 18 Aug 2015 12:53 pm EDT",
                            "temp": "89",
                            "text": "Partly Cloudy"
                        },
                        "forecast": [
                            { "code": "30", "date": "18 Aug 2015", "day": "Tue", "high": "91", "low": "72", "text": "Partly Cloudy" },
                            { "code": "38", "date": "19 Aug 2015", "day": "Wed", "high": "90", "low": "72", "text": "PM Thunderstorms" },
                            { "code": "38", "date": "20 Aug 2015", "day": "Thu", "high": "85", "low": "71", "text": "PM Thunderstorms" }
                        ]
                    }
                }
            }
        }
    })
}

fn uv_rows() -> serde_json::Value {
    serde_json::json!([
        { "SEQUENCE": 1, "CITY": "PHILADELPHIA", "STATE": "PA", "DATE_TIME": "AUG/18/2015 07 AM", "UV_VALUE": 0 },
        { "SEQUENCE": 2, "CITY": "PHILADELPHIA", "STATE": "PA", "DATE_TIME": "AUG/18/2015 08 AM", "UV_VALUE": 1 },
        { "SEQUENCE": 7, "CITY": "PHILADELPHIA", "STATE": "PA", "DATE_TIME": "AUG/18/2015 01 PM", "UV_VALUE": 9 },
        { "SEQUENCE": 8, "CITY": "PHILADELPHIA", "STATE": "PA", "DATE_TIME": "AUG/18/2015 02 PM", "UV_VALUE": 8 }
    ])
}

async fn mount_forecast(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/yql"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn aggregator(server: &MockServer) -> Aggregator<YahooForecastProvider, EpaUvProvider> {
    Aggregator::new(
        YahooForecastProvider::new(format!("{}/yql", server.uri())),
        EpaUvProvider::new(format!("{}/uv", server.uri())),
    )
}

fn philly() -> LocationQuery {
    LocationQuery::Text("Philadelphia, PA".into())
}

#[tokio::test]
async fn us_location_gets_uv_enrichment() {
    let server = MockServer::start().await;
    mount_forecast(&server, channel("United States", "Philadelphia", "PA")).await;

    Mock::given(method("GET"))
        .and(path("/uv/CITY/Philadelphia/STATE/PA/JSON"))
        .respond_with(ResponseTemplate::new(200).set_body_json(uv_rows()))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = aggregator(&server).load(&philly()).await.unwrap();

    assert_eq!(snapshot.today.day, "Tue");
    assert_eq!(snapshot.forecast.len(), 2);
    assert_eq!(snapshot.currently.alt_temp, "32");
    assert_eq!(snapshot.today.high_uv.as_deref(), Some("9"));
    // 12:53 pm rounds to 13
    assert_eq!(snapshot.currently.uv.as_deref(), Some("9"));

    let hours: Vec<_> = snapshot.today.uv.unwrap().into_iter().map(|r| r.hour).collect();
    assert_eq!(hours, ["07", "08", "13", "14"]);
}

#[tokio::test]
async fn non_us_location_skips_uv_provider() {
    let server = MockServer::start().await;
    mount_forecast(&server, channel("Canada", "Toronto", "ON")).await;

    Mock::given(method("GET"))
        .and(path("/uv/CITY/Toronto/STATE/ON/JSON"))
        .respond_with(ResponseTemplate::new(200).set_body_json(uv_rows()))
        .expect(0)
        .mount(&server)
        .await;

    let snapshot = aggregator(&server)
        .load(&LocationQuery::Coordinates { lat: 43.65, long: -79.38 })
        .await
        .unwrap();

    assert_eq!(snapshot.location.city, "Toronto");
    assert!(snapshot.today.uv.is_none());
    assert!(snapshot.today.high_uv.is_none());
    assert!(snapshot.currently.uv.is_none());
}

#[tokio::test]
async fn empty_uv_body_means_no_uv_fields() {
    let server = MockServer::start().await;
    mount_forecast(&server, channel("United States", "Philadelphia", "PA")).await;

    Mock::given(method("GET"))
        .and(path("/uv/CITY/Philadelphia/STATE/PA/JSON"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let snapshot = aggregator(&server).load(&philly()).await.unwrap();

    assert!(snapshot.today.uv.is_none());
    assert!(snapshot.today.high_uv.is_none());
}

#[tokio::test]
async fn failing_uv_provider_still_yields_snapshot() {
    let server = MockServer::start().await;
    mount_forecast(&server, channel("United States", "Philadelphia", "PA")).await;

    Mock::given(method("GET"))
        .and(path("/uv/CITY/Philadelphia/STATE/PA/JSON"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let snapshot = aggregator(&server).load(&philly()).await.unwrap();

    assert_eq!(snapshot.currently.temp, "89");
    assert!(snapshot.today.high_uv.is_none());
}

#[tokio::test]
async fn failing_forecast_provider_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/yql"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = aggregator(&server).load(&philly()).await.unwrap_err();

    assert!(matches!(err, AggregateError::Primary(_)));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn unknown_place_is_a_payload_error() {
    let server = MockServer::start().await;
    mount_forecast(&server, serde_json::json!({ "query": { "count": 0, "results": null } })).await;

    let err = aggregator(&server).load(&philly()).await.unwrap_err();

    assert!(matches!(err, AggregateError::Payload(PayloadError::NoResults)));
}
