//! Tests for NinaClient against a local stand-in of the NINA API.

use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::{Value, json};

use crate::nina::{MapProvider, NinaClient, NinaError};

fn dashboard_fixture() -> Value {
    json!([{
        "id": "mow.DE-BY-A-W083-20200529-000",
        "payload": {
            "version": 1,
            "type": "ALERT",
            "id": "mow.DE-BY-A-W083-20200529-000",
            "hash": "abc",
            "data": {
                "headline": "Hochwasser an der Isar",
                "provider": "MOWAS",
                "severity": "Severe",
                "msgType": "Alert",
                "transKeys": {"event": "BBK-EVC-040"},
                "area": {"type": "ZGEM", "data": "9162"}
            }
        },
        "i18nTitle": {"de": "Hochwasser an der Isar"},
        "sent": "2024-06-01T10:00:00+02:00"
    }])
}

async fn dashboard(Path(file): Path<String>) -> impl IntoResponse {
    match file.as_str() {
        "091620000000.json" => (StatusCode::OK, Json(dashboard_fixture())).into_response(),
        _ => (StatusCode::NOT_FOUND, "no such region").into_response(),
    }
}

async fn warning(Path(file): Path<String>) -> impl IntoResponse {
    match file.as_str() {
        "mow.1.json" => Json(json!({
            "identifier": "mow.1",
            "sender": "opendata@bbk",
            "sent": "2024-06-01T10:00:00+02:00",
            "status": "Actual",
            "msgType": "Alert",
            "scope": "Public",
            "code": ["DVN:2"],
            "info": [{
                "language": "DE",
                "category": ["Met"],
                "event": "Hochwasser",
                "severity": "Severe",
                "headline": "Hochwasser an der Isar",
                "area": [{"areaDesc": "München", "geocode": [{"valueName": "ARS", "value": "091620000000"}]}]
            }],
            "references": "none"
        }))
        .into_response(),
        "mow.1.geojson" => Json(json!({"type": "FeatureCollection", "features": []})).into_response(),
        "broken.json" => (StatusCode::OK, "not json").into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn spawn_api() -> String {
    let app = Router::new()
        .route("/dashboard/{file}", get(dashboard))
        .route("/warnings/{file}", get(warning))
        .route(
            "/dwd/mapData.json",
            get(|| async {
                Json(json!([{
                    "id": "dwd.1",
                    "version": 3,
                    "startDate": "2024-06-01T08:00:00+02:00",
                    "severity": "Minor",
                    "type": "Alert",
                    "i18nTitle": {"de": "Gewitter"}
                }]))
            }),
        )
        .route(
            "/archive.mowas/{file}",
            get(|Path(file): Path<String>| async move { Json(json!({"requested": file})) }),
        )
        .route(
            "/appdata/covid/covidrules/DE/{file}",
            get(|| async {
                Json(json!({
                    "key": "091620000000",
                    "generalInfo": "<p>Abstand halten</p>",
                    "common": [{"id": "1", "caption": "Masken", "text": "keine Pflicht"}]
                }))
            }),
        )
        .route(
            "/appdata/covid/covidinfos/DE/covidinfos.json",
            get(|| async { Json(json!({"infos": []})) }),
        )
        .route(
            "/appdata/covid/covidticker/DE/covidticker.json",
            get(|| async { Json(json!({"tickers": []})) }),
        )
        .route(
            "/appdata/gsb/faqs/DE/faq.json",
            get(|| async { Json(json!({"faq": [{"question": "Was ist NINA?"}]})) }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

#[test]
fn trailing_slash_is_trimmed() {
    let client = NinaClient::new("https://warnung.bund.de/api31/").unwrap();
    assert_eq!(client.base_url(), "https://warnung.bund.de/api31");
}

#[tokio::test(flavor = "multi_thread")]
async fn dashboard_is_decoded() {
    let client = NinaClient::new(spawn_api().await).unwrap();

    let items = client.dashboard("091620000000").await.unwrap();
    assert_eq!(items.len(), 1);

    let item = &items[0];
    assert_eq!(item.headline(), Some("Hochwasser an der Isar"));
    assert_eq!(item.severity(), Some("Severe"));
    assert_eq!(item.provider(), Some("MOWAS"));
    assert!(item.sent.is_some());

    let data = item.payload.as_ref().unwrap().data.as_ref().unwrap();
    assert_eq!(data.msg_type.as_deref(), Some("Alert"));
    assert!(data.extra.contains_key("area"));
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_region_is_status_error() {
    let client = NinaClient::new(spawn_api().await).unwrap();

    let err = client.dashboard("000000000000").await.unwrap_err();
    assert!(err.is_not_found());
    match err {
        NinaError::Status { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "no such region");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn warning_keeps_unknown_fields() {
    let client = NinaClient::new(spawn_api().await).unwrap();

    let warning = client.warning("mow.1").await.unwrap();
    assert_eq!(warning.identifier.as_deref(), Some("mow.1"));
    assert_eq!(warning.code, Some(vec!["DVN:2".to_string()]));
    assert_eq!(warning.extra.get("references"), Some(&json!("none")));

    let info = &warning.info.as_ref().unwrap()[0];
    assert_eq!(info.event.as_deref(), Some("Hochwasser"));
    let area = &info.area.as_ref().unwrap()[0];
    assert_eq!(area.area_desc.as_deref(), Some("München"));
}

#[tokio::test(flavor = "multi_thread")]
async fn geojson_and_history_are_passed_through() {
    let client = NinaClient::new(spawn_api().await).unwrap();

    let geojson = client.warning_geojson("mow.1").await.unwrap();
    assert_eq!(geojson["type"], "FeatureCollection");

    let history = client.warning_history("mow.1").await.unwrap();
    assert_eq!(history["requested"], "mow.1-mapping.json");
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_body_is_decode_error() {
    let client = NinaClient::new(spawn_api().await).unwrap();

    let err = client.warning("broken").await.unwrap_err();
    assert!(matches!(err, NinaError::Decode { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn map_warnings_use_provider_path() {
    let client = NinaClient::new(spawn_api().await).unwrap();

    let warnings = client.map_warnings(MapProvider::Dwd).await.unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].id.as_deref(), Some("dwd.1"));
    assert_eq!(warnings[0].kind.as_deref(), Some("Alert"));
    assert_eq!(warnings[0].version, Some(3));

    let err = client.map_warnings(MapProvider::Police).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test(flavor = "multi_thread")]
async fn covid_and_faq_endpoints() {
    let client = NinaClient::new(spawn_api().await).unwrap();

    let rules = client.covid_rules("091620000000").await.unwrap();
    assert_eq!(rules.key.as_deref(), Some("091620000000"));
    assert_eq!(rules.common.unwrap()[0].caption.as_deref(), Some("Masken"));

    assert!(client.covid_infos().await.unwrap()["infos"].is_array());
    assert!(client.covid_ticker().await.unwrap()["tickers"].is_array());
    assert_eq!(client.faqs().await.unwrap()["faq"][0]["question"], "Was ist NINA?");
}

#[tokio::test(flavor = "multi_thread")]
async fn path_injection_is_rejected_before_sending() {
    let client = NinaClient::new("http://127.0.0.1:9").unwrap();

    for id in ["", "  ", "../secret", "a?b", "x#y"] {
        let err = client.warning(id).await.unwrap_err();
        assert!(matches!(err, NinaError::InvalidArgument { .. }), "{}", id);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_server_is_request_error() {
    // Nothing listens on the discard port
    let client = NinaClient::new("http://127.0.0.1:9").unwrap();

    let err = client.faqs().await.unwrap_err();
    assert!(matches!(err, NinaError::Request(_)));
}
