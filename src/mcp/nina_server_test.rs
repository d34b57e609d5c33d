//! Tests for NinaServer resources and prompts.

use rmcp::ServerHandler;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::PromptMessageContent;

use crate::ars::{ArsCodes, ArsRegistry};
use crate::mcp::nina_server::{
    ARS_CODES_URI, ArsLookupArgs, EmergencyWarningsArgs, NinaServer, ars_mime_type,
};
use crate::nina::NinaClient;

fn setup_server() -> NinaServer {
    let codes: ArsCodes = [
        ("Blankenfelde-Mahlow", "120720017017"),
        ("München", "091620000000"),
        ("Berlin", "110000000000"),
    ]
    .into_iter()
    .map(|(name, ars)| (name.to_string(), ars.to_string()))
    .collect();

    // Nothing here reaches the API, the port is never connected
    let client = NinaClient::new("http://127.0.0.1:9").unwrap();
    NinaServer::new(client, ArsRegistry::from_codes(codes))
}

fn prompt_text(messages: &[rmcp::model::PromptMessage]) -> String {
    match &messages[0].content {
        PromptMessageContent::Text { text } => text.clone(),
        other => panic!("expected text prompt, got {other:?}"),
    }
}

#[test]
fn server_info_enables_resources() {
    let info = setup_server().get_info();

    assert!(info.capabilities.tools.is_some());
    assert!(info.capabilities.prompts.is_some());
    assert!(info.capabilities.resources.is_some());
}

#[test]
fn all_warning_tools_are_routed() {
    let server = setup_server();

    let mut names: Vec<String> = server
        .tool_router
        .list_all()
        .into_iter()
        .map(|tool| tool.name.to_string())
        .collect();
    names.sort();

    assert_eq!(
        names,
        vec![
            "find_ars_code",
            "get_covid_infos",
            "get_covid_rules",
            "get_covid_ticker",
            "get_faqs",
            "get_map_warnings",
            "get_regional_warnings",
            "get_warning_details",
            "get_warning_geojson",
            "get_warning_history",
        ]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn codes_resource_is_the_full_map() {
    let server = setup_server();

    let text = server.read_ars_resource(ARS_CODES_URI).await.unwrap();
    let codes: ArsCodes = serde_json::from_str(&text).unwrap();

    assert_eq!(codes.len(), 3);
    assert_eq!(codes["Berlin"], "110000000000");
}

#[tokio::test(flavor = "multi_thread")]
async fn code_resource_decodes_municipality() {
    let server = setup_server();

    let ars = server
        .read_ars_resource("ars://codes/M%C3%BCnchen")
        .await
        .unwrap();
    assert_eq!(ars, "091620000000");

    let ars = server
        .read_ars_resource("ars://codes/blankenfelde-mahlow")
        .await
        .unwrap();
    assert_eq!(ars, "120720017017");
}

#[tokio::test(flavor = "multi_thread")]
async fn code_resource_is_empty_for_unknown_municipality() {
    let server = setup_server();

    let ars = server.read_ars_resource("ars://codes/Atlantis").await.unwrap();
    assert_eq!(ars, "");
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_resource_is_an_error() {
    let server = setup_server();

    let result = server.read_ars_resource("ars://nothing").await;
    assert!(result.is_err());
}

#[tokio::test(flavor = "multi_thread")]
async fn ars_lookup_prompt_includes_query() {
    let server = setup_server();

    let text = prompt_text(
        &server
            .ars_lookup(Parameters(ArsLookupArgs {
                query: Some("Bonn".to_string()),
            }))
            .await,
    );
    assert!(text.contains(ARS_CODES_URI));
    assert!(text.contains("Suche in den Daten nach: Bonn"));

    let text = prompt_text(&server.ars_lookup(Parameters(ArsLookupArgs::default())).await);
    assert!(text.contains("Suche in den Daten nach: \n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn emergency_prompt_names_the_country() {
    let server = setup_server();

    let text = prompt_text(
        &server
            .emergency_warnings(Parameters(EmergencyWarningsArgs {
                country: "Deutschland".to_string(),
            }))
            .await,
    );
    assert!(text.starts_with("Prüfe auf Notfall-Warnungen für alle Mitarbeiter am Standort Deutschland!"));
    assert!(text.contains("find_ars_code"));
    assert!(text.contains("get_regional_warnings"));
}

#[test]
fn resources_advertise_their_format() {
    assert_eq!(ars_mime_type(ARS_CODES_URI), "application/json");
    assert_eq!(ars_mime_type("ars://codes/Berlin"), "text/plain");
}
