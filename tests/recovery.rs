// tests/recovery.rs
//
// End-to-end coverage of the fetch-and-repair pipeline over the injected
// transport boundary: a RawPayload goes in, an envelope (or error) comes
// out. No network involved.

use nerevar_web::handlers::servers::build_list_response;
use nerevar_web::upstream::RawPayload;
use nerevar_web::utils::ApiError;

fn payload(status: u16, body: &str) -> RawPayload {
    RawPayload {
        status,
        body: body.to_string(),
    }
}

fn clean_three_server_document() -> String {
    let entry = |hostname: &str, players: u32| {
        format!(
            r#"{{"modname":"default","hostname":"{}","query_port":25565,"players":{},"max_players":16,"version":"0.8.1","passw":false,"last_update":1754295000}}"#,
            hostname, players
        )
    };
    format!(
        r#"{{"list servers":{{"51.195.4.1:25565":{},"88.99.12.7:25565":{},"140.82.5.9:25565":{}}}}}"#,
        entry("Balmora Expanse", 11),
        entry("Vvardenfell RP", 4),
        entry("Tamriel Rebuilt Test", 0)
    )
}

#[test]
fn ok_upstream_with_valid_json_yields_three_servers() {
    let response = build_list_response(&payload(200, &clean_three_server_document())).unwrap();

    assert!(response.success);
    assert_eq!(response.data.len(), 3);
    assert!(response.recovery.is_none());

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["data"].as_object().unwrap().len(), 3);
    assert_eq!(
        json["data"]["88.99.12.7:25565"]["hostname"],
        "Vvardenfell RP"
    );
    // Clean parses carry no recovery diagnostics at all.
    assert!(json.get("recovery").is_none());
    // JS-compatible ISO-8601 timestamp.
    let timestamp = json["timestamp"].as_str().unwrap();
    assert!(timestamp.ends_with('Z'));
    assert!(timestamp.contains('T'));
}

#[test]
fn non_2xx_upstream_is_an_upstream_error() {
    let err = build_list_response(&payload(502, "Bad Gateway")).unwrap_err();
    match err {
        ApiError::UpstreamUnavailable(msg) => assert!(msg.contains("502")),
        other => panic!("expected UpstreamUnavailable, got {:?}", other),
    }
}

#[test]
fn corrupt_entry_is_dropped_and_reported() {
    // Second entry carries unescaped quotes in its hostname.
    let raw = r#"{"list servers":{"51.195.4.1:25565":{"modname":"default","hostname":"Balmora Expanse","query_port":25565,"players":11,"max_players":16},"88.99.12.7:25565":{"modname":"default","hostname":"The "Best" Server","query_port":25565,"players":4,"max_players":16}}}"#;

    let response = build_list_response(&payload(200, raw)).unwrap();
    assert_eq!(response.data.len(), 1);
    assert!(response.data.contains_key("51.195.4.1:25565"));

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["recovery"]["strategy"], "entry_repair");
    assert_eq!(json["recovery"]["dropped_entries"], 1);
}

#[test]
fn shredded_payload_still_surfaces_probeable_servers() {
    let raw = r#"%% no wrapper here %% "188.40.33.2:25565": {"modname":"default" "hostname":"Mournhold",,"players":6 "max_players":20 ###} %%"#;

    let response = build_list_response(&payload(200, raw)).unwrap();
    assert_eq!(response.data.len(), 1);

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["recovery"]["strategy"], "permissive");
    assert_eq!(json["data"]["188.40.33.2:25565"]["hostname"], "Mournhold");
    assert_eq!(json["data"]["188.40.33.2:25565"]["players"], 6);
    // Fields the probes did not recover are absent, not null.
    assert!(json["data"]["188.40.33.2:25565"].get("version").is_none());
}

#[test]
fn unrecognizable_body_is_a_parse_error() {
    let err = build_list_response(&payload(200, "<html>maintenance</html>")).unwrap_err();
    assert!(matches!(err, ApiError::UnparsableServerData));
}
