//! Contract tests for SmartyClient and HttpStreetAddressApi against a
//! wiremock stand-in for the US Street Address API.
//!
//! ## Endpoints Tested
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET    | `/street-address` | `street_address_*`, `http_adapter_*` |
//!
//! ## Note on `spawn_blocking`
//!
//! `HttpStreetAddressApi::verify` is synchronous and uses `Handle::block_on`
//! internally, which cannot run on a runtime worker thread. Sync adapter
//! calls are wrapped in `tokio::task::spawn_blocking`.

use addrv_smarty::{
    ApiErrorCode, HttpStreetAddressApi, SmartyClient, SmartyConfig, StreetAddressApi,
    StreetAddressRequest, StreetApiError,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer) -> SmartyConfig {
    SmartyConfig::local_mock(&server.uri(), "test-id", "test-token").unwrap()
}

fn main_street() -> StreetAddressRequest {
    StreetAddressRequest {
        street: "123 Main".into(),
        street2: String::new(),
        city: "Anytown".into(),
        state: "CA".into(),
        zipcode: "90210".into(),
        addressee: String::new(),
    }
}

fn main_street_candidate() -> serde_json::Value {
    serde_json::json!([{
        "input_index": 0,
        "candidate_index": 0,
        "delivery_line_1": "123 Main St",
        "last_line": "Anytown CA 90210-1234",
        "components": {
            "primary_number": "123",
            "street_name": "Main",
            "street_suffix": "St",
            "city_name": "Anytown",
            "state_abbreviation": "CA",
            "zipcode": "90210",
            "plus4_code": "1234"
        },
        "metadata": {"record_type": "S"},
        "analysis": {"dpv_match_code": "Y"}
    }])
}

// ── GET /street-address ──────────────────────────────────────────────

#[tokio::test]
async fn street_address_sends_credentials_and_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/street-address"))
        .and(query_param("auth-id", "test-id"))
        .and(query_param("auth-token", "test-token"))
        .and(query_param("candidates", "1"))
        .and(query_param("street", "123 Main"))
        .and(query_param("city", "Anytown"))
        .and(query_param("state", "CA"))
        .and(query_param("zipcode", "90210"))
        .respond_with(ResponseTemplate::new(200).set_body_json(main_street_candidate()))
        .expect(1)
        .mount(&server)
        .await;

    let client = SmartyClient::new(test_config(&server)).unwrap();
    let candidates = client.street_address(&main_street()).await.unwrap();

    assert_eq!(candidates.len(), 1);
    let c = &candidates[0];
    assert_eq!(c.delivery_line_1.as_deref(), Some("123 Main St"));
    assert_eq!(c.components.street_suffix.as_deref(), Some("St"));
    assert_eq!(c.components.plus4_code.as_deref(), Some("1234"));
}

#[tokio::test]
async fn street_address_omits_blank_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/street-address"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = SmartyClient::new(test_config(&server)).unwrap();
    client.street_address(&main_street()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let keys: Vec<String> = requests[0]
        .url
        .query_pairs()
        .map(|(k, _)| k.into_owned())
        .collect();
    assert!(!keys.contains(&"street2".to_string()));
    assert!(!keys.contains(&"addressee".to_string()));
    assert!(keys.contains(&"street".to_string()));
}

#[tokio::test]
async fn street_address_requests_configured_candidate_count() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/street-address"))
        .and(query_param("candidates", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = SmartyClient::new(test_config(&server).with_max_candidates(5)).unwrap();
    let candidates = client.street_address(&main_street()).await.unwrap();
    assert!(candidates.is_empty());
}

#[tokio::test]
async fn street_address_returns_empty_list_for_no_match() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/street-address"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = SmartyClient::new(test_config(&server)).unwrap();
    let candidates = client.street_address(&main_street()).await.unwrap();
    assert!(candidates.is_empty());
}

#[tokio::test]
async fn street_address_maps_400_to_bad_input() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/street-address"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string("Bad Request (Malformed Payload)"),
        )
        .mount(&server)
        .await;

    let client = SmartyClient::new(test_config(&server)).unwrap();
    let err = client.street_address(&main_street()).await.unwrap_err();

    assert!(err.is_bad_input());
    match err {
        StreetApiError::Api { status, body, .. } => {
            assert_eq!(status, 400);
            assert!(body.contains("Malformed"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn street_address_maps_401_to_invalid_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/street-address"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let client = SmartyClient::new(test_config(&server)).unwrap();
    let err = client.street_address(&main_street()).await.unwrap_err();

    assert!(!err.is_bad_input());
    assert_eq!(err.code(), Some(ApiErrorCode::InvalidCredentials));
}

#[tokio::test]
async fn street_address_maps_server_errors_to_other() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/street-address"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = SmartyClient::new(test_config(&server)).unwrap();
    let err = client.street_address(&main_street()).await.unwrap_err();
    assert_eq!(err.code(), Some(ApiErrorCode::Other(503)));
}

#[tokio::test]
async fn street_address_reports_malformed_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/street-address"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = SmartyClient::new(test_config(&server)).unwrap();
    let err = client.street_address(&main_street()).await.unwrap_err();
    assert!(matches!(err, StreetApiError::Deserialization { .. }));
}

#[tokio::test]
async fn street_address_transport_error_hides_credentials() {
    // Port 1 is closed: connection refused.
    let cfg = SmartyConfig::local_mock("http://127.0.0.1:1", "test-id", "secret-token").unwrap();
    let client = SmartyClient::new(cfg).unwrap();
    let err = client.street_address(&main_street()).await.unwrap_err();

    assert!(matches!(err, StreetApiError::Http { .. }));
    assert!(!err.to_string().contains("secret-token"));
}

// ── Blocking adapter ────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn http_adapter_verifies_on_ambient_runtime() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/street-address"))
        .respond_with(ResponseTemplate::new(200).set_body_json(main_street_candidate()))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = HttpStreetAddressApi::new(test_config(&server)).unwrap();
    let candidates = tokio::task::spawn_blocking(move || adapter.verify(&main_street()))
        .await
        .expect("task")
        .expect("verify");

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].components.city_name.as_deref(), Some("Anytown"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn http_adapter_propagates_api_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/street-address"))
        .respond_with(ResponseTemplate::new(402).set_body_string("Payment Required"))
        .mount(&server)
        .await;

    let adapter = HttpStreetAddressApi::new(test_config(&server)).unwrap();
    let err = tokio::task::spawn_blocking(move || adapter.verify(&main_street()))
        .await
        .expect("task")
        .unwrap_err();

    assert_eq!(err.code(), Some(ApiErrorCode::PaymentRequired));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn http_adapter_with_owned_runtime_works_from_plain_thread() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/street-address"))
        .respond_with(ResponseTemplate::new(200).set_body_json(main_street_candidate()))
        .expect(1)
        .mount(&server)
        .await;

    let cfg = test_config(&server);
    let candidates = tokio::task::spawn_blocking(move || {
        std::thread::spawn(move || {
            let adapter = HttpStreetAddressApi::with_runtime(cfg).expect("adapter");
            adapter.verify(&main_street())
        })
        .join()
        .expect("thread")
    })
    .await
    .expect("task")
    .expect("verify");

    assert_eq!(candidates.len(), 1);
}
