mod common;

use datamaker_client::{API_KEY_ENV, ClientError, ClientOptions, DataMaker, DEFAULT_BASE_URL};
use serde_json::json;

use common::{API_KEY, RecordingTransport, ok, options};

fn idle_transport() -> std::sync::Arc<RecordingTransport> {
    RecordingTransport::new(|_, _| ok(json!([])))
}

#[test]
fn missing_api_key_is_a_configuration_error() {
    let err = DataMaker::with_transport(ClientOptions::default(), idle_transport())
        .expect_err("missing key");

    assert!(matches!(err, ClientError::Configuration(_)));
    assert!(err.to_string().contains(API_KEY_ENV));
}

#[test]
fn blank_api_key_is_a_configuration_error() {
    let err = DataMaker::with_transport(ClientOptions::default().with_api_key("   "), idle_transport())
        .expect_err("blank key");

    assert!(matches!(err, ClientError::Configuration(_)));
}

#[test]
fn default_headers_carry_key_and_content_type() {
    let datamaker = DataMaker::with_transport(options(), idle_transport()).expect("client");

    assert_eq!(datamaker.api_key(), API_KEY);
    assert_eq!(datamaker.headers()["Authorization"], API_KEY);
    assert_eq!(datamaker.headers()["Content-Type"], "application/json");
    assert_eq!(datamaker.headers().len(), 2);
}

#[test]
fn caller_headers_override_builtin_ones() {
    let datamaker = DataMaker::with_transport(
        options()
            .with_default_header("Content-Type", "application/vnd.api+json")
            .with_default_header("X-Trace", "on"),
        idle_transport(),
    )
    .expect("client");

    assert_eq!(
        datamaker.headers()["Content-Type"],
        "application/vnd.api+json"
    );
    assert_eq!(datamaker.headers()["X-Trace"], "on");
    assert_eq!(datamaker.headers()["Authorization"], API_KEY);
}

#[test]
fn base_url_falls_back_to_public_api() {
    let datamaker = DataMaker::with_transport(
        ClientOptions::default().with_api_key(API_KEY),
        idle_transport(),
    )
    .expect("client");

    assert_eq!(datamaker.base_url(), DEFAULT_BASE_URL);
}

#[test]
fn debug_output_masks_the_api_key() {
    let datamaker = DataMaker::with_transport(options(), idle_transport()).expect("client");

    let rendered = format!("{datamaker:?}");

    assert!(!rendered.contains(API_KEY));
    assert!(rendered.contains("***"));
}

#[test]
fn reqwest_backed_client_builds_with_custom_timeout() {
    let mut configured = options();
    configured.timeout_ms = Some(2_500);
    configured.max_retries = Some(4);

    let datamaker = DataMaker::new(configured).expect("client");

    assert_eq!(datamaker.base_url(), common::BASE_URL);
}
