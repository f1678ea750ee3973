use datamaker_client::{
    ClientError, ClientOptions, DataMaker, HttpRequest, ReqwestTransport, Transport,
    TransportError,
};
use datamaker_core::{CustomEndpoint, Field, FieldKind, Headers, Template};
use http::Method;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn options_for(server: &MockServer) -> ClientOptions {
    ClientOptions::default()
        .with_api_key("dm-live-key")
        .with_base_url(format!("{}/api", server.uri()))
}

#[tokio::test]
async fn generation_round_trips_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/datamaker"))
        .and(header("Authorization", "dm-live-key"))
        .and(header("Content-Type", "application/json"))
        .and(query_param("workspace", "qa"))
        .and(body_json(json!({
            "fields": [{"name": "email", "type": "E-Mail"}],
            "quantity": 1
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"email": "a@b.test"}])))
        .expect(1)
        .mount(&server)
        .await;

    let datamaker = DataMaker::new(options_for(&server).with_default_query("workspace", "qa"))
        .expect("client");
    let template = Template::new(vec![Field::new("email", FieldKind::Email)]);

    let records = datamaker.generate(&template).await.expect("generate");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["email"], "a@b.test");
}

#[tokio::test]
async fn export_reaches_custom_endpoint_with_its_headers() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/hooks/users"))
        .and(header("X-Token", "abc"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"stored": true})))
        .expect(2)
        .mount(&server)
        .await;

    let datamaker = DataMaker::new(options_for(&server)).expect("client");
    let mut headers = Headers::new();
    headers.insert("X-Token".to_string(), "abc".to_string());
    let endpoint =
        CustomEndpoint::new(format!("{}/hooks/users", server.uri()), "put").with_headers(headers);

    let results = datamaker
        .export_to_api(endpoint, &[json!({"id": 1}), json!({"id": 2})])
        .await
        .expect("export");

    assert_eq!(results, vec![json!({"stored": true}), json!({"stored": true})]);
}

#[tokio::test]
async fn error_status_is_reported_with_parsed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/templates"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "forbidden"})))
        .mount(&server)
        .await;

    let datamaker = DataMaker::new(options_for(&server)).expect("client");

    let err = datamaker.list_templates().await.expect_err("status");

    assert!(matches!(err, ClientError::Status { status: 403, .. }));
}

#[tokio::test]
async fn non_json_error_page_keeps_its_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/datamaker"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let datamaker = DataMaker::new(options_for(&server)).expect("client");
    let template = Template::new(vec![Field::new("email", FieldKind::Email)]);

    let err = datamaker.generate(&template).await.expect_err("status");

    match err {
        ClientError::Status { status, body, .. } => {
            assert_eq!(status, 502);
            assert_eq!(body, json!("<html>bad gateway</html>"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn non_json_body_is_an_invalid_body_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let transport = ReqwestTransport::new(None).expect("transport");
    let request = HttpRequest {
        method: Method::GET,
        url: format!("{}/plain", server.uri()),
        headers: Headers::new(),
        query: Vec::new(),
        body: None,
    };

    let err = transport.send(request).await.expect_err("invalid body");

    assert!(matches!(err, TransportError::InvalidBody { .. }));
}

#[tokio::test]
async fn unreachable_host_is_a_request_error() {
    let server = MockServer::start().await;
    let url = format!("{}/gone", server.uri());
    drop(server);

    let transport = ReqwestTransport::new(None).expect("transport");
    let request = HttpRequest {
        method: Method::POST,
        url,
        headers: Headers::new(),
        query: Vec::new(),
        body: Some(json!({"a": 1})),
    };

    let err = transport.send(request).await.expect_err("unreachable");

    assert!(matches!(err, TransportError::Request { .. }));
}
