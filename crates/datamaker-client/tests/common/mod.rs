#![allow(dead_code)]

use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use datamaker_client::{
    ClientOptions, DataMaker, HttpRequest, HttpResponse, Transport, TransportError,
};

pub const BASE_URL: &str = "https://datamaker.test/api";
pub const API_KEY: &str = "dm-test-key";

type Responder =
    Box<dyn Fn(&HttpRequest, usize) -> Result<HttpResponse, TransportError> + Send + Sync>;

/// In-process transport that records every request and answers through a closure.
///
/// The closure receives the request and its zero-based position in the call log.
pub struct RecordingTransport {
    responder: Responder,
    calls: Mutex<Vec<HttpRequest>>,
}

impl RecordingTransport {
    pub fn new<F>(responder: F) -> Arc<Self>
    where
        F: Fn(&HttpRequest, usize) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<HttpRequest> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

impl fmt::Debug for RecordingTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingTransport").finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let position = {
            let mut calls = self.calls.lock().expect("calls lock");
            calls.push(request.clone());
            calls.len() - 1
        };
        (self.responder)(&request, position)
    }
}

pub fn options() -> ClientOptions {
    ClientOptions::default()
        .with_api_key(API_KEY)
        .with_base_url(BASE_URL)
}

pub fn client(transport: Arc<RecordingTransport>) -> DataMaker {
    DataMaker::with_transport(options(), transport).expect("client")
}

pub fn url(path: &str) -> String {
    format!("{BASE_URL}/{path}")
}

pub fn ok(body: serde_json::Value) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse::new(200, body))
}
