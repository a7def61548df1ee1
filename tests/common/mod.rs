//! Scripted provider doubles shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::json;
use tokio::time::Instant;

use chairside::api::{
    GenerateContentRequest, GenerateContentResponse, VideoJobRequest, VideoOperation,
};
use chairside::video::CredentialGate;
use chairside::{GatewayError, ProviderApi};

/// One scripted reply. `Hang` parks the call forever, for re-entrancy tests.
pub enum Scripted<T> {
    Ok(T),
    Err(GatewayError),
    Hang,
}

impl<T> Scripted<T> {
    async fn resolve(self, call: &str) -> Result<T, GatewayError> {
        match self {
            Scripted::Ok(value) => Ok(value),
            Scripted::Err(err) => Err(err),
            Scripted::Hang => {
                std::future::pending::<()>().await;
                unreachable!("{call} woke from pending")
            }
        }
    }
}

#[derive(Default)]
struct StubState {
    generate: VecDeque<Scripted<GenerateContentResponse>>,
    submit: VecDeque<Scripted<VideoOperation>>,
    poll: VecDeque<Scripted<VideoOperation>>,
    download: VecDeque<Scripted<Bytes>>,

    generate_requests: Vec<GenerateContentRequest>,
    submit_requests: Vec<VideoJobRequest>,
    submit_instant: Option<Instant>,
    poll_names: Vec<String>,
    poll_instants: Vec<Instant>,
    download_uris: Vec<String>,
}

/// A deterministic [`ProviderApi`] fed from per-call reply queues. Calls with
/// an empty queue panic; the tests script exactly what they expect.
#[derive(Clone, Default)]
pub struct StubProvider {
    state: Arc<Mutex<StubState>>,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_generate(&self, reply: Scripted<GenerateContentResponse>) {
        self.state.lock().unwrap().generate.push_back(reply);
    }

    pub fn script_submit(&self, reply: Scripted<VideoOperation>) {
        self.state.lock().unwrap().submit.push_back(reply);
    }

    pub fn script_poll(&self, reply: Scripted<VideoOperation>) {
        self.state.lock().unwrap().poll.push_back(reply);
    }

    pub fn script_download(&self, reply: Scripted<Bytes>) {
        self.state.lock().unwrap().download.push_back(reply);
    }

    pub fn generate_requests(&self) -> Vec<GenerateContentRequest> {
        self.state.lock().unwrap().generate_requests.clone()
    }

    pub fn submit_requests(&self) -> Vec<VideoJobRequest> {
        self.state.lock().unwrap().submit_requests.clone()
    }

    pub fn submit_instant(&self) -> Option<Instant> {
        self.state.lock().unwrap().submit_instant
    }

    pub fn poll_names(&self) -> Vec<String> {
        self.state.lock().unwrap().poll_names.clone()
    }

    pub fn poll_instants(&self) -> Vec<Instant> {
        self.state.lock().unwrap().poll_instants.clone()
    }

    pub fn download_uris(&self) -> Vec<String> {
        self.state.lock().unwrap().download_uris.clone()
    }
}

#[async_trait]
impl ProviderApi for StubProvider {
    async fn generate(
        &self,
        _model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GatewayError> {
        let reply = {
            let mut state = self.state.lock().unwrap();
            state.generate_requests.push(request);
            state.generate.pop_front()
        };
        reply.expect("unexpected generate call").resolve("generate").await
    }

    async fn submit_video(
        &self,
        _model: &str,
        request: VideoJobRequest,
    ) -> Result<VideoOperation, GatewayError> {
        let reply = {
            let mut state = self.state.lock().unwrap();
            state.submit_requests.push(request);
            state.submit_instant = Some(Instant::now());
            state.submit.pop_front()
        };
        reply.expect("unexpected submit call").resolve("submit").await
    }

    async fn poll_video(&self, operation_name: &str) -> Result<VideoOperation, GatewayError> {
        let reply = {
            let mut state = self.state.lock().unwrap();
            state.poll_names.push(operation_name.to_string());
            state.poll_instants.push(Instant::now());
            state.poll.pop_front()
        };
        reply.expect("unexpected poll call").resolve("poll").await
    }

    async fn download(&self, uri: &str) -> Result<Bytes, GatewayError> {
        let reply = {
            let mut state = self.state.lock().unwrap();
            state.download_uris.push(uri.to_string());
            state.download.pop_front()
        };
        reply.expect("unexpected download call").resolve("download").await
    }
}

/// Credential surface double: a flag plus a selection counter. Opening the
/// picker always ends with a credential configured.
#[derive(Default)]
pub struct StubGate {
    has: AtomicBool,
    selections: AtomicU32,
}

impl StubGate {
    pub fn with_credential() -> Self {
        Self {
            has: AtomicBool::new(true),
            selections: AtomicU32::new(0),
        }
    }

    pub fn without_credential() -> Self {
        Self::default()
    }

    pub fn selections(&self) -> u32 {
        self.selections.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialGate for StubGate {
    async fn has_credential(&self) -> bool {
        self.has.load(Ordering::SeqCst)
    }

    async fn open_selection(&self) {
        self.selections.fetch_add(1, Ordering::SeqCst);
        self.has.store(true, Ordering::SeqCst);
    }
}

// --- wire-shape builders ---

pub fn model_text_response(text: &str) -> GenerateContentResponse {
    serde_json::from_value(json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]}
        }]
    }))
    .expect("stub response shape")
}

pub fn response_from(value: serde_json::Value) -> GenerateContentResponse {
    serde_json::from_value(value).expect("stub response shape")
}

pub fn operation(name: &str, done: bool, uri: Option<&str>) -> VideoOperation {
    let mut value = json!({"name": name, "done": done});
    if let Some(uri) = uri {
        value["response"] = json!({
            "generateVideoResponse": {
                "generatedSamples": [{"video": {"uri": uri}}]
            }
        });
    }
    serde_json::from_value(value).expect("stub operation shape")
}

pub fn entity_not_found() -> GatewayError {
    GatewayError::Provider {
        code: 404,
        message: "Requested entity was not found.".to_string(),
    }
}

pub fn transport_failure() -> GatewayError {
    GatewayError::Provider {
        code: 503,
        message: "backend unavailable".to_string(),
    }
}
