#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use safar_rs::{
    services::wire::{GenerateContentRequest, GenerateContentResponse},
    ModelCall, ModelTransport, TransportError,
};
use serde_json::{json, Value};

/// Reply envelope with a single text candidate.
pub fn text_reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}

pub fn kyoto_itinerary(days: u32) -> Value {
    let themes = [
        "Arrival & Gion District",
        "Temples of Higashiyama",
        "Arashiyama & Departure",
    ];
    let day_entries: Vec<Value> = (1..=days)
        .map(|day| {
            json!({
                "day": day,
                "theme": themes[(day as usize - 1) % themes.len()],
                "activities": [
                    {"time": "09:00", "description": "Morning walk", "location": "Kyoto"},
                    {"time": "19:00", "description": "Kaiseki dinner"}
                ]
            })
        })
        .collect();

    json!({
        "destination": "Kyoto",
        "duration": format!("{days} days"),
        "summary": "Temples, gardens and food.",
        "days": day_entries
    })
}

/// In-process transport that plays back queued results and records requests.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<GenerateContentResponse, TransportError>>>,
    requests: Mutex<Vec<Value>>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, body: Value) -> Self {
        let parsed = serde_json::from_value(body).expect("valid response envelope");
        self.replies.lock().unwrap().push_back(Ok(parsed));
        self
    }

    pub fn fail(self, err: TransportError) -> Self {
        self.replies.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelTransport for ScriptedTransport {
    async fn generate_content(
        &self,
        _call: &ModelCall<'_>,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push(serde_json::to_value(request).unwrap());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Status {
                status: 500,
                message: "script exhausted".to_string(),
            }))
    }
}

/// Shares one scripted transport between the assistant and the test body.
#[derive(Debug, Clone)]
pub struct Shared(pub std::sync::Arc<ScriptedTransport>);

#[async_trait]
impl ModelTransport for Shared {
    async fn generate_content(
        &self,
        call: &ModelCall<'_>,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, TransportError> {
        self.0.generate_content(call, request).await
    }
}
