//! Scripted in-process transport for unit tests.

use async_trait::async_trait;
use econ_core::{HttpTransport, ProviderRequest, ProviderResponse, TransportError};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Mutex;

/// One scripted reaction to a request.
#[derive(Debug, Clone)]
pub(crate) enum Step {
    TransportError,
    Throttled,
    Status(u16, &'static str),
    Body(String),
    /// Successful envelope with one data point per requested id, in order.
    Echo,
}

impl Step {
    pub(crate) fn ok(body: &str) -> Self {
        Self::Body(body.to_string())
    }
}

#[derive(Debug)]
pub(crate) struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    fallback: Option<Step>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            fallback: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn repeating(step: Step) -> Self {
        Self {
            steps: Mutex::new(VecDeque::new()),
            fallback: Some(step),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

pub(crate) fn requested_ids(request: &ProviderRequest) -> Vec<String> {
    let body: Value = serde_json::from_str(request.body.as_deref().unwrap_or("{}")).unwrap();
    body["seriesid"]
        .as_array()
        .map(|ids| {
            ids.iter()
                .filter_map(|id| id.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

pub(crate) fn echo_body(ids: &[String]) -> String {
    let series: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "seriesID": id,
                "data": [{
                    "year": "2024",
                    "period": "M01",
                    "periodName": "January",
                    "value": "1.0",
                    "footnotes": [{}]
                }]
            })
        })
        .collect();

    json!({
        "status": "REQUEST_SUCCEEDED",
        "responseTime": 12,
        "message": [],
        "Results": { "series": series }
    })
    .to_string()
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: &ProviderRequest) -> Result<ProviderResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());

        let step = self
            .steps
            .lock()
            .unwrap()
            .pop_front()
            .or_else(|| self.fallback.clone())
            .unwrap_or(Step::TransportError);

        match step {
            Step::TransportError => Err(TransportError("connection refused".to_string())),
            Step::Throttled => Ok(ProviderResponse::new(429, "Too Many Requests", "")),
            Step::Status(status, text) => Ok(ProviderResponse::new(status, text, "")),
            Step::Body(body) => Ok(ProviderResponse::new(200, "OK", body)),
            Step::Echo => Ok(ProviderResponse::new(
                200,
                "OK",
                echo_body(&requested_ids(request)),
            )),
        }
    }
}
