use std::sync::Arc;

use rand::Rng;
use tracing::{debug, error, info, warn};

use crate::{
    config::AssistantConfig,
    error::{Result, SafarError, TransportError},
    schemas::StructuredOutput,
    services::{
        prompts::{itinerary_prompt, system_instruction},
        wire::{Content, GenerateContentRequest, GenerateContentResponse},
        HttpTransport, ModelCall, ModelTransport,
    },
    types::{
        conversation::ChatTurn,
        itinerary::{Itinerary, ItineraryRequest},
        language::Language,
        response::decode_structured_response,
        search::GroundedAnswer,
    },
};

/// Adapter between the travel features and the remote text-generation model.
///
/// Holds configuration only. Each operation resolves the API key, issues one
/// exchange (more only if a retry policy is configured) and keeps nothing
/// afterwards, so one instance can serve any number of concurrent callers.
#[derive(Debug, Clone)]
pub struct TravelAssistant {
    config: AssistantConfig,
    transport: Arc<dyn ModelTransport>,
}

impl Default for TravelAssistant {
    fn default() -> Self {
        Self::new(AssistantConfig::default())
    }
}

impl TravelAssistant {
    pub fn new(config: AssistantConfig) -> Self {
        Self {
            config,
            transport: Arc::new(HttpTransport),
        }
    }

    pub fn from_env() -> Self {
        Self::new(AssistantConfig::from_env())
    }

    pub fn with_transport(mut self, transport: impl ModelTransport + 'static) -> Self {
        self.transport = Arc::new(transport);
        self
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Send `new_text` as the next user turn after `history`.
    ///
    /// Returns `Ok(None)` when the model replied without text; choosing what
    /// to show instead is up to the caller.
    pub async fn send_conversation_turn(
        &self,
        history: &[ChatTurn],
        new_text: &str,
        language: Language,
    ) -> Result<Option<String>> {
        let new_text = new_text.trim();
        if new_text.is_empty() {
            return Err(SafarError::InvalidRequest(
                "message must not be empty".to_string(),
            ));
        }

        let mut contents: Vec<Content> = history.iter().map(Content::from).collect();
        contents.push(Content::user(new_text));

        let request = GenerateContentRequest {
            contents,
            ..GenerateContentRequest::default()
        }
        .with_system_instruction(system_instruction(language));

        let response = self.exchange("chat", &request).await?;
        Ok(response.text().filter(|text| !text.is_empty()))
    }

    pub async fn generate_itinerary(
        &self,
        destination: &str,
        days: u32,
        language: Language,
    ) -> Result<Itinerary> {
        self.generate_itinerary_for(&ItineraryRequest::new(destination, days, language))
            .await
    }

    /// Ask for a plan of exactly `request.days` days and accept it only if it
    /// satisfies the `Itinerary` schema and the day numbering is `1..=days`.
    pub async fn generate_itinerary_for(&self, request: &ItineraryRequest) -> Result<Itinerary> {
        request.validate()?;

        let body = GenerateContentRequest::single_turn(itinerary_prompt(
            &request.destination,
            request.days,
            request.language,
        ))
        .with_response_schema(Itinerary::schema().response_schema().clone());

        let response = self.exchange("itinerary", &body).await?;
        if let Some(reason) = response.block_reason() {
            warn!(target: "safar::assistant", reason, "itinerary prompt was blocked");
        }

        let itinerary: Itinerary = decode_structured_response(response.text().as_deref())
            .map_err(|err| {
                warn!(target: "safar::assistant", destination = %request.destination, error = %err, "rejected itinerary reply");
                err
            })?;

        itinerary
            .check_day_sequence(request.days)
            .map_err(SafarError::MalformedStructure)?;

        info!(
            target: "safar::assistant",
            destination = %itinerary.destination,
            days = itinerary.days.len(),
            activities = itinerary.activity_count(),
            "itinerary generated"
        );
        Ok(itinerary)
    }

    /// Free-text query with web search enabled on the model side.
    pub async fn search_grounded(&self, query: &str) -> Result<GroundedAnswer> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SafarError::InvalidRequest(
                "query must not be empty".to_string(),
            ));
        }

        let request = GenerateContentRequest::single_turn(query).with_google_search();
        let response = self.exchange("search", &request).await?;

        Ok(GroundedAnswer {
            text: response.text(),
            citations: response.citations(),
        })
    }

    /// Run one logical exchange and collapse any transport failure into
    /// [`SafarError::Unavailable`] after logging it.
    async fn exchange(
        &self,
        operation: &'static str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        self.exchange_with_retry(operation, request)
            .await
            .map_err(|err| {
                error!(target: "safar::assistant", operation, error = %err, "model call failed");
                SafarError::from(err)
            })
    }

    async fn exchange_with_retry(
        &self,
        operation: &'static str,
        request: &GenerateContentRequest,
    ) -> std::result::Result<GenerateContentResponse, TransportError> {
        let policy = &self.config.retry;
        let mut attempt = 0;

        loop {
            // Re-read on every attempt; a key may appear or rotate between calls.
            let api_key = self.config.credentials.resolve()?;
            let call = ModelCall {
                api_key: &api_key,
                base_url: &self.config.base_url,
                model: &self.config.model,
                timeout: self.config.timeout,
            };

            match self.transport.generate_content(&call, request).await {
                Ok(response) => return Ok(response),
                Err(err) if err.is_transient() && attempt < policy.max_retries => {
                    attempt += 1;
                    let delay = with_jitter(policy.backoff(attempt));
                    warn!(
                        target: "safar::assistant",
                        operation,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "transient failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    debug!(target: "safar::assistant", operation, attempt, "giving up");
                    return Err(err);
                }
            }
        }
    }
}

/// Add up to 50% random jitter.
fn with_jitter(delay: std::time::Duration) -> std::time::Duration {
    let millis = delay.as_millis() as u64;
    if millis == 0 {
        return delay;
    }
    let extra = rand::thread_rng().gen_range(0..=millis / 2);
    std::time::Duration::from_millis(millis + extra)
}
