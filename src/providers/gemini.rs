// Google Gemini implementation of both collaborators
//
// Uses the generateContent endpoint with a JSON response schema, so the
// reply text is the JSON document itself.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use super::prompts::{
    inversion_prompt, roadmap_prompt, INVERSION_SYSTEM_INSTRUCTION, ROADMAP_SYSTEM_INSTRUCTION,
};
use super::schema::{inversion_schema, roadmap_schema};
use super::wire::{parse_inversion, parse_roadmap};
use super::{DecisionInverter, GenerationFailure, RoadmapGenerator};
use crate::config::constants::{DEFAULT_GEMINI_MODEL, GEMINI_BASE_URL, REQUEST_TIMEOUT_SECS};
use crate::config::GeminiSettings;
use crate::roadmap::{DecisionBrief, DoomLevel, InversionPair, RoadmapResult};

/// Google Gemini API provider
#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    /// Create a provider with the default model and endpoint
    pub fn new(api_key: String) -> Result<Self> {
        Self::build(
            api_key,
            DEFAULT_GEMINI_MODEL.to_string(),
            GEMINI_BASE_URL.to_string(),
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        )
    }

    /// Create a provider from resolved settings
    pub fn from_settings(settings: &GeminiSettings) -> Result<Self> {
        Self::build(
            settings.api_key.clone(),
            settings.model.clone(),
            settings.base_url.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    fn build(api_key: String, model: String, base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Use a different model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point at a different API root (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(
        system_instruction: &str,
        prompt: String,
        schema: Value,
        temperature: Option<f32>,
    ) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart { text: prompt }],
            }],
            system_instruction: GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: system_instruction.to_string(),
                }],
            },
            generation_config: GeminiGenerationConfig {
                temperature,
                response_mime_type: "application/json".to_string(),
                response_schema: schema,
            },
        }
    }

    /// Send one request and return the concatenated candidate text
    async fn generate(&self, request: &GeminiRequest) -> Result<String, GenerationFailure> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        tracing::debug!("Sending request to Gemini API: {:?}", request);

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationFailure::Api {
                status: status.as_u16(),
                body,
            });
        }

        let gemini_response: GeminiResponse = response.json().await?;
        tracing::debug!("Received response: {:?}", gemini_response);

        let text: String = gemini_response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts.into_iter().map(|part| part.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GenerationFailure::EmptyResponse);
        }
        Ok(text)
    }
}

/// Roadmap temperature follows the doom level, 1 -> 0.1 up to 10 -> 1.0
pub fn roadmap_temperature(doom_level: DoomLevel) -> f32 {
    f32::from(doom_level.get()) / 10.0
}

#[async_trait]
impl RoadmapGenerator for GeminiProvider {
    async fn generate_roadmap(
        &self,
        idea: &str,
        doom_level: DoomLevel,
    ) -> Result<RoadmapResult, GenerationFailure> {
        let request = Self::build_request(
            ROADMAP_SYSTEM_INSTRUCTION,
            roadmap_prompt(idea, doom_level),
            roadmap_schema(),
            Some(roadmap_temperature(doom_level)),
        );
        let text = self.generate(&request).await?;
        parse_roadmap(&text)
    }
}

#[async_trait]
impl DecisionInverter for GeminiProvider {
    async fn invert_decisions(
        &self,
        items: &[DecisionBrief],
    ) -> Result<Vec<InversionPair>, GenerationFailure> {
        let request = Self::build_request(
            INVERSION_SYSTEM_INSTRUCTION,
            inversion_prompt(items),
            inversion_schema(),
            None,
        );
        let text = self.generate(&request).await?;
        parse_inversion(&text)
    }
}

// Gemini API types

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    system_instruction: GeminiContent,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Clone, Deserialize)]
#[allow(dead_code)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}
