use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use super::{Translator, split_chars};
use crate::config::GoogleSettings;
use crate::error::EngineError;

pub const GOOGLE_DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Unauthenticated Google web endpoint (`client=gtx`).
///
/// Long inputs are cut into fixed-size character chunks that are translated
/// one after another and joined in order. A chunk that fails comes back
/// untranslated.
#[derive(Debug, Clone)]
pub struct GoogleEngine {
    client: Client,
    endpoint: String,
    chunk_size: usize,
}

impl GoogleEngine {
    pub fn new(settings: &GoogleSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            chunk_size: settings.chunk_size,
        })
    }

    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    async fn translate_chunk(
        &self,
        chunk: &str,
        source: &str,
        target: &str,
    ) -> Result<String, EngineError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", chunk),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::Status { status, body });
        }

        let value: Value = response.json().await?;
        parse_response(&value)
            .ok_or_else(|| EngineError::Response("unexpected response shape".to_string()))
    }
}

#[async_trait]
impl Translator for GoogleEngine {
    async fn translate(&self, text: &str, source: &str, target: &str) -> String {
        if text.trim().chars().count() < 2 {
            return text.to_string();
        }

        let mut translated = String::with_capacity(text.len());
        for chunk in split_chars(text, self.chunk_size) {
            match self.translate_chunk(chunk, source, target).await {
                Ok(result) => translated.push_str(&result),
                Err(EngineError::Status { status, .. })
                    if status == StatusCode::TOO_MANY_REQUESTS =>
                {
                    log::warn!("Google rate limit hit, keeping chunk untranslated");
                    translated.push_str(chunk);
                }
                Err(e) => {
                    log::warn!("Google translation failed, keeping chunk untranslated: {e}");
                    translated.push_str(chunk);
                }
            }
            // Brief pause between chunks to stay under the rate limit.
            if self.chunk_size > 0 && text.chars().count() > self.chunk_size {
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        }
        translated
    }

    fn name(&self) -> &str {
        "google"
    }
}

/// Joins the translated segments of a `[[[segment, original, ...], ...], ...]`
/// response.
pub(crate) fn parse_response(value: &Value) -> Option<String> {
    let segments = value.get(0)?.as_array()?;
    let mut out = String::new();
    for segment in segments {
        if let Some(text) = segment.get(0).and_then(Value::as_str) {
            out.push_str(text);
        }
    }
    Some(out)
}
