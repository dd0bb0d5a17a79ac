use std::fmt;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{GoogleEngine, Translator};
use crate::config::DeepLSettings;
use crate::error::EngineError;

pub const DEEPL_DEFAULT_ENDPOINT: &str = "https://api-free.deepl.com/v2/translate";

#[derive(Debug, Deserialize)]
struct DeepLResponse {
    translations: Vec<DeepLTranslation>,
}

#[derive(Debug, Deserialize)]
struct DeepLTranslation {
    text: String,
}

/// `DeepL` REST API with XML tag handling.
///
/// Falls back to [`GoogleEngine`] whenever a request does not succeed.
pub struct DeepLEngine {
    client: Client,
    endpoint: String,
    api_key: String,
    fallback: GoogleEngine,
}

impl fmt::Debug for DeepLEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepLEngine")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"***")
            .finish_non_exhaustive()
    }
}

impl DeepLEngine {
    pub fn new(settings: &DeepLSettings, fallback: GoogleEngine) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            fallback,
        })
    }

    async fn request(&self, text: &str, source: &str, target: &str) -> Result<String, EngineError> {
        let source = source.to_uppercase();
        let target = target.to_uppercase();
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&[
                ("text", text),
                ("source_lang", source.as_str()),
                ("target_lang", target.as_str()),
                ("tag_handling", "xml"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::Status { status, body });
        }

        let parsed: DeepLResponse = response.json().await?;
        parsed
            .translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or_else(|| EngineError::Response("no translations in response".to_string()))
    }
}

#[async_trait]
impl Translator for DeepLEngine {
    async fn translate(&self, text: &str, source: &str, target: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        match self.request(text, source, target).await {
            Ok(translated) => translated,
            Err(e) => {
                log::warn!("DeepL request failed, falling back to Google: {e}");
                self.fallback
                    .translate(text, &source.to_lowercase(), &target.to_lowercase())
                    .await
            }
        }
    }

    fn name(&self) -> &str {
        "deepl"
    }
}
