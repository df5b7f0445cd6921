use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::error::{DictionaryError, Result};
use crate::language_pair::LanguagePair;
use crate::user_config::Settings;

#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("translation service unreachable: {0}")]
    Unreachable(String),

    #[error("translation request timed out after {0:?}")]
    Timeout(Duration),

    #[error("translation service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("malformed translation response: {0}")]
    Malformed(String),
}

/// Remote translation service.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        pair: &LanguagePair,
        text: &str,
    ) -> std::result::Result<String, TranslationError>;

    /// Fails before any request is issued when the translator cannot work at all.
    fn check_ready(&self) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: [&'a str; 1],
    target: &'a str,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslationList,
}

#[derive(Debug, Deserialize)]
struct TranslationList {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Google Cloud Translation v2 client.
///
/// Only the target language is sent; the service detects the source.
pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl GoogleTranslator {
    pub fn new(settings: &Settings) -> Result<Self> {
        let timeout = settings.request_timeout();
        let client = reqwest::Client::builder()
            .user_agent(concat!("dictionary/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| {
                DictionaryError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            timeout,
        })
    }

    fn request_url(&self) -> std::result::Result<Url, TranslationError> {
        Url::parse_with_params(&self.endpoint, &[("key", self.api_key.as_str())])
            .map_err(|e| TranslationError::Unreachable(format!("invalid endpoint: {e}")))
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        pair: &LanguagePair,
        text: &str,
    ) -> std::result::Result<String, TranslationError> {
        let url = self.request_url()?;
        let body = TranslateRequest {
            q: [text],
            target: &pair.to,
            format: "text",
        };

        tracing::trace!(pair = %pair, chars = text.len(), "Requesting translation");

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranslationError::Timeout(self.timeout)
                } else {
                    TranslationError::Unreachable(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                TranslationError::Timeout(self.timeout)
            } else {
                TranslationError::Unreachable(e.without_url().to_string())
            }
        })?;

        parse_response(status, &bytes)
    }

    fn check_ready(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(DictionaryError::Configuration(
                "no API key configured; run `dict config set-key` or set DICT_API_KEY".into(),
            ));
        }
        Ok(())
    }
}

/// Extracts the first translation from a v2 response body.
fn parse_response(status: StatusCode, body: &[u8]) -> std::result::Result<String, TranslationError> {
    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorResponse>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| String::from_utf8_lossy(body).trim().to_string());
        return Err(TranslationError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    let parsed: TranslateResponse = serde_json::from_slice(body)
        .map_err(|e| TranslationError::Malformed(e.to_string()))?;

    let text = parsed
        .data
        .translations
        .into_iter()
        .next()
        .map(|t| t.translated_text)
        .ok_or_else(|| TranslationError::Malformed("no translations in response".into()))?;

    if text.trim().is_empty() {
        return Err(TranslationError::Malformed("empty translation".into()));
    }
    Ok(text)
}
