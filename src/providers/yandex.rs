use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Default Yandex Cloud Translate v2 endpoint
const DEFAULT_ENDPOINT: &str = "https://translate.api.cloud.yandex.net/translate/v2/translate";

/// Yandex client for interacting with the Cloud Translate API
pub struct YandexTranslate {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Cloud folder the requests are billed against
    folder_id: String,
    /// API endpoint URL (optional, defaults to the public API)
    endpoint: String,
    /// Source language code
    source_language: String,
    /// Target language code
    target_language: String,
}

impl std::fmt::Debug for YandexTranslate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YandexTranslate")
            .field("folder_id", &self.folder_id)
            .field("endpoint", &self.endpoint)
            .field("source_language", &self.source_language)
            .field("target_language", &self.target_language)
            .finish()
    }
}

/// Yandex translate request
#[derive(Debug, Serialize)]
pub struct YandexRequest<'a> {
    /// Folder identifier for billing and quota
    #[serde(rename = "folderId")]
    folder_id: &'a str,

    /// Language the texts are written in
    #[serde(rename = "sourceLanguageCode")]
    source_language_code: &'a str,

    /// Language to translate into
    #[serde(rename = "targetLanguageCode")]
    target_language_code: &'a str,

    /// The texts to translate, in order
    texts: &'a [String],
}

/// Yandex translate response
#[derive(Debug, Deserialize)]
pub struct YandexResponse {
    /// Translations in request order
    pub translations: Vec<YandexTranslation>,
}

/// Individual translation in a Yandex response
#[derive(Debug, Deserialize)]
pub struct YandexTranslation {
    /// The translated text
    pub text: String,
}

impl YandexTranslate {
    /// Create a new Yandex client
    pub fn new(
        api_key: impl Into<String>,
        folder_id: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            folder_id: folder_id.into(),
            endpoint: String::new(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }

    /// Override the API endpoint (for self-hosted gateways and tests)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn api_url(&self) -> String {
        if self.endpoint.is_empty() {
            DEFAULT_ENDPOINT.to_string()
        } else {
            self.endpoint.clone()
        }
    }
}

#[async_trait]
impl Provider for YandexTranslate {
    async fn translate_batch(&self, texts: &[String]) -> Result<Vec<String>, ProviderError> {
        let request = YandexRequest {
            folder_id: &self.folder_id,
            source_language_code: &self.source_language,
            target_language_code: &self.target_language,
            texts,
        };

        let response = self
            .client
            .post(self.api_url())
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Api-Key {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(ProviderError::RateLimitExceeded(format!(
                "{} from {}",
                status,
                self.api_url()
            )));
        }
        if status.as_u16() == 401 || status.as_u16() == 403 {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(ProviderError::AuthenticationError(error_text));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Yandex API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let parsed = response
            .json::<YandexResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(parsed
            .translations
            .into_iter()
            .map(|t| t.text)
            .collect())
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let probe = vec!["".to_string()];
        self.translate_batch(&probe).await.map(|_| ())
    }
}
