use crate::config::Config;
use crate::error::{Backend, TranslateError};
use crate::providers::AUTO_DETECT;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::{debug, info};

#[derive(Debug, Serialize)]
struct DeepLRequest<'a> {
    text: Vec<&'a str>,
    target_lang: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_lang: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeepLResponse {
    translations: Vec<DeepLTranslation>,
}

#[derive(Debug, Deserialize)]
struct DeepLTranslation {
    text: String,
}

/// Authenticated handle to the DeepL API, built on first use.
#[derive(Debug)]
struct DeepLClient {
    http: reqwest::Client,
    endpoint: String,
    auth_header: String,
}

/// DeepL neural machine translation
pub struct DeepLTranslator {
    http: reqwest::Client,
    api_key: Option<String>,
    api_url: String,
    client: OnceLock<DeepLClient>,
}

impl DeepLTranslator {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            api_key: config.deepl_api_key.clone(),
            api_url: config.deepl_api_url.clone(),
            client: OnceLock::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Translate `text` between canonical codes. `source` may be "auto".
    pub async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        let client = self.client()?;
        let request = DeepLRequest {
            text: vec![text],
            target_lang: rewrite_target_code(target),
            source_lang: source_code(source),
        };

        // Either code may be the one DeepL refuses, so errors name both
        let direction = format!(
            "{} -> {}",
            request.source_lang.as_deref().unwrap_or(AUTO_DETECT),
            request.target_lang
        );
        debug!("Translating with DeepL ({})", direction);

        let response = client
            .http
            .post(&client.endpoint)
            .header("Authorization", &client.auth_header)
            .json(&request)
            .send()
            .await
            .map_err(|e| TranslateError::from_transport(Backend::DeepL, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranslateError::from_status(
                Backend::DeepL,
                status,
                &body,
                &direction,
            ));
        }

        let deepl_response: DeepLResponse = response.json().await.map_err(|e| {
            TranslateError::failed(
                Backend::DeepL,
                format!("Failed to parse DeepL response: {}", e),
            )
        })?;

        deepl_response
            .translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or_else(|| {
                TranslateError::failed(Backend::DeepL, "DeepL response contained no translations")
            })
    }

    /// Initialize the client once; concurrent first calls share one instance.
    fn client(&self) -> Result<&DeepLClient, TranslateError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| TranslateError::AdapterNotConfigured {
                backend: Backend::DeepL,
                reason: "DEEPL_API_KEY is not set".to_string(),
            })?;

        Ok(self.client.get_or_init(|| {
            info!("✓ DeepL client initialized ({})", self.api_url);
            DeepLClient {
                http: self.http.clone(),
                endpoint: self.api_url.clone(),
                auth_header: format!("DeepL-Auth-Key {}", api_key),
            }
        }))
    }
}

/// DeepL wants upper-case target codes and regional variants for English and Portuguese
pub fn rewrite_target_code(code: &str) -> String {
    let upper = code.to_uppercase();
    match upper.as_str() {
        "EN" => "EN-US".to_string(),
        "PT" => "PT-BR".to_string(),
        _ => upper,
    }
}

/// Upper-cased source code, or `None` to let DeepL detect the language
fn source_code(code: &str) -> Option<String> {
    if code == AUTO_DETECT {
        None
    } else {
        Some(code.to_uppercase())
    }
}
