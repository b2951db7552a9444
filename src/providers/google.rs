use crate::config::Config;
use crate::error::{Backend, TranslateError};
use tracing::debug;

/// Google Translate client using the public `gtx` endpoint
pub struct GoogleTranslator {
    client: reqwest::Client,
    api_url: String,
}

impl GoogleTranslator {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            api_url: config.google_translate_url.clone(),
        }
    }

    /// Translate `text` between canonical codes. `source` may be "auto".
    ///
    /// Codes are forwarded as-is; the endpoint accepts ISO-style short codes.
    pub async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        debug!("Translating with Google Translate ({} -> {})", source, target);

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| TranslateError::from_transport(Backend::GoogleTranslate, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranslateError::from_status(
                Backend::GoogleTranslate,
                status,
                &body,
                &format!("{} -> {}", source, target),
            ));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            TranslateError::failed(
                Backend::GoogleTranslate,
                format!("Failed to parse Google Translate response: {}", e),
            )
        })?;

        let translation = extract_translation(&json).ok_or_else(|| {
            TranslateError::failed(
                Backend::GoogleTranslate,
                "Google Translate returned an empty translation",
            )
        })?;

        Ok(translation)
    }
}

/// Concatenate the translated segments found at `[0][*][0]`.
///
/// Google splits longer inputs into one segment per sentence.
fn extract_translation(json: &serde_json::Value) -> Option<String> {
    let segments = json.get(0)?.as_array()?;

    let translation: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|v| v.as_str()))
        .collect();

    if translation.is_empty() {
        None
    } else {
        Some(translation)
    }
}
