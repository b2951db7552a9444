use crate::error::TranslateError;
use crate::providers::{DeepLTranslator, OpenAiTranslator};
use std::sync::Arc;
use tracing::{info, warn};

/// Two-stage translator: DeepL draft, then an LLM post-editing pass.
///
/// A failed DeepL stage fails the request. A failed post-editing stage does
/// not: the DeepL draft is returned instead and the failure is logged.
pub struct PostEditor {
    deepl: Arc<DeepLTranslator>,
    openai: Arc<OpenAiTranslator>,
    model: String,
}

impl PostEditor {
    pub fn new(deepl: Arc<DeepLTranslator>, openai: Arc<OpenAiTranslator>, model: String) -> Self {
        Self {
            deepl,
            openai,
            model,
        }
    }

    pub async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        let draft = self.deepl.translate(text, source, target).await?;
        info!(
            "[Post-Editor] Step 1/2: DeepL draft ready ({} chars)",
            draft.chars().count()
        );

        info!("[Post-Editor] Step 2/2: post-editing with {}", self.model);
        match self
            .openai
            .post_edit(text, &draft, source, target, &self.model)
            .await
        {
            Ok(refined) => {
                info!("[Post-Editor] ✓ Post-editing complete");
                Ok(refined)
            }
            Err(e) => {
                warn!(
                    "[Post-Editor] Post-editing failed, returning DeepL draft: {}",
                    e
                );
                Ok(draft)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests_support::create_test_config;
    use crate::config::Config;
    use crate::error::Backend;
    use wiremock::{
        matchers::{body_partial_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn post_editor_for(config: &Config) -> PostEditor {
        let client = reqwest::Client::new();
        PostEditor::new(
            Arc::new(DeepLTranslator::new(client.clone(), config)),
            Arc::new(OpenAiTranslator::new(client, config)),
            config.post_editor_model.clone(),
        )
    }

    async fn mount_deepl(mock_server: &MockServer, template: ResponseTemplate, calls: u64) {
        Mock::given(method("POST"))
            .and(path("/v2/translate"))
            .respond_with(template)
            .expect(calls)
            .mount(mock_server)
            .await;
    }

    async fn mount_openai(mock_server: &MockServer, template: ResponseTemplate, calls: u64) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(template)
            .expect(calls)
            .mount(mock_server)
            .await;
    }

    fn deepl_ok(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "translations": [{ "detected_source_language": "EN", "text": text }]
        }))
    }

    fn openai_ok(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": text } }]
        }))
    }

    #[tokio::test]
    async fn test_both_stages_succeed_returns_refined_text() {
        let mock_server = MockServer::start().await;
        mount_deepl(&mock_server, deepl_ok("안녕, 세계!"), 1).await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o",
                "max_tokens": 1024
            })))
            .respond_with(openai_ok("안녕, 세상!"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = create_test_config(&mock_server.uri());
        let result = post_editor_for(&config)
            .translate("Hello, world!", "en", "ko")
            .await
            .expect("Should succeed");

        assert_eq!(result, "안녕, 세상!");
    }

    #[tokio::test]
    async fn test_stage_two_failure_returns_stage_one_output() {
        let mock_server = MockServer::start().await;
        mount_deepl(&mock_server, deepl_ok("안녕, 세계!"), 1).await;
        mount_openai(
            &mock_server,
            ResponseTemplate::new(500).set_body_string("Internal Server Error"),
            1,
        )
        .await;

        let config = create_test_config(&mock_server.uri());
        let result = post_editor_for(&config)
            .translate("Hello, world!", "en", "ko")
            .await;

        assert_eq!(result.expect("Stage-2 failure must be absorbed"), "안녕, 세계!");
    }

    #[tokio::test]
    async fn test_missing_llm_credential_returns_stage_one_output() {
        let mock_server = MockServer::start().await;
        mount_deepl(&mock_server, deepl_ok("안녕, 세계!"), 1).await;
        mount_openai(&mock_server, openai_ok("unused"), 0).await;

        let mut config = create_test_config(&mock_server.uri());
        config.openai_api_key = None;

        let result = post_editor_for(&config)
            .translate("Hello, world!", "en", "ko")
            .await;

        assert_eq!(result.expect("Should fall back to draft"), "안녕, 세계!");
    }

    #[tokio::test]
    async fn test_stage_one_failure_propagates_and_skips_stage_two() {
        let mock_server = MockServer::start().await;
        mount_deepl(
            &mock_server,
            ResponseTemplate::new(500).set_body_string("DeepL is down"),
            1,
        )
        .await;
        mount_openai(&mock_server, openai_ok("unused"), 0).await;

        let config = create_test_config(&mock_server.uri());
        let result = post_editor_for(&config)
            .translate("Hello, world!", "en", "ko")
            .await;

        match result {
            Err(TranslateError::BackendTranslationFailed { backend, message }) => {
                assert_eq!(backend, Backend::DeepL);
                assert!(message.contains("DeepL is down"));
            }
            other => panic!("Expected DeepL failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_stage_one_not_configured_propagates() {
        let mock_server = MockServer::start().await;
        mount_openai(&mock_server, openai_ok("unused"), 0).await;

        let mut config = create_test_config(&mock_server.uri());
        config.deepl_api_key = None;

        let result = post_editor_for(&config)
            .translate("Hello", "en", "ko")
            .await;

        assert!(matches!(
            result,
            Err(TranslateError::AdapterNotConfigured {
                backend: Backend::DeepL,
                ..
            })
        ));
    }
}
