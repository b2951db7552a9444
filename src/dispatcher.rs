use crate::config::Config;
use crate::error::TranslateError;
use crate::i18n::to_code;
use crate::models::{ModelProfile, ModelRegistry, ProviderFamily};
use crate::providers::{DeepLTranslator, GoogleTranslator, OpenAiTranslator, PostEditor};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// An inbound translation request. Languages may be codes or names.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
    #[serde(rename = "model")]
    pub model_id: String,
}

/// A completed translation with normalized language codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationResult {
    pub translated_text: String,
    #[serde(rename = "model")]
    pub model_id: String,
    pub source_lang: String,
    pub target_lang: String,
}

/// Which backends have the credentials they need
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BackendStatus {
    pub openai: bool,
    pub deepl: bool,
    pub google_translate: bool,
}

/// Routes requests to the adapter serving the requested model.
///
/// Holds no mutable state; one instance is shared by all requests.
pub struct Dispatcher {
    registry: &'static ModelRegistry,
    openai: Arc<OpenAiTranslator>,
    google: GoogleTranslator,
    deepl: Arc<DeepLTranslator>,
    post_editor: PostEditor,
}

impl Dispatcher {
    pub fn new(config: &Config, client: reqwest::Client) -> Self {
        let openai = Arc::new(OpenAiTranslator::new(client.clone(), config));
        let deepl = Arc::new(DeepLTranslator::new(client.clone(), config));
        let post_editor = PostEditor::new(
            Arc::clone(&deepl),
            Arc::clone(&openai),
            config.post_editor_model.clone(),
        );

        Self {
            registry: ModelRegistry::get(),
            openai,
            google: GoogleTranslator::new(client, config),
            deepl,
            post_editor,
        }
    }

    pub fn models(&self) -> &[ModelProfile] {
        self.registry.list()
    }

    pub fn backend_status(&self) -> BackendStatus {
        BackendStatus {
            openai: self.openai.is_configured(),
            deepl: self.deepl.is_configured(),
            google_translate: true,
        }
    }

    /// Translate a request with the backend its model belongs to.
    ///
    /// Unknown models fail before any backend is contacted. Adapter failures
    /// are returned unchanged; nothing is retried.
    pub async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, TranslateError> {
        let profile = self.registry.resolve(&request.model_id)?;

        let source = to_code(&request.source_lang);
        let target = to_code(&request.target_lang);

        info!(
            "Translating {} chars {} -> {} with {}",
            request.text.chars().count(),
            source,
            target,
            profile.id
        );

        let text = &request.text;
        let translated_text = match profile.provider_family {
            ProviderFamily::LlmChat => {
                self.openai
                    .translate(text, &source, &target, profile.id)
                    .await?
            }
            ProviderFamily::MachineTranslate => {
                self.google.translate(text, &source, &target).await?
            }
            ProviderFamily::NeuralTranslate => {
                self.deepl.translate(text, &source, &target).await?
            }
            ProviderFamily::Composite => {
                self.post_editor.translate(text, &source, &target).await?
            }
        };

        Ok(TranslationResult {
            translated_text,
            model_id: profile.id.to_string(),
            source_lang: source,
            target_lang: target,
        })
    }
}
