use crate::config::{Config, LanguageReferences};
use crate::error::{Backend, TranslateError};
use crate::i18n::to_display_name;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sampling temperature for every translation call; translation needs little creativity
const TEMPERATURE: f32 = 0.3;

/// Output bound for direct translation. Longer inputs are truncated by the backend.
pub const TRANSLATE_MAX_TOKENS: u32 = 512;

/// Post-editing prompts carry the source and a draft, so they get a larger budget
pub const POST_EDIT_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

/// Chat-completion translator backed by the OpenAI API
pub struct OpenAiTranslator {
    client: reqwest::Client,
    api_key: Option<String>,
    api_url: String,
    language_references: LanguageReferences,
}

impl OpenAiTranslator {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            api_key: config.openai_api_key.clone(),
            api_url: config.openai_api_url.clone(),
            language_references: config.language_references,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Translate `text` from `source` to `target` (canonical codes) with `model`.
    pub async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
        model: &str,
    ) -> Result<String, TranslateError> {
        let source_ref = self.language_reference(source);
        let target_ref = self.language_reference(target);

        self.complete(
            model,
            build_translation_system_prompt(&source_ref, &target_ref, self.language_references),
            build_translation_user_prompt(text, &target_ref),
            TRANSLATE_MAX_TOKENS,
        )
        .await
    }

    /// Refine a machine translation of `text` into a more natural version.
    pub async fn post_edit(
        &self,
        text: &str,
        machine_translation: &str,
        source: &str,
        target: &str,
        model: &str,
    ) -> Result<String, TranslateError> {
        self.complete(
            model,
            build_post_edit_system_prompt(),
            build_post_edit_user_prompt(
                text,
                machine_translation,
                &to_display_name(source),
                &to_display_name(target),
            ),
            POST_EDIT_MAX_TOKENS,
        )
        .await
    }

    fn language_reference(&self, code: &str) -> String {
        match self.language_references {
            LanguageReferences::FullNames => to_display_name(code),
            LanguageReferences::Codes => code.to_string(),
        }
    }

    async fn complete(
        &self,
        model: &str,
        system_prompt: String,
        user_prompt: String,
        max_tokens: u32,
    ) -> Result<String, TranslateError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| TranslateError::AdapterNotConfigured {
                backend: Backend::OpenAi,
                reason: "OPENAI_API_KEY is not set".to_string(),
            })?;

        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: system_prompt,
                },
                Message {
                    role: "user".to_string(),
                    content: user_prompt,
                },
            ],
            max_tokens,
            temperature: TEMPERATURE,
        };

        debug!("Sending chat completion request to OpenAI (model: {})", model);

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| TranslateError::from_transport(Backend::OpenAi, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(TranslateError::from_status(
                Backend::OpenAi,
                status,
                &body,
                model,
            ));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            TranslateError::failed(
                Backend::OpenAi,
                format!("Failed to parse OpenAI response: {}", e),
            )
        })?;

        chat_response
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| {
                TranslateError::failed(Backend::OpenAi, "OpenAI response contained no choices")
            })
    }
}

fn build_translation_system_prompt(
    source: &str,
    target: &str,
    references: LanguageReferences,
) -> String {
    let reference_rule = match references {
        LanguageReferences::FullNames => {
            "If the output mentions any language, spell out its full name (e.g., \"Korean\"), never a language code."
        }
        LanguageReferences::Codes => {
            "If the output mentions any language, refer to it by its language code (e.g., \"ko\")."
        }
    };

    format!(
        "You are a professional translator. Translate the given text from {} to {}.\n\
         Provide ONLY the translated text without any explanations or additional comments.\n\
         {}",
        source, target, reference_rule
    )
}

fn build_translation_user_prompt(text: &str, target: &str) -> String {
    format!("Translate this text to {}:\n\n{}", target, text)
}

fn build_post_edit_system_prompt() -> String {
    r#"You are an expert post-editor specializing in refining machine translations.

<Goals>
1) Review and improve machine-translated text while preserving the original meaning
2) Ensure natural flow, cultural appropriateness, and linguistic accuracy
3) Maintain consistency with the source text
4) Produce polished, publication-ready translations
</Goals>

<Output Format>
Provide only the improved translation text without any explanations, notes, or additional commentary.
- Output must be in the target language only
- Do not include source text or comparison comments
- Focus on delivering the final, polished version
</Output Format>"#
        .to_string()
}

fn build_post_edit_user_prompt(
    text: &str,
    machine_translation: &str,
    source_name: &str,
    target_name: &str,
) -> String {
    format!(
        "Review and improve this machine translation.\n\n\
         Source Language: {source_name}\n\
         Target Language: {target_name}\n\n\
         Original Text:\n{text}\n\n\
         Machine Translation (DeepL NMT):\n{machine_translation}\n\n\
         Task: Carefully review the machine translation and improve it to make it more natural, \
         accurate, and culturally appropriate. Fix any awkward phrasing, grammatical errors, or \
         unnatural expressions. Output only the improved translation in {target_name}."
    )
}
