use anyhow::{Context, Result};

/// How the LLM prompts refer to languages inside the translated output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageReferences {
    /// Spell out full language names ("Korean"), never codes
    FullNames,
    /// Refer to languages by their short codes ("ko")
    Codes,
}

impl LanguageReferences {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "names" | "full_names" => Ok(Self::FullNames),
            "codes" => Ok(Self::Codes),
            other => anyhow::bail!(
                "Invalid LLM_LANGUAGE_REFERENCES: '{}'. Expected 'names' or 'codes'",
                other
            ),
        }
    }
}

pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_GOOGLE_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";
pub const DEEPL_FREE_API_URL: &str = "https://api-free.deepl.com/v2/translate";
pub const DEEPL_PRO_API_URL: &str = "https://api.deepl.com/v2/translate";

const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://localhost:4173",
    "http://localhost:5174",
    "https://mat-it-get-da.github.io",
];

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub request_timeout_secs: u64,

    // OpenAI
    pub openai_api_key: Option<String>,
    pub openai_api_url: String,
    pub post_editor_model: String,
    pub language_references: LanguageReferences,

    // Google Translate
    pub google_translate_url: String,

    // DeepL
    pub deepl_api_key: Option<String>,
    pub deepl_api_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let deepl_api_key = optional_var("DEEPL_API_KEY");
        let deepl_api_url = std::env::var("DEEPL_API_URL")
            .unwrap_or_else(|_| default_deepl_url(deepl_api_key.as_deref()).to_string());

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect());
        if cors_allowed_origins.iter().any(|origin| origin == "*") {
            anyhow::bail!(
                "CORS_ALLOWED_ORIGINS must list explicit origins; '*' cannot be used with credentials"
            );
        }

        Ok(Self {
            // Server
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8001".to_string())
                .parse()
                .context("PORT must be a valid port number")?,
            cors_allowed_origins,
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,

            // OpenAI
            openai_api_key: optional_var("OPENAI_API_KEY"),
            openai_api_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_API_URL.to_string()),
            post_editor_model: std::env::var("POST_EDITOR_MODEL")
                .unwrap_or_else(|_| "gpt-4o".to_string()),
            language_references: match std::env::var("LLM_LANGUAGE_REFERENCES") {
                Ok(v) => LanguageReferences::parse(&v)?,
                Err(_) => LanguageReferences::FullNames,
            },

            // Google Translate
            google_translate_url: std::env::var("GOOGLE_TRANSLATE_URL")
                .unwrap_or_else(|_| DEFAULT_GOOGLE_TRANSLATE_URL.to_string()),

            // DeepL
            deepl_api_key,
            deepl_api_url,
        })
    }
}

/// Read an env var, treating empty values as unset
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// DeepL free-tier keys end in ":fx" and are served from a separate host
fn default_deepl_url(api_key: Option<&str>) -> &'static str {
    match api_key {
        Some(key) if key.ends_with(":fx") => DEEPL_FREE_API_URL,
        _ => DEEPL_PRO_API_URL,
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
