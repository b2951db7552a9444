//! Clients for the remote translation backends.
//!
//! Each adapter owns its backend's quirks (prompts, language-code casing,
//! error classification) and takes an injected `reqwest::Client`.

pub mod deepl;
pub mod google;
pub mod openai;
pub mod post_editor;

/// Source code that asks the backend to detect the language itself
pub const AUTO_DETECT: &str = "auto";

pub use deepl::DeepLTranslator;
pub use google::GoogleTranslator;
pub use openai::OpenAiTranslator;
pub use post_editor::PostEditor;
