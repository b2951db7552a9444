//! Translation gateway: dispatches translation requests to OpenAI, Google
//! Translate, DeepL, or a DeepL + LLM post-editing pipeline.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod i18n;
pub mod models;
pub mod providers;
pub mod server;
