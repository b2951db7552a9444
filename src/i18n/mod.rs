//! Language normalization.
//!
//! Requests may name languages by code ("ko") or by name ("한국어", "Korean").
//! Both lookups are total: unknown tokens pass through unchanged and are left
//! for the backend to accept or reject.
//!
//! # Example
//!
//! ```rust
//! use translation_gateway::i18n::{to_code, to_display_name};
//!
//! assert_eq!(to_code("한국어"), "ko");
//! assert_eq!(to_display_name("ko"), "Korean");
//! assert_eq!(to_code("tlh"), "tlh");
//! ```

mod language;
mod registry;

pub use language::{to_code, to_display_name};
pub use registry::{LanguageConfig, LanguageRegistry};
