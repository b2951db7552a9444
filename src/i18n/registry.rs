//! Language registry: the table behind language normalization.
//!
//! Initialized once with `OnceLock` and immutable afterwards.

use std::sync::OnceLock;

/// A language known to the gateway.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// Canonical short code (e.g., "ko", "en")
    pub code: &'static str,

    /// English display name (e.g., "Korean")
    pub name: &'static str,

    /// Native name as shown in the frontend (e.g., "한국어")
    pub native_name: &'static str,
}

pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language by its canonical code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get a language by its native or English name (exact match).
    pub fn get_by_name(&self, name: &str) -> Option<&LanguageConfig> {
        self.languages
            .iter()
            .find(|lang| lang.native_name == name || lang.name == name)
    }

    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }
}

fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "ko",
            name: "Korean",
            native_name: "한국어",
        },
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
        },
        LanguageConfig {
            code: "ja",
            name: "Japanese",
            native_name: "日本語",
        },
        LanguageConfig {
            code: "zh",
            name: "Chinese",
            native_name: "中文",
        },
        LanguageConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
        },
        LanguageConfig {
            code: "fr",
            name: "French",
            native_name: "Français",
        },
        LanguageConfig {
            code: "de",
            name: "German",
            native_name: "Deutsch",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LanguageRegistry::get();
        let registry2 = LanguageRegistry::get();

        // Should return the same instance (same memory address)
        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_korean() {
        let config = LanguageRegistry::get()
            .get_by_code("ko")
            .expect("Korean should be registered");

        assert_eq!(config.code, "ko");
        assert_eq!(config.name, "Korean");
        assert_eq!(config.native_name, "한국어");
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        assert!(LanguageRegistry::get().get_by_code("pt").is_none());
    }

    #[test]
    fn test_get_by_name_accepts_native_and_english_names() {
        let registry = LanguageRegistry::get();
        assert_eq!(registry.get_by_name("日本語").unwrap().code, "ja");
        assert_eq!(registry.get_by_name("Japanese").unwrap().code, "ja");
        assert!(registry.get_by_name("japanese").is_none());
    }

    #[test]
    fn test_list_all_contains_seven_languages() {
        let all = LanguageRegistry::get().list_all();

        assert_eq!(all.len(), 7);
        for code in ["ko", "en", "ja", "zh", "es", "fr", "de"] {
            assert!(all.iter().any(|lang| lang.code == code));
        }
    }

    #[test]
    fn test_no_code_collides_with_a_name() {
        // Normalization relies on codes never being mistaken for names
        let registry = LanguageRegistry::get();
        for lang in registry.list_all() {
            assert!(registry.get_by_name(lang.code).is_none());
        }
    }
}
