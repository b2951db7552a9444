//! Model registry: the fixed table of public model ids and their providers.
//!
//! Populated once on first access with `OnceLock` and read-only afterwards,
//! so it can be shared freely between concurrent requests.

use crate::error::TranslateError;
use std::sync::OnceLock;

/// Category of remote backend a model id is served by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderFamily {
    /// Chat-completion LLM (OpenAI)
    LlmChat,
    /// Machine translation API (Google Translate)
    MachineTranslate,
    /// Neural machine translation API (DeepL)
    NeuralTranslate,
    /// DeepL translation refined by an LLM post-editing pass
    Composite,
}

/// Metadata for a model exposed to clients.
#[derive(Debug, Clone)]
pub struct ModelProfile {
    /// Public model id used in requests (e.g., "gpt-4o-mini")
    pub id: &'static str,

    /// Human-readable name (e.g., "GPT-4o Mini")
    pub display_name: &'static str,

    pub description: &'static str,

    pub provider_family: ProviderFamily,
}

pub struct ModelRegistry {
    models: Vec<ModelProfile>,
}

static REGISTRY: OnceLock<ModelRegistry> = OnceLock::new();

impl ModelRegistry {
    /// Get the global model registry instance.
    pub fn get() -> &'static ModelRegistry {
        REGISTRY.get_or_init(|| ModelRegistry {
            models: default_models(),
        })
    }

    /// Look up a model by its public id.
    ///
    /// # Errors
    /// `TranslateError::ModelNotFound` if the id is not registered.
    pub fn resolve(&self, model_id: &str) -> Result<&ModelProfile, TranslateError> {
        self.models
            .iter()
            .find(|model| model.id == model_id)
            .ok_or_else(|| TranslateError::ModelNotFound {
                model_id: model_id.to_string(),
                available: self.ids().join(", "),
            })
    }

    /// All registered models, in table order.
    pub fn list(&self) -> &[ModelProfile] {
        &self.models
    }

    fn ids(&self) -> Vec<&'static str> {
        self.models.iter().map(|model| model.id).collect()
    }
}

fn default_models() -> Vec<ModelProfile> {
    vec![
        ModelProfile {
            id: "gpt-3.5-turbo",
            display_name: "GPT-3.5 Turbo",
            description: "OpenAI's cost-effective model with fast responses",
            provider_family: ProviderFamily::LlmChat,
        },
        ModelProfile {
            id: "gpt-4o-mini",
            display_name: "GPT-4o Mini",
            description: "OpenAI's fast and affordable model, well suited to translation",
            provider_family: ProviderFamily::LlmChat,
        },
        ModelProfile {
            id: "gpt-4o",
            display_name: "GPT-4o",
            description: "OpenAI's most capable model for the highest quality translations",
            provider_family: ProviderFamily::LlmChat,
        },
        ModelProfile {
            id: "google-translate",
            display_name: "Google Translate",
            description: "Google machine translation with automatic source detection",
            provider_family: ProviderFamily::MachineTranslate,
        },
        ModelProfile {
            id: "deepl-nmt",
            display_name: "DeepL NMT",
            description: "DeepL neural machine translation with natural phrasing",
            provider_family: ProviderFamily::NeuralTranslate,
        },
        ModelProfile {
            id: "deepl-gpt4o-post-editor",
            display_name: "DeepL + GPT-4o Post-Editor",
            description: "DeepL first pass refined by GPT-4o for fluency and cultural fit",
            provider_family: ProviderFamily::Composite,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = ModelRegistry::get();
        let registry2 = ModelRegistry::get();

        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_resolve_returns_matching_id_for_every_model() {
        let registry = ModelRegistry::get();
        for model in registry.list() {
            let resolved = registry.resolve(model.id).expect("Registered model should resolve");
            assert_eq!(resolved.id, model.id);
        }
    }

    #[test]
    fn test_resolve_unknown_model_fails() {
        let result = ModelRegistry::get().resolve("gpt-9000");

        match result {
            Err(TranslateError::ModelNotFound { model_id, available }) => {
                assert_eq!(model_id, "gpt-9000");
                assert!(available.contains("gpt-4o-mini"));
                assert!(available.contains("deepl-nmt"));
            }
            other => panic!("Expected ModelNotFound, got {:?}", other.map(|m| m.id)),
        }
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        assert!(ModelRegistry::get().resolve("GPT-4O").is_err());
    }

    #[test]
    fn test_list_preserves_table_order() {
        let ids: Vec<_> = ModelRegistry::get().list().iter().map(|m| m.id).collect();
        assert_eq!(
            ids,
            vec![
                "gpt-3.5-turbo",
                "gpt-4o-mini",
                "gpt-4o",
                "google-translate",
                "deepl-nmt",
                "deepl-gpt4o-post-editor",
            ]
        );
    }

    #[test]
    fn test_ids_are_unique() {
        let models = ModelRegistry::get().list();
        for (i, a) in models.iter().enumerate() {
            for b in &models[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_every_provider_family_is_represented() {
        let models = ModelRegistry::get().list();
        for family in [
            ProviderFamily::LlmChat,
            ProviderFamily::MachineTranslate,
            ProviderFamily::NeuralTranslate,
            ProviderFamily::Composite,
        ] {
            assert!(models.iter().any(|m| m.provider_family == family));
        }
    }
}
