//! Model resolution
//!
//! Commands carry a per-command model preference; `"global"` (or nothing)
//! means "use whatever the provider is configured for".

use crate::config::ProviderKind;

/// Override value that defers to the configured default.
pub const GLOBAL_MODEL_SENTINEL: &str = "global";

/// Resolve the concrete model for a request. Pure and total.
///
/// - an explicit override (anything but `"global"`) wins unchanged;
/// - otherwise Ollama uses its own default model;
/// - every other provider uses the global default.
pub fn resolve_model(
    model_override: Option<&str>,
    provider: ProviderKind,
    ollama_default: &str,
    global_default: &str,
) -> String {
    match model_override {
        Some(model) if !model.is_empty() && model != GLOBAL_MODEL_SENTINEL => model.to_string(),
        _ if provider == ProviderKind::Ollama => ollama_default.to_string(),
        _ => global_default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROVIDERS: [ProviderKind; 3] = [
        ProviderKind::OpenAi,
        ProviderKind::Anthropic,
        ProviderKind::Ollama,
    ];

    #[test]
    fn explicit_override_is_returned_unchanged() {
        for provider in PROVIDERS {
            for model in ["gpt-4o", "claude-haiku-4-5", "Global", " global", "llama3:70b"] {
                assert_eq!(resolve_model(Some(model), provider, "llama3", "gpt-5"), model);
            }
        }
    }

    #[test]
    fn global_sentinel_on_ollama_uses_ollama_default() {
        assert_eq!(
            resolve_model(Some("global"), ProviderKind::Ollama, "llama3", "gpt-5"),
            "llama3"
        );
        assert_eq!(
            resolve_model(None, ProviderKind::Ollama, "llama3", "gpt-5"),
            "llama3"
        );
    }

    #[test]
    fn global_sentinel_elsewhere_uses_global_default() {
        for provider in [ProviderKind::OpenAi, ProviderKind::Anthropic] {
            assert_eq!(resolve_model(Some("global"), provider, "llama3", "gpt-5"), "gpt-5");
            assert_eq!(resolve_model(None, provider, "llama3", "gpt-5"), "gpt-5");
            assert_eq!(resolve_model(Some(""), provider, "llama3", "gpt-5"), "gpt-5");
        }
    }
}
