use std::env;

use serde::Serialize;

/// Environment variables searched for an API key, most specific first.
pub const API_KEY_ENV_VARS: [&str; 4] = [
    "OPENROUTER_API_KEY",
    "OPENAI_API_KEY",
    "AI_API_KEY",
    "API_KEY",
];

const MIN_KEY_LENGTH: usize = 20;
const OPENROUTER_KEY_PREFIX: &str = "sk-or-v1-";
const OPENAI_KEY_PREFIX: &str = "sk-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyValidation {
    pub valid: bool,
    pub message: String,
}

impl KeyValidation {
    fn invalid(message: impl Into<String>) -> Self {
        KeyValidation {
            valid: false,
            message: message.into(),
        }
    }

    fn ok() -> Self {
        KeyValidation {
            valid: true,
            message: "API key format is valid".to_string(),
        }
    }
}

/// Syntactic sanity check of an API key against the conventions of the
/// provider named in `provider` (usually the endpoint URL). No I/O.
pub fn validate_api_key(api_key: &str, provider: &str) -> KeyValidation {
    if api_key.trim().is_empty() || api_key.chars().count() < MIN_KEY_LENGTH {
        return KeyValidation::invalid("API key appears to be too short");
    }

    let provider = provider.to_lowercase();
    let (prefix, label) = if provider.contains("openrouter") {
        (OPENROUTER_KEY_PREFIX, "OpenRouter API keys should")
    } else if provider.contains("openai") {
        (OPENAI_KEY_PREFIX, "OpenAI API keys should")
    } else {
        (OPENAI_KEY_PREFIX, "API key should")
    };

    if !api_key.starts_with(prefix) {
        return KeyValidation::invalid(format!("{} start with \"{}\"", label, prefix));
    }

    KeyValidation::ok()
}

/// Returns the first candidate whose value is non-blank, trimmed.
pub fn discover_api_key<F>(names: &[&str], lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    names
        .iter()
        .copied()
        .filter_map(lookup)
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

pub fn api_key_from_env() -> Option<String> {
    discover_api_key(&API_KEY_ENV_VARS, |name| env::var(name).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const OPENROUTER: &str = "https://openrouter.ai/api/v1";
    const OPENAI: &str = "https://api.openai.com/v1";

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_openrouter_key_accepted() {
        let result = validate_api_key("sk-or-v1-test123456789", OPENROUTER);
        assert!(result.valid);
        assert_eq!(result.message, "API key format is valid");
    }

    #[test]
    fn test_openrouter_key_wrong_prefix() {
        let result = validate_api_key("sk-proj-abcdefghijklmnopqrstuvwxyz", OPENROUTER);
        assert!(!result.valid);
        assert!(result.message.contains("OpenRouter API keys should start with \"sk-or-v1-\""));
    }

    #[test]
    fn test_openai_key_accepted() {
        let result = validate_api_key("sk-test1234567890abcdef", OPENAI);
        assert!(result.valid);
    }

    #[test]
    fn test_openai_key_wrong_prefix() {
        let result = validate_api_key("pk-test1234567890abcdef", OPENAI);
        assert!(!result.valid);
        assert_eq!(result.message, "OpenAI API keys should start with \"sk-\"");
    }

    #[test]
    fn test_generic_provider_requires_sk_prefix() {
        let result = validate_api_key("xx-test1234567890abcdef", "http://localhost:11434/v1");
        assert!(!result.valid);
        assert_eq!(result.message, "API key should start with \"sk-\"");
        assert!(validate_api_key("sk-test1234567890abcdef", "http://localhost:11434/v1").valid);
    }

    #[test]
    fn test_short_keys_rejected_for_every_provider() {
        for key in ["", " ", "sk-short", "sk-or-v1-1234567890"] {
            for provider in [OPENROUTER, OPENAI, "anything"] {
                let result = validate_api_key(key, provider);
                assert!(!result.valid, "{:?} accepted for {}", key, provider);
                assert!(result.message.contains("too short"));
            }
        }
    }

    #[test]
    fn test_long_blank_key_is_too_short() {
        let blank = " ".repeat(32);
        for provider in [OPENROUTER, OPENAI, "anything"] {
            let result = validate_api_key(&blank, provider);
            assert!(!result.valid);
            assert_eq!(result.message, "API key appears to be too short");
        }
        assert!(!validate_api_key(&"\t".repeat(25), OPENAI).message.contains("sk-"));
    }

    #[test]
    fn test_discovery_prefers_primary_name() {
        let lookup = lookup_in(&[("OPENAI_API_KEY", "fallback"), ("OPENROUTER_API_KEY", "primary")]);
        assert_eq!(discover_api_key(&API_KEY_ENV_VARS, lookup), Some("primary".to_string()));
    }

    #[test]
    fn test_discovery_falls_through_blank_values() {
        let lookup = lookup_in(&[("OPENROUTER_API_KEY", "   "), ("AI_API_KEY", "generic")]);
        assert_eq!(discover_api_key(&API_KEY_ENV_VARS, lookup), Some("generic".to_string()));
    }

    #[test]
    fn test_discovery_none_when_unset() {
        assert_eq!(discover_api_key(&API_KEY_ENV_VARS, lookup_in(&[])), None);
    }

    #[test]
    fn test_discovery_trims_whitespace() {
        let lookup = lookup_in(&[("OPENROUTER_API_KEY", "  test-key-with-whitespace  ")]);
        assert_eq!(
            discover_api_key(&API_KEY_ENV_VARS, lookup),
            Some("test-key-with-whitespace".to_string())
        );
    }
}
