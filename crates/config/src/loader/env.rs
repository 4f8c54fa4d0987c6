//! Environment variable configuration overlay
//!
//! Supports environment variables in the format:
//! `RAGDOC_<section>_<field>=value`
//!
//! Examples:
//! - `RAGDOC_CHUNKING_CHUNK_SIZE=256`
//! - `RAGDOC_LLM_MODEL=gpt-4o`
//! - `RAGDOC_RETRIEVAL_TOP_K=5`

use super::partial::*;
use crate::{error::ConfigError, types::EmbeddingBackend, Result};
use std::env;
use std::str::FromStr;

const PREFIX: &str = "RAGDOC_";

/// Parse configuration from environment variables
///
/// Only the fields named by a variable are set in the returned layer.
/// Returns `None` when no `RAGDOC_` variable is set. Variables that fail to
/// parse are logged and skipped.
pub fn from_env() -> Result<Option<PartialConfig>> {
    let env_vars: Vec<(String, String)> = env::vars()
        .filter(|(k, _)| k.starts_with(PREFIX))
        .collect();

    if env_vars.is_empty() {
        return Ok(None);
    }

    let mut config = PartialConfig::default();
    for (key, value) in env_vars {
        if let Err(e) = apply_env_var(&mut config, &key, &value) {
            tracing::warn!("ignoring {}: {}", key, e);
        }
    }

    Ok(Some(config))
}

/// Apply a single environment variable to config
fn apply_env_var(config: &mut PartialConfig, key: &str, value: &str) -> Result<()> {
    let stripped = key.strip_prefix(PREFIX).unwrap_or(key);

    let Some((section, field)) = stripped.split_once('_') else {
        return Err(ConfigError::EnvVarError {
            var: key.to_string(),
            message: "Expected format: RAGDOC_<section>_<field>".to_string(),
        });
    };

    let section = section.to_lowercase();
    let field = field.to_lowercase();

    match section.as_str() {
        "chunking" => apply_chunking_var(&mut config.chunking, &field, value),
        "embedding" => apply_embedding_var(&mut config.embedding, &field, value),
        "llm" => apply_llm_var(&mut config.llm, &field, value),
        "retrieval" => apply_retrieval_var(&mut config.retrieval, &field, value),
        "summary" => apply_summary_var(&mut config.summary, &field, value),
        _ => Err(ConfigError::EnvVarError {
            var: key.to_string(),
            message: format!("Unknown section: {}", section),
        }),
    }
}

fn var_name(section: &str, field: &str) -> String {
    format!("{}{}_{}", PREFIX, section.to_uppercase(), field.to_uppercase())
}

fn parse_number<T: FromStr>(section: &str, field: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| ConfigError::EnvVarError {
        var: var_name(section, field),
        message: format!("Invalid integer: {}", value),
    })
}

fn unknown_field(section: &str, field: &str) -> ConfigError {
    ConfigError::EnvVarError {
        var: var_name(section, field),
        message: format!("Unknown field: {}", field),
    }
}

fn apply_chunking_var(config: &mut PartialChunkingConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "chunk_size" => config.chunk_size = Some(parse_number("chunking", field, value)?),
        "chunk_overlap" => config.chunk_overlap = Some(parse_number("chunking", field, value)?),
        "tokenizer_model" => config.tokenizer_model = Some(value.to_string()),
        _ => return Err(unknown_field("chunking", field)),
    }
    Ok(())
}

fn apply_embedding_var(
    config: &mut PartialEmbeddingConfig,
    field: &str,
    value: &str,
) -> Result<()> {
    match field {
        "backend" => {
            config.backend = Some(match value.to_lowercase().as_str() {
                "openai" => EmbeddingBackend::OpenAi,
                "ollama" => EmbeddingBackend::Ollama,
                _ => {
                    return Err(ConfigError::invalid_enum(
                        "embedding.backend",
                        value,
                        &["openai", "ollama"],
                    ))
                }
            });
        }
        "model_name" => config.model_name = Some(value.to_string()),
        "batch_size" => config.batch_size = Some(parse_number("embedding", field, value)?),
        "api_base" => config.api_base = Some(value.to_string()),
        _ => return Err(unknown_field("embedding", field)),
    }
    Ok(())
}

fn apply_llm_var(config: &mut PartialLlmConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "model" => config.model = Some(value.to_string()),
        "max_tokens" => config.max_tokens = Some(parse_number("llm", field, value)?),
        "timeout_secs" => config.timeout_secs = Some(parse_number("llm", field, value)?),
        "api_base" => config.api_base = Some(value.to_string()),
        _ => return Err(unknown_field("llm", field)),
    }
    Ok(())
}

fn apply_retrieval_var(
    config: &mut PartialRetrievalConfig,
    field: &str,
    value: &str,
) -> Result<()> {
    match field {
        "top_k" => config.top_k = Some(parse_number("retrieval", field, value)?),
        "collection" => config.collection = Some(value.to_string()),
        "context_separator" => {
            config.context_separator = Some(value.replace("\\n", "\n"))
        }
        _ => return Err(unknown_field("retrieval", field)),
    }
    Ok(())
}

fn apply_summary_var(config: &mut PartialSummaryConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "enabled" => config.enabled = Some(parse_bool(value)?),
        "max_input_tokens" => {
            config.max_input_tokens = Some(parse_number("summary", field, value)?)
        }
        _ => return Err(unknown_field("summary", field)),
    }
    Ok(())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::EnvVarError {
            var: value.to_string(),
            message: format!(
                "Invalid boolean: {} (use true/false, 1/0, yes/no, on/off)",
                value
            ),
        }),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    // Serializes every test in this crate that touches RAGDOC_ variables
    pub(crate) static ENV_LOCK: Mutex<()> = Mutex::new(());

    pub(crate) fn cleanup_ragdoc_env_vars() {
        let keys: Vec<String> = env::vars()
            .filter(|(k, _)| k.starts_with(PREFIX))
            .map(|(k, _)| k)
            .collect();
        for key in keys {
            env::remove_var(&key);
        }
    }

    #[test]
    fn test_chunking_env() {
        let _lock = ENV_LOCK.lock().unwrap();
        cleanup_ragdoc_env_vars();
        env::set_var("RAGDOC_CHUNKING_CHUNK_SIZE", "256");
        env::set_var("RAGDOC_CHUNKING_TOKENIZER_MODEL", "gpt-4");
        let config = from_env().unwrap().unwrap();
        assert_eq!(config.chunking.chunk_size, Some(256));
        assert_eq!(config.chunking.tokenizer_model.as_deref(), Some("gpt-4"));
        cleanup_ragdoc_env_vars();
    }

    #[test]
    fn test_embedding_backend_env() {
        let _lock = ENV_LOCK.lock().unwrap();
        cleanup_ragdoc_env_vars();
        env::set_var("RAGDOC_EMBEDDING_BACKEND", "ollama");
        let config = from_env().unwrap().unwrap();
        assert_eq!(config.embedding.backend, Some(EmbeddingBackend::Ollama));
        cleanup_ragdoc_env_vars();
    }

    #[test]
    fn test_bad_value_is_skipped() {
        let _lock = ENV_LOCK.lock().unwrap();
        cleanup_ragdoc_env_vars();
        env::set_var("RAGDOC_LLM_MAX_TOKENS", "lots");
        env::set_var("RAGDOC_LLM_MODEL", "gpt-4o");
        let config = from_env().unwrap().unwrap();
        assert_eq!(config.llm.max_tokens, None);
        assert_eq!(config.llm.model.as_deref(), Some("gpt-4o"));
        cleanup_ragdoc_env_vars();
    }

    #[test]
    fn test_apply_unknown_section() {
        let mut config = PartialConfig::default();
        assert!(apply_env_var(&mut config, "RAGDOC_GRAPH_DEPTH", "3").is_err());
        assert!(apply_env_var(&mut config, "RAGDOC_NOSECTION", "3").is_err());
    }

    #[test]
    fn test_separator_unescapes_newlines() {
        let mut config = PartialConfig::default();
        apply_env_var(&mut config, "RAGDOC_RETRIEVAL_CONTEXT_SEPARATOR", "\\n==\\n").unwrap();
        assert_eq!(config.retrieval.context_separator.as_deref(), Some("\n==\n"));
    }

    #[test]
    fn test_bool_parsing() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool("yes").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(!parse_bool("off").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn test_no_env_vars() {
        let _lock = ENV_LOCK.lock().unwrap();
        cleanup_ragdoc_env_vars();
        assert!(from_env().unwrap().is_none());
    }
}
