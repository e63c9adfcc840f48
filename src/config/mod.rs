//! Configuration snapshot: built-in defaults merged with an optional user file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::backend::CommandSpec;
use crate::error::ConfigError;

/// Character cap for prompts destined for interactive paste targets.
const DEFAULT_INTERACTIVE_PROMPT_LIMIT: usize = 139_000;

/// Raw on-disk shape.
///
/// Every field defaults, so a user file only needs the keys it overrides.
/// Overriding happens per top-level key: a user-supplied list replaces the
/// default list wholly, never element-wise.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default = "default_true")]
    commit_with_template: bool,
    #[serde(default)]
    copy_prompt: bool,
    #[serde(default)]
    copy_result: bool,
    #[serde(default = "default_prompt_limit")]
    interactive_prompt_limit: usize,
    #[serde(default = "default_true")]
    query_language_model: bool,
    #[serde(default)]
    report_unavailable_models: bool,
    #[serde(default)]
    report_unavailable_filters: bool,
    #[serde(default = "default_model_preferences")]
    model_preferences: Vec<Vec<String>>,
    #[serde(default)]
    result_filters: Vec<Vec<String>>,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            commit_with_template: true,
            copy_prompt: false,
            copy_result: false,
            interactive_prompt_limit: default_prompt_limit(),
            query_language_model: true,
            report_unavailable_models: false,
            report_unavailable_filters: false,
            model_preferences: default_model_preferences(),
            result_filters: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_prompt_limit() -> usize {
    DEFAULT_INTERACTIVE_PROMPT_LIMIT
}

fn default_model_preferences() -> Vec<Vec<String>> {
    vec![
        vec!["claude".to_string(), "-p".to_string()],
        vec!["codex".to_string(), "exec".to_string()],
        vec![
            "ollama".to_string(),
            "run".to_string(),
            "qwen2.5-coder".to_string(),
        ],
    ]
}

/// Fully validated snapshot, threaded explicitly through the run.
#[derive(Debug, Clone)]
pub struct Config {
    pub commit_with_template: bool,
    pub copy_prompt: bool,
    pub copy_result: bool,
    pub interactive_prompt_limit: usize,
    pub query_language_model: bool,
    pub report_unavailable_models: bool,
    pub report_unavailable_filters: bool,
    pub model_preferences: Vec<CommandSpec>,
    pub result_filters: Vec<CommandSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_raw(RawConfig::default())
            .unwrap_or_else(|_| unreachable!("built-in defaults are valid"))
    }
}

impl Config {
    /// Load from `explicit` if given (the file must exist), else from the
    /// default location if a file is there, else pure defaults.
    ///
    /// Read, parse, and command-list problems are all fatal configuration
    /// errors, surfaced before any backend is attempted.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::read_file(path),
            None => match default_config_path().filter(|path| path.exists()) {
                Some(path) => Self::read_file(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Parse a snapshot from JSON text; `origin` names the source in errors.
    pub fn from_json(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            serde_json::from_str(text).map_err(|source| ConfigError::ParseFailed {
                path: origin.to_string(),
                source,
            })?;
        Self::from_raw(raw)
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text, &path.display().to_string())
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            commit_with_template: raw.commit_with_template,
            copy_prompt: raw.copy_prompt,
            copy_result: raw.copy_result,
            interactive_prompt_limit: raw.interactive_prompt_limit,
            query_language_model: raw.query_language_model,
            report_unavailable_models: raw.report_unavailable_models,
            report_unavailable_filters: raw.report_unavailable_filters,
            model_preferences: parse_commands(raw.model_preferences, "model_preferences")?,
            result_filters: parse_commands(raw.result_filters, "result_filters")?,
        })
    }
}

/// Validate one raw command list into typed specs, once, at load time.
fn parse_commands(
    entries: Vec<Vec<String>>,
    key: &'static str,
) -> Result<Vec<CommandSpec>, ConfigError> {
    entries
        .into_iter()
        .enumerate()
        .map(|(index, tokens)| {
            if tokens.is_empty() {
                return Err(ConfigError::EmptyCommand { key, index });
            }
            Ok(CommandSpec::new(tokens))
        })
        .collect()
}

/// `$XDG_CONFIG_HOME/penna/config.json` (or the platform equivalent).
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("penna").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = Config::from_json("{}", "test").unwrap();

        assert!(config.commit_with_template);
        assert!(!config.copy_prompt);
        assert!(!config.copy_result);
        assert_eq!(config.interactive_prompt_limit, 139_000);
        assert!(config.query_language_model);
        assert!(!config.report_unavailable_models);
        assert!(!config.report_unavailable_filters);
        assert_eq!(config.model_preferences.len(), 3);
        assert_eq!(config.model_preferences[0].name(), "claude");
        assert!(config.result_filters.is_empty());
    }

    #[test]
    fn top_level_overrides_win() {
        let config = Config::from_json(
            r#"{"commit_with_template": false, "copy_prompt": true, "interactive_prompt_limit": 500}"#,
            "test",
        )
        .unwrap();

        assert!(!config.commit_with_template);
        assert!(config.copy_prompt);
        assert_eq!(config.interactive_prompt_limit, 500);
        // Untouched keys keep their defaults.
        assert!(config.query_language_model);
        assert_eq!(config.model_preferences.len(), 3);
    }

    #[test]
    fn user_list_replaces_the_default_list_wholly() {
        let config = Config::from_json(
            r#"{"model_preferences": [["llm", "-m", "gpt-4o-mini"]]}"#,
            "test",
        )
        .unwrap();

        assert_eq!(config.model_preferences.len(), 1);
        assert_eq!(config.model_preferences[0].name(), "llm");
        assert_eq!(
            config.model_preferences[0].args(),
            ["-m".to_string(), "gpt-4o-mini".to_string()]
        );
    }

    #[test]
    fn result_filters_parse_into_specs() {
        let config = Config::from_json(
            r#"{"result_filters": [["fmt-commit-msg"], ["tr", "-d", "`"]]}"#,
            "test",
        )
        .unwrap();

        assert_eq!(config.result_filters.len(), 2);
        assert_eq!(config.result_filters[1].name(), "tr");
    }

    #[test]
    fn empty_command_entry_is_fatal() {
        let err = Config::from_json(r#"{"model_preferences": [["claude"], []]}"#, "test")
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::EmptyCommand {
                key: "model_preferences",
                index: 1
            }
        ));
    }

    #[test]
    fn non_array_command_entry_is_fatal() {
        let err = Config::from_json(r#"{"model_preferences": ["claude -p"]}"#, "test").unwrap_err();

        assert!(matches!(err, ConfigError::ParseFailed { .. }));
    }

    #[test]
    fn malformed_json_is_fatal() {
        let err = Config::from_json("{not json", "test").unwrap_err();

        assert!(matches!(err, ConfigError::ParseFailed { .. }));
    }

    #[test]
    fn unknown_keys_are_tolerated() {
        let config = Config::from_json(r#"{"future_option": 42}"#, "test").unwrap();

        assert!(config.commit_with_template);
    }
}
