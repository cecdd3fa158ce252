//! Configuration loading and compilation.

use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::allowlist::{glob_to_regex, is_allowlisted};
use crate::policy::Level;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid allowlist pattern '{pattern}': {source}")]
    Allowlist {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// How a dangerous delete is handled by the gate callback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Refuse to run the command.
    Deny,
    /// Substitute the trash command and let it run.
    #[default]
    Rewrite,
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub mode: Mode,
    pub level: Level,

    /// Glob patterns exempting whole command strings from evaluation.
    pub allowlist: Vec<String>,

    /// Override for the platform trash command.
    pub trash_command: Option<String>,

    /// Audit logging settings.
    pub audit: AuditConfig,
}

/// Audit logging configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AuditConfig {
    /// Enable audit logging.
    pub enabled: bool,
    /// Path to the audit log file.
    pub path: Option<String>,
}

/// The trash command used when no override is configured.
pub fn default_trash_command() -> &'static str {
    if cfg!(target_os = "macos") {
        "trash"
    } else if cfg!(target_os = "linux") {
        "gio trash"
    } else {
        "trash"
    }
}

impl Config {
    /// Load configuration: the user config file, then env var overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(path) = Self::user_config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                config = toml::from_str(&content)?;
            }
        }

        config.apply_env_overrides();
        Ok(config)
    }

    /// Get the user config path.
    /// Respects TRASH_GUARD_CONFIG for testing.
    fn user_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("TRASH_GUARD_CONFIG") {
            return Some(PathBuf::from(path));
        }
        dirs::home_dir().map(|h| h.join(".claude/trash-guard.toml"))
    }

    /// Environment variables take precedence over the config file.
    fn apply_env_overrides(&mut self) {
        if let Ok(mode) = std::env::var("TRASH_GUARD_MODE") {
            self.mode = if mode == "deny" { Mode::Deny } else { Mode::Rewrite };
        }
        if let Ok(level) = std::env::var("TRASH_GUARD_LEVEL") {
            self.level = if level == "normal" { Level::Normal } else { Level::Strict };
        }
        if let Ok(list) = std::env::var("TRASH_GUARD_ALLOWLIST") {
            self.allowlist = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        if let Ok(cmd) = std::env::var("TRASH_GUARD_COMMAND") {
            if !cmd.is_empty() {
                self.trash_command = Some(cmd);
            }
        }
    }

    /// Compile the allow-list patterns for matching.
    pub fn compile(self) -> Result<CompiledConfig, ConfigError> {
        let allowlist = self
            .allowlist
            .iter()
            .map(|glob| {
                glob_to_regex(glob).map_err(|source| ConfigError::Allowlist {
                    pattern: glob.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CompiledConfig {
            raw: self,
            allowlist,
        })
    }
}

/// Configuration with pre-built allow-list regexes.
pub struct CompiledConfig {
    /// The raw config.
    pub raw: Config,
    /// Compiled allow-list patterns.
    pub allowlist: Vec<Regex>,
}

impl CompiledConfig {
    /// Check whether a command string is exempt from evaluation.
    pub fn is_allowlisted(&self, command: &str) -> bool {
        is_allowlisted(command, &self.allowlist)
    }

    /// The effective trash command.
    pub fn trash_command(&self) -> &str {
        self.raw
            .trash_command
            .as_deref()
            .unwrap_or_else(|| default_trash_command())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.mode, Mode::Rewrite);
        assert_eq!(config.level, Level::Strict);
        assert!(config.allowlist.is_empty());
        assert!(config.trash_command.is_none());
        assert!(!config.audit.enabled);
    }

    #[test]
    fn test_parse_toml() {
        let config: Config = toml::from_str(
            r#"
mode = "deny"
level = "normal"
allowlist = ["rm -rf /tmp/*", "rm scratch.txt"]
trash_command = "trash-put"

[audit]
enabled = true
path = "/tmp/audit.jsonl"
"#,
        )
        .unwrap();
        assert_eq!(config.mode, Mode::Deny);
        assert_eq!(config.level, Level::Normal);
        assert_eq!(config.allowlist.len(), 2);
        assert_eq!(config.trash_command.as_deref(), Some("trash-put"));
        assert!(config.audit.enabled);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(r#"level = "normal""#).unwrap();
        assert_eq!(config.level, Level::Normal);
        assert_eq!(config.mode, Mode::Rewrite);
    }

    #[test]
    fn test_compile_allowlist() {
        let config = Config {
            allowlist: vec!["rm -rf /tmp/*".to_string()],
            ..Default::default()
        };
        let compiled = config.compile().unwrap();
        assert!(compiled.is_allowlisted("rm -rf /tmp/build"));
        assert!(!compiled.is_allowlisted("rm -rf /home"));
    }

    #[test]
    fn test_trash_command_override() {
        let config = Config {
            trash_command: Some("trash-put".to_string()),
            ..Default::default()
        };
        let compiled = config.compile().unwrap();
        assert_eq!(compiled.trash_command(), "trash-put");
    }

    #[test]
    fn test_trash_command_platform_default() {
        let compiled = Config::default().compile().unwrap();
        assert_eq!(compiled.trash_command(), default_trash_command());
        assert!(!compiled.trash_command().is_empty());
    }
}
