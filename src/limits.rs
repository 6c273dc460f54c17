// Compiler safety limits
//
// Bounds input size, token count, literal lengths and type nesting so that
// pathological .fidl files fail with a diagnostic instead of exhausting memory
// or the stack. Every limit has a default and can be overridden from the
// [limits] table of fidlc.toml.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "fidlc.toml";

/// Largest accepted `max_type_depth`; the parser recurses once per level and
/// must stay within the main thread's stack
pub const MAX_TYPE_DEPTH_CEILING: usize = 1_000;

/// Compiler safety limits with permissive defaults
#[derive(Debug, Clone, PartialEq)]
pub struct CompilerLimits {
    // Lexer limits
    pub max_input_size: usize,        // Maximum source file size in bytes
    pub max_token_count: usize,       // Maximum number of tokens per file
    pub max_identifier_length: usize, // Maximum identifier length in bytes
    pub max_string_length: usize,     // Maximum string literal length in bytes
    pub max_comment_length: usize,    // Maximum comment length in bytes

    // Parser limits
    pub max_type_depth: usize, // Maximum nesting of element types
}

impl Default for CompilerLimits {
    fn default() -> Self {
        Self {
            max_input_size: 10_000_000,    // 10 MB
            max_token_count: 100_000,      // 100k tokens
            max_identifier_length: 1_000,  // 1k bytes
            max_string_length: 10_000_000, // 10 MB
            max_comment_length: 100_000,   // 100k bytes
            max_type_depth: 256,
        }
    }
}

impl CompilerLimits {
    /// Load limits from a fidlc.toml file, falling back to defaults
    ///
    /// Returns error only if the file is unreadable or malformed, not if it is missing
    pub fn from_config_toml<P: AsRef<Path>>(path: P) -> Result<Self, LimitError> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using default limits");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| LimitError::Read {
            path: path.display().to_string(),
            source: e,
        })?;

        let config: ConfigFile = toml::from_str(&content).map_err(|e| LimitError::Malformed {
            path: path.display().to_string(),
            source: e,
        })?;

        // Only override specified values
        let mut limits = Self::default();

        if let Some(limits_config) = config.limits {
            if let Some(v) = limits_config.max_input_size {
                limits.max_input_size = v;
            }
            if let Some(v) = limits_config.max_token_count {
                limits.max_token_count = v;
            }
            if let Some(v) = limits_config.max_identifier_length {
                limits.max_identifier_length = v;
            }
            if let Some(v) = limits_config.max_string_length {
                limits.max_string_length = v;
            }
            if let Some(v) = limits_config.max_comment_length {
                limits.max_comment_length = v;
            }
            if let Some(v) = limits_config.max_type_depth {
                limits.max_type_depth = v;
            }
        }

        tracing::debug!(path = %path.display(), ?limits, "loaded limits");
        Ok(limits)
    }

    /// Validate that all limits are positive and not absurdly large
    pub fn validate(&self) -> Result<(), LimitError> {
        const MAX_REASONABLE: usize = 100_000_000; // 100 MB

        if self.max_input_size == 0 || self.max_input_size > MAX_REASONABLE {
            return Err(LimitError::invalid("max_input_size", self.max_input_size));
        }

        if self.max_token_count == 0 {
            return Err(LimitError::invalid("max_token_count", self.max_token_count));
        }

        if self.max_identifier_length == 0 || self.max_identifier_length > 100_000 {
            return Err(LimitError::invalid(
                "max_identifier_length",
                self.max_identifier_length,
            ));
        }

        if self.max_string_length == 0 || self.max_string_length > MAX_REASONABLE {
            return Err(LimitError::invalid(
                "max_string_length",
                self.max_string_length,
            ));
        }

        if self.max_comment_length == 0 || self.max_comment_length > MAX_REASONABLE {
            return Err(LimitError::invalid(
                "max_comment_length",
                self.max_comment_length,
            ));
        }

        if self.max_type_depth == 0 || self.max_type_depth > MAX_TYPE_DEPTH_CEILING {
            return Err(LimitError::invalid("max_type_depth", self.max_type_depth));
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    limits: Option<LimitsConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LimitsConfig {
    max_input_size: Option<usize>,
    max_token_count: Option<usize>,
    max_identifier_length: Option<usize>,
    max_string_length: Option<usize>,
    max_comment_length: Option<usize>,
    max_type_depth: Option<usize>,
}

/// Error loading or validating limits
#[derive(Debug, Error)]
pub enum LimitError {
    #[error("Limit error: failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Limit error: failed to parse {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Limit error: invalid limit '{name}': {value} (must be positive and reasonable)")]
    Invalid { name: &'static str, value: usize },
}

impl LimitError {
    fn invalid(name: &'static str, value: usize) -> Self {
        Self::Invalid { name, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("fidlc_{}_{}.toml", name, std::process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_limits_are_reasonable() {
        let limits = CompilerLimits::default();
        assert!(limits.validate().is_ok());
    }

    #[test]
    fn test_default_values() {
        let limits = CompilerLimits::default();
        assert_eq!(limits.max_input_size, 10_000_000);
        assert_eq!(limits.max_token_count, 100_000);
        assert_eq!(limits.max_identifier_length, 1_000);
        assert_eq!(limits.max_string_length, 10_000_000);
        assert_eq!(limits.max_comment_length, 100_000);
        assert_eq!(limits.max_type_depth, 256);
    }

    #[test]
    fn test_validation_catches_zero_values() {
        let mut limits = CompilerLimits::default();
        limits.max_input_size = 0;
        assert!(limits.validate().is_err());

        limits = CompilerLimits::default();
        limits.max_token_count = 0;
        assert!(limits.validate().is_err());

        limits = CompilerLimits::default();
        limits.max_type_depth = 0;
        assert!(limits.validate().is_err());
    }

    #[test]
    fn test_validation_catches_too_large_values() {
        let mut limits = CompilerLimits::default();
        limits.max_input_size = 200_000_000;
        assert!(limits.validate().is_err());

        limits = CompilerLimits::default();
        limits.max_type_depth = 20_000;
        let err = limits.validate().unwrap_err();
        assert!(err.to_string().contains("max_type_depth"));
    }

    #[test]
    fn test_type_depth_ceiling() {
        let mut limits = CompilerLimits::default();
        limits.max_type_depth = MAX_TYPE_DEPTH_CEILING;
        assert!(limits.validate().is_ok());

        limits.max_type_depth = MAX_TYPE_DEPTH_CEILING + 1;
        assert!(limits.validate().is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let limits = CompilerLimits::from_config_toml("nonexistent_fidlc.toml").unwrap();
        assert_eq!(limits, CompilerLimits::default());
    }

    #[test]
    fn test_partial_override() {
        let path = temp_config(
            "partial",
            r#"
[limits]
max_input_size = 2000000
max_type_depth = 32
"#,
        );

        let limits = CompilerLimits::from_config_toml(&path).unwrap();
        assert_eq!(limits.max_input_size, 2_000_000); // Overridden
        assert_eq!(limits.max_type_depth, 32); // Overridden
        assert_eq!(limits.max_token_count, 100_000); // Default
        assert_eq!(limits.max_identifier_length, 1_000); // Default

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_file_without_limits_table() {
        let path = temp_config("empty", "# nothing here\n");
        let limits = CompilerLimits::from_config_toml(&path).unwrap();
        assert_eq!(limits, CompilerLimits::default());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_malformed_toml_returns_error() {
        let path = temp_config("malformed", "this is not valid toml {{{");
        let result = CompilerLimits::from_config_toml(&path);
        assert!(matches!(result, Err(LimitError::Malformed { .. })));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_unknown_limit_is_rejected() {
        let path = temp_config("unknown", "[limits]\nmax_expr_depth = 4\n");
        assert!(CompilerLimits::from_config_toml(&path).is_err());
        let _ = fs::remove_file(path);
    }
}
