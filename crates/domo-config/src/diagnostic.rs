// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge with fuzzy match suggestions.
//!
//! Converts Figment deserialization errors into rich miette diagnostics
//! with source spans, valid key listings, and "did you mean?" suggestions
//! using Jaro-Winkler string similarity.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
/// 0.75 catches common typos like `naem` -> `name` and
/// `shared_locaton` -> `shared_location` while filtering noise.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with rich diagnostic information.
///
/// Each variant carries enough context for miette to render an Elm-style
/// error message with source spans, suggestions, and valid key listings.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// An unknown key was found in the configuration.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(domo::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        /// The unrecognized key name.
        key: String,
        /// Suggested correction via fuzzy matching, if any.
        suggestion: Option<String>,
        /// List of valid keys for the section.
        valid_keys: String,
        /// Source span for the offending key.
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        /// The source file content for context display.
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A configuration value has the wrong type.
    #[error("invalid value for key `{key}`: {detail}")]
    #[diagnostic(code(domo::config::invalid_value), help("expected {expected}"))]
    InvalidValue {
        /// The key with the bad value.
        key: String,
        /// Description of the mismatch.
        detail: String,
        /// What was expected.
        expected: String,
    },

    /// A required configuration key is missing.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(domo::config::missing_key),
        help("add `{key} = <value>` to your domo.toml")
    )]
    MissingKey {
        /// The missing key name.
        key: String,
    },

    /// A validation error for a config value.
    #[error("validation error: {message}")]
    #[diagnostic(code(domo::config::validation))]
    Validation {
        /// Description of the validation failure.
        message: String,
    },

    /// Catch-all for other configuration errors.
    #[error("configuration error: {0}")]
    #[diagnostic(code(domo::config::other))]
    Other(String),
}

/// Format the help message for unknown key errors.
fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Convert a `figment::Error` into a list of `ConfigError` diagnostics.
///
/// A figment error may contain several underlying errors. Each one is
/// converted to an appropriate variant, with fuzzy match suggestions
/// for unknown field errors.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, expected) => {
                let valid_keys: Vec<&str> = expected.to_vec();
                let suggestion = suggest_key(field, &valid_keys);
                let section: Vec<String> =
                    error.path.iter().map(|s| s.to_string()).collect();
                let (span, src) = resolve_span(&section, field, toml_sources);

                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion,
                    valid_keys: valid_keys.join(", "),
                    span,
                    src,
                }
            }
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: field.clone().into_owned(),
            },
            Kind::InvalidType(actual, expected) => ConfigError::InvalidValue {
                key: error.path.join("."),
                detail: format!("found {actual}, expected {expected}"),
                expected: expected.to_string(),
            },
            _ => ConfigError::Other(error.to_string()),
        })
        .collect()
}

/// Locate an offending key in one of the loaded TOML sources, returning
/// the span and the source wrapper miette needs for a labeled report.
fn resolve_span(
    section: &[String],
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    for (path, content) in toml_sources {
        if let Some(offset) = find_key_offset(content, section, field) {
            let span = SourceSpan::new(offset.into(), field.len());
            let named = NamedSource::new(path.clone(), content.clone());
            return (Some(span), Some(named));
        }
    }
    (None, None)
}

/// Find the byte offset of a key in TOML content, scoped to a section.
///
/// For `section = ["agent"]` and `field = "naem"`, finds the `[agent]`
/// header first, then searches lines after it. Top-level fields search
/// from the start of the content.
pub fn find_key_offset(content: &str, section: &[String], field: &str) -> Option<usize> {
    let search_start = match section.first() {
        Some(name) => {
            let header = format!("[{name}]");
            content.find(&header)? + header.len()
        }
        None => 0,
    };

    for (line_offset, _) in content[search_start..].match_indices(field) {
        let abs = search_start + line_offset;
        // The key must sit at the start of its line (modulo indentation).
        let line_start = content[..abs].rfind('\n').map(|p| p + 1).unwrap_or(0);
        if !content[line_start..abs].trim().is_empty() {
            continue;
        }
        // And must be followed by `=` or whitespace, not be a prefix of a
        // longer key.
        let after = &content[abs + field.len()..];
        if after.starts_with('=') || after.starts_with(' ') || after.starts_with('\t') {
            return Some(abs);
        }
    }

    None
}

/// Suggest a similar key name using Jaro-Winkler string similarity.
///
/// Returns the best match above the similarity threshold, or `None` if
/// no valid key is close enough to the unknown key.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, key)| key.to_string())
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_naem_for_name() {
        let valid = &["name", "log_level", "shared_location"];
        assert_eq!(suggest_key("naem", valid), Some("name".to_string()));
    }

    #[test]
    fn suggest_shared_locaton() {
        let valid = &["name", "log_level", "shared_location"];
        assert_eq!(
            suggest_key("shared_locaton", valid),
            Some("shared_location".to_string())
        );
    }

    #[test]
    fn no_suggestion_for_distant_typo() {
        let valid = &["name", "log_level", "shared_location"];
        assert_eq!(suggest_key("zzzzzz", valid), None);
    }

    #[test]
    fn find_key_offset_in_section() {
        let content = "[agent]\nnaem = \"test\"\n";
        let section = vec!["agent".to_string()];
        let offset = find_key_offset(content, &section, "naem").unwrap();
        assert_eq!(&content[offset..offset + 4], "naem");
    }

    #[test]
    fn key_prefix_of_longer_key_is_skipped() {
        let content = "[anthropic]\napi_keyring = 1\napi_key = \"sk\"\n";
        let section = vec!["anthropic".to_string()];
        let offset = find_key_offset(content, &section, "api_key").unwrap();
        assert_eq!(&content[offset..offset + 7], "api_key");
        assert!(content[offset..].starts_with("api_key ="));
    }
}
