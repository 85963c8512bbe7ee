// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./domo.toml` > `~/.config/domo/domo.toml` > `/etc/domo/domo.toml`
//! with environment variable overrides via `DOMO_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::DomoConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/domo/domo.toml` (system-wide)
/// 3. `~/.config/domo/domo.toml` (user XDG config)
/// 4. `./domo.toml` (local directory)
/// 5. `DOMO_*` environment variables
pub fn load_config() -> Result<DomoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DomoConfig::default()))
        .merge(Toml::file("/etc/domo/domo.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("domo/domo.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("domo.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<DomoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DomoConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<DomoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DomoConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `DOMO_ANTHROPIC_API_KEY`
/// must map to `anthropic.api_key`, not `anthropic.api.key`.
fn env_provider() -> Env {
    Env::prefixed("DOMO_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: DOMO_ANTHROPIC_API_KEY -> "anthropic_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("anthropic_", "anthropic.", 1);
        mapped.into()
    })
}
