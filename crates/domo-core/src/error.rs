// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared across the workspace.

use thiserror::Error;

/// Convenience alias for fallible Domo operations.
pub type Result<T> = std::result::Result<T, DomoError>;

/// Top-level error type for all Domo operations.
#[derive(Error, Debug)]
pub enum DomoError {
    /// Configuration loading or validation failed.
    #[error("configuration error: {0}")]
    Config(String),

    /// A completion provider call failed.
    #[error("provider error: {message}")]
    Provider {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A domain agent failed while handling a request.
    #[error("agent error: {message}")]
    Agent {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Catch-all for internal invariant violations.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomoError {
    /// Provider failure without an underlying cause.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            source: None,
        }
    }

    /// Provider failure wrapping an underlying cause.
    pub fn provider_with(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Provider {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Agent failure without an underlying cause.
    pub fn agent(message: impl Into<String>) -> Self {
        Self::Agent {
            message: message.into(),
            source: None,
        }
    }

    /// Agent failure wrapping an underlying cause.
    pub fn agent_with(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Agent {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
