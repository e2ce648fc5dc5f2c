// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Resolver configuration.
//!
//! Supports both programmatic and file-based configuration.

use crate::element::ElementKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Resolver configuration.
///
/// Eligibility for adapter generation is policy, not inference: both the
/// kind allow-list and the marker annotation set are fixed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Declaration kinds eligible for adapter generation.
    #[serde(default = "default_supported_kinds")]
    pub supported_kinds: Vec<ElementKind>,

    /// Marker annotations a declaration must carry to be eligible.
    #[serde(default = "default_marker_annotations")]
    pub marker_annotations: Vec<String>,
}

fn default_supported_kinds() -> Vec<ElementKind> {
    vec![ElementKind::Class]
}

fn default_marker_annotations() -> Vec<String> {
    vec!["GenerateAdapter".to_string()]
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            supported_kinds: default_supported_kinds(),
            marker_annotations: default_marker_annotations(),
        }
    }
}

impl ResolverConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.supported_kinds.is_empty() {
            return Err(ConfigError::Invalid(
                "supported_kinds must not be empty".to_string(),
            ));
        }
        for (idx, kind) in self.supported_kinds.iter().enumerate() {
            if self.supported_kinds[..idx].contains(kind) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate supported kind: {:?}",
                    kind
                )));
            }
        }
        if self.marker_annotations.is_empty() {
            return Err(ConfigError::Invalid(
                "marker_annotations must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
