// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::Path;

use geo_search::GeoSearchConfig;
use geo_search_inference::EmbeddingsEncoderHttpConfig;
use geo_search_opensearch::OpenSearchClientConfig;

use crate::CLIError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const ENV_VAR_CONFIG_PATH: &str = "GEO_SEARCH_CONFIG";
pub const ENV_VAR_OPENSEARCH_PASSWORD: &str = "GEO_SEARCH_OPENSEARCH_PASSWORD";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Root of the YAML configuration file, every section is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct CLIConfig {
    pub search: GeoSearchConfig,
    pub opensearch: OpenSearchClientConfig,
    pub encoder: EncoderConfig,
}

impl CLIConfig {
    pub fn load_from(path: &Path) -> Result<Self, CLIError> {
        let file = std::fs::File::open(path).map_err(|e| {
            CLIError::usage_error(format!(
                "Unable to open config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_reader(file).map_err(CLIError::usage_error_from)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, CLIError> {
        serde_yaml::from_str(yaml).map_err(CLIError::usage_error_from)
    }

    /// Secrets supplied through the environment take precedence over the file
    pub fn with_env_overrides<F>(mut self, get_var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(password) = get_var(ENV_VAR_OPENSEARCH_PASSWORD) {
            self.opensearch.password = Some(password);
        }
        self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Selects the provider of query embeddings
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EncoderConfig {
    /// Produces no embeddings, semantic searches run filter-only
    #[default]
    Dummy,
    Http(EmbeddingsEncoderHttpConfig),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
