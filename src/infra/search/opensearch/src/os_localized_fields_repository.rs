// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use geo_search::*;
use internal_error::InternalError;

use crate::{OpenSearchClientConfig, os_client};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Reads French titles, descriptions and keywords from a separate index
/// holding the same document identifiers
pub struct OpenSearchLocalizedFieldsRepository {
    config: Arc<OpenSearchClientConfig>,
    client: tokio::sync::OnceCell<os_client::OpenSearchClient>,
}

#[dill::component(pub)]
#[dill::scope(dill::Singleton)]
#[dill::interface(dyn LocalizedFieldsRepository)]
impl OpenSearchLocalizedFieldsRepository {
    pub fn new(config: Arc<OpenSearchClientConfig>) -> Self {
        Self {
            config,
            client: tokio::sync::OnceCell::new(),
        }
    }

    async fn os_client(&self) -> Result<&os_client::OpenSearchClient, InternalError> {
        self.client
            .get_or_try_init(async || os_client::OpenSearchClient::init((*self.config).clone()))
            .await
    }

    /// Keywords may be stored as a list
    pub fn localized_fields_from_source(source: &serde_json::Value) -> LocalizedFields {
        let text = |key: &str| match source.get(key) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .filter_map(serde_json::Value::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            _ => String::new(),
        };

        LocalizedFields {
            title: text(SEARCH_FIELD_TITLE),
            description: text(SEARCH_FIELD_DESCRIPTION),
            keywords: text(SEARCH_FIELD_KEYWORDS),
        }
    }
}

#[async_trait::async_trait]
impl LocalizedFieldsRepository for OpenSearchLocalizedFieldsRepository {
    #[tracing::instrument(
        level = "debug",
        name = "OpenSearchLocalizedFieldsRepository_fetch_localized_fields",
        skip_all,
        fields(%document_id)
    )]
    async fn fetch_localized_fields(
        &self,
        document_id: &str,
    ) -> Result<Option<LocalizedFields>, InternalError> {
        let Some(index_name) = &self.config.localized_index else {
            return Ok(None);
        };

        let client = self.os_client().await?;

        let source = client.find_document_by_id(index_name, document_id).await?;

        Ok(source.as_ref().map(Self::localized_fields_from_source))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
