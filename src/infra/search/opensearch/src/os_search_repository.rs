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

use crate::{OpenSearchClientConfig, OpenSearchQueryBuilder, os_client};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct OpenSearchRepository {
    config: Arc<OpenSearchClientConfig>,
    client: tokio::sync::OnceCell<os_client::OpenSearchClient>,
}

#[dill::component(pub)]
#[dill::scope(dill::Singleton)]
#[dill::interface(dyn SearchRepository)]
impl OpenSearchRepository {
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
}

#[async_trait::async_trait]
impl SearchRepository for OpenSearchRepository {
    #[tracing::instrument(level = "debug", name = "OpenSearchRepository_search", skip_all, fields(%index_name))]
    async fn search(
        &self,
        index_name: &str,
        query: StructuredQuery,
    ) -> Result<SearchHits, InternalError> {
        let client = self.os_client().await?;

        let req_body = OpenSearchQueryBuilder::build_search_query(&query);
        tracing::trace!(%req_body, "OpenSearch request");

        let os_response = client.search(index_name, req_body).await?;

        tracing::debug!(
            took_ms = os_response.took,
            timed_out = os_response.timed_out,
            num_hits = os_response.hits.hits.len(),
            "OpenSearch response",
        );

        Ok(os_response.into())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
