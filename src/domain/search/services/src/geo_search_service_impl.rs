// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::sync::Arc;

use geo_search::*;
use time_source::SystemTimeSource;

use crate::ResultProjector;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Stages a single search invocation goes through. Any failure ends the
/// invocation, there is no retry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SearchStage {
    Received,
    FiltersCompiled,
    EmbeddingRequested,
    QueryAssembled,
    BackendQueried,
    Projected,
    Responded,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct GeoSearchServiceImpl {
    config: Arc<GeoSearchConfig>,
    search_repo: Arc<dyn SearchRepository>,
    embeddings_encoder: Arc<dyn EmbeddingsEncoder>,
    localized_fields_repo: Arc<dyn LocalizedFieldsRepository>,
    time_source: Arc<dyn SystemTimeSource>,
}

#[dill::component(pub)]
#[dill::interface(dyn GeoSearchService)]
impl GeoSearchServiceImpl {
    pub fn new(
        config: Arc<GeoSearchConfig>,
        search_repo: Arc<dyn SearchRepository>,
        embeddings_encoder: Arc<dyn EmbeddingsEncoder>,
        localized_fields_repo: Arc<dyn LocalizedFieldsRepository>,
        time_source: Arc<dyn SystemTimeSource>,
    ) -> Self {
        Self {
            config,
            search_repo,
            embeddings_encoder,
            localized_fields_repo,
            time_source,
        }
    }

    async fn build_query(&self, req: &SearchRequest) -> Result<StructuredQuery, GeoSearchError> {
        let filters = FilterCompiler::compile_request_filters(
            &req.filters,
            &self.config.fields,
            self.time_source.today(),
        )?;
        let sort =
            FilterCompiler::compile_sort(req.sort_field.as_deref(), req.sort_order.as_deref())?;

        tracing::debug!(
            stage = ?SearchStage::FiltersCompiled,
            num_filters = filters.len(),
            sort_field = sort.field().as_str(),
            sort_order = sort.order().as_str(),
        );

        let embedding = match req.mode {
            SearchMode::Semantic => {
                tracing::debug!(stage = ?SearchStage::EmbeddingRequested);
                self.encode_query(req.query.as_deref()).await
            }
            SearchMode::Lexical => None,
        };

        // Deeper pages of a semantic search need more neighbors
        let k_neighbors = self
            .config
            .k_neighbors
            .max(req.page.from.saturating_add(req.page.size));

        let query = QueryAssembler::assemble(
            &self.config.fields,
            req.mode,
            req.query.as_deref(),
            embedding.as_deref(),
            filters,
            sort,
            req.page,
            k_neighbors,
        );

        tracing::debug!(
            stage = ?SearchStage::QueryAssembled,
            has_knn = query.has_knn(),
            from = query.page.from,
            size = query.page.size,
        );

        Ok(query)
    }

    /// Returns `None` when the query cannot be embedded, which degrades a
    /// semantic search to a filter-only query
    async fn encode_query(&self, text: Option<&str>) -> Option<Vec<f32>> {
        let text = text.map(str::trim).filter(|t| !t.is_empty())?;

        match self.embeddings_encoder.encode(vec![text.to_string()]).await {
            Ok(vectors) => match vectors.into_iter().next() {
                Some(vector) if !vector.is_empty() => Some(vector),
                _ => {
                    tracing::warn!(
                        "Embedding provider returned no vector, running a filter-only query"
                    );
                    None
                }
            },
            Err(e) => {
                tracing::warn!(
                    error = ?e,
                    error_msg = %e.reason(),
                    "Embedding provider is unavailable, running a filter-only query",
                );
                None
            }
        }
    }

    /// Sequential best-effort lookup, failures leave the original fields in
    /// place
    async fn fetch_localized_fields(
        &self,
        hits: &SearchHits,
    ) -> HashMap<SearchDocumentId, LocalizedFields> {
        let mut localized = HashMap::new();

        for document_id in ResultProjector::document_ids(hits) {
            if localized.contains_key(&document_id) {
                continue;
            }

            match self
                .localized_fields_repo
                .fetch_localized_fields(&document_id)
                .await
            {
                Ok(Some(fields)) if fields.is_complete() => {
                    localized.insert(document_id, fields);
                }
                Ok(Some(_)) => {
                    tracing::debug!(%document_id, "Ignoring partial localized fields");
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        %document_id,
                        error = ?e,
                        error_msg = %e.reason(),
                        "Localized fields lookup failed",
                    );
                }
            }
        }

        localized
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl GeoSearchService for GeoSearchServiceImpl {
    #[tracing::instrument(
        level = "debug",
        name = "GeoSearchServiceImpl_search",
        skip_all,
        fields(mode = ?req.mode, locale = ?req.locale, from = req.page.from, size = req.page.size)
    )]
    async fn search(&self, req: SearchRequest) -> Result<SearchResponse, GeoSearchError> {
        tracing::debug!(stage = ?SearchStage::Received, query = ?req.query);

        let query = self.build_query(&req).await?;

        let hits = self
            .search_repo
            .search(&self.config.index_name, query)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    error_msg = %e.reason(),
                    index_name = %self.config.index_name,
                    "Search backend query failed",
                );
                BackendUnavailableError::new(e)
            })?;

        tracing::debug!(
            stage = ?SearchStage::BackendQueried,
            total_hits = hits.total_hits,
            num_hits = hits.hits.len(),
        );

        let localized = match req.locale {
            SearchLocale::Fr => self.fetch_localized_fields(&hits).await,
            SearchLocale::En => HashMap::new(),
        };

        let response = ResultProjector::project(hits, &localized);

        tracing::debug!(
            stage = ?SearchStage::Projected,
            returned_hits = response.returned_hits,
            num_localized = localized.len(),
        );
        tracing::debug!(stage = ?SearchStage::Responded);

        Ok(response)
    }

    #[tracing::instrument(
        level = "debug",
        name = "GeoSearchServiceImpl_prepare_query",
        skip_all,
        fields(mode = ?req.mode)
    )]
    async fn prepare_query(&self, req: &SearchRequest) -> Result<StructuredQuery, GeoSearchError> {
        tracing::debug!(stage = ?SearchStage::Received, query = ?req.query);

        self.build_query(req).await
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
