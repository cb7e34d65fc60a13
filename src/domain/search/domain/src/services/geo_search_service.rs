// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg_attr(any(feature = "testing", test), mockall::automock)]
#[async_trait::async_trait]
pub trait GeoSearchService: Send + Sync {
    /// Runs a lexical or semantic search and projects the hits into features
    async fn search(&self, req: SearchRequest) -> Result<SearchResponse, GeoSearchError>;

    /// Compiles filters, encodes the query text if needed and assembles the
    /// query without contacting the index backend
    async fn prepare_query(&self, req: &SearchRequest) -> Result<StructuredQuery, GeoSearchError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, thiserror::Error)]
pub enum GeoSearchError {
    #[error(transparent)]
    InvalidFilterInput(#[from] InvalidFilterInputError),

    #[error(transparent)]
    BackendUnavailable(#[from] BackendUnavailableError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Debug, thiserror::Error)]
#[error("Search backend is unavailable")]
pub struct BackendUnavailableError {
    #[source]
    pub source: InternalError,
}

impl BackendUnavailableError {
    pub fn new(source: InternalError) -> Self {
        Self { source }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
