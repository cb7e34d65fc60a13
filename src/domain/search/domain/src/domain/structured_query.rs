// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Backend-neutral boolean search query.
///
/// Every entry of `filter` must match (AND), `must` contributes to scoring.
/// Pagination and sort are top-level directives.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredQuery {
    pub must: Vec<MustClause>,
    pub filter: Vec<CompiledFilter>,
    pub sort: SortDirective,
    pub page: SearchPage,

    /// Source fields the backend should not return
    pub source_excludes: Vec<SearchFieldPath>,
}

impl StructuredQuery {
    pub fn has_knn(&self) -> bool {
        self.must
            .iter()
            .any(|c| matches!(c, MustClause::Knn { .. }))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MustClause {
    /// Top-`k` nearest neighbors of `vector`
    Knn {
        field: SearchFieldPath,
        vector: Vec<f32>,
        k: usize,
    },

    MultiMatch {
        query: String,
        fields: Vec<SearchFieldPath>,
    },

    MatchAll,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
