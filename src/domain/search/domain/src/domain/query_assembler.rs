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

pub struct QueryAssembler {}

impl QueryAssembler {
    /// Combines compiled filters, an optional query embedding, sort and
    /// pagination into one query.
    ///
    /// In semantic mode the `must` list holds exactly one knn clause when the
    /// embedding is non-empty and nothing otherwise, degrading to a filter-only
    /// query. In lexical mode it holds a `multi_match` over the lexical fields,
    /// or `match_all` when there is no text. The two are never combined, so an
    /// embedding passed in lexical mode is ignored.
    pub fn assemble(
        fields: &SearchFieldMappings,
        mode: SearchMode,
        text_query: Option<&str>,
        embedding: Option<&[f32]>,
        filters: Vec<CompiledFilter>,
        sort: SortDirective,
        page: SearchPage,
        k_neighbors: usize,
    ) -> StructuredQuery {
        let must = match mode {
            SearchMode::Semantic => match embedding {
                Some(vector) if !vector.is_empty() => vec![MustClause::Knn {
                    field: fields.embedding.clone(),
                    vector: vector.to_vec(),
                    k: k_neighbors,
                }],
                _ => Vec::new(),
            },
            SearchMode::Lexical => match text_query.map(str::trim) {
                Some(text) if !text.is_empty() => vec![MustClause::MultiMatch {
                    query: text.to_string(),
                    fields: fields.lexical.clone(),
                }],
                _ => vec![MustClause::MatchAll],
            },
        };

        StructuredQuery {
            must,
            filter: filters,
            sort,
            page,
            source_excludes: vec![fields.embedding.clone()],
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
