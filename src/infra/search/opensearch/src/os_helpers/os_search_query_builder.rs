// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use geo_search::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Renders [`StructuredQuery`] into OpenSearch query DSL
pub struct OpenSearchQueryBuilder {}

impl OpenSearchQueryBuilder {
    pub fn build_search_query(query: &StructuredQuery) -> serde_json::Value {
        serde_json::json!({
            "track_total_hits": true,
            "from": query.page.from,
            "size": query.page.size,
            "_source": {
                "excludes": query.source_excludes,
            },
            "sort": Self::sort_argument(query.sort),
            "query": Self::query_argument(&query.must, &query.filter),
        })
    }

    fn query_argument(must: &[MustClause], filter: &[CompiledFilter]) -> serde_json::Value {
        serde_json::json!({
            "bool": {
                "must": must.iter().map(Self::must_clause).collect::<Vec<_>>(),
                "filter": filter.iter().map(Self::filter).collect::<Vec<_>>(),
            }
        })
    }

    fn must_clause(clause: &MustClause) -> serde_json::Value {
        match clause {
            MustClause::Knn { field, vector, k } => serde_json::json!({
                "knn": {
                    field: {
                        "vector": vector,
                        "k": k,
                    }
                }
            }),
            MustClause::MultiMatch { query, fields } => serde_json::json!({
                "multi_match": {
                    "query": query,
                    "fields": fields,
                }
            }),
            MustClause::MatchAll => serde_json::json!({
                "match_all": {}
            }),
        }
    }

    pub fn filter(filter: &CompiledFilter) -> serde_json::Value {
        match filter {
            CompiledFilter::WildcardOr {
                field_paths,
                values,
            } => {
                let should: Vec<_> = values
                    .iter()
                    .flat_map(|value| {
                        field_paths.iter().map(move |field| {
                            serde_json::json!({
                                "wildcard": {
                                    field: {
                                        "value": format!("*{value}*"),
                                    }
                                }
                            })
                        })
                    })
                    .collect();

                serde_json::json!({
                    "bool": {
                        "should": should,
                        "minimum_should_match": 1,
                    }
                })
            }
            CompiledFilter::DateRange {
                field,
                comparator,
                bound,
            } => serde_json::json!({
                "range": {
                    field: {
                        comparator.as_str(): bound,
                    }
                }
            }),
            CompiledFilter::ExactTerm { field, value } => serde_json::json!({
                "term": {
                    field: value,
                }
            }),
            CompiledFilter::GeoEnvelope(envelope) => serde_json::json!({
                "geo_shape": {
                    envelope.field(): {
                        "shape": {
                            "type": "envelope",
                            "coordinates": envelope.envelope_coordinates(),
                        },
                        "relation": envelope.relation().as_str(),
                    }
                }
            }),
        }
    }

    fn sort_argument(sort: SortDirective) -> serde_json::Value {
        serde_json::json!([
            {
                sort.field().as_str(): {
                    "order": sort.order().as_str(),
                }
            }
        ])
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
