// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::NaiveDate;
use geo_search::*;
use geo_search_opensearch::OpenSearchQueryBuilder;
use pretty_assertions::assert_eq;
use serde_json::json;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn assemble(
    mode: SearchMode,
    text: Option<&str>,
    embedding: Option<&[f32]>,
    filters: Vec<CompiledFilter>,
    sort: SortDirective,
) -> StructuredQuery {
    QueryAssembler::assemble(
        &SearchFieldMappings::default(),
        mode,
        text,
        embedding,
        filters,
        sort,
        SearchPage::default(),
        10,
    )
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_lexical_query() {
    let query = assemble(
        SearchMode::Lexical,
        Some("lakes"),
        None,
        vec![],
        SortDirective::relevance(),
    );

    assert_eq!(
        OpenSearchQueryBuilder::build_search_query(&query),
        json!({
            "track_total_hits": true,
            "from": 0,
            "size": 10,
            "_source": {"excludes": ["vector"]},
            "sort": [{"_score": {"order": "desc"}}],
            "query": {
                "bool": {
                    "must": [{
                        "multi_match": {
                            "query": "lakes",
                            "fields": [
                                "topicCategory",
                                "keywords",
                                "description",
                                "title*",
                                "organisation",
                                "systemName",
                            ],
                        }
                    }],
                    "filter": [],
                }
            },
        })
    );
}

#[test]
fn test_semantic_query_with_filters() {
    let filters = vec![
        FilterCompiler::compile_wildcard_or(&["a.en", "a.fr"], "x, y").unwrap(),
        FilterCompiler::compile_spatial("coordinates", "-80|40|-70|50", Some("within")).unwrap(),
    ];
    let sort = FilterCompiler::compile_sort(Some("date"), Some("asc")).unwrap();

    let query = assemble(
        SearchMode::Semantic,
        Some("lakes"),
        Some(&[0.5, -0.5][..]),
        filters,
        sort,
    );

    assert_eq!(
        OpenSearchQueryBuilder::build_search_query(&query),
        json!({
            "track_total_hits": true,
            "from": 0,
            "size": 10,
            "_source": {"excludes": ["vector"]},
            "sort": [{"date": {"order": "asc"}}],
            "query": {
                "bool": {
                    "must": [{
                        "knn": {
                            "vector": {"vector": [0.5, -0.5], "k": 10}
                        }
                    }],
                    "filter": [
                        {
                            "bool": {
                                "should": [
                                    {"wildcard": {"a.en": {"value": "*x*"}}},
                                    {"wildcard": {"a.fr": {"value": "*x*"}}},
                                    {"wildcard": {"a.en": {"value": "*y*"}}},
                                    {"wildcard": {"a.fr": {"value": "*y*"}}},
                                ],
                                "minimum_should_match": 1,
                            }
                        },
                        {
                            "geo_shape": {
                                "coordinates": {
                                    "shape": {
                                        "type": "envelope",
                                        "coordinates": [[-80.0, 50.0], [-70.0, 40.0]],
                                    },
                                    "relation": "within",
                                }
                            }
                        },
                    ],
                }
            },
        })
    );
}

#[test]
fn test_date_filters() {
    let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

    let rendered: Vec<_> = FilterCompiler::compile_date_range(
        Some("temporalExtent.begin"),
        Some("temporalExtent.end"),
        Some("2020-05"),
        Some("present"),
        today,
    )
    .iter()
    .map(OpenSearchQueryBuilder::filter)
    .collect();

    assert_eq!(
        rendered,
        vec![
            json!({"range": {"temporalExtent.begin": {"gte": "2020-05-01"}}}),
            json!({"range": {"temporalExtent.end": {"lte": "2024-01-02"}}}),
        ]
    );

    let rendered: Vec<_> =
        FilterCompiler::compile_date_range(None, Some("temporalExtent.end"), None, Some("null"), today)
            .iter()
            .map(OpenSearchQueryBuilder::filter)
            .collect();

    assert_eq!(
        rendered,
        vec![json!({"term": {"temporalExtent.end": "null"}})]
    );
}

#[test]
fn test_filter_only_semantic_query() {
    let query = assemble(
        SearchMode::Semantic,
        Some("lakes"),
        None,
        vec![FilterCompiler::compile_wildcard_or(&["t"], "forest").unwrap()],
        SortDirective::relevance(),
    );

    let rendered = OpenSearchQueryBuilder::build_search_query(&query);

    assert_eq!(rendered["query"]["bool"]["must"], json!([]));
    assert_eq!(
        rendered["query"]["bool"]["filter"],
        json!([{
            "bool": {
                "should": [{"wildcard": {"t": {"value": "*forest*"}}}],
                "minimum_should_match": 1,
            }
        }])
    );
}

#[test]
fn test_match_all_without_text() {
    let query = assemble(
        SearchMode::Lexical,
        None,
        None,
        vec![],
        SortDirective::relevance(),
    );

    let rendered = OpenSearchQueryBuilder::build_search_query(&query);

    assert_eq!(rendered["query"]["bool"]["must"], json!([{"match_all": {}}]));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
