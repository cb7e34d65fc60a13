// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use geo_search::*;
use geo_search_services::*;
use internal_error::InternalError;
use pretty_assertions::assert_eq;
use serde_json::json;
use time_source::FakeSystemTimeSource;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_lexical_search_does_not_encode() {
    let mut encoder = MockEmbeddingsEncoder::new();
    encoder.expect_encode().never();

    let harness = GeoSearchServiceHarness::new(encoder, MockLocalizedFieldsRepository::new());

    let response = harness
        .service
        .search(request(json!({"q": "lakes", "org": "NRCan"})))
        .await
        .unwrap();

    assert_eq!(response.returned_hits, 2);

    let query = harness.last_query();
    assert_eq!(
        query.must,
        vec![MustClause::MultiMatch {
            query: "lakes".to_string(),
            fields: SearchFieldMappings::default().lexical,
        }]
    );
    assert_eq!(query.filter.len(), 1);
    assert_eq!(harness.last_index_name(), GeoSearchConfig::DEFAULT_INDEX_NAME);
}

#[test_log::test(tokio::test)]
async fn test_semantic_search_uses_embedding() {
    let mut encoder = MockEmbeddingsEncoder::new();
    encoder
        .expect_encode()
        .withf(|input| input == &["forest fires".to_string()])
        .times(1)
        .returning(|_| Ok(vec![vec![0.5, 0.25]]));

    let harness = GeoSearchServiceHarness::new(encoder, MockLocalizedFieldsRepository::new());

    harness
        .service
        .search(request(json!({
            "q": "forest fires",
            "method": "SemanticSearch",
            "from": "15",
            "size": 10,
        })))
        .await
        .unwrap();

    let query = harness.last_query();
    assert_eq!(
        query.must,
        vec![MustClause::Knn {
            field: "vector".to_string(),
            vector: vec![0.5, 0.25],
            k: 25,
        }]
    );
    assert_eq!(query.page, SearchPage { from: 15, size: 10 });
}

#[test_log::test(tokio::test)]
async fn test_semantic_search_degrades_when_encoder_fails() {
    let mut encoder = MockEmbeddingsEncoder::new();
    encoder
        .expect_encode()
        .times(1)
        .returning(|_| InternalError::bail("model is down"));

    let harness = GeoSearchServiceHarness::new(encoder, MockLocalizedFieldsRepository::new());

    let response = harness
        .service
        .search(request(json!({
            "q": "forest fires",
            "method": "SemanticSearch",
            "theme": "environment",
        })))
        .await
        .unwrap();

    assert_eq!(response.returned_hits, 2);

    let query = harness.last_query();
    assert!(query.must.is_empty());
    assert_eq!(query.filter.len(), 1);
}

#[test_log::test(tokio::test)]
async fn test_semantic_search_degrades_on_empty_embedding() {
    let mut encoder = MockEmbeddingsEncoder::new();
    encoder.expect_encode().returning(|_| Ok(vec![vec![]]));

    let harness = GeoSearchServiceHarness::new(encoder, MockLocalizedFieldsRepository::new());

    harness
        .service
        .search(request(json!({"q": "x", "method": "SemanticSearch"})))
        .await
        .unwrap();

    assert!(!harness.last_query().has_knn());
}

#[test_log::test(tokio::test)]
async fn test_invalid_filter_fails_before_backend() {
    let mut search_repo = MockSearchRepository::new();
    search_repo.expect_search().never();

    let harness = GeoSearchServiceHarness::with_backend(
        MockEmbeddingsEncoder::new(),
        MockLocalizedFieldsRepository::new(),
        search_repo,
        Default::default(),
    );

    let err = harness
        .service
        .search(request(json!({"q": "x", "bbox": "1|2|3"})))
        .await
        .unwrap_err();
    assert!(
        matches!(
            err,
            GeoSearchError::InvalidFilterInput(InvalidFilterInputError::MalformedBoundingBox { .. })
        ),
        "{err:?}"
    );

    let err = harness
        .service
        .search(request(json!({"sort": "size"})))
        .await
        .unwrap_err();
    assert!(
        matches!(
            err,
            GeoSearchError::InvalidFilterInput(InvalidFilterInputError::UnsupportedSortField { .. })
        ),
        "{err:?}"
    );
}

#[test_log::test(tokio::test)]
async fn test_backend_failure_is_surfaced() {
    let mut search_repo = MockSearchRepository::new();
    search_repo
        .expect_search()
        .times(1)
        .returning(|_, _| InternalError::bail("connection refused"));

    let harness = GeoSearchServiceHarness::with_backend(
        MockEmbeddingsEncoder::new(),
        MockLocalizedFieldsRepository::new(),
        search_repo,
        Default::default(),
    );

    let err = harness
        .service
        .search(request(json!({"q": "x"})))
        .await
        .unwrap_err();

    assert!(matches!(err, GeoSearchError::BackendUnavailable(_)), "{err:?}");
}

#[test_log::test(tokio::test)]
async fn test_french_locale_substitutes_fields() {
    let mut localized_repo = MockLocalizedFieldsRepository::new();
    localized_repo
        .expect_fetch_localized_fields()
        .withf(|id| id.to_string() == "doc-1")
        .times(1)
        .returning(|_| {
            Ok(Some(LocalizedFields {
                title: "Lacs".to_string(),
                description: "Lacs du Canada".to_string(),
                keywords: "eau".to_string(),
            }))
        });
    localized_repo
        .expect_fetch_localized_fields()
        .withf(|id| id.to_string() == "doc-2")
        .times(1)
        .returning(|_| InternalError::bail("index missing"));

    let harness = GeoSearchServiceHarness::new(MockEmbeddingsEncoder::new(), localized_repo);

    let response = harness
        .service
        .search(request(json!({"q": "lakes", "lang": "fr"})))
        .await
        .unwrap();

    assert_eq!(response.returned_hits, 2);
    assert_eq!(
        response.items[0].features[0].properties["title"],
        json!("Lacs")
    );
    assert_eq!(
        response.items[1].features[0].properties["title"],
        json!("Rivers")
    );
}

#[test_log::test(tokio::test)]
async fn test_english_locale_skips_lookup() {
    let mut localized_repo = MockLocalizedFieldsRepository::new();
    localized_repo.expect_fetch_localized_fields().never();

    let harness = GeoSearchServiceHarness::new(MockEmbeddingsEncoder::new(), localized_repo);

    let response = harness
        .service
        .search(request(json!({"q": "lakes"})))
        .await
        .unwrap();

    assert_eq!(
        response.items[0].features[0].properties["title"],
        json!("Lakes")
    );
}

#[test_log::test(tokio::test)]
async fn test_present_end_date_uses_current_date() {
    let harness = GeoSearchServiceHarness::new(
        MockEmbeddingsEncoder::new(),
        MockLocalizedFieldsRepository::new(),
    );

    let query = harness
        .service
        .prepare_query(&request(json!({"begin": "2020", "end": "present"})))
        .await
        .unwrap();

    assert_eq!(
        query.filter,
        vec![
            CompiledFilter::DateRange {
                field: "temporalExtent.begin".to_string(),
                comparator: RangeComparator::Gte,
                bound: "2020-01-01".to_string(),
            },
            CompiledFilter::DateRange {
                field: "temporalExtent.end".to_string(),
                comparator: RangeComparator::Lte,
                bound: "2024-06-30".to_string(),
            },
        ]
    );
    assert_eq!(query.must, vec![MustClause::MatchAll]);
    assert_eq!(query.sort, SortDirective::relevance());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Harness
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn request(params: serde_json::Value) -> SearchRequest {
    serde_json::from_value::<RawSearchParams>(params)
        .unwrap()
        .into()
}

fn sample_hits() -> SearchHits {
    let point = json!({"type": "Point", "coordinates": [-75.7, 45.4]});
    SearchHits {
        total_hits: 42,
        hits: vec![
            SearchHit {
                id: "doc-1".to_string(),
                score: Some(2.0),
                source: Some(json!({
                    "id": "doc-1",
                    "coordinates": point.clone(),
                    "title": "Lakes",
                    "description": "Lakes of Canada",
                    "keywords": "water",
                })),
            },
            SearchHit {
                id: "doc-2".to_string(),
                score: Some(1.0),
                source: Some(json!({
                    "id": "doc-2",
                    "coordinates": point,
                    "title": "Rivers",
                })),
            },
        ],
    }
}

struct GeoSearchServiceHarness {
    service: GeoSearchServiceImpl,
    captured: Arc<Mutex<Vec<(String, StructuredQuery)>>>,
}

impl GeoSearchServiceHarness {
    fn new(
        encoder: MockEmbeddingsEncoder,
        localized_repo: MockLocalizedFieldsRepository,
    ) -> Self {
        let captured = Arc::new(Mutex::new(Vec::new()));

        let mut search_repo = MockSearchRepository::new();
        search_repo.expect_search().returning({
            let captured = captured.clone();
            move |index_name, query| {
                captured
                    .lock()
                    .unwrap()
                    .push((index_name.to_string(), query));
                Ok(sample_hits())
            }
        });

        Self::with_backend(encoder, localized_repo, search_repo, captured)
    }

    fn with_backend(
        encoder: MockEmbeddingsEncoder,
        localized_repo: MockLocalizedFieldsRepository,
        search_repo: MockSearchRepository,
        captured: Arc<Mutex<Vec<(String, StructuredQuery)>>>,
    ) -> Self {
        let time_source =
            FakeSystemTimeSource::new_set(Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap());

        let service = GeoSearchServiceImpl::new(
            Arc::new(GeoSearchConfig::default()),
            Arc::new(search_repo),
            Arc::new(encoder),
            Arc::new(localized_repo),
            Arc::new(time_source),
        );

        Self { service, captured }
    }

    fn last_query(&self) -> StructuredQuery {
        self.captured.lock().unwrap().last().unwrap().1.clone()
    }

    fn last_index_name(&self) -> String {
        self.captured.lock().unwrap().last().unwrap().0.clone()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
