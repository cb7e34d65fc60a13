// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;

use geo_search::*;
use geo_search_services::*;
use pretty_assertions::assert_eq;
use serde_json::json;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn hit(id: &str, score: f64, source: serde_json::Value) -> SearchHit {
    SearchHit {
        id: id.to_string(),
        score: Some(score),
        source: Some(source),
    }
}

fn point() -> serde_json::Value {
    json!({"type": "Point", "coordinates": [-75.7, 45.4]})
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_project_strips_vector_and_extracts_geometry() {
    let hits = SearchHits {
        total_hits: 1,
        hits: vec![hit(
            "h1",
            1.5,
            json!({
                "vector": [0.1, 0.2],
                "coordinates": point(),
                "title": "T",
            }),
        )],
    };

    let response = ResultProjector::project(hits, &HashMap::new());

    assert_eq!(response.total_hits, 1);
    assert_eq!(response.returned_hits, 1);
    assert_eq!(
        serde_json::to_value(&response.items).unwrap(),
        json!([{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": point(),
                "properties": {"relevancy": 1.5, "row_num": 1, "title": "T"},
            }],
        }])
    );
}

#[test]
fn test_project_property_order() {
    let hits = SearchHits {
        total_hits: 10,
        hits: vec![hit(
            "h1",
            0.25,
            json!({"zeta": 1, "coordinates": point(), "alpha": 2, "id": "doc-1"}),
        )],
    };

    let response = ResultProjector::project(hits, &HashMap::new());
    let keys: Vec<_> = response.items[0].features[0]
        .properties
        .keys()
        .cloned()
        .collect();

    assert_eq!(keys, ["relevancy", "row_num", "zeta", "alpha", "id"]);
    assert_eq!(response.total_hits, 10);
}

#[test]
fn test_project_keeps_order_around_removed_fields() {
    let hits = SearchHits {
        total_hits: 1,
        hits: vec![hit(
            "h1",
            0.5,
            json!({
                "a": 1,
                "vector": [0.1],
                "b": 2,
                "coordinates": point(),
                "c": 3,
                "d": 4,
            }),
        )],
    };

    let response = ResultProjector::project(hits, &HashMap::new());
    let keys: Vec<_> = response.items[0].features[0]
        .properties
        .keys()
        .cloned()
        .collect();

    assert_eq!(keys, ["relevancy", "row_num", "a", "b", "c", "d"]);
}

#[test]
fn test_project_injected_properties_win_over_source() {
    let hits = SearchHits {
        total_hits: 1,
        hits: vec![hit(
            "h1",
            2.5,
            json!({
                "title": "T",
                "row_num": 99,
                "coordinates": point(),
                "relevancy": "high",
            }),
        )],
    };

    let response = ResultProjector::project(hits, &HashMap::new());
    let props = &response.items[0].features[0].properties;

    assert_eq!(props["relevancy"], json!(2.5));
    assert_eq!(props["row_num"], json!(1));
    assert_eq!(
        props.keys().cloned().collect::<Vec<_>>(),
        ["relevancy", "row_num", "title"]
    );
}

#[test]
fn test_project_skips_malformed_hits() {
    let hits = SearchHits {
        total_hits: 5,
        hits: vec![
            hit("h1", 3.0, json!({"coordinates": point(), "title": "A"})),
            hit("h2", 2.0, json!({"title": "no geometry"})),
            hit("h3", 1.5, json!({"coordinates": "POINT(1 2)"})),
            SearchHit {
                id: "h4".to_string(),
                score: None,
                source: None,
            },
            hit("h5", 1.0, json!({"coordinates": point(), "title": "E"})),
        ],
    };

    let response = ResultProjector::project(hits, &HashMap::new());

    assert_eq!(response.returned_hits, 2);
    assert_eq!(response.items.len(), 2);
    assert_eq!(response.total_hits, 5);

    let row_nums: Vec<_> = response
        .items
        .iter()
        .map(|fc| fc.features[0].properties["row_num"].clone())
        .collect();
    assert_eq!(row_nums, [json!(1), json!(5)]);
}

#[test]
fn test_project_hit_errors() {
    let localized = HashMap::new();

    assert!(matches!(
        ResultProjector::project_hit(hit("h", 1.0, json!([1, 2])), 1, &localized),
        Err(HitProjectionError::SourceNotAnObject)
    ));
    assert!(matches!(
        ResultProjector::project_hit(hit("h", 1.0, json!({"coordinates": null})), 1, &localized),
        Err(HitProjectionError::MissingGeometry)
    ));
    assert!(matches!(
        ResultProjector::project_hit(hit("h", 1.0, json!({"coordinates": [1, 2]})), 1, &localized),
        Err(HitProjectionError::MalformedGeometry)
    ));
}

#[test]
fn test_project_applies_localized_fields_by_document_id() {
    let hits = SearchHits {
        total_hits: 2,
        hits: vec![
            hit(
                "backend-1",
                2.0,
                json!({
                    "id": "doc-1",
                    "coordinates": point(),
                    "title": "Lakes",
                    "description": "Lakes of Canada",
                    "keywords": "water",
                }),
            ),
            hit(
                "doc-2",
                1.0,
                json!({"coordinates": point(), "title": "Rivers"}),
            ),
        ],
    };

    let localized = HashMap::from([(
        "doc-1".to_string(),
        LocalizedFields {
            title: "Lacs".to_string(),
            description: "Lacs du Canada".to_string(),
            keywords: "eau".to_string(),
        },
    )]);

    let response = ResultProjector::project(hits, &localized);

    let first = &response.items[0].features[0].properties;
    assert_eq!(first["title"], json!("Lacs"));
    assert_eq!(first["description"], json!("Lacs du Canada"));
    assert_eq!(first["keywords"], json!("eau"));

    let second = &response.items[1].features[0].properties;
    assert_eq!(second["title"], json!("Rivers"));
}

#[test]
fn test_project_ignores_partial_localized_fields() {
    let hits = SearchHits {
        total_hits: 1,
        hits: vec![hit(
            "doc-1",
            1.0,
            json!({"coordinates": point(), "title": "Lakes", "description": "D"}),
        )],
    };

    let localized = HashMap::from([(
        "doc-1".to_string(),
        LocalizedFields {
            title: "Lacs".to_string(),
            description: String::new(),
            keywords: "eau".to_string(),
        },
    )]);

    let response = ResultProjector::project(hits, &localized);

    let props = &response.items[0].features[0].properties;
    assert_eq!(props["title"], json!("Lakes"));
    assert_eq!(props["description"], json!("D"));
    assert!(!props.contains_key("keywords"));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
