// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::SearchDocumentId;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Raw backend result, hits in backend sort order
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SearchHits {
    /// Total number of matching documents, may exceed `hits.len()`
    pub total_hits: u64,
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub id: SearchDocumentId,
    pub score: Option<f64>,
    pub source: Option<serde_json::Value>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Default, Clone, PartialEq, serde::Serialize)]
pub struct SearchResponse {
    pub total_hits: u64,

    /// Number of successfully projected hits, i.e. `items.len()`
    pub returned_hits: usize,

    pub items: Vec<FeatureCollection>,
}

/// Single-feature collection wrapping one search result
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn single(feature: Feature) -> Self {
        Self {
            features: vec![feature],
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    /// GeoJSON geometry object
    pub geometry: serde_json::Value,

    /// `relevancy` and `row_num` first, then the document fields in source order
    pub properties: serde_json::Map<String, serde_json::Value>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
