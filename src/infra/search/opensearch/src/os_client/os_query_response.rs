// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Body of `POST <index>/_search`, reduced to what the search path reads
#[derive(Debug, serde::Deserialize)]
pub struct QueryResponse {
    pub took: u64,
    pub timed_out: bool,
    pub hits: QueryHits,
}

#[derive(Debug, serde::Deserialize)]
pub struct QueryHits {
    /// Absent when the request disables total tracking
    pub total: Option<QueryHitsTotal>,
    pub hits: Vec<QueryHit>,
}

#[derive(Debug, serde::Deserialize)]
pub struct QueryHitsTotal {
    pub value: u64,
}

#[derive(Debug, serde::Deserialize)]
pub struct QueryHit {
    #[serde(rename = "_id", default)]
    pub id: String,

    #[serde(rename = "_score")]
    pub score: Option<f64>,

    #[serde(rename = "_source")]
    pub source: Option<serde_json::Value>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl From<QueryResponse> for geo_search::SearchHits {
    fn from(response: QueryResponse) -> Self {
        let QueryHits { total, hits } = response.hits;

        let hits: Vec<_> = hits
            .into_iter()
            .map(|hit| geo_search::SearchHit {
                id: hit.id,
                score: hit.score,
                source: hit.source,
            })
            .collect();

        Self {
            total_hits: total.map_or(hits.len() as u64, |total| total.value),
            hits,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
