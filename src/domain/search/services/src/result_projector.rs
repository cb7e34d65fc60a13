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
use serde_json::{Map, Value};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const PROPERTY_RELEVANCY: &str = "relevancy";
pub const PROPERTY_ROW_NUM: &str = "row_num";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Maps raw backend hits into single-feature collections
pub struct ResultProjector {}

impl ResultProjector {
    /// Projects hits in backend order. A hit that cannot be projected is logged
    /// and skipped, it never fails the batch.
    ///
    /// `localized` maps document identifiers to French field variants, and is
    /// empty unless the request locale is French.
    pub fn project(
        hits: SearchHits,
        localized: &HashMap<SearchDocumentId, LocalizedFields>,
    ) -> SearchResponse {
        let total_hits = hits.total_hits;
        let mut items = Vec::with_capacity(hits.hits.len());

        for (i, hit) in hits.hits.into_iter().enumerate() {
            let row_num = i + 1;
            let hit_id = hit.id.clone();

            match Self::project_hit(hit, row_num, localized) {
                Ok(feature) => items.push(FeatureCollection::single(feature)),
                Err(err) => {
                    tracing::warn!(%hit_id, row_num, error = %err, "Skipping search hit");
                }
            }
        }

        SearchResponse {
            total_hits,
            returned_hits: items.len(),
            items,
        }
    }

    pub fn project_hit(
        hit: SearchHit,
        row_num: usize,
        localized: &HashMap<SearchDocumentId, LocalizedFields>,
    ) -> Result<Feature, HitProjectionError> {
        let source = match hit.source {
            None | Some(Value::Null) => return Err(HitProjectionError::MissingSource),
            Some(Value::Object(source)) => source,
            Some(_) => return Err(HitProjectionError::SourceNotAnObject),
        };

        let document_id = Self::document_id(&source, &hit.id);

        let mut source = source;
        source.shift_remove(SEARCH_FIELD_VECTOR);

        let geometry = match source.shift_remove(SEARCH_FIELD_COORDINATES) {
            None | Some(Value::Null) => return Err(HitProjectionError::MissingGeometry),
            Some(geometry @ Value::Object(_)) => geometry,
            Some(_) => return Err(HitProjectionError::MalformedGeometry),
        };

        let mut properties = Map::with_capacity(source.len() + 2);
        properties.insert(PROPERTY_RELEVANCY.to_string(), serde_json::json!(hit.score));
        properties.insert(PROPERTY_ROW_NUM.to_string(), Value::from(row_num));
        // Injected score and rank take precedence over same-named source fields
        properties.extend(
            source
                .into_iter()
                .filter(|(key, _)| key != PROPERTY_RELEVANCY && key != PROPERTY_ROW_NUM),
        );

        if let Some(fields) = localized.get(&document_id) {
            fields.apply_to(&mut properties);
        }

        Ok(Feature {
            geometry,
            properties,
        })
    }

    /// Identifier stored in the document, the backend id otherwise
    pub fn document_id(source: &Map<String, Value>, hit_id: &str) -> SearchDocumentId {
        match source.get(SEARCH_FIELD_ID) {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => hit_id.to_string(),
        }
    }

    /// Identifiers of the hits worth a localized lookup, in hit order
    pub fn document_ids(hits: &SearchHits) -> Vec<SearchDocumentId> {
        hits.hits
            .iter()
            .filter_map(|hit| match &hit.source {
                Some(Value::Object(source)) => Some(Self::document_id(source, &hit.id)),
                _ => None,
            })
            .collect()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, thiserror::Error)]
pub enum HitProjectionError {
    #[error("Hit has no source document")]
    MissingSource,

    #[error("Hit source is not a JSON object")]
    SourceNotAnObject,

    #[error("Hit source has no geometry")]
    MissingGeometry,

    #[error("Hit geometry is not a GeoJSON object")]
    MalformedGeometry,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
