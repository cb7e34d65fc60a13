// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub type SearchDocumentId = String;
pub type SearchFieldPath = String;

/// Source field holding the embedding vector of a document
pub const SEARCH_FIELD_VECTOR: &str = "vector";

/// Source field holding the GeoJSON geometry of a document
pub const SEARCH_FIELD_COORDINATES: &str = "coordinates";

/// Source field holding the document identifier
pub const SEARCH_FIELD_ID: &str = "id";

pub const SEARCH_FIELD_TITLE: &str = "title";
pub const SEARCH_FIELD_DESCRIPTION: &str = "description";
pub const SEARCH_FIELD_KEYWORDS: &str = "keywords";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Index field paths touched by filter compilation and query assembly
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchFieldMappings {
    /// Organisation name in every indexed language
    pub organisation: Vec<SearchFieldPath>,

    /// Source system the metadata record was harvested from
    pub metadata_source: Vec<SearchFieldPath>,

    /// Topic category
    pub theme: Vec<SearchFieldPath>,

    /// Resource type
    pub resource_type: Vec<SearchFieldPath>,

    /// Beginning of the temporal extent
    pub temporal_begin: SearchFieldPath,

    /// End of the temporal extent
    pub temporal_end: SearchFieldPath,

    /// `geo_shape` field
    pub geometry: SearchFieldPath,

    /// `knn_vector` field
    pub embedding: SearchFieldPath,

    /// Fields searched by the lexical `multi_match` clause
    pub lexical: Vec<SearchFieldPath>,
}

impl Default for SearchFieldMappings {
    fn default() -> Self {
        Self {
            organisation: vec![
                "contact.organisation.en.keyword".to_string(),
                "contact.organisation.fr.keyword".to_string(),
            ],
            metadata_source: vec!["systemName.keyword".to_string()],
            theme: vec!["topicCategory.keyword".to_string()],
            resource_type: vec!["type.keyword".to_string()],
            temporal_begin: "temporalExtent.begin".to_string(),
            temporal_end: "temporalExtent.end".to_string(),
            geometry: SEARCH_FIELD_COORDINATES.to_string(),
            embedding: SEARCH_FIELD_VECTOR.to_string(),
            lexical: [
                "topicCategory",
                "keywords",
                "description",
                "title*",
                "organisation",
                "systemName",
            ]
            .into_iter()
            .map(ToString::to_string)
            .collect(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
