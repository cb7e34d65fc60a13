// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::SearchFieldMappings;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeoSearchConfig {
    /// Index holding the searchable documents
    pub index_name: String,

    /// Minimal number of nearest neighbors requested by semantic searches
    pub k_neighbors: usize,

    /// Index field paths
    pub fields: SearchFieldMappings,
}

impl GeoSearchConfig {
    pub const DEFAULT_INDEX_NAME: &str = "minilm-pretrain-knn";
    pub const DEFAULT_K_NEIGHBORS: usize = 10;
}

impl Default for GeoSearchConfig {
    fn default() -> Self {
        Self {
            index_name: Self::DEFAULT_INDEX_NAME.to_string(),
            k_neighbors: Self::DEFAULT_K_NEIGHBORS,
            fields: SearchFieldMappings::default(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
