// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::{SEARCH_FIELD_DESCRIPTION, SEARCH_FIELD_KEYWORDS, SEARCH_FIELD_TITLE};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// French title, description and keywords of a document
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct LocalizedFields {
    pub title: String,
    pub description: String,
    pub keywords: String,
}

impl LocalizedFields {
    /// A partial translation is never applied
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.description.trim().is_empty()
            && !self.keywords.trim().is_empty()
    }

    /// Overwrites the three fields in `properties` when complete, returns
    /// whether anything was written
    pub fn apply_to(&self, properties: &mut serde_json::Map<String, serde_json::Value>) -> bool {
        if !self.is_complete() {
            return false;
        }

        for (key, value) in [
            (SEARCH_FIELD_TITLE, &self.title),
            (SEARCH_FIELD_DESCRIPTION, &self.description),
            (SEARCH_FIELD_KEYWORDS, &self.keywords),
        ] {
            properties.insert(key.to_string(), serde_json::Value::String(value.clone()));
        }

        true
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
