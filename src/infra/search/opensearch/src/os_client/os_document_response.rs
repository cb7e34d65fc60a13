// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Body of `GET <index>/_doc/<id>`
#[derive(Debug, serde::Deserialize)]
pub struct DocumentResponse {
    found: bool,

    #[serde(rename = "_source")]
    source: Option<serde_json::Value>,
}

impl DocumentResponse {
    pub fn into_source(self) -> Option<serde_json::Value> {
        if self.found { self.source } else { None }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
