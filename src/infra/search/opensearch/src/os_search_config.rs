// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OpenSearchClientConfig {
    pub url: url::Url,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: u64,

    /// Index holding the French variants of the documents, locale lookup is
    /// disabled when absent
    pub localized_index: Option<String>,
}

impl OpenSearchClientConfig {
    pub const DEFAULT_URL: &str = "http://localhost:9200";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 55;
}

impl Default for OpenSearchClientConfig {
    fn default() -> Self {
        Self {
            url: url::Url::parse(Self::DEFAULT_URL).unwrap(),
            username: None,
            password: None,
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
            localized_index: None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
