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
#[serde(rename_all = "camelCase")]
pub struct EmbeddingsEncoderHttpConfig {
    /// Inference endpoint accepting one text per request
    pub url: url::Url,

    #[serde(default = "EmbeddingsEncoderHttpConfig::default_content_type")]
    pub content_type: String,

    #[serde(default = "EmbeddingsEncoderHttpConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl EmbeddingsEncoderHttpConfig {
    pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub fn new(url: url::Url) -> Self {
        Self {
            url,
            content_type: Self::default_content_type(),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }

    fn default_content_type() -> String {
        Self::DEFAULT_CONTENT_TYPE.to_string()
    }

    fn default_timeout_secs() -> u64 {
        Self::DEFAULT_TIMEOUT_SECS
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
