// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod os_document_response;
mod os_query_response;

use std::time::Duration;

use internal_error::{InternalError, ResultIntoInternal};
pub use os_document_response::*;
pub use os_query_response::*;

use crate::OpenSearchClientConfig;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Thin HTTP client over the OpenSearch REST API
pub struct OpenSearchClient {
    client: reqwest::Client,
    config: OpenSearchClientConfig,
}

impl OpenSearchClient {
    pub fn init(config: OpenSearchClientConfig) -> Result<Self, InternalError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION"),
            ))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .int_err()?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<url::Url, InternalError> {
        let mut url = self.config.url.clone();
        url.path_segments_mut()
            .map_err(|_| InternalError::new(format!("Invalid base url: {}", self.config.url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: reqwest::Method, url: url::Url) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.config.username {
            Some(username) => builder.basic_auth(username, self.config.password.as_ref()),
            None => builder,
        }
    }

    pub async fn search(
        &self,
        index_name: &str,
        body: serde_json::Value,
    ) -> Result<QueryResponse, InternalError> {
        let url = self.endpoint(&[index_name, "_search"])?;

        self.request(reqwest::Method::POST, url)
            .json(&body)
            .send()
            .await
            .int_err()?
            .error_for_status()
            .int_err()?
            .json::<QueryResponse>()
            .await
            .int_err()
    }

    /// Returns the source of a document, `None` when it does not exist
    pub async fn find_document_by_id(
        &self,
        index_name: &str,
        id: &str,
    ) -> Result<Option<serde_json::Value>, InternalError> {
        let url = self.endpoint(&[index_name, "_doc", id])?;

        let response = self
            .request(reqwest::Method::GET, url)
            .send()
            .await
            .int_err()?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let doc = response
            .error_for_status()
            .int_err()?
            .json::<DocumentResponse>()
            .await
            .int_err()?;

        Ok(doc.into_source())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
