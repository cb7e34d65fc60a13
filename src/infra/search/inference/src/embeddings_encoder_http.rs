// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;
use std::time::Duration;

use geo_search::EmbeddingsEncoder;
use internal_error::{InternalError, ResultIntoInternal};

use crate::EmbeddingsEncoderHttpConfig;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Posts each text to an inference endpoint and reads back its embedding
pub struct EmbeddingsEncoderHttp {
    config: Arc<EmbeddingsEncoderHttpConfig>,
    client: tokio::sync::OnceCell<reqwest::Client>,
}

#[dill::component(pub)]
#[dill::scope(dill::Singleton)]
#[dill::interface(dyn EmbeddingsEncoder)]
impl EmbeddingsEncoderHttp {
    pub fn new(config: Arc<EmbeddingsEncoderHttpConfig>) -> Self {
        Self {
            config,
            client: tokio::sync::OnceCell::new(),
        }
    }

    async fn client(&self) -> Result<&reqwest::Client, InternalError> {
        self.client
            .get_or_try_init(async || {
                reqwest::Client::builder()
                    .user_agent(concat!(
                        env!("CARGO_PKG_NAME"),
                        "/",
                        env!("CARGO_PKG_VERSION"),
                    ))
                    .timeout(Duration::from_secs(self.config.timeout_secs))
                    .build()
                    .int_err()
            })
            .await
    }

    async fn encode_one(&self, text: String) -> Result<Vec<f32>, InternalError> {
        let client = self.client().await?;

        let body = client
            .post(self.config.url.clone())
            .header(reqwest::header::CONTENT_TYPE, &self.config.content_type)
            .header(reqwest::header::ACCEPT, "application/json")
            .body(text)
            .send()
            .await
            .int_err()?
            .error_for_status()
            .int_err()?
            .bytes()
            .await
            .int_err()?;

        Self::parse_response(&body)
    }

    /// Endpoints return either the vector itself or a batch holding one vector
    pub fn parse_response(body: &[u8]) -> Result<Vec<f32>, InternalError> {
        let response: EmbeddingResponse = serde_json::from_slice(body).int_err()?;

        Ok(match response {
            EmbeddingResponse::Flat(vector) => vector,
            EmbeddingResponse::Nested(vectors) => vectors.into_iter().next().unwrap_or_default(),
        })
    }
}

#[async_trait::async_trait]
impl EmbeddingsEncoder for EmbeddingsEncoderHttp {
    #[tracing::instrument(level = "debug", name = "EmbeddingsEncoderHttp_encode", skip_all, fields(num_inputs = input.len()))]
    async fn encode(&self, input: Vec<String>) -> Result<Vec<Vec<f32>>, InternalError> {
        let mut vectors = Vec::with_capacity(input.len());

        for text in input {
            let vector = self.encode_one(text).await?;
            tracing::debug!(dims = vector.len(), "Encoded text");
            vectors.push(vector);
        }

        Ok(vectors)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum EmbeddingResponse {
    Flat(Vec<f32>),
    Nested(Vec<Vec<f32>>),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
