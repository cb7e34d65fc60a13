// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use geo_search::EmbeddingsEncoder;
use internal_error::InternalError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Encoder used when no inference endpoint is configured. Produces empty
/// vectors, so semantic searches run as filter-only queries.
#[dill::component(pub)]
#[dill::interface(dyn EmbeddingsEncoder)]
pub struct DummyEmbeddingsEncoder {}

#[async_trait::async_trait]
impl EmbeddingsEncoder for DummyEmbeddingsEncoder {
    async fn encode(&self, input: Vec<String>) -> Result<Vec<Vec<f32>>, InternalError> {
        Ok(input.into_iter().map(|_| Vec::new()).collect())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
