// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::io::Write;
use std::sync::Arc;

use geo_search::{GeoSearchService, RawSearchParams, SearchRequest};
use geo_search_opensearch::OpenSearchQueryBuilder;

use super::{CLIError, Command};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct SearchCommand {
    search_svc: Arc<dyn GeoSearchService>,
    request: SearchRequest,
    dry_run: bool,
}

impl SearchCommand {
    pub fn new(
        search_svc: Arc<dyn GeoSearchService>,
        params: RawSearchParams,
        dry_run: bool,
    ) -> Self {
        Self {
            search_svc,
            request: params.into(),
            dry_run,
        }
    }

    /// Produces the document printed by the command
    pub async fn execute(&self) -> Result<serde_json::Value, CLIError> {
        if self.dry_run {
            let query = self.search_svc.prepare_query(&self.request).await?;
            return Ok(OpenSearchQueryBuilder::build_search_query(&query));
        }

        let response = self.search_svc.search(self.request.clone()).await?;
        serde_json::to_value(&response).map_err(CLIError::failure)
    }
}

#[async_trait::async_trait(?Send)]
impl Command for SearchCommand {
    async fn run(&mut self) -> Result<(), CLIError> {
        let output = self.execute().await?;

        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &output).map_err(CLIError::failure)?;
        writeln!(stdout)?;

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
