// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use geo_search::{LocalizedFields, LocalizedFieldsRepository};
use internal_error::InternalError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component(pub)]
#[dill::interface(dyn LocalizedFieldsRepository)]
pub struct NoopLocalizedFieldsRepository {}

#[async_trait::async_trait]
impl LocalizedFieldsRepository for NoopLocalizedFieldsRepository {
    async fn fetch_localized_fields(
        &self,
        _document_id: &str,
    ) -> Result<Option<LocalizedFields>, InternalError> {
        Ok(None)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
