// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Looks up the French variants of the descriptive fields of a document
#[cfg_attr(any(feature = "testing", test), mockall::automock)]
#[async_trait::async_trait]
pub trait LocalizedFieldsRepository: Send + Sync {
    /// Returns `None` when no localized record exists for the document
    async fn fetch_localized_fields(
        &self,
        document_id: &str,
    ) -> Result<Option<LocalizedFields>, InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
