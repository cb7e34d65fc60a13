// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod dummy_embeddings_encoder;
mod geo_search_service_impl;
mod noop_localized_fields_repository;
mod result_projector;

pub use dummy_embeddings_encoder::*;
pub use geo_search_service_impl::*;
pub use noop_localized_fields_repository::*;
pub use result_projector::*;
