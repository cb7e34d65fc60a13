// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod filter_compiler;
mod geo_search_config;
mod localized_fields;
mod query_assembler;
mod search_filter;
mod search_request;
mod search_response;
mod search_schema;
mod structured_query;

pub use filter_compiler::*;
pub use geo_search_config::*;
pub use localized_fields::*;
pub use query_assembler::*;
pub use search_filter::*;
pub use search_request::*;
pub use search_response::*;
pub use search_schema::*;
pub use structured_query::*;
