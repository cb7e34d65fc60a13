// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use geo_search_cli::config::{CLIConfig, EncoderConfig};
use geo_search_inference::EmbeddingsEncoderHttpConfig;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_di_graph_validates_with_defaults() {
    test_di_graph_validates(CLIConfig::default()).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_di_graph_validates_with_remote_collaborators() {
    let mut config = CLIConfig::default();
    config.opensearch.localized_index = Some("records-fr".to_string());
    config.encoder = EncoderConfig::Http(EmbeddingsEncoderHttpConfig::new(
        url::Url::parse("http://localhost:8080/invocations").unwrap(),
    ));

    test_di_graph_validates(config).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

async fn test_di_graph_validates(config: CLIConfig) {
    let mut catalog_builder = geo_search_cli::configure_catalog(&config);

    let validate_result = catalog_builder.validate();

    assert!(
        validate_result.is_ok(),
        "{}",
        validate_result.err().unwrap()
    );

    let catalog = catalog_builder.build();
    assert!(
        catalog
            .get_one::<dyn geo_search::GeoSearchService>()
            .is_ok()
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
