// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::Path;

use dill::*;
use geo_search::{GeoSearchService, RawSearchParams};
use geo_search_inference::EmbeddingsEncoderHttp;
use geo_search_opensearch::{OpenSearchLocalizedFieldsRepository, OpenSearchRepository};
use geo_search_services::*;
use time_source::SystemTimeSourceDefault;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use crate::cli;
use crate::commands::{Command, SearchCommand};
use crate::config::{CLIConfig, EncoderConfig};
use crate::error::CLIError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const BINARY_NAME: &str = "geo-search";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LOGGING_CONFIG: &str = "info";
const VERBOSE_LOGGING_CONFIG: &str = "debug";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn run(args: cli::Cli) -> Result<(), CLIError> {
    configure_logging(args.verbose);

    tracing::info!(
        version = VERSION,
        args = ?std::env::args().collect::<Vec<_>>(),
        config_path = ?args.config,
        "Initializing {BINARY_NAME}"
    );

    let config = load_config(args.config.as_deref())?;
    let catalog = configure_catalog(&config).build();

    let mut command = get_command(&catalog, args.command)?;

    match command.run().await {
        Ok(()) => {
            tracing::info!("Command successful");
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = ?err, error_msg = %err, "Command failed");
            Err(err)
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn load_config(path: Option<&Path>) -> Result<CLIConfig, CLIError> {
    let config = match path {
        Some(path) => CLIConfig::load_from(path)?,
        None => CLIConfig::default(),
    };

    Ok(config.with_env_overrides(|name| std::env::var(name).ok()))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn configure_catalog(config: &CLIConfig) -> CatalogBuilder {
    let mut b = CatalogBuilder::new();

    b.add::<SystemTimeSourceDefault>();

    b.add_value(config.search.clone());
    b.add_value(config.opensearch.clone());

    b.add::<OpenSearchRepository>();

    if config.opensearch.localized_index.is_some() {
        b.add::<OpenSearchLocalizedFieldsRepository>();
    } else {
        b.add::<NoopLocalizedFieldsRepository>();
    }

    match &config.encoder {
        EncoderConfig::Dummy => {
            b.add::<DummyEmbeddingsEncoder>();
        }
        EncoderConfig::Http(encoder_config) => {
            b.add_value(encoder_config.clone());
            b.add::<EmbeddingsEncoderHttp>();
        }
    }

    b.add::<GeoSearchServiceImpl>();

    b
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn get_command(catalog: &Catalog, command: cli::Command) -> Result<Box<dyn Command>, CLIError> {
    match command {
        cli::Command::Search(mut c) => {
            let dry_run = c.dry_run;
            let base = match c.event.take() {
                Some(path) => read_event(&path)?,
                None => RawSearchParams::default(),
            };

            Ok(Box::new(SearchCommand::new(
                catalog.get_one::<dyn GeoSearchService>()?,
                c.merge_into(base),
                dry_run,
            )))
        }
    }
}

fn read_event(path: &Path) -> Result<RawSearchParams, CLIError> {
    let file = std::fs::File::open(path).map_err(|e| {
        CLIError::usage_error(format!("Unable to open event file {}: {e}", path.display()))
    })?;

    serde_json::from_reader(std::io::BufReader::new(file)).map_err(CLIError::usage_error_from)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn configure_logging(verbosity_level: u8) {
    // Logging may be already initialized when running under tests
    if tracing::dispatcher::has_been_set() {
        return;
    }

    // Use configuration from RUST_LOG env var if provided
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match verbosity_level {
            0 => EnvFilter::new(DEFAULT_LOGGING_CONFIG),
            _ => EnvFilter::new(VERBOSE_LOGGING_CONFIG),
        },
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    if verbosity_level > 1 {
        builder
            .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
            .pretty()
            .init();
    } else {
        builder.init();
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
