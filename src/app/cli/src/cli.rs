// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use geo_search::RawSearchParams;

use crate::config::ENV_VAR_CONFIG_PATH;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, clap::Parser)]
#[command(name = crate::BINARY_NAME, version = crate::VERSION)]
#[command(about = "Geospatial metadata search over an OpenSearch index")]
pub struct Cli {
    /// Sets the level of verbosity (repeat for more)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the YAML configuration file
    #[arg(long, value_name = "PATH", env = ENV_VAR_CONFIG_PATH, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    Search(Search),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Searches the index and prints matching records as GeoJSON feature collections
#[derive(Debug, clap::Args)]
pub struct Search {
    /// Free-text query
    #[arg(index = 1)]
    pub q: Option<String>,

    /// Search method, `SemanticSearch` selects the vector path
    #[arg(long)]
    pub method: Option<String>,

    /// Offset of the first result
    #[arg(long)]
    pub from: Option<String>,

    /// Maximal number of results
    #[arg(long)]
    pub size: Option<String>,

    /// Sort field: `date`, `popularity`, `title` or `relevancy`
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort order: `asc` or `desc`
    #[arg(long)]
    pub order: Option<String>,

    /// Response language, `fr` substitutes French fields
    #[arg(long)]
    pub lang: Option<String>,

    /// Comma-separated organisation name fragments
    #[arg(long)]
    pub org: Option<String>,

    /// Comma-separated metadata source fragments
    #[arg(long)]
    pub metadata_source: Option<String>,

    /// Comma-separated theme fragments
    #[arg(long)]
    pub theme: Option<String>,

    /// Comma-separated resource type fragments
    #[arg(long = "type")]
    pub resource_type: Option<String>,

    /// Temporal extent start: `YYYY`, `YYYY-MM`, `YYYY-MM-DD` or `present`
    #[arg(long)]
    pub begin: Option<String>,

    /// Temporal extent end: `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, `present` or `null`
    #[arg(long)]
    pub end: Option<String>,

    /// Bounding box as `west|south|east|north`
    #[arg(long, allow_hyphen_values = true)]
    pub bbox: Option<String>,

    /// Spatial relation of the bounding box: `intersects`, `within`,
    /// `contains` or `disjoint`
    #[arg(long)]
    pub relation: Option<String>,

    /// Reads the parameters from a JSON event file, explicit flags take
    /// precedence over its values
    #[arg(long, value_name = "PATH")]
    pub event: Option<PathBuf>,

    /// Prints the backend query instead of running it
    #[arg(long)]
    pub dry_run: bool,
}

impl Search {
    /// Overlays the explicitly passed flags on top of base parameters
    pub fn merge_into(self, base: RawSearchParams) -> RawSearchParams {
        RawSearchParams {
            q: self.q.or(base.q),
            method: self.method.or(base.method),
            from: self.from.or(base.from),
            size: self.size.or(base.size),
            sort: self.sort.or(base.sort),
            order: self.order.or(base.order),
            lang: self.lang.or(base.lang),
            org: self.org.or(base.org),
            metadata_source: self.metadata_source.or(base.metadata_source),
            theme: self.theme.or(base.theme),
            resource_type: self.resource_type.or(base.resource_type),
            begin: self.begin.or(base.begin),
            end: self.end.or(base.end),
            bbox: self.bbox.or(base.bbox),
            relation: self.relation.or(base.relation),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
