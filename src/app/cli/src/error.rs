// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt::Display;

use geo_search::GeoSearchError;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum CLIError {
    #[error("{}", UsageErrorDisplay(.message, .source))]
    UsageError {
        message: Option<String>,
        source: Option<BoxedError>,
    },
    #[error(transparent)]
    Failure(BoxedError),
}

impl CLIError {
    pub const EXIT_CODE_USAGE_ERROR: i32 = 2;
    pub const EXIT_CODE_FAILURE: i32 = 1;

    pub fn usage_error(msg: impl Into<String>) -> Self {
        Self::UsageError {
            message: Some(msg.into()),
            source: None,
        }
    }

    pub fn usage_error_from(e: impl Into<BoxedError>) -> Self {
        Self::UsageError {
            message: None,
            source: Some(e.into()),
        }
    }

    pub fn failure(e: impl Into<BoxedError>) -> Self {
        Self::Failure(e.into())
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UsageError { .. } => Self::EXIT_CODE_USAGE_ERROR,
            Self::Failure(_) => Self::EXIT_CODE_FAILURE,
        }
    }
}

impl From<GeoSearchError> for CLIError {
    fn from(e: GeoSearchError) -> Self {
        match e {
            GeoSearchError::InvalidFilterInput(e) => Self::usage_error_from(e),
            e @ (GeoSearchError::BackendUnavailable(_) | GeoSearchError::Internal(_)) => {
                Self::failure(e)
            }
        }
    }
}

impl From<dill::InjectionError> for CLIError {
    fn from(e: dill::InjectionError) -> Self {
        Self::failure(e)
    }
}

impl From<std::io::Error> for CLIError {
    fn from(e: std::io::Error) -> Self {
        Self::failure(e)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct UsageErrorDisplay<'a>(&'a Option<String>, &'a Option<BoxedError>);

impl Display for UsageErrorDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.0, self.1) {
            (Some(message), _) => write!(f, "{message}"),
            (None, Some(source)) => write!(f, "{source}"),
            (None, None) => write!(f, "Invalid usage"),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
