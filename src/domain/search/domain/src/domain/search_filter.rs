// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::SearchFieldPath;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;
pub const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;

/// Stored value of an end date that is explicitly unknown
pub const NULL_DATE_TERM: &str = "null";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// A structured filter clause. All clauses of a query are combined with AND.
#[derive(Debug, Clone, PartialEq)]
pub enum CompiledFilter {
    /// Matches when any of the fields contains any of the values
    WildcardOr {
        field_paths: Vec<SearchFieldPath>,
        values: Vec<String>,
    },

    DateRange {
        field: SearchFieldPath,
        comparator: RangeComparator,
        bound: String,
    },

    ExactTerm {
        field: SearchFieldPath,
        value: String,
    },

    GeoEnvelope(GeoEnvelope),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RangeComparator {
    Gte,
    Lte,
}

impl RangeComparator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gte => "gte",
            Self::Lte => "lte",
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Rectangular bounding box filter over a `geo_shape` field.
///
/// Coordinates are validated on construction, an envelope always lies within
/// `[-180, 180]` longitude and `[-90, 90]` latitude.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoEnvelope {
    field: SearchFieldPath,
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
    relation: SpatialRelation,
}

impl GeoEnvelope {
    pub fn new(
        field: impl Into<SearchFieldPath>,
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
        relation: SpatialRelation,
    ) -> Result<Self, InvalidFilterInputError> {
        for (name, value) in [("min_lon", min_lon), ("max_lon", max_lon)] {
            if !LONGITUDE_RANGE.contains(&value) {
                return Err(InvalidFilterInputError::CoordinateOutOfRange {
                    coordinate: name,
                    value,
                    range: LONGITUDE_RANGE,
                });
            }
        }
        for (name, value) in [("min_lat", min_lat), ("max_lat", max_lat)] {
            if !LATITUDE_RANGE.contains(&value) {
                return Err(InvalidFilterInputError::CoordinateOutOfRange {
                    coordinate: name,
                    value,
                    range: LATITUDE_RANGE,
                });
            }
        }

        Ok(Self {
            field: field.into(),
            min_lon,
            min_lat,
            max_lon,
            max_lat,
            relation,
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn relation(&self) -> SpatialRelation {
        self.relation
    }

    /// `[min_lon, min_lat, max_lon, max_lat]`
    pub fn bounds(&self) -> [f64; 4] {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat]
    }

    /// Top-left and bottom-right corners, the order envelope shapes expect
    pub fn envelope_coordinates(&self) -> [[f64; 2]; 2] {
        [[self.min_lon, self.max_lat], [self.max_lon, self.min_lat]]
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum SpatialRelation {
    #[default]
    Intersects,
    Disjoint,
    Within,
    Contains,
}

impl SpatialRelation {
    pub const ALL: [SpatialRelation; 4] = [
        Self::Intersects,
        Self::Disjoint,
        Self::Within,
        Self::Contains,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Intersects => "intersects",
            Self::Disjoint => "disjoint",
            Self::Within => "within",
            Self::Contains => "contains",
        }
    }
}

impl FromStr for SpatialRelation {
    type Err = InvalidFilterInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| InvalidFilterInputError::UnsupportedSpatialRelation {
                relation: s.to_string(),
            })
    }
}

impl fmt::Display for SpatialRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// One side of a temporal extent filter, sentinels already resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateBound {
    /// `null` or `not available; indisponible`
    Missing,

    /// `present`, i.e. today
    Present,

    /// A full or partial (`YYYY`, `YYYY-MM`) date
    Explicit(String),
}

impl DateBound {
    const MISSING_SENTINELS: [&str; 2] = ["null", "not available; indisponible"];
    const PRESENT_SENTINEL: &str = "present";

    /// Returns `None` for blank input
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            None
        } else if Self::MISSING_SENTINELS
            .iter()
            .any(|s| s.eq_ignore_ascii_case(raw))
        {
            Some(Self::Missing)
        } else if Self::PRESENT_SENTINEL.eq_ignore_ascii_case(raw) {
            Some(Self::Present)
        } else {
            Some(Self::Explicit(raw.to_string()))
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SortField {
    /// Similarity/relevance score, exposed to callers as `relevancy`
    Score,
    Date,
    Popularity,
    Title,
}

impl SortField {
    pub const RELEVANCY_ALIAS: &str = "relevancy";

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Score => "_score",
            Self::Date => "date",
            Self::Popularity => "popularity",
            Self::Title => "title",
        }
    }
}

impl FromStr for SortField {
    type Err = InvalidFilterInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            Self::RELEVANCY_ALIAS | "_score" => Ok(Self::Score),
            "date" => Ok(Self::Date),
            "popularity" => Ok(Self::Popularity),
            "title" => Ok(Self::Title),
            other => Err(InvalidFilterInputError::UnsupportedSortField {
                field: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = InvalidFilterInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            o if o.eq_ignore_ascii_case("asc") => Ok(Self::Asc),
            o if o.eq_ignore_ascii_case("desc") => Ok(Self::Desc),
            other => Err(InvalidFilterInputError::UnsupportedSortOrder {
                order: other.to_string(),
            }),
        }
    }
}

/// Single-field sort. Sorting by score is always descending.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SortDirective {
    field: SortField,
    order: SortOrder,
}

impl SortDirective {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        let order = match field {
            SortField::Score => SortOrder::Desc,
            _ => order,
        };
        Self { field, order }
    }

    pub fn relevance() -> Self {
        Self::new(SortField::Score, SortOrder::Desc)
    }

    pub fn field(&self) -> SortField {
        self.field
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }
}

impl Default for SortDirective {
    fn default() -> Self {
        Self::relevance()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// User-supplied filter or sort value that cannot be turned into a query
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidFilterInputError {
    #[error(
        "Invalid bbox '{bbox}': expected four '|' separated numbers \
         min_lon (west) | min_lat (south) | max_lon (east) | max_lat (north)"
    )]
    MalformedBoundingBox { bbox: String },

    #[error("Coordinate {coordinate} = {value} is outside of the valid range {range:?}")]
    CoordinateOutOfRange {
        coordinate: &'static str,
        value: f64,
        range: RangeInclusive<f64>,
    },

    #[error(
        "Unsupported relation '{relation}', must be one of: intersects, disjoint, within, \
         contains"
    )]
    UnsupportedSpatialRelation { relation: String },

    #[error(
        "Unsupported sort field '{field}', must be one of: relevancy, date, popularity, title"
    )]
    UnsupportedSortField { field: String },

    #[error("Unsupported sort order '{order}', must be one of: asc, desc")]
    UnsupportedSortOrder { order: String },
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
