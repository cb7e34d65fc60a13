// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const MAX_SEARCH_PAGE_SIZE: usize = 10000;
pub const DEFAULT_SEARCH_PAGE_SIZE: usize = 10;

/// Value of the `method` option that selects the semantic mode
pub const SEMANTIC_SEARCH_METHOD: &str = "SemanticSearch";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Search options exactly as received from a caller.
///
/// Every option is accepted as a string, a number, a boolean or null, so that
/// both query-string style and JSON event style inputs deserialize. Arrays and
/// objects are treated as absent. Nothing is validated here, see
/// [`SearchRequest`] for the coercion rules.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct RawSearchParams {
    #[serde(deserialize_with = "deserialize_loose_string")]
    pub q: Option<String>,

    #[serde(deserialize_with = "deserialize_loose_string")]
    pub method: Option<String>,

    #[serde(deserialize_with = "deserialize_loose_string")]
    pub from: Option<String>,

    #[serde(deserialize_with = "deserialize_loose_string")]
    pub size: Option<String>,

    #[serde(deserialize_with = "deserialize_loose_string")]
    pub sort: Option<String>,

    #[serde(deserialize_with = "deserialize_loose_string")]
    pub order: Option<String>,

    #[serde(deserialize_with = "deserialize_loose_string")]
    pub lang: Option<String>,

    #[serde(deserialize_with = "deserialize_loose_string")]
    pub org: Option<String>,

    #[serde(deserialize_with = "deserialize_loose_string")]
    pub metadata_source: Option<String>,

    #[serde(deserialize_with = "deserialize_loose_string")]
    pub theme: Option<String>,

    #[serde(rename = "type", deserialize_with = "deserialize_loose_string")]
    pub resource_type: Option<String>,

    #[serde(deserialize_with = "deserialize_loose_string")]
    pub begin: Option<String>,

    #[serde(deserialize_with = "deserialize_loose_string")]
    pub end: Option<String>,

    #[serde(deserialize_with = "deserialize_loose_string")]
    pub bbox: Option<String>,

    #[serde(deserialize_with = "deserialize_loose_string")]
    pub relation: Option<String>,
}

fn deserialize_loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de;

    struct LooseString;

    impl<'de> de::Visitor<'de> for LooseString {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("any value")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: serde::Deserializer<'de>>(
            self,
            deserializer: D,
        ) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_any(LooseString)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        // Structured values are unusable as options, they count as absent
        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            while seq.next_element::<de::IgnoredAny>()?.is_some() {}
            Ok(None)
        }

        fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            while map.next_entry::<de::IgnoredAny, de::IgnoredAny>()?.is_some() {}
            Ok(None)
        }
    }

    deserializer.deserialize_any(LooseString)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Normalized input of a search operation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Free-text query
    pub query: Option<String>,

    /// Lexical or semantic retrieval
    pub mode: SearchMode,

    /// Pagination specification
    pub page: SearchPage,

    /// Requested sort field, relevancy when absent
    pub sort_field: Option<String>,

    /// Requested sort order, descending when absent
    pub sort_order: Option<String>,

    /// Language of the returned titles and descriptions
    pub locale: SearchLocale,

    /// Raw filter values, compiled later
    pub filters: SearchFilterInputs,
}

impl From<RawSearchParams> for SearchRequest {
    fn from(params: RawSearchParams) -> Self {
        Self {
            query: non_blank(params.q),
            mode: SearchMode::from_method(params.method.as_deref()),
            page: SearchPage::coerce(params.from.as_deref(), params.size.as_deref()),
            sort_field: non_blank(params.sort),
            sort_order: non_blank(params.order),
            locale: SearchLocale::from_lang(params.lang.as_deref()),
            filters: SearchFilterInputs {
                organisation: non_blank(params.org),
                metadata_source: non_blank(params.metadata_source),
                theme: non_blank(params.theme),
                resource_type: non_blank(params.resource_type),
                begin: non_blank(params.begin),
                end: non_blank(params.end),
                bbox: non_blank(params.bbox),
                relation: non_blank(params.relation),
            },
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum SearchMode {
    /// Keyword `multi_match` over the lexical fields
    #[default]
    Lexical,

    /// Nearest-neighbor search over the query embedding
    Semantic,
}

impl SearchMode {
    pub fn from_method(method: Option<&str>) -> Self {
        match method.map(str::trim) {
            Some(SEMANTIC_SEARCH_METHOD) => Self::Semantic,
            _ => Self::Lexical,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchLocale {
    #[default]
    En,
    Fr,
}

impl SearchLocale {
    pub fn from_lang(lang: Option<&str>) -> Self {
        match lang.map(str::trim) {
            Some(lang) if lang.eq_ignore_ascii_case("fr") => Self::Fr,
            _ => Self::En,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SearchPage {
    pub from: usize,
    pub size: usize,
}

impl SearchPage {
    /// Never fails: unparseable, negative or zero values fall back to defaults
    pub fn coerce(from: Option<&str>, size: Option<&str>) -> Self {
        let from = from
            .and_then(|v| v.trim().parse::<i64>().ok())
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(0);

        let size = size
            .and_then(|v| v.trim().parse::<i64>().ok())
            .and_then(|v| usize::try_from(v).ok())
            .filter(|v| *v > 0)
            .map_or(DEFAULT_SEARCH_PAGE_SIZE, |v| v.min(MAX_SEARCH_PAGE_SIZE));

        Self { from, size }
    }
}

impl Default for SearchPage {
    fn default() -> Self {
        Self {
            from: 0,
            size: DEFAULT_SEARCH_PAGE_SIZE,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Filter values as supplied by the caller, blank values already dropped
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchFilterInputs {
    /// Comma-separated organisation name fragments
    pub organisation: Option<String>,

    /// Comma-separated source system name fragments
    pub metadata_source: Option<String>,

    /// Comma-separated topic category fragments
    pub theme: Option<String>,

    /// Comma-separated resource type fragments
    pub resource_type: Option<String>,

    /// Lower bound of the temporal extent (`YYYY`, `YYYY-MM` or `YYYY-MM-DD`)
    pub begin: Option<String>,

    /// Upper bound of the temporal extent, may be `present` or `null`
    pub end: Option<String>,

    /// `min_lon|min_lat|max_lon|max_lat`
    pub bbox: Option<String>,

    /// Spatial relation of the bounding box, `intersects` when absent
    pub relation: Option<String>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
