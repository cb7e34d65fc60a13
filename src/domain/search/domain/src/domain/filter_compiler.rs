// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::NaiveDate;

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Translates raw, loosely-typed filter values into [`CompiledFilter`]s.
///
/// Pure functions only: the current date is passed in by the caller.
pub struct FilterCompiler {}

impl FilterCompiler {
    /// Compiles all filter inputs of a request in a stable order: text filters
    /// (organisation, metadata source, theme, type), temporal extent, bbox.
    pub fn compile_request_filters(
        inputs: &SearchFilterInputs,
        fields: &SearchFieldMappings,
        today: NaiveDate,
    ) -> Result<Vec<CompiledFilter>, InvalidFilterInputError> {
        let mut filters = Vec::new();

        for (field_paths, raw_values) in [
            (&fields.organisation, &inputs.organisation),
            (&fields.metadata_source, &inputs.metadata_source),
            (&fields.theme, &inputs.theme),
            (&fields.resource_type, &inputs.resource_type),
        ] {
            if let Some(raw_values) = raw_values
                && let Some(filter) = Self::compile_wildcard_or(field_paths, raw_values)
            {
                filters.push(filter);
            }
        }

        filters.extend(Self::compile_date_range(
            Some(&fields.temporal_begin),
            Some(&fields.temporal_end),
            inputs.begin.as_deref(),
            inputs.end.as_deref(),
            today,
        ));

        if let Some(bbox) = &inputs.bbox {
            filters.push(Self::compile_spatial(
                &fields.geometry,
                bbox,
                inputs.relation.as_deref(),
            )?);
        }

        Ok(filters)
    }

    /// Splits `raw_values` on commas into an OR of substring matches over all
    /// `field_paths`. Returns `None` when no non-blank value remains, an empty
    /// OR group must not be emitted.
    pub fn compile_wildcard_or<S: AsRef<str>>(
        field_paths: &[S],
        raw_values: &str,
    ) -> Option<CompiledFilter> {
        let values: Vec<String> = raw_values
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(ToString::to_string)
            .collect();

        if values.is_empty() || field_paths.is_empty() {
            return None;
        }

        Some(CompiledFilter::WildcardOr {
            field_paths: field_paths
                .iter()
                .map(|p| p.as_ref().to_string())
                .collect(),
            values,
        })
    }

    /// Produces at most one lower bound on `begin_field` and at most one clause
    /// on `end_field`.
    ///
    /// Partial dates are widened: `YYYY` becomes `YYYY-01-01` / `YYYY-12-31`,
    /// `YYYY-MM` becomes `YYYY-MM-01` / `YYYY-MM-31`. A missing end date matches
    /// records stored with an explicit `null` end, `present` means `today`.
    pub fn compile_date_range(
        begin_field: Option<&str>,
        end_field: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
        today: NaiveDate,
    ) -> Vec<CompiledFilter> {
        let mut filters = Vec::new();

        if let Some(begin_field) = begin_field
            && let Some(DateBound::Explicit(start)) = start_date.and_then(DateBound::parse)
        {
            filters.push(CompiledFilter::DateRange {
                field: begin_field.to_string(),
                comparator: RangeComparator::Gte,
                bound: expand_partial_date(&start, PartialDateSide::Start),
            });
        }

        if let Some(end_field) = end_field
            && let Some(end) = end_date.and_then(DateBound::parse)
        {
            filters.push(match end {
                DateBound::Missing => CompiledFilter::ExactTerm {
                    field: end_field.to_string(),
                    value: NULL_DATE_TERM.to_string(),
                },
                DateBound::Present => CompiledFilter::DateRange {
                    field: end_field.to_string(),
                    comparator: RangeComparator::Lte,
                    bound: today.format("%Y-%m-%d").to_string(),
                },
                DateBound::Explicit(end) => CompiledFilter::DateRange {
                    field: end_field.to_string(),
                    comparator: RangeComparator::Lte,
                    bound: expand_partial_date(&end, PartialDateSide::End),
                },
            });
        }

        filters
    }

    /// Parses `min_lon|min_lat|max_lon|max_lat` into an envelope filter
    pub fn compile_spatial(
        field: &str,
        bbox_raw: &str,
        relation: Option<&str>,
    ) -> Result<CompiledFilter, InvalidFilterInputError> {
        let relation = match relation.map(str::trim) {
            None | Some("") => SpatialRelation::default(),
            Some(relation) => relation.parse()?,
        };

        let malformed = || InvalidFilterInputError::MalformedBoundingBox {
            bbox: bbox_raw.to_string(),
        };

        let coords = bbox_raw
            .split('|')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| v.parse::<f64>().map_err(|_| malformed()))
            .collect::<Result<Vec<_>, _>>()?;

        let [min_lon, min_lat, max_lon, max_lat] = coords[..] else {
            return Err(malformed());
        };

        let envelope = GeoEnvelope::new(field, min_lon, min_lat, max_lon, max_lat, relation)?;

        Ok(CompiledFilter::GeoEnvelope(envelope))
    }

    /// Resolves the `relevancy` alias and validates the field. Relevancy is
    /// always sorted in descending order, the requested order is ignored.
    pub fn compile_sort(
        field: Option<&str>,
        order: Option<&str>,
    ) -> Result<SortDirective, InvalidFilterInputError> {
        let field = match field.map(str::trim) {
            None | Some("") => SortField::Score,
            Some(field) => field.parse()?,
        };

        if field == SortField::Score {
            return Ok(SortDirective::relevance());
        }

        let order = match order.map(str::trim) {
            None | Some("") => SortOrder::default(),
            Some(order) => order.parse()?,
        };

        Ok(SortDirective::new(field, order))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Copy, Clone)]
enum PartialDateSide {
    Start,
    End,
}

// Day 31 is used for every month, including short ones
fn expand_partial_date(date: &str, side: PartialDateSide) -> String {
    match (date.chars().count(), side) {
        (4, PartialDateSide::Start) => format!("{date}-01-01"),
        (4, PartialDateSide::End) => format!("{date}-12-31"),
        (7, PartialDateSide::Start) => format!("{date}-01"),
        (7, PartialDateSide::End) => format!("{date}-31"),
        _ => date.to_string(),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
