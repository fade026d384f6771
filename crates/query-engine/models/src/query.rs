//! The description of a single grid query.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::filter::{null_as_default, Filter};
use crate::sort::SortSpec;

/// Filtering, sorting and paging requested by a grid client.
///
/// `skip` and `pageSize` drive the emitted paging clause; `page` and `take` are
/// carried for clients that derive them, and are otherwise informational.
/// A `pageSize` of zero requests every row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryDescription {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub skip: u32,
    #[serde(default)]
    pub take: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    #[schemars(with = "Option<Vec<SortSpec>>")]
    pub sort: Vec<SortSpec>,
    /// When absent, sorting is enabled whenever `sort` is not empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_sort: Option<bool>,
    /// When absent, filtering is enabled whenever `filter` has children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_filter: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<Filter>")]
    pub filter: Filter,
}

impl QueryDescription {
    /// A single page of `page_size` rows starting after `skip` rows.
    pub fn paged(skip: u32, page_size: u32) -> Self {
        QueryDescription {
            page: if page_size == 0 { 0 } else { skip / page_size + 1 },
            skip,
            take: page_size,
            page_size,
            ..QueryDescription::default()
        }
    }

    #[must_use]
    pub fn with_sort(mut self, sort: Vec<SortSpec>) -> Self {
        self.has_sort = Some(!sort.is_empty());
        self.sort = sort;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.has_filter = Some(!filter.is_empty());
        self.filter = filter;
        self
    }

    /// Whether an ORDER BY clause should be emitted.
    pub fn is_sorted(&self) -> bool {
        self.has_sort.unwrap_or(true) && !self.sort.is_empty()
    }

    /// Whether the filter tree contributes to the WHERE clause.
    pub fn is_filtered(&self) -> bool {
        self.has_filter.unwrap_or(true) && !self.filter.is_empty()
    }
}
