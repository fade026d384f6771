//! JSON:API style list parameters, as found in a request's query string:
//! `page[number]=2&page[size]=10&sort=-name,age&filter[status]=active,pending`.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::filter::{Filter, FilterNode, Logic};
use crate::query::QueryDescription;
use crate::sort::SortSpec;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    #[serde(default)]
    pub page_number: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_offset: Option<u32>,
    /// Field names, prefixed with `-` for descending order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<String>,
    /// Field name to a comma separated list of accepted values.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filter: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListParamsError {
    #[error("query parameter '{name}' expects a non-negative integer, got '{value}'")]
    InvalidNumber { name: String, value: String },
}

impl ListParams {
    /// Parse the parameters out of a URL query string. Unrelated parameters are ignored.
    pub fn from_query_string(query: &str) -> Result<Self, ListParamsError> {
        let mut params = ListParams::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match name.as_ref() {
                "page[number]" => params.page_number = parse_number(&name, &value)?,
                "page[size]" => params.page_size = parse_number(&name, &value)?,
                "page[offset]" => params.page_offset = Some(parse_number(&name, &value)?),
                "sort" => params.sort.extend(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|field| !field.is_empty())
                        .map(str::to_string),
                ),
                other => {
                    if let Some(field) = other
                        .strip_prefix("filter[")
                        .and_then(|rest| rest.strip_suffix(']'))
                    {
                        params.filter.insert(field.to_string(), value.into_owned());
                    }
                }
            }
        }

        Ok(params)
    }
}

fn parse_number(name: &str, value: &str) -> Result<u32, ListParamsError> {
    value
        .trim()
        .parse()
        .map_err(|_| ListParamsError::InvalidNumber {
            name: name.to_string(),
            value: value.to_string(),
        })
}

impl From<ListParams> for QueryDescription {
    fn from(params: ListParams) -> Self {
        let sort: Vec<SortSpec> = params
            .sort
            .iter()
            .map(|field| match field.strip_prefix('-') {
                Some(field) => SortSpec::desc(field),
                None => SortSpec::asc(field),
            })
            .collect();

        let filters: Vec<FilterNode> = params
            .filter
            .into_iter()
            .map(|(field, value)| {
                let values: Vec<&str> = value.split(',').collect();
                match values.as_slice() {
                    [single] => FilterNode::leaf(field, "eq", *single),
                    many => FilterNode::group(
                        Logic::Or,
                        many.iter()
                            .map(|value| FilterNode::leaf(field.clone(), "eq", *value))
                            .collect(),
                    ),
                }
            })
            .collect();

        let skip = params.page_offset.unwrap_or_else(|| {
            params
                .page_number
                .saturating_sub(1)
                .saturating_mul(params.page_size)
        });

        QueryDescription {
            page: params.page_number,
            skip,
            take: params.page_size,
            page_size: params.page_size,
            ..QueryDescription::default()
        }
        .with_sort(sort)
        .with_filter(Filter::new(Logic::And, filters))
    }
}
