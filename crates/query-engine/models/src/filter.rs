//! Filter trees.
//!
//! A filter tree is a group of nodes at the root, where each node is either a leaf
//! comparison of a field against a value, or a nested group combining its own children.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the children of a group combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Logic {
    #[default]
    #[serde(alias = "AND")]
    And,
    #[serde(alias = "OR")]
    Or,
}

impl Logic {
    /// The SQL keyword joining sibling conditions.
    pub fn keyword(self) -> &'static str {
        match self {
            Logic::And => "AND",
            Logic::Or => "OR",
        }
    }
}

/// The top of a filter tree. Its immediate children are combined with `logic`,
/// which defaults to `and` when the client does not declare one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Filter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic: Option<Logic>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    #[schemars(with = "Option<Vec<FilterNode>>")]
    pub filters: Vec<FilterNode>,
}

/// Read an explicit `null` as the default value, as grid clients send `null`
/// for a filter or sort they do not set.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Filter {
    pub fn new(logic: Logic, filters: Vec<FilterNode>) -> Self {
        Filter {
            logic: Some(logic),
            filters,
        }
    }

    /// The effective logic of the root group.
    pub fn logic(&self) -> Logic {
        self.logic.unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

/// A node of a filter tree: a single comparison, or a group of nested nodes.
///
/// Each node is owned by its parent group. On the wire both shapes share one
/// object layout (see [`GridFilter`]); an object carrying attributes of both is
/// rejected while deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridFilter", into = "GridFilter")]
pub enum FilterNode {
    Leaf {
        /// A column name. Never escaped downstream, so it must come from a known set of columns.
        field: String,
        /// An operator name such as `eq` or `contains`.
        operator: String,
        /// Always sent to the database as a bound parameter.
        value: serde_json::Value,
    },
    Group {
        logic: Logic,
        children: Vec<FilterNode>,
    },
}

impl FilterNode {
    pub fn leaf(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        FilterNode::Leaf {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }

    /// A leaf for an operator that takes no value, such as `isnull`.
    pub fn unary(field: impl Into<String>, operator: impl Into<String>) -> Self {
        FilterNode::Leaf {
            field: field.into(),
            operator: operator.into(),
            value: serde_json::Value::Null,
        }
    }

    pub fn group(logic: Logic, children: Vec<FilterNode>) -> Self {
        FilterNode::Group { logic, children }
    }

    /// Number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        match self {
            FilterNode::Leaf { .. } => 1,
            FilterNode::Group { children, .. } => children.iter().map(FilterNode::leaf_count).sum(),
        }
    }
}

/// The wire form of a [`FilterNode`], as produced by grid components.
///
/// A leaf sets `field`, `operator` and `value`; a group sets `logic` and `filters`
/// (and optionally `hasSubFilter`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GridFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub has_sub_filter: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic: Option<Logic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<FilterNode>>,
}

/// A wire object that is neither a valid leaf nor a valid group.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedFilterNode {
    #[error("malformed filter node: field '{0}' is combined with group attributes")]
    LeafAndGroup(String),
    #[error("malformed filter node: neither a comparison nor a group")]
    Empty,
    #[error("malformed filter node: operator '{0}' has no field")]
    MissingField(String),
    #[error("malformed filter node: field '{0}' has no operator")]
    MissingOperator(String),
}

impl TryFrom<GridFilter> for FilterNode {
    type Error = MalformedFilterNode;

    fn try_from(raw: GridFilter) -> Result<Self, Self::Error> {
        let is_group = raw.has_sub_filter || raw.logic.is_some() || raw.filters.is_some();
        match (raw.field, raw.operator) {
            (Some(field), _) if is_group => Err(MalformedFilterNode::LeafAndGroup(field)),
            (None, Some(operator)) if is_group => Err(MalformedFilterNode::LeafAndGroup(operator)),
            (Some(field), Some(operator)) => Ok(FilterNode::Leaf {
                field,
                operator,
                value: raw.value.unwrap_or(serde_json::Value::Null),
            }),
            (Some(field), None) => Err(MalformedFilterNode::MissingOperator(field)),
            (None, Some(operator)) => Err(MalformedFilterNode::MissingField(operator)),
            (None, None) if is_group => Ok(FilterNode::Group {
                logic: raw.logic.unwrap_or_default(),
                children: raw.filters.unwrap_or_default(),
            }),
            (None, None) => Err(MalformedFilterNode::Empty),
        }
    }
}

impl From<FilterNode> for GridFilter {
    fn from(node: FilterNode) -> Self {
        match node {
            FilterNode::Leaf {
                field,
                operator,
                value,
            } => GridFilter {
                field: Some(field),
                operator: Some(operator),
                value: Some(value).filter(|value| !value.is_null()),
                ..GridFilter::default()
            },
            FilterNode::Group { logic, children } => GridFilter {
                has_sub_filter: true,
                logic: Some(logic),
                filters: Some(children),
                ..GridFilter::default()
            },
        }
    }
}

impl JsonSchema for FilterNode {
    fn schema_name() -> String {
        "FilterNode".to_string()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        GridFilter::json_schema(gen)
    }
}
