//! Map client field names onto declared columns.
//!
//! Field names are written into the SQL text unescaped, so a description coming
//! from a client must pass through here before it is translated.

use query_engine_metadata::metadata::database::TableInfo;
use query_engine_models::{Filter, FilterNode, QueryDescription, SortSpec};

use super::error::Error;

/// Rewrite every filter and sort field of a description to its declared column.
/// Any field the table does not declare is an error.
pub fn resolve_columns(
    collection: &str,
    table: &TableInfo,
    description: &QueryDescription,
) -> Result<QueryDescription, Error> {
    let column = |field: &str| -> Result<String, Error> {
        table
            .column(field)
            .map(|column| column.name.clone())
            .ok_or_else(|| Error::ColumnNotFoundInTable {
                field: field.to_string(),
                table: collection.to_string(),
            })
    };

    let sort = description
        .sort
        .iter()
        .map(|spec| {
            Ok(SortSpec {
                field: column(&spec.field)?,
                dir: spec.dir,
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let filters = description
        .filter
        .filters
        .iter()
        .map(|node| resolve_node(node, &column))
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(QueryDescription {
        sort,
        filter: Filter {
            logic: description.filter.logic,
            filters,
        },
        ..description.clone()
    })
}

fn resolve_node(
    node: &FilterNode,
    column: &impl Fn(&str) -> Result<String, Error>,
) -> Result<FilterNode, Error> {
    match node {
        FilterNode::Leaf {
            field,
            operator,
            value,
        } => Ok(FilterNode::Leaf {
            field: column(field)?,
            operator: operator.clone(),
            value: value.clone(),
        }),
        FilterNode::Group { logic, children } => Ok(FilterNode::Group {
            logic: *logic,
            children: children
                .iter()
                .map(|child| resolve_node(child, column))
                .collect::<Result<Vec<_>, Error>>()?,
        }),
    }
}
