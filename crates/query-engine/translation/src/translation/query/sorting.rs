//! Handle the ORDER BY clause.

use query_engine_models::{QueryDescription, SortDirection};
use query_engine_sql::sql;

/// Sort keys in the order given, the primary key first.
pub fn translate_order_by(description: &QueryDescription) -> sql::ast::OrderBy {
    if !description.is_sorted() {
        return sql::helpers::empty_order_by();
    }

    sql::ast::OrderBy {
        elements: description
            .sort
            .iter()
            .map(|spec| sql::ast::OrderByElement {
                target: sql::ast::ColumnName(spec.field.clone()),
                direction: match spec.dir {
                    SortDirection::Asc => sql::ast::OrderByDirection::Asc,
                    SortDirection::Desc => sql::ast::OrderByDirection::Desc,
                },
            })
            .collect(),
    }
}
