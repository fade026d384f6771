//! Plan a paginated listing of a declared table.

use query_engine_metadata::metadata;
use query_engine_models::QueryDescription;
use query_engine_sql::sql;

use super::columns;
use super::error::Error;
use super::filtering;
use super::helpers::Env;
use super::paging;
use super::sorting;

/// The two statements behind one grid page. Both carry the same WHERE clause, so
/// `count` totals exactly the rows `rows` pages through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPlan {
    pub collection: String,
    /// The selected page.
    pub rows: sql::string::SQL,
    /// The number of rows matching the filter, ignoring paging.
    pub count: sql::string::SQL,
}

/// Translate a query description against a declared table.
pub fn translate_list(
    env: &Env,
    metadata: &metadata::Metadata,
    collection: &str,
    description: &QueryDescription,
    predicate: Option<&sql::ast::RawPredicate>,
) -> Result<ListPlan, Error> {
    let table = metadata
        .tables
        .get(collection)
        .ok_or_else(|| Error::TableNotFound(collection.to_string()))?;

    let description = columns::resolve_columns(collection, table, description)?;
    let where_ = filtering::translate_where(env, &description, predicate)?;

    let mut rows = sql::string::SQL::new(env.dialect);
    rows.append_syntax(&table.select_statement());
    sql::ast::Fragment {
        where_: where_.clone(),
        order_by: sorting::translate_order_by(&description),
        limit: Some(paging::translate_limit(env, &description)),
    }
    .to_sql(&mut rows);

    let mut count = sql::string::SQL::new(env.dialect);
    count.append_syntax(&table.count_statement());
    where_.to_sql(&mut count);

    tracing::debug!(
        collection,
        rows = %rows.sql,
        count = %count.sql,
        params = rows.params.len(),
        "planned grid listing"
    );

    Ok(ListPlan {
        collection: collection.to_string(),
        rows,
        count,
    })
}
