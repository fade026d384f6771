//! Translate a grid `QueryDescription`.
//!
//! Filter values are always bound as parameters. Field names are written into the
//! SQL text as they are: callers holding client-supplied names should go through
//! [`columns::resolve_columns`] or [`list::translate_list`] first.

pub mod columns;
pub mod error;
pub mod filtering;
pub mod helpers;
pub mod list;
pub mod operators;
pub mod paging;
pub mod sorting;
pub mod values;

use query_engine_models::{FilterNode, QueryDescription};
use query_engine_sql::sql;

use error::Error;
use helpers::Env;

/// Translate a single filter node, and the nodes below it.
pub fn translate_filter(env: &Env, node: &FilterNode) -> Result<sql::string::SQL, Error> {
    let expression = filtering::translate_filter_node(env, node)?;
    let mut sql = sql::string::SQL::new(env.dialect);
    expression.to_sql(&mut sql);
    Ok(sql)
}

/// Translate a description into its `WHERE ... ORDER BY ...` and paging clauses.
///
/// `predicate` is ANDed ahead of the client's filter tree; its `?` markers are
/// numbered along with the filter's placeholders.
pub fn translate_full_query(
    env: &Env,
    description: &QueryDescription,
    predicate: Option<&sql::ast::RawPredicate>,
) -> Result<sql::string::SQL, Error> {
    let fragment = sql::ast::Fragment {
        where_: filtering::translate_where(env, description, predicate)?,
        order_by: sorting::translate_order_by(description),
        limit: Some(paging::translate_limit(env, description)),
    };

    let mut sql = sql::string::SQL::new(env.dialect);
    fragment.to_sql(&mut sql);

    tracing::debug!(sql = %sql.sql, params = sql.params.len(), "translated grid query");
    Ok(sql)
}

/// Translate only the WHERE clause of a description. The text is the same as the
/// WHERE clause [`translate_full_query`] produces, so a row count computed with it
/// matches the paged rows.
pub fn translate_filter_query(
    env: &Env,
    description: &QueryDescription,
    predicate: Option<&sql::ast::RawPredicate>,
) -> Result<sql::string::SQL, Error> {
    let where_ = filtering::translate_where(env, description, predicate)?;

    let mut sql = sql::string::SQL::new(env.dialect);
    where_.to_sql(&mut sql);
    sql.append_syntax(" ");

    tracing::debug!(sql = %sql.sql, params = sql.params.len(), "translated grid filter");
    Ok(sql)
}
