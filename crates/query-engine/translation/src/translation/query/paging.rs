//! Handle the paging clause.

use query_engine_models::QueryDescription;
use query_engine_sql::sql;

use super::helpers::Env;

/// A page size of zero requests every row after `skip`, up to the configured maximum.
pub fn translate_limit(env: &Env, description: &QueryDescription) -> sql::ast::Limit {
    let requested = (description.page_size > 0).then_some(description.page_size);
    let limit = match (requested, env.max_page_size) {
        (Some(page_size), Some(max)) => Some(page_size.min(max)),
        (None, max) => max,
        (requested, None) => requested,
    };

    sql::ast::Limit {
        limit,
        offset: description.skip,
    }
}
