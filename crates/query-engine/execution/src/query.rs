//! Execute a list plan against the database.

use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use tokio_postgres::types::{Json, ToSql};
use tokio_postgres::IsolationLevel;
use tracing::{info_span, Instrument};

use query_engine_sql::sql;
use query_engine_translation::translation::query::list::ListPlan;

use crate::error::Error;
use crate::params;

/// One page of a listing, as grid components expect it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse {
    pub data: Vec<serde_json::Value>,
    /// Number of rows matching the filter across all pages.
    pub total: i64,
}

impl ListResponse {
    /// The response as JSON.
    pub fn to_bytes(&self) -> Result<Bytes, Error> {
        let mut buffer = BytesMut::new().writer();
        serde_json::to_writer(&mut buffer, self)?;
        Ok(buffer.into_inner().freeze())
    }
}

/// Run the rows and count statements of a plan in one read-only snapshot.
pub async fn execute_list(
    client: &mut tokio_postgres::Client,
    plan: &ListPlan,
) -> Result<ListResponse, Error> {
    for statement in [&plan.rows, &plan.count] {
        if statement.dialect() != sql::dialect::Dialect::Postgres {
            return Err(Error::UnsupportedDialect(statement.dialect()));
        }
    }

    let result = run_list(client, plan).await;
    if let Err(error) = &result {
        tracing::error!(collection = %plan.collection, %error, "listing failed");
    }
    result
}

async fn run_list(
    client: &mut tokio_postgres::Client,
    plan: &ListPlan,
) -> Result<ListResponse, Error> {
    let transaction = client
        .build_transaction()
        .read_only(true)
        .isolation_level(IsolationLevel::RepeatableRead)
        .start()
        .instrument(info_span!("Begin transaction"))
        .await?;

    let rows_params = params::text_params(&plan.rows.params);
    let rows = transaction
        .query_one(&rows_statement(&plan.rows), &as_sql_params(&rows_params))
        .instrument(info_span!("Database request", collection = %plan.collection))
        .await?;

    let count_params = params::text_params(&plan.count.params);
    let count = transaction
        .query_one(&plan.count.sql, &as_sql_params(&count_params))
        .instrument(info_span!("Count rows", collection = %plan.collection))
        .await?;

    transaction
        .commit()
        .instrument(info_span!("Commit transaction"))
        .await?;

    let Json(data) = rows.try_get::<_, Json<Vec<serde_json::Value>>>(0)?;

    Ok(ListResponse {
        data,
        total: count.try_get(0)?,
    })
}

/// The page as a single JSON array, in the order the page is sorted in.
///
/// > SELECT coalesce(json_agg(row_to_json(grid_rows)), '[]') FROM (<rows>) AS grid_rows
///
/// `json_agg` aggregates in the order of its input, which is the order of the
/// subquery since nothing is joined or grouped around it.
pub fn rows_statement(rows: &sql::string::SQL) -> String {
    format!(
        "SELECT coalesce(json_agg(row_to_json(grid_rows)), '[]') FROM ({}) AS grid_rows",
        rows.sql
    )
}

fn as_sql_params<'a>(params: &'a [params::TextParam<'a>]) -> Vec<&'a (dyn ToSql + Sync)> {
    params
        .iter()
        .map(|param| param as &(dyn ToSql + Sync))
        .collect()
}
