//! Errors for query execution.

use query_engine_sql::sql::dialect::Dialect;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("statements rendered for {0} cannot run against PostgreSQL")]
    UnsupportedDialect(Dialect),

    #[error("database error: {0}")]
    DB(#[from] tokio_postgres::Error),

    #[error("could not encode the response: {0}")]
    Encode(#[from] serde_json::Error),
}
