//! Connecting to the database.

use tokio_postgres::NoTls;

use crate::error::Error;

/// Open a connection. The connection itself is driven by a task on the current
/// tokio runtime, which ends when the returned client is dropped.
pub async fn connect(connection_uri: &str) -> Result<tokio_postgres::Client, Error> {
    let (client, connection) = tokio_postgres::connect(connection_uri, NoTls).await?;

    tokio::spawn(async move {
        if let Err(error) = connection.await {
            tracing::error!(%error, "database connection closed with an error");
        }
    });

    Ok(client)
}
