//! Compile-only checks that the PostgreSQL handles plug into execution.

#![cfg(feature = "postgres")]
#![allow(dead_code)]

use fluentql::{Record, SqlResult, table};

async fn _client_executes_queries(client: &tokio_postgres::Client) -> SqlResult<()> {
    let rows: Vec<tokio_postgres::Row> = table("users").where_eq("id", 1).get(client).await?;
    let _ = rows;
    table("users")
        .insert(client, Record::new().set("name", "John"))
        .await?;
    Ok(())
}

async fn _transaction_executes_queries(client: &mut tokio_postgres::Client) -> SqlResult<()> {
    let tx = client.transaction().await?;
    table("users").where_eq("id", 1).delete(&tx).await?;
    tx.commit().await?;
    Ok(())
}
