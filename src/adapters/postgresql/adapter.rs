//! PostgreSQL adapter implementing the record store traits

use crate::adapters::postgresql::client::{classify_pg_error, PostgreSQLClient};
use crate::adapters::postgresql::models::{
    ErpCustomerRow, SyncLogRow, CUSTOMER_COLUMNS, SYNC_LOG_COLUMNS,
};
use crate::adapters::store::traits::{RecordStore, StoreTransaction};
use crate::domain::{
    CustomerRecord, ErpSyncError, LogEntryId, NewCustomer, RecordId, Result, StoreError,
    SyncLogEntry, SyncStatus,
};
use async_trait::async_trait;
use deadpool_postgres::Object;
use std::sync::Arc;

const INSERT_LOG_SQL: &str =
    "INSERT INTO sync_logs (record_id, payload, status) VALUES ($1, $2, $3) RETURNING id";

/// PostgreSQL implementation of [`RecordStore`]
pub struct PostgreSQLStore {
    client: Arc<PostgreSQLClient>,
}

impl PostgreSQLStore {
    /// Create a new PostgreSQL store
    pub fn new(client: PostgreSQLClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &Arc<PostgreSQLClient> {
        &self.client
    }
}

#[async_trait]
impl RecordStore for PostgreSQLStore {
    fn backend_name(&self) -> &'static str {
        "postgresql"
    }

    async fn ping(&self) -> Result<()> {
        self.client.test_connection().await
    }

    async fn ensure_schema(&self) -> Result<()> {
        self.client.ensure_schema().await
    }

    async fn count_customers(&self) -> Result<u64> {
        let conn = self.client.get_connection().await?;
        let row = conn
            .query_one("SELECT COUNT(*) FROM erp_customers", &[])
            .await
            .map_err(|e| classify_pg_error("Failed to count customers", e))?;

        let count: i64 = row
            .try_get(0)
            .map_err(|e| StoreError::Decode(format!("customer count: {e}")))?;
        Ok(count.max(0) as u64)
    }

    async fn insert_customer(&self, customer: &NewCustomer) -> Result<RecordId> {
        let conn = self.client.get_connection().await?;
        let row = conn
            .query_one(
                "INSERT INTO erp_customers (cust_id, cust_name, phone_no) VALUES ($1, $2, $3) RETURNING id",
                &[
                    &customer.external_customer_id,
                    &customer.name,
                    &customer.phone,
                ],
            )
            .await
            .map_err(|e| classify_pg_error("Failed to insert customer", e))?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| StoreError::Decode(format!("customer id: {e}")))?;
        Ok(RecordId::new(id))
    }

    async fn fetch_unsynced(&self) -> Result<Vec<CustomerRecord>> {
        let conn = self.client.get_connection().await?;
        let query =
            format!("SELECT {CUSTOMER_COLUMNS} FROM erp_customers WHERE synced = FALSE ORDER BY id");
        let rows = conn
            .query(query.as_str(), &[])
            .await
            .map_err(|e| classify_pg_error("Failed to fetch unsynced customers", e))?;

        rows.iter()
            .map(|row| ErpCustomerRow::from_row(row).map(CustomerRecord::from))
            .collect()
    }

    async fn begin(&self) -> Result<Box<dyn StoreTransaction>> {
        let conn = self.client.get_connection().await?;
        conn.batch_execute("BEGIN")
            .await
            .map_err(|e| transaction_error("BEGIN", e))?;

        Ok(Box::new(PgTransaction { conn: Some(conn) }))
    }

    async fn append_log(
        &self,
        record_id: RecordId,
        payload: &str,
        status: SyncStatus,
    ) -> Result<LogEntryId> {
        let conn = self.client.get_connection().await?;
        insert_log(&conn, record_id, payload, status).await
    }

    async fn list_logs(&self) -> Result<Vec<SyncLogEntry>> {
        let conn = self.client.get_connection().await?;
        let query =
            format!("SELECT {SYNC_LOG_COLUMNS} FROM sync_logs ORDER BY created_at DESC, id DESC");
        let rows = conn
            .query(query.as_str(), &[])
            .await
            .map_err(|e| classify_pg_error("Failed to list sync logs", e))?;

        rows.iter()
            .map(|row| SyncLogRow::from_row(row)?.into_domain())
            .collect()
    }
}

async fn insert_log(
    conn: &Object,
    record_id: RecordId,
    payload: &str,
    status: SyncStatus,
) -> Result<LogEntryId> {
    let row = conn
        .query_one(
            INSERT_LOG_SQL,
            &[&record_id.get(), &payload, &status.as_str()],
        )
        .await
        .map_err(|e| classify_pg_error("Failed to insert sync log", e))?;

    let id: i64 = row
        .try_get("id")
        .map_err(|e| StoreError::Decode(format!("sync log id: {e}")))?;
    Ok(LogEntryId::new(id))
}

/// Transaction control failures keep the unavailable classification for a
/// lost connection and report everything else as a transaction failure.
fn transaction_error(statement: &str, err: tokio_postgres::Error) -> ErpSyncError {
    let classified = classify_pg_error(statement, err);
    if classified.is_store_unavailable() {
        classified
    } else {
        StoreError::TransactionFailed(classified.to_string()).into()
    }
}

/// An open transaction holding a pooled connection
///
/// The connection is returned to the pool after COMMIT or ROLLBACK. If the
/// handle is dropped while the transaction is still open, or transaction
/// control fails, the connection is detached from the pool and closed so an
/// open transaction never leaks to the next user.
struct PgTransaction {
    conn: Option<Object>,
}

impl PgTransaction {
    fn conn(&self) -> Result<&Object> {
        self.conn.as_ref().ok_or_else(|| {
            StoreError::TransactionFailed("transaction already finished".to_string()).into()
        })
    }

    async fn finish(mut self: Box<Self>, statement: &'static str) -> Result<()> {
        let Some(conn) = self.conn.take() else {
            return Err(
                StoreError::TransactionFailed("transaction already finished".to_string()).into(),
            );
        };

        match conn.batch_execute(statement).await {
            Ok(()) => Ok(()),
            Err(e) => {
                drop(Object::take(conn));
                Err(transaction_error(statement, e))
            }
        }
    }
}

#[async_trait]
impl StoreTransaction for PgTransaction {
    async fn insert_log(
        &mut self,
        record_id: RecordId,
        payload: &str,
        status: SyncStatus,
    ) -> Result<LogEntryId> {
        insert_log(self.conn()?, record_id, payload, status).await
    }

    async fn mark_synced(&mut self, record_id: RecordId) -> Result<()> {
        let updated = self
            .conn()?
            .execute(
                "UPDATE erp_customers SET synced = TRUE WHERE id = $1",
                &[&record_id.get()],
            )
            .await
            .map_err(|e| classify_pg_error("Failed to mark customer synced", e))?;

        if updated == 0 {
            return Err(StoreError::QueryFailed(format!("customer {record_id} not found")).into());
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.finish("COMMIT").await
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.finish("ROLLBACK").await
    }
}

impl Drop for PgTransaction {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            tracing::warn!("Transaction dropped while open, discarding connection");
            drop(Object::take(conn));
        }
    }
}
