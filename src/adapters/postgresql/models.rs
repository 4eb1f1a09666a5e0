//! PostgreSQL row models
//!
//! Column-level mirrors of the `erp_customers` and `sync_logs` tables and
//! their conversion into domain types.

use crate::domain::{
    CustomerRecord, ErpSyncError, LogEntryId, RecordId, Result, StoreError, SyncLogEntry,
    SyncStatus,
};
use chrono::{DateTime, Utc};
use tokio_postgres::Row;

/// Columns selected from `erp_customers`
pub(crate) const CUSTOMER_COLUMNS: &str = "id, cust_id, cust_name, phone_no, synced";

/// Columns selected from `sync_logs`
pub(crate) const SYNC_LOG_COLUMNS: &str = "id, record_id, payload, status, created_at";

/// A row of `erp_customers`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErpCustomerRow {
    /// `id BIGSERIAL`
    pub id: i64,
    /// `cust_id INT`
    pub cust_id: Option<i32>,
    /// `cust_name VARCHAR(100)`
    pub cust_name: Option<String>,
    /// `phone_no VARCHAR(20)`
    pub phone_no: Option<String>,
    /// `synced BOOLEAN`
    pub synced: bool,
}

impl ErpCustomerRow {
    /// Read a row selected with [`CUSTOMER_COLUMNS`]
    pub fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: get(row, "id")?,
            cust_id: get(row, "cust_id")?,
            cust_name: get(row, "cust_name")?,
            phone_no: get(row, "phone_no")?,
            synced: get(row, "synced")?,
        })
    }
}

impl From<ErpCustomerRow> for CustomerRecord {
    fn from(row: ErpCustomerRow) -> Self {
        Self {
            internal_id: RecordId::new(row.id),
            external_customer_id: row.cust_id,
            name: row.cust_name,
            phone: row.phone_no,
            synced: row.synced,
        }
    }
}

/// A row of `sync_logs`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncLogRow {
    /// `id BIGSERIAL`
    pub id: i64,
    /// `record_id BIGINT`, null for entries written before the column existed
    pub record_id: Option<i64>,
    /// `payload TEXT`
    pub payload: String,
    /// `status VARCHAR(20)`
    pub status: String,
    /// `created_at TIMESTAMPTZ`
    pub created_at: DateTime<Utc>,
}

impl SyncLogRow {
    /// Read a row selected with [`SYNC_LOG_COLUMNS`]
    pub fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: get(row, "id")?,
            record_id: get(row, "record_id")?,
            payload: get(row, "payload")?,
            status: get(row, "status")?,
            created_at: get(row, "created_at")?,
        })
    }

    /// Convert to the domain entry
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Decode` if the status column holds an unknown value.
    pub fn into_domain(self) -> Result<SyncLogEntry> {
        let status: SyncStatus = self
            .status
            .parse()
            .map_err(|e: String| ErpSyncError::from(StoreError::Decode(e)))?;

        Ok(SyncLogEntry {
            id: LogEntryId::new(self.id),
            record_id: self.record_id.map(RecordId::new),
            payload: self.payload,
            status,
            created_at: self.created_at,
        })
    }
}

fn get<'a, T>(row: &'a Row, column: &str) -> Result<T>
where
    T: tokio_postgres::types::FromSql<'a>,
{
    row.try_get(column)
        .map_err(|e| StoreError::Decode(format!("column '{column}': {e}")).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn log_row(status: &str) -> SyncLogRow {
        SyncLogRow {
            id: 7,
            record_id: Some(3),
            payload: r#"{"customerId":1,"name":"Rahul","phone":"9876543210"}"#.to_string(),
            status: status.to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
        }
    }

    #[test]
    fn test_customer_row_into_domain() {
        let row = ErpCustomerRow {
            id: 5,
            cust_id: Some(2),
            cust_name: Some("Anita".to_string()),
            phone_no: None,
            synced: false,
        };

        let record: CustomerRecord = row.into();
        assert_eq!(record.internal_id, RecordId::new(5));
        assert_eq!(record.external_customer_id, Some(2));
        assert_eq!(record.name.as_deref(), Some("Anita"));
        assert!(record.phone.is_none());
        assert!(!record.synced);
    }

    #[test]
    fn test_log_row_into_domain() {
        let entry = log_row("FAILED").into_domain().unwrap();
        assert_eq!(entry.id, LogEntryId::new(7));
        assert_eq!(entry.record_id, Some(RecordId::new(3)));
        assert_eq!(entry.status, SyncStatus::Failed);
    }

    #[test]
    fn test_log_row_unknown_status() {
        let err = log_row("PENDING").into_domain().unwrap_err();
        assert!(matches!(err, ErpSyncError::Store(StoreError::Decode(_))));
    }
}
