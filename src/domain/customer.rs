//! ERP customer records and the payload pushed to the CRM

use crate::domain::ids::RecordId;
use serde::{Deserialize, Serialize};

/// A row of the ERP customer table
///
/// `synced` only ever moves from `false` to `true`, and only as the last
/// write of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Surrogate key assigned by the store
    pub internal_id: RecordId,

    /// Customer number in the ERP (`cust_id`)
    pub external_customer_id: Option<i32>,

    /// Customer name (`cust_name`)
    pub name: Option<String>,

    /// Phone number (`phone_no`)
    pub phone: Option<String>,

    /// Whether the record has been propagated to the CRM
    pub synced: bool,
}

impl CustomerRecord {
    /// Creates an unsynced record
    pub fn new(
        internal_id: RecordId,
        external_customer_id: Option<i32>,
        name: Option<String>,
        phone: Option<String>,
    ) -> Self {
        Self {
            internal_id,
            external_customer_id,
            name,
            phone,
            synced: false,
        }
    }
}

/// Customer data to insert into the ERP table (seeding, tests)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    /// Customer number in the ERP
    pub external_customer_id: Option<i32>,
    /// Customer name
    pub name: Option<String>,
    /// Phone number
    pub phone: Option<String>,
}

impl NewCustomer {
    /// Creates a customer with every field present
    pub fn new(external_customer_id: i32, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            external_customer_id: Some(external_customer_id),
            name: Some(name.into()),
            phone: Some(phone.into()),
        }
    }
}

/// Demo customers inserted into an empty ERP table at startup
pub fn seed_customers() -> Vec<NewCustomer> {
    vec![
        NewCustomer::new(1, "Rahul", "9876543210"),
        NewCustomer::new(2, "Anita", "9123456780"),
    ]
}

/// Normalized customer shape sent to the CRM
///
/// Serialized with camelCase keys; missing values are written as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPayload {
    /// ERP customer number
    pub customer_id: Option<i32>,
    /// Customer name
    pub name: Option<String>,
    /// Phone number
    pub phone: Option<String>,
}

impl SyncPayload {
    /// Serializes the payload for the sync log `payload` column
    pub fn to_json(&self) -> crate::domain::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
