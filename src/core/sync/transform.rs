//! Record transformation

use crate::domain::{CustomerRecord, SyncPayload};

/// Map an ERP record to the payload pushed to the CRM
///
/// `external_customer_id` becomes `customer_id`; name and phone pass through.
/// Missing values stay missing.
pub fn transform(record: &CustomerRecord) -> SyncPayload {
    SyncPayload {
        customer_id: record.external_customer_id,
        name: record.name.clone(),
        phone: record.phone.clone(),
    }
}
