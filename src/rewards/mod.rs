use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub mod aggregator;
pub mod calculator;

pub use aggregator::aggregate;
pub use calculator::calculate;

/// A single purchase invoice submitted for reward processing.
///
/// Ephemeral input: consumed to produce a persisted reward record, never
/// stored itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerTransaction {
    pub customer_id: String,
    pub invoice_id: i64,
    pub invoice_date: NaiveDate,
    pub total_invoice_amount: Decimal,
}
