use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One persisted reward fact: an invoice and the points it earned.
///
/// Rows are append-only; `reward_points` is computed from `invoice_amount` at
/// creation time and never changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RewardRecord {
    pub id: Uuid,
    pub customer_id: String,
    pub invoice_id: i64,
    pub invoice_date: NaiveDate,
    pub invoice_amount: Decimal,
    pub reward_points: Decimal,
    pub created_at: DateTime<Utc>,
}
