use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::reward::RewardRecord;

/// A reward record about to be persisted; the database assigns its id.
#[derive(Debug, Clone)]
pub struct NewRewardRecord {
    pub customer_id: String,
    pub invoice_id: i64,
    pub invoice_date: NaiveDate,
    pub invoice_amount: Decimal,
    pub reward_points: Decimal,
}

/// Storage capability required by the rewards service: persist one record and
/// look records up by customer, by invoice month/year, or both.
#[async_trait]
pub trait RewardsRepository: Send + Sync {
    async fn insert(&self, record: NewRewardRecord) -> Result<RewardRecord, DatabaseError>;

    async fn find_by_customer(&self, customer_id: &str) -> Result<Vec<RewardRecord>, DatabaseError>;

    async fn find_by_month_year(
        &self,
        month: u32,
        year: i32,
    ) -> Result<Vec<RewardRecord>, DatabaseError>;

    async fn find_by_customer_and_month_year(
        &self,
        customer_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Vec<RewardRecord>, DatabaseError>;
}

/// Postgres-backed repository over the customer_rewards table.
pub struct PgRewardsRepository {
    pool: PgPool,
}

impl PgRewardsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RewardsRepository for PgRewardsRepository {
    async fn insert(&self, record: NewRewardRecord) -> Result<RewardRecord, DatabaseError> {
        let row = sqlx::query_as::<_, RewardRecord>(
            "INSERT INTO customer_rewards (customer_id, invoice_id, invoice_date, invoice_amount, reward_points)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, customer_id, invoice_id, invoice_date, invoice_amount, reward_points, created_at",
        )
        .bind(&record.customer_id)
        .bind(record.invoice_id)
        .bind(record.invoice_date)
        .bind(record.invoice_amount)
        .bind(record.reward_points)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_customer(&self, customer_id: &str) -> Result<Vec<RewardRecord>, DatabaseError> {
        let rows = sqlx::query_as::<_, RewardRecord>(
            "SELECT id, customer_id, invoice_id, invoice_date, invoice_amount, reward_points, created_at
             FROM customer_rewards
             WHERE customer_id = $1",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_by_month_year(
        &self,
        month: u32,
        year: i32,
    ) -> Result<Vec<RewardRecord>, DatabaseError> {
        let (start, end) = month_range(month, year)?;

        let rows = sqlx::query_as::<_, RewardRecord>(
            "SELECT id, customer_id, invoice_id, invoice_date, invoice_amount, reward_points, created_at
             FROM customer_rewards
             WHERE invoice_date >= $1 AND invoice_date < $2",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_by_customer_and_month_year(
        &self,
        customer_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Vec<RewardRecord>, DatabaseError> {
        let (start, end) = month_range(month, year)?;

        let rows = sqlx::query_as::<_, RewardRecord>(
            "SELECT id, customer_id, invoice_id, invoice_date, invoice_amount, reward_points, created_at
             FROM customer_rewards
             WHERE customer_id = $1 AND invoice_date >= $2 AND invoice_date < $3",
        )
        .bind(customer_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// Half-open calendar range covering one month: [first day, first day of next month).
///
/// Invoice dates are plain calendar dates, so month membership is a date
/// comparison with no timezone involved.
pub fn month_range(month: u32, year: i32) -> Result<(NaiveDate, NaiveDate), DatabaseError> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| DatabaseError::QueryError(format!("invalid month/year: {}/{}", month, year)))?;

    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| DatabaseError::QueryError(format!("invalid month/year: {}/{}", month, year)))?;

    Ok((start, end))
}
