use std::collections::HashMap;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::database::manager::DatabaseError;
use crate::database::rewards::{NewRewardRecord, RewardsRepository};
use crate::rewards::{aggregate, calculate, CustomerTransaction};

#[derive(Debug, Error)]
pub enum RewardsError {
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Orchestrates the reward core against the storage collaborator: writes
/// compute-then-persist, reads fetch-then-aggregate.
///
/// Holds nothing but the repository; the "zero records" condition becomes
/// NotFound here, at the service boundary, so the aggregator stays pure.
pub struct RewardsService<R> {
    repository: R,
}

impl<R: RewardsRepository> RewardsService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Compute points for one transaction, persist the reward record, and
    /// return the points earned.
    pub async fn process_single(&self, txn: &CustomerTransaction) -> Result<Decimal, RewardsError> {
        let points = calculate(txn.total_invoice_amount);

        self.repository
            .insert(NewRewardRecord {
                customer_id: txn.customer_id.clone(),
                invoice_id: txn.invoice_id,
                invoice_date: txn.invoice_date,
                invoice_amount: txn.total_invoice_amount,
                reward_points: points,
            })
            .await?;

        Ok(points)
    }

    /// Process each transaction in input order and return per-customer totals
    /// for this batch only.
    ///
    /// One insert per transaction; a failure partway through leaves earlier
    /// writes committed.
    pub async fn process_batch(
        &self,
        txns: &[CustomerTransaction],
    ) -> Result<HashMap<String, Decimal>, RewardsError> {
        let mut totals: HashMap<String, Decimal> = HashMap::new();

        for txn in txns {
            let points = self.process_single(txn).await?;
            *totals
                .entry(txn.customer_id.clone())
                .or_insert(Decimal::ZERO) += points;
        }

        Ok(totals)
    }

    pub async fn rewards_by_customer(
        &self,
        customer_id: &str,
    ) -> Result<HashMap<String, Decimal>, RewardsError> {
        let records = self.repository.find_by_customer(customer_id).await?;

        if records.is_empty() {
            return Err(RewardsError::NotFound(format!(
                "No reward points found for customer id: {}",
                customer_id
            )));
        }

        Ok(aggregate(&records))
    }

    pub async fn rewards_by_month_year(
        &self,
        month: u32,
        year: i32,
    ) -> Result<HashMap<String, Decimal>, RewardsError> {
        let records = self.repository.find_by_month_year(month, year).await?;

        if records.is_empty() {
            return Err(RewardsError::NotFound(format!(
                "No rewards found for month: {} and year: {}",
                month, year
            )));
        }

        Ok(aggregate(&records))
    }

    pub async fn rewards_by_customer_month_year(
        &self,
        customer_id: &str,
        month: u32,
        year: i32,
    ) -> Result<HashMap<String, Decimal>, RewardsError> {
        let records = self
            .repository
            .find_by_customer_and_month_year(customer_id, month, year)
            .await?;

        if records.is_empty() {
            return Err(RewardsError::NotFound(format!(
                "No reward points found for customer id: {} in month: {} and year: {}",
                customer_id, month, year
            )));
        }

        Ok(aggregate(&records))
    }
}
