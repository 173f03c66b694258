use std::collections::HashMap;

use axum::extract::{Path, Query};
use axum::Json;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::database::manager::DatabaseManager;
use crate::database::rewards::PgRewardsRepository;
use crate::error::ApiError;
use crate::rewards::CustomerTransaction;
use crate::services::rewards_service::RewardsService;

/// Incoming transaction payload; every field is optional so validation can
/// report all missing/invalid fields at once instead of failing on the first.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub customer_id: Option<String>,
    pub invoice_id: Option<i64>,
    pub invoice_date: Option<NaiveDate>,
    pub total_invoice_amount: Option<Decimal>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardResponse {
    pub customer_id: String,
    pub total_reward_points: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerQuery {
    pub customer_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsByQuery {
    pub customer_id: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

/// POST /rewards/cal-points - compute and persist points for one transaction
pub async fn cal_points(
    Json(payload): Json<TransactionRequest>,
) -> Result<Json<Value>, ApiError> {
    let txn = validate_transaction(&payload)?;

    let service = rewards_service().await?;
    let points = service.process_single(&txn).await?;

    Ok(Json(json!({
        "CustomerId": txn.customer_id,
        "InvoiceId": txn.invoice_id,
        "TotalInvoiceAmount": txn.total_invoice_amount,
        "RewardPoints": points,
    })))
}

/// POST /rewards/cal-points/v2 - process a batch of transactions and return
/// per-customer totals for the batch
pub async fn cal_points_batch(
    Json(payload): Json<Vec<TransactionRequest>>,
) -> Result<Json<Vec<RewardResponse>>, ApiError> {
    let mut txns = Vec::with_capacity(payload.len());
    for request in &payload {
        txns.push(validate_transaction(request)?);
    }

    let service = rewards_service().await?;
    let totals = service.process_batch(&txns).await?;

    Ok(Json(to_response_list(totals)))
}

/// GET /rewards/pointsByCustomerId?customerId=...
pub async fn points_by_customer_id(
    Query(query): Query<CustomerQuery>,
) -> Result<Json<Vec<RewardResponse>>, ApiError> {
    let customer_id = require_customer_id(query.customer_id.as_deref())?;

    let service = rewards_service().await?;
    let totals = service.rewards_by_customer(&customer_id).await?;

    Ok(Json(to_response_list(totals)))
}

/// GET /rewards/pointsByMonthAndYear/:month/:year
pub async fn points_by_month_year(
    Path((month, year)): Path<(u32, i32)>,
) -> Result<Json<Vec<RewardResponse>>, ApiError> {
    let mut field_errors = HashMap::new();
    if !(1..=12).contains(&month) {
        field_errors.insert("month".to_string(), "must be between 1 and 12".to_string());
    }
    if !(1000..=9999).contains(&year) {
        field_errors.insert(
            "year".to_string(),
            "must be between 1000 and 9999".to_string(),
        );
    }
    if !field_errors.is_empty() {
        return Err(ApiError::validation_error(
            "Invalid month or year",
            Some(field_errors),
        ));
    }

    let service = rewards_service().await?;
    let totals = service.rewards_by_month_year(month, year).await?;

    Ok(Json(to_response_list(totals)))
}

/// GET /rewards/pointsBy?customerId=...&month=...&year=...
pub async fn points_by(
    Query(query): Query<PointsByQuery>,
) -> Result<Json<Vec<RewardResponse>>, ApiError> {
    let customer_id = require_customer_id(query.customer_id.as_deref())?;

    let month = query.month.unwrap_or(0);
    let year = query.year.unwrap_or(0);
    if !(1..=12).contains(&month) || year <= 0 {
        return Err(ApiError::bad_request(format!(
            "Invalid month: {} or year: {}, month must be between 1 and 12 and year must be positive",
            month, year
        )));
    }

    let service = rewards_service().await?;
    let totals = service
        .rewards_by_customer_month_year(&customer_id, month, year)
        .await?;

    Ok(Json(to_response_list(totals)))
}

async fn rewards_service() -> Result<RewardsService<PgRewardsRepository>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    Ok(RewardsService::new(PgRewardsRepository::new(pool)))
}

fn validate_transaction(request: &TransactionRequest) -> Result<CustomerTransaction, ApiError> {
    let mut field_errors = HashMap::new();

    let customer_id = match request.customer_id.as_deref() {
        Some(id) if !id.trim().is_empty() => Some(id.to_string()),
        _ => {
            field_errors.insert("customerId".to_string(), "must not be empty".to_string());
            None
        }
    };

    let invoice_id = match request.invoice_id {
        Some(id) if id > 0 => Some(id),
        _ => {
            field_errors.insert(
                "invoiceId".to_string(),
                "must be greater than 0".to_string(),
            );
            None
        }
    };

    let invoice_date = match request.invoice_date {
        Some(date) => Some(date),
        None => {
            field_errors.insert("invoiceDate".to_string(), "must not be null".to_string());
            None
        }
    };

    let total_invoice_amount = match request.total_invoice_amount {
        Some(amount) if amount >= Decimal::ZERO => Some(amount),
        _ => {
            field_errors.insert(
                "totalInvoiceAmount".to_string(),
                "must be greater than or equal to 0".to_string(),
            );
            None
        }
    };

    match (customer_id, invoice_id, invoice_date, total_invoice_amount) {
        (Some(customer_id), Some(invoice_id), Some(invoice_date), Some(total_invoice_amount)) => {
            Ok(CustomerTransaction {
                customer_id,
                invoice_id,
                invoice_date,
                total_invoice_amount,
            })
        }
        _ => Err(ApiError::validation_error(
            "Invalid transaction",
            Some(field_errors),
        )),
    }
}

fn require_customer_id(customer_id: Option<&str>) -> Result<String, ApiError> {
    match customer_id {
        Some(id) if !id.trim().is_empty() => Ok(id.to_string()),
        _ => {
            let mut field_errors = HashMap::new();
            field_errors.insert("customerId".to_string(), "must not be empty".to_string());
            Err(ApiError::validation_error(
                "Invalid request",
                Some(field_errors),
            ))
        }
    }
}

fn to_response_list(totals: HashMap<String, Decimal>) -> Vec<RewardResponse> {
    totals
        .into_iter()
        .map(|(customer_id, total_reward_points)| RewardResponse {
            customer_id,
            total_reward_points,
        })
        .collect()
}
