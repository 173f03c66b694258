use std::collections::HashMap;

use axum::Json;
use serde::Deserialize;

use crate::database::manager::DatabaseManager;
use crate::error::ApiError;
use crate::services::account_service::{AccountService, AuthenticatedUser, Registration};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: Option<String>,
    pub password: Option<String>,
}

/// POST /account/register - create a user account and return it with a token
pub async fn register(
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AuthenticatedUser>, ApiError> {
    let registration = validate_registration(payload)?;

    let pool = DatabaseManager::pool().await?;
    let authenticated = AccountService::new(pool).register(registration).await?;

    Ok(Json(authenticated))
}

/// POST /account/login - check credentials and return the user with a token
pub async fn login(Json(payload): Json<LoginRequest>) -> Result<Json<AuthenticatedUser>, ApiError> {
    let (username, password) = validate_login(payload)?;

    let pool = DatabaseManager::pool().await?;
    let authenticated = AccountService::new(pool).login(&username, &password).await?;

    Ok(Json(authenticated))
}

fn validate_login(payload: LoginRequest) -> Result<(String, String), ApiError> {
    let mut field_errors = HashMap::new();

    let username = require_non_empty(&mut field_errors, "userName", payload.user_name);
    let password = require_non_empty(&mut field_errors, "password", payload.password);

    match (username, password) {
        (Some(username), Some(password)) => Ok((username, password)),
        _ => Err(ApiError::validation_error(
            "Invalid login request",
            Some(field_errors),
        )),
    }
}

fn validate_registration(payload: RegisterRequest) -> Result<Registration, ApiError> {
    let mut field_errors = HashMap::new();

    let first_name = require_non_empty(&mut field_errors, "firstName", payload.first_name);
    let last_name = require_non_empty(&mut field_errors, "lastName", payload.last_name);
    let username = require_non_empty(&mut field_errors, "userName", payload.user_name);
    let email = require_non_empty(&mut field_errors, "email", payload.email);

    let password = match payload.password {
        None => {
            field_errors.insert("password".to_string(), "must not be empty".to_string());
            None
        }
        Some(password) if password.is_empty() => {
            field_errors.insert("password".to_string(), "must not be empty".to_string());
            None
        }
        Some(password) if password.len() < 6 => {
            field_errors.insert(
                "password".to_string(),
                "Minimum password length is 6 characters".to_string(),
            );
            None
        }
        Some(password) => Some(password),
    };

    match (first_name, last_name, username, email, password) {
        (Some(first_name), Some(last_name), Some(username), Some(email), Some(password)) => {
            Ok(Registration {
                first_name,
                last_name,
                username,
                email,
                phone: payload.phone,
                address: payload.address,
                password,
            })
        }
        _ => Err(ApiError::validation_error(
            "Invalid registration request",
            Some(field_errors),
        )),
    }
}

fn require_non_empty(
    field_errors: &mut HashMap<String, String>,
    field: &str,
    value: Option<String>,
) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            field_errors.insert(field.to_string(), "must not be empty".to_string());
            None
        }
    }
}
