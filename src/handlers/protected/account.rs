use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::database::manager::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::account_service::AccountService;

/// GET /account/profile - identity from the verified token plus the stored
/// user record
pub async fn profile(Extension(auth_user): Extension<AuthUser>) -> Result<Json<Value>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let user = AccountService::new(pool)
        .find_by_username(&auth_user.username)
        .await?;

    Ok(Json(json!({
        "userName": auth_user.username,
        "role": auth_user.role,
        "user": user,
    })))
}
