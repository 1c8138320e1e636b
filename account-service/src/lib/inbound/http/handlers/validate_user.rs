use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::models::Credentials;
use crate::account::models::EmailAddress;
use crate::account::models::TokenResponse;
use crate::inbound::http::router::AppState;

pub async fn validate_user(
    State(state): State<AppState>,
    body: Result<Json<ValidateUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<TokenResponse>, ApiError> {
    let Json(body) = body?;
    let credentials = Credentials::new(EmailAddress::new(body.email), body.password);

    state
        .account_service
        .authenticate(credentials)
        .await
        .map_err(ApiError::from)
        .map(|tokens| ApiSuccess::new(StatusCode::OK, tokens))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidateUserRequest {
    email: String,
    password: String,
}
