use std::str::FromStr;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::account::models::EmailAddress;
use crate::account::models::RegisterUserCommand;
use crate::account::models::Scope;
use crate::account::models::User;
use crate::account::models::UserId;
use crate::account::models::UserStatus;
use crate::inbound::http::router::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<CreateUserResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .account_service
        .register_user(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for creating a user (raw JSON)
///
/// Unknown fields, including any `status`, are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    id: String,
    name: String,
    email: String,
    password: String,
    scope: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateUserRequestError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("Invalid email: {0}")]
    Email(String),
}

impl CreateUserRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, ParseCreateUserRequestError> {
        if self.id.trim().is_empty() {
            return Err(ParseCreateUserRequestError::Empty("id"));
        }
        if self.name.trim().is_empty() {
            return Err(ParseCreateUserRequestError::Empty("name"));
        }
        if self.password.is_empty() {
            return Err(ParseCreateUserRequestError::Empty("password"));
        }
        email_address::EmailAddress::from_str(&self.email)
            .map_err(|e| ParseCreateUserRequestError::Email(e.to_string()))?;

        // An empty scope falls back to the default, like an absent one
        let scope = self
            .scope
            .filter(|scope| !scope.trim().is_empty())
            .map(Scope::new);

        Ok(RegisterUserCommand::new(
            UserId::new(self.id),
            self.name,
            EmailAddress::new(self.email),
            self.password,
            scope,
        ))
    }
}

impl From<ParseCreateUserRequestError> for ApiError {
    fn from(err: ParseCreateUserRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

/// Full persisted representation, password digest included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponseData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub status: UserStatus,
    pub scope: String,
    pub date_register: DateTime<Utc>,
    pub date_modify: Option<DateTime<Utc>>,
}

impl From<&User> for CreateUserResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            password: user.password_hash().to_string(),
            status: user.status(),
            scope: user.scope().to_string(),
            date_register: user.date_register(),
            date_modify: user.date_modify(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: &str, email: &str, scope: Option<&str>) -> CreateUserRequest {
        CreateUserRequest {
            id: id.to_string(),
            name: "Ana".to_string(),
            email: email.to_string(),
            password: "p@ss1".to_string(),
            scope: scope.map(str::to_string),
        }
    }

    #[test]
    fn test_valid_request_becomes_command() {
        let command = request("u1", "ana@x.com", Some("openid"))
            .try_into_command()
            .expect("Request should be valid");

        assert_eq!(command.id.as_str(), "u1");
        assert_eq!(command.email.as_str(), "ana@x.com");
        assert_eq!(command.scope, Some(Scope::new("openid")));
    }

    #[test]
    fn test_blank_scope_means_default() {
        let command = request("u1", "ana@x.com", Some("  "))
            .try_into_command()
            .expect("Request should be valid");

        assert!(command.scope.is_none());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let result = request("u1", "not-an-email", None).try_into_command();

        assert!(matches!(result, Err(ParseCreateUserRequestError::Email(_))));
    }

    #[test]
    fn test_empty_id_rejected() {
        let result = request(" ", "ana@x.com", None).try_into_command();

        assert!(matches!(result, Err(ParseCreateUserRequestError::Empty("id"))));
    }

    #[test]
    fn test_status_field_is_ignored() {
        let body: CreateUserRequest = serde_json::from_value(serde_json::json!({
            "id": "u1",
            "name": "Ana",
            "email": "ana@x.com",
            "password": "p@ss1",
            "status": "INACTIVE"
        }))
        .expect("Body should deserialize");

        assert!(body.try_into_command().is_ok());
    }
}
