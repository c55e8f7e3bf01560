use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::ParseRequestError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::IssuedSession;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Username;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Every failure past body decoding, invalid fields and duplicates included,
/// is a 422 carrying the cause.
pub async fn register<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let command = body.try_into_command().map_err(registration_failed)?;

    state
        .auth_service
        .register(command)
        .await
        .map_err(registration_failed)
        .map(|ref session| ApiSuccess::new(StatusCode::OK, session.into()))
}

fn registration_failed(cause: impl std::fmt::Display) -> ApiError {
    ApiError::UnprocessableEntity(format!("Registration failed: {}", cause))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    username: String,
    email: String,
    password: String,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRequestError> {
        let username = Username::new(self.username)?;
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        Ok(RegisterCommand::new(username, email, password))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub title: String,
    pub message: String,
    pub token: String,
    pub user: String,
}

impl From<&IssuedSession> for RegisterResponseData {
    fn from(session: &IssuedSession) -> Self {
        let username = session.user.username.as_str();
        Self {
            title: "Registration".to_string(),
            message: format!("{} has been registered", username),
            token: session.token.clone(),
            user: username.to_string(),
        }
    }
}
