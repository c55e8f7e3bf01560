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
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::Password;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub async fn login<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .auth_service
        .login(command)
        .await
        .map_err(|e| match e {
            // Unknown email and wrong password must be indistinguishable
            UserError::InvalidCredentials => {
                ApiError::UnprocessableEntity(INVALID_CREDENTIALS.to_string())
            }
            _ => ApiError::InternalServerError(format!("Login failed: {}", e)),
        })
        .map(|ref session| ApiSuccess::new(StatusCode::OK, session.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, ParseRequestError> {
        Ok(LoginCommand {
            email: EmailAddress::new(self.email)?,
            password: Password::new(self.password)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub title: String,
    pub message: String,
    pub token: String,
    pub user: String,
    pub id: String,
}

impl From<&IssuedSession> for LoginResponseData {
    fn from(session: &IssuedSession) -> Self {
        let username = session.user.username.as_str();
        Self {
            title: "Logged In".to_string(),
            message: format!("{} is logged in", username),
            token: session.token.clone(),
            user: username.to_string(),
            id: session.user.id.to_string(),
        }
    }
}
