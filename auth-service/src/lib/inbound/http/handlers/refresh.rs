use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::ParseRequestError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RefreshCommand;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn refresh<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    ApiJson(body): ApiJson<RefreshRequest>,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    let command = RefreshCommand {
        email: EmailAddress::new(body.email).map_err(ParseRequestError::from)?,
        subject: auth_user.user_id,
    };

    state
        .auth_service
        .refresh(command)
        .await
        .map_err(|e| match e {
            UserError::NotFoundByEmail(_) => ApiError::NotFound("User not found".to_string()),
            _ => ApiError::InternalServerError(format!("Token refresh failed: {}", e)),
        })
        .map(|token| ApiSuccess::new(StatusCode::OK, RefreshResponseData { token }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshRequest {
    email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub token: String,
}
