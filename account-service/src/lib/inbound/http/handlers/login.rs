use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::LoginRequest;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let outcome = state.account_service.login(body.into()).await?;

    // The token is already issued; a lost counter update does not revoke it.
    if let Err(e) = &outcome.login_counter {
        tracing::warn!(
            user_id = %outcome.user_id,
            error = %e,
            "Failed to record successful login"
        );
    }

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            user_id: outcome.user_id.to_string(),
            token: outcome.token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    phone_number: String,
    password: String,
}

impl From<LoginRequestBody> for LoginRequest {
    fn from(body: LoginRequestBody) -> Self {
        Self {
            phone_number: body.phone_number,
            password: body.password,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub user_id: String,
    pub token: String,
}
