use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::authorization_header;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::UpdateProfileRequest;
use crate::inbound::http::router::AppState;

const UPDATE_PROFILE_SUCCESS: &str = "update profile success";

/// HTTP request body for a profile update (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateProfileRequestBody {
    full_name: String,
    phone_number: String,
}

impl From<UpdateProfileRequestBody> for UpdateProfileRequest {
    fn from(body: UpdateProfileRequestBody) -> Self {
        Self {
            full_name: body.full_name,
            phone_number: body.phone_number,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateProfileResponseData {
    pub result: String,
}

pub async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<UpdateProfileRequestBody>,
) -> Result<ApiSuccess<UpdateProfileResponseData>, ApiError> {
    state
        .account_service
        .update_profile(authorization_header(&headers), body.into())
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                UpdateProfileResponseData {
                    result: UPDATE_PROFILE_SUCCESS.to_string(),
                },
            )
        })
}
