use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;

use super::authorization_header;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::Profile;
use crate::inbound::http::router::AppState;

pub async fn get_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    state
        .account_service
        .get_profile(authorization_header(&headers))
        .await
        .map_err(ApiError::from)
        .map(|profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileResponseData {
    pub full_name: String,
    pub phone_number: String,
}

impl From<Profile> for ProfileResponseData {
    fn from(profile: Profile) -> Self {
        Self {
            full_name: profile.full_name,
            phone_number: profile.phone_number,
        }
    }
}
