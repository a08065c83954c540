use auth::ClaimSet;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn verify(
    State(state): State<AppState>,
    Json(body): Json<VerifyRequestBody>,
) -> Result<ApiSuccess<VerifyResponseData>, ApiError> {
    state
        .credential_service
        .verify_token(&body.token)
        .await
        .map_err(ApiError::from)
        .map(|ref claims| ApiSuccess::new(StatusCode::OK, claims.into()))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct VerifyRequestBody {
    token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyResponseData {
    pub email: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl From<&ClaimSet> for VerifyResponseData {
    fn from(claims: &ClaimSet) -> Self {
        Self {
            email: claims.sub.clone(),
            issued_at: claims.iat,
            expires_at: claims.exp,
        }
    }
}
