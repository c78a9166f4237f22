use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use country_currency_core::errors::Error as CoreError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    /// 404 with a caller-facing message.
    #[error("{0}")]
    NotFound(String),
    /// 500 with a caller-facing message; the cause is logged where it happens.
    #[error("{0}")]
    Internal(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

const INTERNAL: &str = "Internal server error";

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Core(e) => match e {
                CoreError::ExternalSource(_) => StatusCode::SERVICE_UNAVAILABLE,
                CoreError::Validation(_) => StatusCode::BAD_REQUEST,
                CoreError::NotFound(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) | ApiError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        let (error, details) = match self {
            ApiError::Core(CoreError::ExternalSource(source)) => (
                "External data source unavailable".to_string(),
                Some(format!("Could not fetch data from {}", source.provider())),
            ),
            ApiError::Core(e @ CoreError::Validation(_)) => (e.to_string(), None),
            ApiError::Core(e @ CoreError::NotFound(_)) => (e.to_string(), None),
            ApiError::Core(_) | ApiError::Anyhow(_) => (INTERNAL.to_string(), None),
            ApiError::NotFound(message) | ApiError::Internal(message) => (message.clone(), None),
        };
        ErrorBody { error, details }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "Request failed: {}", self);
        }
        (status, Json(self.body())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
