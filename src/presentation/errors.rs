// Host-level errors and their HTTP mapping
use crate::application::maintenance_api::ApiError;
use crate::domain::locale;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum HostError {
    #[error("unreadable form upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("backend unavailable: {0}")]
    Backend(#[from] ApiError),
}

impl IntoResponse for HostError {
    fn into_response(self) -> Response {
        match &self {
            HostError::Multipart(_) => {
                warn!("{}", self);
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            HostError::Backend(_) => {
                error!("{}", self);
                (StatusCode::BAD_GATEWAY, locale::LOAD_ERROR).into_response()
            }
        }
    }
}
