use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::config::SAVE_FAILED_MESSAGE;
use crate::repository::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Storage(StorageError::Unavailable(_) | StorageError::Timeout(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Storage(StorageError::Rejected(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(status = status.as_u16(), error = %self, "Request failed");

        // Plain text only; the cause stays in the logs.
        (status, SAVE_FAILED_MESSAGE).into_response()
    }
}
