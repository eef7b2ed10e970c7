use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // 予約受付時の検証エラー。違反した規則をすべて保持する
    #[error("booking rejected: {}", .0.join(" "))]
    AdmissionRejected(Vec<String>),
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("Failed to run the transaction.")]
    TransactionError(#[source] sqlx::Error),
    #[error("A database operation failed.")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("Failed to run the migrations.")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
    #[error("{0}")]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error("{0}")]
    BcryptError(#[from] bcrypt::BcryptError),
    #[error("{0}")]
    ConvertToUuidError(#[from] uuid::Error),
    #[error("Authentication failed.")]
    UnauthenticatedError,
    #[error("Missing or invalid credentials.")]
    UnauthorizedError,
    #[error("This operation is not permitted.")]
    ForbiddenOperation,
    #[error("{0}")]
    ConversionEntityError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::AdmissionRejected(_) | AppError::UnprocessableEntity(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) | AppError::ConvertToUuidError(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::UnauthenticatedError | AppError::UnauthorizedError => {
                StatusCode::UNAUTHORIZED
            }
            AppError::ForbiddenOperation => StatusCode::FORBIDDEN,
            AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::MigrationError(_)
            | AppError::KeyValueStoreError(_)
            | AppError::BcryptError(_)
            | AppError::ConversionEntityError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "Unexpected error happened"
            );
            return status_code.into_response();
        }

        match self {
            AppError::AdmissionRejected(errors) => {
                (status_code, Json(json!({ "errors": errors }))).into_response()
            }
            e => (status_code, Json(json!({ "message": e.to_string() }))).into_response(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
