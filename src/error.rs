use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("invalid input: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("metadata service error: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("malformed metadata: {0}")]
    MalformedUpstreamData(String),

    #[error("invalid path segment: {0}")]
    InvalidPath(String),

    #[error("form token missing or does not match")]
    FormTampered,

    #[error("database error: {0}")]
    Database(DbErr),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::ConstraintViolation(msg),
            _ => Self::Database(err),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConstraintViolation(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Upstream(_) | AppError::MalformedUpstreamData(_) => StatusCode::BAD_GATEWAY,
            AppError::InvalidPath(_) => StatusCode::BAD_REQUEST,
            AppError::FormTampered => StatusCode::FORBIDDEN,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        let body = crate::templates::error_page(self.to_string());
        (status, Html(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
