use poem::error::ResponseError;
use poem::http::StatusCode;
use poem::web::Json;
use poem::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::repos::StoreError;

/// Every failure a client can observe. The message doubles as the wire text.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AppError {
    #[error("bad request")]
    BadRequest,

    #[error("resource not found")]
    NotFound,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("unprocessable")]
    Unprocessable,

    #[error("internal server error")]
    Internal,
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

impl AppError {
    /// Maps any error produced while routing or handling a request onto one of our kinds.
    pub fn classify(err: &poem::Error) -> Self {
        if let Some(app) = err.downcast_ref::<AppError>() {
            return *app;
        }
        match err.status() {
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::METHOD_NOT_ALLOWED => Self::MethodNotAllowed,
            StatusCode::UNPROCESSABLE_ENTITY => Self::Unprocessable,
            status if status.is_client_error() => Self::BadRequest,
            _ => Self::Internal,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            success: false,
            error: self.status().as_u16(),
            message: self.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn as_response(&self) -> Response
    where
        Self: std::error::Error + Send + Sync + 'static,
    {
        Json(self.body())
            .with_status(self.status())
            .into_response()
    }
}

/// The one place store faults turn into client errors.
pub fn store_failure(context: &'static str, err: StoreError) -> AppError {
    store_failure_as(context, err, AppError::Unprocessable)
}

/// Like [`store_failure`] for handlers that report failures with a narrower kind.
pub fn store_failure_as(context: &'static str, err: StoreError, kind: AppError) -> AppError {
    match &err {
        StoreError::QuestionNotFound(_) => warn!("{context}: {err}"),
        StoreError::Sqlx(_) => error!("{context}: {err}"),
    }
    kind
}

/// Renders every error leaving the route tree as the JSON envelope.
pub async fn render_error(err: poem::Error) -> Response {
    let kind = AppError::classify(&err);
    if err.downcast_ref::<AppError>().is_none() {
        debug!(status = %err.status(), "request failed: {err}");
    }
    kind.as_response()
}
