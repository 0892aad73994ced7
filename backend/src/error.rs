use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use serde::Serialize;
use shared::error::{Error, ErrorCode};
use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug, Serialize)]
pub enum ApiError {
    #[error("Voter not found")]
    NotFound(String),
    #[error("Invalid id")]
    InvalidId(String),
    #[error("Invalid request body")]
    InvalidBody(String),
    #[error("Voter already exists")]
    AlreadyExists(String),
    #[error("Storage backend unavailable")]
    Unavailable(String),
    #[error("Internal error")]
    Internal(String),
}

impl ApiError {
    fn code(&self) -> ErrorCode {
        match self {
            ApiError::NotFound(_) => ErrorCode::NotFound,
            ApiError::InvalidId(_) | ApiError::InvalidBody(_) => ErrorCode::InvalidInput,
            ApiError::AlreadyExists(_) => ErrorCode::Conflict,
            ApiError::Unavailable(_) => ErrorCode::Unavailable,
            ApiError::Internal(_) => ErrorCode::SystemError,
        }
    }

    fn details(&self) -> &str {
        match self {
            ApiError::NotFound(d)
            | ApiError::InvalidId(d)
            | ApiError::InvalidBody(d)
            | ApiError::AlreadyExists(d)
            | ApiError::Unavailable(d)
            | ApiError::Internal(d) => d,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        let details = e.to_string();
        match e {
            StoreError::NotFound(_) | StoreError::PollNotFound { .. } => ApiError::NotFound(details),
            StoreError::AlreadyExists(_) => ApiError::AlreadyExists(details),
            StoreError::BackendUnavailable(_) => ApiError::Unavailable(details),
            StoreError::Backend(_) | StoreError::Serialization(_) => ApiError::Internal(details),
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let code = self.code();
        let status = Status::from_code(code.status_code()).unwrap_or(Status::InternalServerError);
        let body = Error::with_details(code, self.to_string(), self.details());

        rocket::Response::build_from(Json(body).respond_to(req)?)
            .status(status)
            .ok()
    }
}
