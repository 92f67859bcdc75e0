//! HTTP error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use fairprice_common::{FairPriceError, FieldError, ValidationError};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Failure surfaced to the pricing form
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no input provided")]
    MissingInput,

    #[error("{0}")]
    MalformedBody(String),

    #[error("invalid pricing input")]
    Invalid(Vec<FieldError>),

    #[error("input is outside the supported numeric range")]
    OutOfRange,

    #[error("rate limit exceeded")]
    RateLimited,

    #[error("internal error")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<BTreeMap<&'static str, Vec<&'static str>>>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingInput | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Invalid(_) | ApiError::OutOfRange => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FairPriceError> for ApiError {
    fn from(err: FairPriceError) -> Self {
        match err {
            FairPriceError::Validation(ValidationError::MissingInput) => ApiError::MissingInput,
            FairPriceError::Validation(ValidationError::InvalidInput { fields }) => {
                ApiError::Invalid(fields)
            }
            FairPriceError::Overflow => ApiError::OutOfRange,
            err @ FairPriceError::Serialization(_) => ApiError::MalformedBody(err.to_string()),
            err @ FairPriceError::Config(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Internal(detail) = &self {
            tracing::error!(%detail, "request failed");
        }

        let fields = match &self {
            ApiError::Invalid(fields) => {
                let mut by_field: BTreeMap<&'static str, Vec<&'static str>> = BTreeMap::new();
                for f in fields {
                    by_field.entry(f.field).or_default().push(f.message);
                }
                Some(by_field)
            }
            _ => None,
        };

        let body = ErrorBody {
            error: self.to_string(),
            fields,
        };
        (status, Json(body)).into_response()
    }
}
