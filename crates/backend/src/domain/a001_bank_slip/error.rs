use axum::http::StatusCode;
use thiserror::Error;

/// Failures of bank slip operations. Each maps to exactly one HTTP status.
#[derive(Debug, Error)]
pub enum BankSlipError {
    #[error("Bankslip not provided in the request body")]
    NotProvided,

    #[error("Invalid id provided - it must be a valid UUID")]
    InvalidIdentifier,

    #[error(
        "Invalid bankslip provided.The possible reasons are: \
         A field of the provided bankslip was null or with invalid values"
    )]
    Invalid,

    #[error("Bankslip not found with the specified id")]
    NotFound,

    /// Request body could not be read as JSON
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// Store failure; the inner error is logged, never sent to the client
    #[error("Internal server error")]
    Storage(anyhow::Error),
}

impl BankSlipError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BankSlipError::NotProvided
            | BankSlipError::InvalidIdentifier
            | BankSlipError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            BankSlipError::Invalid => StatusCode::UNPROCESSABLE_ENTITY,
            BankSlipError::NotFound => StatusCode::NOT_FOUND,
            BankSlipError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for BankSlipError {
    fn from(e: anyhow::Error) -> Self {
        BankSlipError::Storage(e)
    }
}
