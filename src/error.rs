use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failure of a single fetch against the random-person API.
///
/// The `Display` text is what the error panel shows. It is fixed per kind;
/// the carried detail (status line, transport or decode error) only goes to
/// the logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Unable to load profiles from the server. Try again later.")]
    Network(String),

    #[error("The server sent profile data that could not be read.")]
    Parse(String),
}

impl FetchError {
    pub fn network(err: impl ToString) -> Self {
        FetchError::Network(err.to_string())
    }

    pub fn parse(err: impl ToString) -> Self {
        FetchError::Parse(err.to_string())
    }

    pub fn detail(&self) -> &str {
        match self {
            FetchError::Network(detail) | FetchError::Parse(detail) => detail,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Template render failed: {0}")]
    Render(#[from] askama::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Render { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}
