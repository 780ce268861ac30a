use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use error_stack::Report;
use kernel::KernelError;
use serde::Serialize;
use std::process::{ExitCode, Termination};

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

/// Failure answer of a route.
///
/// `Internal` keeps the report for the log only; the client sees `message`.
#[derive(Debug)]
pub enum ErrorStatus {
    BadRequest(String),
    Internal {
        message: &'static str,
        report: Report<KernelError>,
    },
}

impl ErrorStatus {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal(message: &'static str) -> impl FnOnce(Report<KernelError>) -> Self {
        move |report| Self::Internal { message, report }
    }
}

impl From<JsonRejection> for ErrorStatus {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ErrorStatus::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ErrorStatus::Internal { message, report } => {
                tracing::error!("{report:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
        };
        (status, axum::Json(ErrorBody { error })).into_response()
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use error_stack::Report;
    use kernel::KernelError;

    use crate::error::ErrorStatus;

    #[test]
    fn every_store_failure_is_a_server_error() {
        for context in [KernelError::Timeout, KernelError::Internal] {
            let response = ErrorStatus::internal("Failed to get book.")(Report::new(context))
                .into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
        let response = ErrorStatus::bad_request("title is required.").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
