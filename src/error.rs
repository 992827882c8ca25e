//! The app level error type and its conversions into HTML pages and alerts.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{alert::Alert, internal_server_error::InternalServerError, not_found::NotFoundError};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested event or expense does not exist.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An empty string, or only whitespace, was used as an event name.
    #[error("Event name cannot be empty")]
    EmptyEventName,

    /// A required expense field was left empty. Holds the field name.
    #[error("The {0} is required")]
    MissingExpenseField(&'static str),

    /// The amount was not a finite, non-negative number.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// The status was not one of `unpaid`, `partial` or `paid`.
    #[error("\"{0}\" is not a valid expense status")]
    InvalidStatus(String),

    /// The payment method was not one of the known methods.
    #[error("\"{0}\" is not a valid payment method")]
    InvalidPaymentMethod(String),

    /// The backend returned an event or expense with neither `id` nor `_id`.
    #[error("the backend returned an {0} without an identifier")]
    MissingIdentifier(&'static str),

    /// The request to the backend could not be sent or its response could
    /// not be read.
    ///
    /// The string should only be logged, it is not meant for users.
    #[error("the backend request failed: {0}")]
    BackendRequest(String),

    /// The backend answered with a non-success status code.
    #[error("the backend responded with status {0}")]
    BackendStatus(u16),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Could not acquire the view state lock
    #[error("could not acquire the view state lock")]
    ViewStateLockError,

    /// Tried to delete an event that does not exist
    #[error("tried to delete an event that is not in the database")]
    DeleteMissingEvent,

    /// Tried to update an expense that does not exist
    #[error("tried to update an expense that is not in the database")]
    UpdateMissingExpense,

    /// Tried to delete an expense that does not exist
    #[error("tried to delete an expense that is not in the database")]
    DeleteMissingExpense,
}

impl Error {
    /// Whether the error was caused by invalid user input.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::EmptyEventName
                | Error::MissingExpenseField(_)
                | Error::InvalidAmount(_)
                | Error::InvalidStatus(_)
                | Error::InvalidPaymentMethod(_)
        )
    }

    /// Whether the error came from talking to the backend collaborator.
    pub fn is_backend_error(&self) -> bool {
        matches!(
            self,
            Error::BackendRequest(_) | Error::BackendStatus(_) | Error::MissingIdentifier(_)
        )
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        tracing::error!("backend request failed: {value}");
        Error::BackendRequest(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            error if error.is_backend_error() => {
                tracing::error!("The backend could not be reached: {}", error);
                InternalServerError {
                    description: "Could not load events from the server",
                    fix: "Check that the events server is running and try again.",
                }
                .into_response()
            }
            Error::DatabaseLockError | Error::ViewStateLockError => {
                InternalServerError::default().into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            error if error.is_validation_error() => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid input".to_owned(),
                    details: error.to_string(),
                },
            ),
            error if error.is_backend_error() => (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: "The events server returned an error".to_owned(),
                    details: "Check that the events server is running and try again.".to_owned(),
                },
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Not found".to_owned(),
                    details: "The event or expense could not be found.".to_owned(),
                },
            ),
            Error::DeleteMissingEvent => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not delete the event".to_owned(),
                    details: "The event could not be found. \
                    Try refreshing the page to see if the event has already been deleted."
                        .to_owned(),
                },
            ),
            Error::UpdateMissingExpense => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not update the expense".to_owned(),
                    details: "The expense could not be found.".to_owned(),
                },
            ),
            Error::DeleteMissingExpense => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not delete the expense".to_owned(),
                    details: "The expense could not be found. \
                    Try refreshing the page to see if the expense has already been deleted."
                        .to_owned(),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }

    /// Like [Error::into_alert_response], but backend failures are reported
    /// with `message`, a fixed description of what the user was trying to do.
    pub fn into_alert_response_with_message(self, message: &str) -> Response {
        if self.is_backend_error() {
            (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: message.to_owned(),
                    details: "Check that the events server is running and try again.".to_owned(),
                }
                .into_html(),
            )
                .into_response()
        } else {
            self.into_alert_response()
        }
    }
}

#[cfg(test)]
mod error_tests {
    use axum::http::StatusCode;

    use crate::{
        Error,
        test_utils::{assert_valid_html, parse_html_fragment},
    };

    #[test]
    fn no_rows_maps_to_not_found() {
        assert_eq!(
            Error::from(rusqlite::Error::QueryReturnedNoRows),
            Error::NotFound
        );
    }

    #[tokio::test]
    async fn alert_status_codes() {
        let cases = [
            (Error::EmptyEventName, StatusCode::BAD_REQUEST),
            (Error::InvalidAmount("x".to_owned()), StatusCode::BAD_REQUEST),
            (Error::DeleteMissingExpense, StatusCode::NOT_FOUND),
            (Error::NotFound, StatusCode::NOT_FOUND),
            (Error::BackendStatus(500), StatusCode::BAD_GATEWAY),
            (Error::MissingIdentifier("event"), StatusCode::BAD_GATEWAY),
            (Error::DatabaseLockError, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, want_status) in cases {
            let description = error.to_string();
            let response = error.into_alert_response();

            assert_eq!(response.status(), want_status, "for error {description}");
            assert_valid_html(&parse_html_fragment(response).await);
        }
    }

    #[tokio::test]
    async fn backend_alert_uses_given_message() {
        let response = Error::BackendStatus(503)
            .into_alert_response_with_message("Could not add the expense");

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Could not add the expense"), "got {text}");
    }
}
