//! Alert fragments shown in the alert container after an htmx request.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// A dismissable error message.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// A failure with a headline and an explanation.
    Error { message: String, details: String },
}

const ERROR_STYLE: &str = "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
    dark:bg-gray-800 dark:text-red-400 border border-red-300 dark:border-red-800";

impl Alert {
    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Markup {
        let Alert::Error { message, details } = self;

        html! {
            div
                class=(ERROR_STYLE)
                role="alert"
                onclick="this.remove()"
            {
                p class="font-medium" { (message) }

                @if !details.is_empty()
                {
                    p class="mt-1" { (details) }
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}
