//! The API endpoints URIs.
//!
//! For endpoints that take parameters, e.g., '/events/{event_id}', use [format_endpoint].

/// The root route which redirects to the events page.
pub const ROOT: &str = "/";
/// The page listing events, showing the selected event.
pub const EVENTS_VIEW: &str = "/events";
/// The page for a single event, which also accepts the expense filters as a query.
pub const EVENT_VIEW: &str = "/events/{event_id}";
/// The page for editing an existing expense.
pub const EDIT_EXPENSE_VIEW: &str = "/events/{event_id}/expenses/{expense_id}/edit";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route to create an event.
pub const POST_EVENT: &str = "/api/events";
/// The route to delete an event and all of its expenses.
pub const DELETE_EVENT: &str = "/api/events/{event_id}";
/// The route to add an expense to an event.
pub const POST_EXPENSE: &str = "/api/events/{event_id}/expenses";
/// The route to update an expense.
pub const PUT_EXPENSE: &str = "/api/events/{event_id}/expenses/{expense_id}";
/// The route to delete an expense.
pub const DELETE_EXPENSE: &str = "/api/events/{event_id}/expenses/{expense_id}";

/// Replace the parameters in `endpoint_path` with `values`, in order.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/events/{event_id}', '{event_id}' is the parameter.
///
/// Parameters without a matching value are left as is, and extra values are
/// ignored. If no parameter is found in `endpoint_path`, the function returns
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, values: &[&str]) -> String {
    let mut formatted = String::with_capacity(endpoint_path.len());
    let mut rest = endpoint_path;
    let mut values = values.iter();

    while let Some(param_start) = rest.find('{') {
        let Some(param_length) = rest[param_start..].find('}') else {
            break;
        };
        let Some(value) = values.next() else {
            break;
        };

        formatted.push_str(&rest[..param_start]);
        formatted.push_str(value);
        rest = &rest[param_start + param_length + 1..];
    }

    formatted.push_str(rest);
    formatted
}
