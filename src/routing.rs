//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{delete, get, post, put},
};

use crate::{
    AppState, endpoints,
    event_endpoints::{create_event_endpoint, delete_event_endpoint},
    events_page::{get_event_page, get_events_page},
    expense_endpoints::{
        create_expense_endpoint, delete_expense_endpoint, get_edit_expense_page,
        update_expense_endpoint,
    },
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::EVENTS_VIEW, get(get_events_page))
        .route(endpoints::EVENT_VIEW, get(get_event_page))
        .route(endpoints::EDIT_EXPENSE_VIEW, get(get_edit_expense_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(endpoints::POST_EVENT, post(create_event_endpoint))
        .route(endpoints::DELETE_EVENT, delete(delete_event_endpoint))
        .route(endpoints::POST_EXPENSE, post(create_expense_endpoint))
        .route(
            endpoints::PUT_EXPENSE,
            put(update_expense_endpoint).delete(delete_expense_endpoint),
        );

    page_routes
        .merge(api_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the events page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::EVENTS_VIEW)
}
