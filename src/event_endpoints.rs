//! Endpoints for creating and deleting events.

use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    AppState,
    endpoints::{self, format_endpoint},
    event::{EventFormData, EventId, NewEvent},
    events_page::event_form_view,
    view_state::Action,
};

const CREATE_EVENT_FAILED: &str = "Could not create the event";
const DELETE_EVENT_FAILED: &str = "Could not delete the event";

/// Handle the create event form.
///
/// Invalid input re-renders the form with an error message, otherwise the
/// client is redirected to the new event.
pub async fn create_event_endpoint(
    State(state): State<AppState>,
    Form(form): Form<EventFormData>,
) -> Response {
    let new_event = match NewEvent::try_from(&form) {
        Ok(new_event) => new_event,
        Err(error) => {
            return event_form_view(&form, Some(&error.to_string())).into_response();
        }
    };

    match state.backend.create_event(&new_event).await {
        Ok(event) => {
            let event_url = format_endpoint(endpoints::EVENT_VIEW, &[event.id.as_ref()]);

            if let Err(error) = state.dispatch(Action::EventCreated(event)) {
                return error.into_alert_response();
            }

            (HxRedirect(event_url), StatusCode::SEE_OTHER).into_response()
        }
        Err(error) => state.report_failure(CREATE_EVENT_FAILED, error),
    }
}

/// Delete an event with its expenses and send the client back to the events page.
pub async fn delete_event_endpoint(
    State(state): State<AppState>,
    Path(event_id): Path<EventId>,
) -> Response {
    match state.backend.delete_event(&event_id).await {
        Ok(()) => {
            if let Err(error) = state.dispatch(Action::EventDeleted(event_id)) {
                return error.into_alert_response();
            }

            (
                HxRedirect(endpoints::EVENTS_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => state.report_failure(DELETE_EVENT_FAILED, error),
    }
}
