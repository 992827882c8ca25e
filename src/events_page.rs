//! The main page: the list of events in a sidebar next to the selected event.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    aggregation::FilterState,
    endpoints,
    event::{EventFormData, EventId},
    event_details::event_details_view,
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, CARD_TITLE_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base, form_error,
    },
    navigation::EventNav,
    view_state::{Action, ViewState},
};

/// The HTML ID of the form for creating an event.
pub const EVENT_FORM_ID: &str = "event-form";

/// Render the events page with the selected event, if there is one.
pub async fn get_events_page(State(state): State<AppState>) -> Response {
    match state.ensure_events_loaded().await {
        Ok(view_state) => events_view(&view_state, &FilterState::default()).into_response(),
        Err(error) => {
            tracing::error!("could not render the events page: {error}");
            error.into_response()
        }
    }
}

/// Select the event `event_id` and render the events page with its expenses
/// narrowed down by the query filters.
pub async fn get_event_page(
    State(state): State<AppState>,
    Path(event_id): Path<EventId>,
    Query(filter): Query<FilterState>,
) -> Response {
    let view_state = match state.ensure_events_loaded().await {
        Ok(view_state) => view_state,
        Err(error) => {
            tracing::error!("could not render the page for event {event_id}: {error}");
            return error.into_response();
        }
    };

    if view_state.event(&event_id).is_none() {
        return Error::NotFound.into_response();
    }

    let view_state = if view_state.selected_event_id.as_ref() == Some(&event_id) {
        view_state
    } else {
        match state.dispatch(Action::EventSelected(event_id)) {
            Ok(view_state) => view_state,
            Err(error) => return error.into_response(),
        }
    };

    events_view(&view_state, &filter).into_response()
}

fn events_view(view_state: &ViewState, filter: &FilterState) -> Markup {
    let selected_event = view_state.selected_event();
    let nav = EventNav::new(&view_state.events, view_state.selected_event_id.as_ref()).into_html();
    let details = selected_event.map(|event| event_details_view(event, filter));
    let title = selected_event.map_or("Events", |event| event.name.as_str());

    let (details_content, head_elements) = match details {
        Some(details) => (Some(details.content), details.head_elements),
        None => (None, Vec::new()),
    };

    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            aside class="lg:w-72 shrink-0 flex flex-col gap-4"
            {
                h1 class="text-xl font-bold" { "Events" }

                @if let Some(error) = &view_state.error {
                    div
                        id="view-error"
                        role="alert"
                        class="p-4 text-sm text-red-800 rounded-lg bg-red-50
                            dark:bg-gray-800 dark:text-red-400"
                    {
                        (error)
                    }
                }

                (nav)

                section class=(CARD_STYLE)
                {
                    h2 class=(CARD_TITLE_STYLE) { "New event" }
                    (event_form_view(&EventFormData::default(), None))
                }
            }

            main class="flex-1 min-w-0"
            {
                @match details_content {
                    Some(details_content) => { (details_content) }
                    None => {
                        p class="text-gray-500 dark:text-gray-400"
                        {
                            "No events yet. Create one to start tracking its expenses."
                        }
                    }
                }
            }
        }
    );

    base(title, &head_elements, &content)
}

/// The form for creating an event, filled in with `form`.
pub fn event_form_view(form: &EventFormData, error_message: Option<&str>) -> Markup {
    html! {
        form
            id=(EVENT_FORM_ID)
            hx-post=(endpoints::POST_EVENT)
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4"
        {
            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Name" }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="Engagement"
                    value=(form.name)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="event-date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    id="event-date"
                    type="date"
                    name="date"
                    value=(form.date)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="event-notes" class=(FORM_LABEL_STYLE) { "Notes" }

                textarea
                    id="event-notes"
                    name="notes"
                    rows="2"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    (form.notes)
                }
            }

            (form_error(error_message))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create event" }
        }
    }
}
