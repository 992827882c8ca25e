//! Endpoints for adding, editing and deleting the expenses of an event.

use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    AppState, Error,
    aggregation::distinct_categories,
    endpoints::{self, format_endpoint},
    event::{Event, EventId, Expense, ExpenseData, ExpenseFormData, ExpenseId},
    expense_form::{ExpenseFormTarget, expense_form_view},
    html::{CARD_STYLE, CARD_TITLE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base},
    view_state::Action,
};

const ADD_EXPENSE_FAILED: &str = "Could not add the expense";
const UPDATE_EXPENSE_FAILED: &str = "Could not update the expense";
const DELETE_EXPENSE_FAILED: &str = "Could not delete the expense";

fn redirect_to_event(event_id: &EventId) -> Response {
    (
        HxRedirect(format_endpoint(endpoints::EVENT_VIEW, &[event_id.as_ref()])),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

/// The categories already used by the cached event, for the form suggestions.
fn cached_categories(state: &AppState, event_id: &EventId) -> Vec<String> {
    state
        .snapshot()
        .ok()
        .and_then(|view_state| {
            view_state
                .event(event_id)
                .map(|event| distinct_categories(&event.expenses))
        })
        .unwrap_or_default()
}

/// Handle the add expense form.
pub async fn create_expense_endpoint(
    State(state): State<AppState>,
    Path(event_id): Path<EventId>,
    Form(form): Form<ExpenseFormData>,
) -> Response {
    let expense = match ExpenseData::try_from(&form) {
        Ok(expense) => expense,
        Err(error) => {
            let categories = cached_categories(&state, &event_id);

            return expense_form_view(
                ExpenseFormTarget::Add(&event_id),
                &form,
                &categories,
                Some(&error.to_string()),
            )
            .into_response();
        }
    };

    match state.backend.add_expense(&event_id, &expense).await {
        Ok(expense) => {
            let response = redirect_to_event(&event_id);

            match state.dispatch(Action::ExpenseAdded(event_id, expense)) {
                Ok(_) => response,
                Err(error) => error.into_alert_response(),
            }
        }
        Err(error) => state.report_failure(ADD_EXPENSE_FAILED, error),
    }
}

/// Render the page for editing an expense, pre-filled from the cached event.
pub async fn get_edit_expense_page(
    State(state): State<AppState>,
    Path((event_id, expense_id)): Path<(EventId, ExpenseId)>,
) -> Response {
    let view_state = match state.ensure_events_loaded().await {
        Ok(view_state) => view_state,
        Err(error) => return error.into_response(),
    };

    let Some(event) = view_state.event(&event_id) else {
        return Error::NotFound.into_response();
    };

    let Some(expense) = event
        .expenses
        .iter()
        .find(|expense| expense.id == expense_id)
    else {
        return Error::NotFound.into_response();
    };

    edit_expense_view(event, expense).into_response()
}

fn edit_expense_view(event: &Event, expense: &Expense) -> Markup {
    let event_url = format_endpoint(endpoints::EVENT_VIEW, &[event.id.as_ref()]);
    let categories = distinct_categories(&event.expenses);

    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            section class={ (CARD_STYLE) " max-w-2xl mx-auto" }
            {
                div class="flex justify-between flex-wrap items-end mb-4"
                {
                    h1 class=(CARD_TITLE_STYLE) { "Edit expense" }
                    a href=(event_url) class=(LINK_STYLE) { "Back to " (event.name) }
                }

                (expense_form_view(
                    ExpenseFormTarget::Edit(&event.id, &expense.id),
                    &ExpenseFormData::from(expense),
                    &categories,
                    None,
                ))
            }
        }
    );

    base("Edit Expense", &[], &content)
}

/// Handle the edit expense form.
pub async fn update_expense_endpoint(
    State(state): State<AppState>,
    Path((event_id, expense_id)): Path<(EventId, ExpenseId)>,
    Form(form): Form<ExpenseFormData>,
) -> Response {
    let expense = match ExpenseData::try_from(&form) {
        Ok(expense) => expense,
        Err(error) => {
            let categories = cached_categories(&state, &event_id);

            return expense_form_view(
                ExpenseFormTarget::Edit(&event_id, &expense_id),
                &form,
                &categories,
                Some(&error.to_string()),
            )
            .into_response();
        }
    };

    match state
        .backend
        .update_expense(&event_id, &expense_id, &expense)
        .await
    {
        Ok(expense) => {
            let response = redirect_to_event(&event_id);

            match state.dispatch(Action::ExpenseUpdated(event_id, expense_id, expense)) {
                Ok(_) => response,
                Err(error) => error.into_alert_response(),
            }
        }
        Err(error) => state.report_failure(UPDATE_EXPENSE_FAILED, error),
    }
}

/// Delete an expense. The client removes the table row on success.
pub async fn delete_expense_endpoint(
    State(state): State<AppState>,
    Path((event_id, expense_id)): Path<(EventId, ExpenseId)>,
) -> Response {
    match state.backend.delete_expense(&event_id, &expense_id).await {
        Ok(()) => match state.dispatch(Action::ExpenseDeleted(event_id.clone(), expense_id)) {
            Ok(_) => redirect_to_event(&event_id),
            Err(error) => error.into_alert_response(),
        },
        Err(error) => state.report_failure(DELETE_EXPENSE_FAILED, error),
    }
}
