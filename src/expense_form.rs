//! The form for adding an expense to an event or editing an existing one.

use maud::{Markup, html};

use crate::{
    endpoints::{self, format_endpoint},
    event::{EventId, ExpenseFormData, ExpenseId},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, form_error,
        payment_method_options, status_options,
    },
};

/// The HTML ID of the expense form, also the target htmx swaps it into.
pub const EXPENSE_FORM_ID: &str = "expense-form";

/// Whether the form creates a new expense or replaces an existing one.
#[derive(Debug, Clone, Copy)]
pub enum ExpenseFormTarget<'a> {
    Add(&'a EventId),
    Edit(&'a EventId, &'a ExpenseId),
}

impl ExpenseFormTarget<'_> {
    fn submit_text(&self) -> &'static str {
        match self {
            ExpenseFormTarget::Add(_) => "Add expense",
            ExpenseFormTarget::Edit(..) => "Save changes",
        }
    }
}

/// Render the expense form filled in with `form`.
///
/// `categories` are offered as suggestions for the category field.
pub fn expense_form_view(
    target: ExpenseFormTarget<'_>,
    form: &ExpenseFormData,
    categories: &[String],
    error_message: Option<&str>,
) -> Markup {
    let (hx_post, hx_put) = match target {
        ExpenseFormTarget::Add(event_id) => (
            Some(format_endpoint(endpoints::POST_EXPENSE, &[event_id.as_ref()])),
            None,
        ),
        ExpenseFormTarget::Edit(event_id, expense_id) => (
            None,
            Some(format_endpoint(
                endpoints::PUT_EXPENSE,
                &[event_id.as_ref(), expense_id.as_ref()],
            )),
        ),
    };

    html! {
        form
            id=(EXPENSE_FORM_ID)
            hx-post=[hx_post]
            hx-put=[hx_put]
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="grid grid-cols-1 md:grid-cols-2 gap-4"
        {
            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    id="description"
                    type="text"
                    name="description"
                    value=(form.description)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                input
                    id="category"
                    type="text"
                    name="category"
                    list="category-options"
                    value=(form.category)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                datalist id="category-options"
                {
                    @for category in categories {
                        option value=(category) {}
                    }
                }
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                input
                    id="amount"
                    type="number"
                    name="amount"
                    min="0"
                    step="0.01"
                    value=(form.amount)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="expense-date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    id="expense-date"
                    type="date"
                    name="date"
                    value=(form.date)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="status" class=(FORM_LABEL_STYLE) { "Status" }

                select id="status" name="status" class=(FORM_TEXT_INPUT_STYLE)
                {
                    (status_options(form.status))
                }
            }

            div
            {
                label for="payment_method" class=(FORM_LABEL_STYLE) { "Payment method" }

                select
                    id="payment_method"
                    name="payment_method"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    (payment_method_options(form.payment_method))
                }
            }

            div class="md:col-span-2"
            {
                label for="expense-notes" class=(FORM_LABEL_STYLE) { "Notes" }

                textarea
                    id="expense-notes"
                    name="notes"
                    rows="2"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    (form.notes)
                }
            }

            div class="md:col-span-2"
            {
                (form_error(error_message))
            }

            div class="md:col-span-2"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { (target.submit_text()) }
            }
        }
    }
}
