//! The details of a single event: its totals, the category breakdown and the
//! filterable list of expenses.

use maud::{Markup, html};

use crate::{
    aggregation::{ALL_FILTER_VALUE, CategoryTotal, EventSummary, FilterState, filter_expenses},
    charts::{
        ECHARTS_URL, category_chart, category_chart_script, category_chart_view, legend_items,
    },
    endpoints::{self, format_endpoint},
    event::{Event, Expense, ExpenseFormData, ExpenseStatus, format_date},
    expense_form::{ExpenseFormTarget, expense_form_view},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE, CARD_TITLE_STYLE,
        CATEGORY_BADGE_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement, LINK_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, currency_with_tooltip,
    },
};

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

/// The rendered details of an event and the scripts they need.
pub struct EventDetails {
    pub content: Markup,
    pub head_elements: Vec<HeadElement>,
}

/// Render `event` with its expense table narrowed down by `filter`.
pub fn event_details_view(event: &Event, filter: &FilterState) -> EventDetails {
    let summary = EventSummary::new(&event.expenses);
    let mut head_elements = Vec::new();

    let chart = if summary.category_totals.is_empty() {
        None
    } else {
        let chart = category_chart(&summary.category_totals);
        head_elements.push(HeadElement::ScriptLink(ECHARTS_URL.to_owned()));
        head_elements.push(category_chart_script(&chart));

        Some(category_chart_view(&legend_items(
            &summary.category_totals,
            summary.totals.total,
        )))
    };

    let content = html!(
        div class="flex flex-col gap-4 w-full"
        {
            (event_header_view(event))
            (summary_view(&summary))

            div class="grid grid-cols-1 xl:grid-cols-3 gap-4"
            {
                section class={ (CARD_STYLE) " xl:col-span-1" }
                {
                    h3 class=(CARD_TITLE_STYLE) { "Top categories" }
                    (top_categories_view(&summary.top_categories, summary.totals.total))
                }

                section class={ (CARD_STYLE) " xl:col-span-2" }
                {
                    h3 class=(CARD_TITLE_STYLE) { "Expenses by category" }

                    @match chart {
                        Some(chart) => { (chart) }
                        None => { p class="text-gray-500 dark:text-gray-400" { "No expenses yet." } }
                    }
                }
            }

            section id="insight" class=(CARD_STYLE)
            {
                h3 class=(CARD_TITLE_STYLE) { "Insight" }
                p { (summary.insight) }
            }

            section class=(CARD_STYLE)
            {
                h3 class=(CARD_TITLE_STYLE) { "Add an expense" }

                (expense_form_view(
                    ExpenseFormTarget::Add(&event.id),
                    &ExpenseFormData::default(),
                    &summary.categories,
                    None,
                ))
            }

            section class=(CARD_STYLE)
            {
                h3 class=(CARD_TITLE_STYLE) { "Expenses" }

                (filter_form_view(event, filter, &summary.categories))
                (expense_table_view(event, filter))
            }
        }
    );

    EventDetails {
        content,
        head_elements,
    }
}

fn event_header_view(event: &Event) -> Markup {
    let delete_url = format_endpoint(endpoints::DELETE_EVENT, &[event.id.as_ref()]);
    let date = format_date(event.date);

    html!(
        header class="flex justify-between flex-wrap items-start gap-2"
        {
            div
            {
                h2 class="text-2xl font-bold" { (event.name) }

                @if !date.is_empty() {
                    p class="text-sm text-gray-500 dark:text-gray-400" { (date) }
                }

                @if !event.notes.is_empty() {
                    p class="mt-1" { (event.notes) }
                }
            }

            button
                hx-delete=(delete_url)
                hx-confirm={
                    "Are you sure you want to delete '" (event.name)
                    "' and all of its expenses?"
                }
                hx-target-error="#alert-container"
                class=(BUTTON_DELETE_STYLE)
            {
                "Delete event"
            }
        }
    )
}

fn summary_view(summary: &EventSummary) -> Markup {
    let card = |title: &str, amount: f64| {
        html!(
            div class=(CARD_STYLE)
            {
                p class="text-sm text-gray-500 dark:text-gray-400" { (title) }
                p class="text-2xl font-bold" { (currency_with_tooltip(amount)) }
            }
        )
    };

    html!(
        section id="summary" class="grid grid-cols-1 md:grid-cols-3 gap-4"
        {
            (card("Total", summary.totals.total))
            (card("Paid", summary.totals.paid))
            (card("Open to pay", summary.totals.unpaid))
        }
    )
}

fn top_categories_view(top_categories: &[CategoryTotal], total: f64) -> Markup {
    html!(
        @if top_categories.is_empty() {
            p class="text-gray-500 dark:text-gray-400" { "No expenses yet." }
        } @else {
            ol id="top-categories" class="flex flex-col gap-2"
            {
                @for (medal, category) in MEDALS.iter().zip(top_categories) {
                    li class="flex justify-between gap-2"
                    {
                        span { (medal) " " (category.name) }
                        span class="text-right"
                        {
                            (currency_with_tooltip(category.value))
                            " (" (category.percent_of(total)) "%)"
                        }
                    }
                }
            }
        }
    )
}

fn filter_form_view(event: &Event, filter: &FilterState, categories: &[String]) -> Markup {
    let action = format_endpoint(endpoints::EVENT_VIEW, &[event.id.as_ref()]);
    let status = filter.status.as_str();
    let category = filter.category.as_str();

    html!(
        form
            id="filter-form"
            method="get"
            action=(action)
            class="grid grid-cols-1 md:grid-cols-4 gap-4 items-end mb-4"
        {
            div
            {
                label for="search" class=(FORM_LABEL_STYLE) { "Search" }

                input
                    id="search"
                    type="search"
                    name="search"
                    placeholder="Description"
                    value=(filter.search)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="status-filter" class=(FORM_LABEL_STYLE) { "Status" }

                select id="status-filter" name="status" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value=(ALL_FILTER_VALUE) selected[status == ALL_FILTER_VALUE] { "All" }

                    @for option_status in ExpenseStatus::ALL {
                        option
                            value=(option_status.as_str())
                            selected[status == option_status.as_str()]
                        {
                            (option_status.label())
                        }
                    }
                }
            }

            div
            {
                label for="category-filter" class=(FORM_LABEL_STYLE) { "Category" }

                select id="category-filter" name="category" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value=(ALL_FILTER_VALUE) selected[category == ALL_FILTER_VALUE] { "All" }

                    @for option_category in categories {
                        option
                            value=(option_category)
                            selected[category == option_category]
                        {
                            (option_category)
                        }
                    }
                }
            }

            div class="flex gap-4 items-center"
            {
                button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Filter" }
                a href=(action) class=(LINK_STYLE) { "Clear" }
            }
        }
    )
}

fn expense_table_view(event: &Event, filter: &FilterState) -> Markup {
    let expenses = filter_expenses(&event.expenses, filter);

    let table_row = |expense: &Expense| {
        let edit_url = format_endpoint(
            endpoints::EDIT_EXPENSE_VIEW,
            &[event.id.as_ref(), expense.id.as_ref()],
        );
        let delete_url = format_endpoint(
            endpoints::DELETE_EXPENSE,
            &[event.id.as_ref(), expense.id.as_ref()],
        );

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE) { (expense.description) }
                td class=(TABLE_CELL_STYLE)
                {
                    span class=(CATEGORY_BADGE_STYLE) { (expense.category) }
                }
                td class=(TABLE_CELL_STYLE) { (currency_with_tooltip(expense.amount)) }
                td class=(TABLE_CELL_STYLE) { (format_date(expense.date)) }
                td class=(TABLE_CELL_STYLE) { (expense.status.label()) }
                td class=(TABLE_CELL_STYLE) { (expense.payment_method.label()) }
                td class=(TABLE_CELL_STYLE) { (expense.notes) }
                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        a href=(edit_url) class=(LINK_STYLE) { "Edit" }

                        button
                            hx-delete=(delete_url)
                            hx-confirm={
                                "Are you sure you want to delete '" (expense.description) "'?"
                            }
                            hx-target-error="#alert-container"
                            class=(BUTTON_DELETE_STYLE)
                        {
                            "Delete"
                        }
                    }
                }
            }
        )
    };

    html!(
        div class="overflow-x-auto"
        {
            table
                id="expenses"
                class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        @for heading in [
                            "Description", "Category", "Amount", "Date",
                            "Status", "Payment", "Notes", "Actions",
                        ] {
                            th scope="col" class=(TABLE_CELL_STYLE) { (heading) }
                        }
                    }
                }

                tbody
                {
                    @for expense in expenses.iter().copied() {
                        (table_row(expense))
                    }

                    @if expenses.is_empty() {
                        tr
                        {
                            td
                                colspan="8"
                                class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                            {
                                "No expenses match the filters."
                            }
                        }
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod event_details_tests {
    use scraper::Html;
    use time::macros::date;

    use crate::{
        aggregation::{
            CategoryFilter, FilterState, NOT_ENOUGH_DATA_INSIGHT, StatusFilter,
            test_expenses::engagement_expenses,
        },
        event::{Event, EventId, ExpenseStatus},
        event_details::event_details_view,
        html::HeadElement,
        test_utils::{assert_hx_endpoint, assert_valid_html, element_texts, must_select_one},
    };

    fn engagement() -> Event {
        Event {
            id: EventId::new("1"),
            name: "Engagement".to_owned(),
            date: Some(date!(2025 - 11 - 09)),
            notes: "At the parents' house".to_owned(),
            expenses: engagement_expenses(),
        }
    }

    fn render(event: &Event, filter: &FilterState) -> Html {
        let details = event_details_view(event, filter);
        let html = Html::parse_fragment(&details.content.into_string());
        assert_valid_html(&html);
        html
    }

    fn table_descriptions(html: &Html) -> Vec<String> {
        element_texts(html, "#expenses tbody tr td:first-child")
    }

    #[test]
    fn shows_header_and_summary() {
        let html = render(&engagement(), &FilterState::default());

        assert_eq!(element_texts(&html, "header h2"), vec!["Engagement"]);
        let delete_button = must_select_one(&html, "header button");
        assert_hx_endpoint(&delete_button, "/api/events/1", "hx-delete");
        assert_eq!(
            element_texts(&html, "#summary p.text-2xl"),
            vec!["16,000 ₪", "10,000 ₪", "6,000 ₪"]
        );
    }

    #[test]
    fn expense_delete_button_swaps_nothing() {
        let html = render(&engagement(), &FilterState::default());

        let delete_button = must_select_one(&html, "#expenses tbody tr:first-child button");
        assert_hx_endpoint(&delete_button, "/api/events/1/expenses/exp-1", "hx-delete");
        assert_eq!(delete_button.value().attr("hx-swap"), None);
        assert_eq!(delete_button.value().attr("hx-target"), None);
    }

    #[test]
    fn shows_top_categories_with_medals() {
        let html = render(&engagement(), &FilterState::default());

        assert_eq!(
            element_texts(&html, "#top-categories li > span:first-child"),
            vec!["🥇 Hall", "🥈 Photo", "🥉 Design"]
        );
        let insight = element_texts(&html, "#insight p");
        assert_eq!(
            insight,
            vec!["Your largest category right now is \"Hall\" with about 63% of all expenses."]
        );
    }

    #[test]
    fn includes_chart_scripts() {
        let details = event_details_view(&engagement(), &FilterState::default());

        assert_eq!(details.head_elements.len(), 2);
        assert!(matches!(
            &details.head_elements[0],
            HeadElement::ScriptLink(url) if url.contains("echarts")
        ));
    }

    #[test]
    fn lists_all_expenses_without_filter() {
        let html = render(&engagement(), &FilterState::default());

        assert_eq!(
            table_descriptions(&html),
            vec!["Hall", "Stills photography", "Flower design"]
        );
    }

    #[test]
    fn filters_expense_table() {
        let filter = FilterState {
            search: "PHOTO".to_owned(),
            status: StatusFilter::Only(ExpenseStatus::Partial),
            category: CategoryFilter::All,
        };

        let html = render(&engagement(), &filter);

        assert_eq!(table_descriptions(&html), vec!["Stills photography"]);
        let search = must_select_one(&html, "input[name=search]");
        assert_eq!(search.value().attr("value"), Some("PHOTO"));
        let selected_status =
            must_select_one(&html, "#filter-form select[name=status] option[selected]");
        assert_eq!(selected_status.value().attr("value"), Some("partial"));
    }

    #[test]
    fn shows_message_when_nothing_matches() {
        let filter = FilterState {
            category: CategoryFilter::Only("Music".to_owned()),
            ..Default::default()
        };

        let html = render(&engagement(), &filter);

        assert_eq!(
            table_descriptions(&html),
            vec!["No expenses match the filters."]
        );
    }

    #[test]
    fn event_without_expenses_has_no_chart() {
        let event = Event {
            expenses: Vec::new(),
            ..engagement()
        };

        let details = event_details_view(&event, &FilterState::default());

        assert!(details.head_elements.is_empty());
        let html = Html::parse_fragment(&details.content.into_string());
        assert_eq!(
            element_texts(&html, "#insight p"),
            vec![NOT_ENOUGH_DATA_INSIGHT]
        );
    }
}
