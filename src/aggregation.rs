//! Derived summaries of an event's expenses.
//!
//! Everything here is a pure function of the expense list (and the current
//! [FilterState]). The results are recomputed on every render and never stored.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::{
    Error,
    event::{Expense, ExpenseStatus},
};

/// How many categories the "top categories" list shows.
pub const TOP_CATEGORY_COUNT: usize = 3;

/// The insight shown when an event has no expenses.
pub const NOT_ENOUGH_DATA_INSIGHT: &str =
    "Not enough data has been entered yet to produce insights.";

/// The sum of all expenses and how much of it has been paid.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExpenseTotals {
    pub total: f64,
    /// Only expenses with the status `paid` count towards this.
    pub paid: f64,
    /// `total - paid`, so partially paid expenses count as unpaid in full.
    pub unpaid: f64,
}

/// The summed amount of every expense sharing a category label.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub name: String,
    pub value: f64,
}

impl CategoryTotal {
    /// This category's share of `total` as a whole percentage.
    pub fn percent_of(&self, total: f64) -> i64 {
        percent_of_total(self.value, total)
    }
}

/// Sum the amounts of `expenses`, split by whether they have been paid.
pub fn compute_totals(expenses: &[Expense]) -> ExpenseTotals {
    let (total, paid) = expenses
        .iter()
        .fold((0.0, 0.0), |(total, paid), expense| {
            let paid = if expense.status == ExpenseStatus::Paid {
                paid + expense.amount
            } else {
                paid
            };

            (total + expense.amount, paid)
        });

    ExpenseTotals {
        total,
        paid,
        unpaid: total - paid,
    }
}

/// Sum expense amounts per category.
///
/// Categories are compared by exact string equality and returned in the order
/// they first appear in `expenses`.
pub fn group_by_category(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for expense in expenses {
        match positions.get(expense.category.as_str()) {
            Some(&position) => totals[position].value += expense.amount,
            None => {
                positions.insert(&expense.category, totals.len());
                totals.push(CategoryTotal {
                    name: expense.category.clone(),
                    value: expense.amount,
                });
            }
        }
    }

    totals
}

/// The `n` categories with the highest totals, largest first.
///
/// The sort is stable, so categories with equal totals keep their relative order.
pub fn top_categories(category_totals: &[CategoryTotal], n: usize) -> Vec<CategoryTotal> {
    let mut sorted = category_totals.to_vec();
    sorted.sort_by(|a, b| b.value.total_cmp(&a.value));
    sorted.truncate(n);
    sorted
}

/// `value` as a percentage of `total`, rounded half up to a whole number.
///
/// A zero total is treated as `1` so that an empty event yields `0%`
/// rather than dividing by zero.
pub fn percent_of_total(value: f64, total: f64) -> i64 {
    let divisor = if total == 0.0 { 1.0 } else { total };

    round_half_up(value / divisor * 100.0)
}

fn round_half_up(number: f64) -> i64 {
    (number + 0.5).floor() as i64
}

/// A one sentence observation about where the money is going.
pub fn build_insight(category_totals: &[CategoryTotal], total: f64) -> String {
    match top_categories(category_totals, 1).first() {
        Some(top) => format!(
            "Your largest category right now is \"{}\" with about {}% of all expenses.",
            top.name,
            top.percent_of(total)
        ),
        None => NOT_ENOUGH_DATA_INSIGHT.to_owned(),
    }
}

/// Which expense statuses the expense table shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(ExpenseStatus),
}

impl StatusFilter {
    /// The value used in the filter form.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => ALL_FILTER_VALUE,
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    fn matches(&self, status: ExpenseStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() || value == ALL_FILTER_VALUE {
            Ok(StatusFilter::All)
        } else {
            value.parse().map(StatusFilter::Only)
        }
    }
}

/// Which category the expense table shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// The value used in the filter form.
    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_FILTER_VALUE,
            CategoryFilter::Only(category) => category,
        }
    }

    fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value.is_empty() || value == ALL_FILTER_VALUE {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value)
        }
    }
}

/// The form value meaning "do not filter on this field".
pub const ALL_FILTER_VALUE: &str = "all";

/// The criteria narrowing the displayed expense list.
///
/// The default value does no filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FilterState {
    /// Case-insensitive substring of the description. Empty matches everything.
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub category: CategoryFilter,
}

impl FilterState {
    fn matches(&self, expense: &Expense, lowercase_search: &str) -> bool {
        let matches_search = lowercase_search.is_empty()
            || expense
                .description
                .to_lowercase()
                .contains(lowercase_search);

        matches_search
            && self.status.matches(expense.status)
            && self.category.matches(&expense.category)
    }
}

/// The expenses that pass every part of `filter`, in their original order.
pub fn filter_expenses<'a>(expenses: &'a [Expense], filter: &FilterState) -> Vec<&'a Expense> {
    let lowercase_search = filter.search.to_lowercase();

    expenses
        .iter()
        .filter(|expense| filter.matches(expense, &lowercase_search))
        .collect()
}

/// The unique categories used by `expenses`, in order of first appearance.
pub fn distinct_categories(expenses: &[Expense]) -> Vec<String> {
    let mut seen = HashSet::new();

    expenses
        .iter()
        .filter(|expense| seen.insert(expense.category.as_str()))
        .map(|expense| expense.category.clone())
        .collect()
}

/// Everything the event details view derives from an event's expenses.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSummary {
    pub totals: ExpenseTotals,
    pub category_totals: Vec<CategoryTotal>,
    pub top_categories: Vec<CategoryTotal>,
    pub insight: String,
    pub categories: Vec<String>,
}

impl EventSummary {
    /// Compute the summary for one render of an event.
    pub fn new(expenses: &[Expense]) -> Self {
        let totals = compute_totals(expenses);
        let category_totals = group_by_category(expenses);
        let top_categories = top_categories(&category_totals, TOP_CATEGORY_COUNT);
        let insight = build_insight(&category_totals, totals.total);

        Self {
            totals,
            category_totals,
            top_categories,
            insight,
            categories: distinct_categories(expenses),
        }
    }
}


#[cfg(test)]
mod totals_tests {
    use crate::{
        aggregation::{
            ExpenseTotals, compute_totals,
            test_expenses::{engagement_expenses, expense},
        },
        event::ExpenseStatus,
    };

    #[test]
    fn empty_expenses_have_zero_totals() {
        assert_eq!(
            compute_totals(&[]),
            ExpenseTotals {
                total: 0.0,
                paid: 0.0,
                unpaid: 0.0
            }
        );
    }

    #[test]
    fn partial_counts_as_unpaid() {
        let totals = compute_totals(&engagement_expenses());

        assert_eq!(totals.total, 16000.0);
        assert_eq!(totals.paid, 10000.0);
        assert_eq!(totals.unpaid, 6000.0);
    }

    #[test]
    fn totals_match_sums_over_expenses() {
        let expenses = vec![
            expense("1", "a", "x", 12.5, ExpenseStatus::Paid),
            expense("2", "b", "y", 7.25, ExpenseStatus::Unpaid),
            expense("3", "c", "x", 100.0, ExpenseStatus::Paid),
            expense("4", "d", "z", 0.0, ExpenseStatus::Partial),
        ];

        let totals = compute_totals(&expenses);

        let want_total: f64 = expenses.iter().map(|e| e.amount).sum();
        let want_paid: f64 = expenses
            .iter()
            .filter(|e| e.status == ExpenseStatus::Paid)
            .map(|e| e.amount)
            .sum();
        assert_eq!(totals.total, want_total);
        assert_eq!(totals.paid, want_paid);
        assert_eq!(totals.unpaid, totals.total - totals.paid);
    }
}



#[cfg(test)]
mod filter_tests {
    use crate::{
        aggregation::{
            CategoryFilter, FilterState, StatusFilter, filter_expenses,
            test_expenses::{engagement_expenses, expense},
        },
        event::{Expense, ExpenseStatus},
    };

    fn cloned(expenses: Vec<&Expense>) -> Vec<Expense> {
        expenses.into_iter().cloned().collect()
    }

    #[test]
    fn default_filter_is_identity() {
        let expenses = engagement_expenses();

        let filtered = filter_expenses(&expenses, &FilterState::default());

        assert_eq!(cloned(filtered), expenses);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let expenses = engagement_expenses();
        let filter = FilterState {
            search: "PHOTO".to_owned(),
            ..Default::default()
        };

        let filtered = filter_expenses(&expenses, &filter);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].description, "Stills photography");
    }

    #[test]
    fn search_matches_hebrew_descriptions() {
        let expenses = vec![
            expense("1", "אולם", "אולם", 10000.0, ExpenseStatus::Paid),
            expense("2", "צילום סטילס", "צילום", 4000.0, ExpenseStatus::Partial),
            expense("3", "צילום וידאו", "צילום", 3000.0, ExpenseStatus::Unpaid),
            expense("4", "עיצוב פרחים", "עיצוב", 2000.0, ExpenseStatus::Unpaid),
        ];
        let filter = FilterState {
            search: "צילום".to_owned(),
            status: StatusFilter::All,
            category: CategoryFilter::All,
        };

        let filtered = filter_expenses(&expenses, &filter);

        let ids: Vec<_> = filtered.iter().map(|e| e.id.as_ref()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn status_and_category_filters_are_exact() {
        let expenses = vec![
            expense("1", "a", "Food", 1.0, ExpenseStatus::Paid),
            expense("2", "b", "Food", 1.0, ExpenseStatus::Unpaid),
            expense("3", "c", "food", 1.0, ExpenseStatus::Unpaid),
            expense("4", "d", "Music", 1.0, ExpenseStatus::Unpaid),
        ];
        let filter = FilterState {
            search: String::new(),
            status: StatusFilter::Only(ExpenseStatus::Unpaid),
            category: CategoryFilter::Only("Food".to_owned()),
        };

        let filtered = filter_expenses(&expenses, &filter);

        let ids: Vec<_> = filtered.iter().map(|e| e.id.as_ref()).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn filter_preserves_order() {
        let expenses = vec![
            expense("3", "c", "x", 1.0, ExpenseStatus::Unpaid),
            expense("1", "a", "y", 1.0, ExpenseStatus::Paid),
            expense("2", "b", "x", 1.0, ExpenseStatus::Unpaid),
        ];
        let filter = FilterState {
            status: StatusFilter::Only(ExpenseStatus::Unpaid),
            ..Default::default()
        };

        let filtered = filter_expenses(&expenses, &filter);

        let ids: Vec<_> = filtered.iter().map(|e| e.id.as_ref()).collect();
        assert_eq!(ids, vec!["3", "2"]);
    }

    #[test]
    fn filter_values_parse_all_as_no_filter() {
        assert_eq!(
            StatusFilter::try_from("all".to_owned()),
            Ok(StatusFilter::All)
        );
        assert_eq!(
            StatusFilter::try_from("partial".to_owned()),
            Ok(StatusFilter::Only(ExpenseStatus::Partial))
        );
        assert!(StatusFilter::try_from("bogus".to_owned()).is_err());
        assert_eq!(CategoryFilter::from("all".to_owned()), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from("Food".to_owned()),
            CategoryFilter::Only("Food".to_owned())
        );
    }
}
