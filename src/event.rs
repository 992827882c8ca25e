//! Core event and expense domain types.
//!
//! An [Event] owns an ordered list of [Expense]s. Identifiers are opaque
//! strings handed out by whichever backend stores the data.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, macros::format_description};

use crate::Error;

/// The identifier of an event, as assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Wrap a backend identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl AsRef<str> for EventId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The identifier of an expense, unique within its event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Wrap a backend identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl AsRef<str> for ExpenseId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ExpenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How much of an expense has been paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    /// Nothing has been paid yet.
    #[default]
    Unpaid,
    /// A deposit or part of the amount has been paid.
    Partial,
    /// The full amount has been paid.
    Paid,
}

impl ExpenseStatus {
    /// All statuses in the order they are offered in forms.
    pub const ALL: [ExpenseStatus; 3] = [
        ExpenseStatus::Unpaid,
        ExpenseStatus::Partial,
        ExpenseStatus::Paid,
    ];

    /// The value used on the wire and in form fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseStatus::Unpaid => "unpaid",
            ExpenseStatus::Partial => "partial",
            ExpenseStatus::Paid => "paid",
        }
    }

    /// The human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseStatus::Unpaid => "Not paid",
            ExpenseStatus::Partial => "Partially paid",
            ExpenseStatus::Paid => "Paid",
        }
    }
}

impl FromStr for ExpenseStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unpaid" => Ok(ExpenseStatus::Unpaid),
            "partial" => Ok(ExpenseStatus::Partial),
            "paid" => Ok(ExpenseStatus::Paid),
            other => Err(Error::InvalidStatus(other.to_owned())),
        }
    }
}

impl Display for ExpenseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How an expense is (or will be) paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash in hand.
    Cash,
    /// A paper cheque.
    Check,
    /// A bank transfer.
    Transfer,
    /// A credit or debit card.
    Card,
    /// Anything else, or not decided yet.
    #[default]
    Other,
}

impl PaymentMethod {
    /// All payment methods in the order they are offered in forms.
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Other,
        PaymentMethod::Cash,
        PaymentMethod::Check,
        PaymentMethod::Transfer,
        PaymentMethod::Card,
    ];

    /// The value used on the wire and in form fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Check => "check",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Card => "card",
            PaymentMethod::Other => "other",
        }
    }

    /// The human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Check => "Cheque",
            PaymentMethod::Transfer => "Bank transfer",
            PaymentMethod::Card => "Card",
            PaymentMethod::Other => "Other",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentMethod::Cash),
            "check" => Ok(PaymentMethod::Check),
            "transfer" => Ok(PaymentMethod::Transfer),
            "card" => Ok(PaymentMethod::Card),
            "other" => Ok(PaymentMethod::Other),
            other => Err(Error::InvalidPaymentMethod(other.to_owned())),
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single line-item cost attached to an [Event].
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    /// Free-text label, compared by exact string equality.
    pub category: String,
    pub amount: f64,
    pub date: Option<Date>,
    pub status: ExpenseStatus,
    pub payment_method: PaymentMethod,
    pub notes: String,
}

/// A tracked occasion with its own list of expenses.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub date: Option<Date>,
    pub notes: String,
    /// Expenses in the order the backend returned them.
    pub expenses: Vec<Expense>,
}

/// Parse a calendar date in the `YYYY-MM-DD` format.
///
/// Empty strings and strings that are not valid dates yield `None`.
pub fn parse_date(text: &str) -> Option<Date> {
    let text = text.trim();

    if text.is_empty() {
        return None;
    }

    // Backends sometimes send a full timestamp, only the date part is used.
    let date_part = text.get(..10).unwrap_or(text);

    match Date::parse(date_part, format_description!("[year]-[month]-[day]")) {
        Ok(date) => Some(date),
        Err(error) => {
            tracing::warn!("ignoring invalid date {text:?}: {error}");
            None
        }
    }
}

/// Format an optional date as `YYYY-MM-DD`, or an empty string.
pub fn format_date(date: Option<Date>) -> String {
    date.map(|date| date.to_string()).unwrap_or_default()
}

/// Form data for creating an event.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct EventFormData {
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub notes: String,
}

/// A validated request to create an event.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub name: String,
    pub date: Option<Date>,
    pub notes: String,
}

impl NewEvent {
    /// Create a new event request.
    ///
    /// The name and notes are trimmed.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyEventName] if `name` is empty or only whitespace.
    pub fn new(name: &str, date: Option<Date>, notes: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            return Err(Error::EmptyEventName);
        }

        Ok(Self {
            name: name.to_owned(),
            date,
            notes: notes.trim().to_owned(),
        })
    }
}

impl TryFrom<&EventFormData> for NewEvent {
    type Error = Error;

    fn try_from(form: &EventFormData) -> Result<Self, Self::Error> {
        NewEvent::new(&form.name, parse_date(&form.date), &form.notes)
    }
}

/// Form data for creating or editing an expense.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ExpenseFormData {
    pub description: String,
    pub category: String,
    /// Kept as text so that an empty or malformed amount can be reported.
    pub amount: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub status: ExpenseStatus,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub notes: String,
}

impl From<&Expense> for ExpenseFormData {
    fn from(expense: &Expense) -> Self {
        Self {
            description: expense.description.clone(),
            category: expense.category.clone(),
            amount: expense.amount.to_string(),
            date: format_date(expense.date),
            status: expense.status,
            payment_method: expense.payment_method,
            notes: expense.notes.clone(),
        }
    }
}

/// The validated fields of an expense, used for both creating and updating.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseData {
    pub description: String,
    pub category: String,
    pub amount: f64,
    pub date: Option<Date>,
    pub status: ExpenseStatus,
    pub payment_method: PaymentMethod,
    pub notes: String,
}

impl ExpenseData {
    /// Attach an identifier, producing the stored expense.
    pub fn into_expense(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            description: self.description,
            category: self.category,
            amount: self.amount,
            date: self.date,
            status: self.status,
            payment_method: self.payment_method,
            notes: self.notes,
        }
    }
}

impl TryFrom<&ExpenseFormData> for ExpenseData {
    type Error = Error;

    /// Validate the form.
    ///
    /// Description, category and amount are required. The category is kept
    /// exactly as typed since categories are grouped by exact string equality.
    fn try_from(form: &ExpenseFormData) -> Result<Self, Self::Error> {
        if form.description.trim().is_empty() {
            return Err(Error::MissingExpenseField("description"));
        }

        if form.category.trim().is_empty() {
            return Err(Error::MissingExpenseField("category"));
        }

        let amount_text = form.amount.trim();
        if amount_text.is_empty() {
            return Err(Error::MissingExpenseField("amount"));
        }

        let amount = match amount_text.parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount >= 0.0 => amount,
            _ => return Err(Error::InvalidAmount(amount_text.to_owned())),
        };

        Ok(Self {
            description: form.description.clone(),
            category: form.category.clone(),
            amount,
            date: parse_date(&form.date),
            status: form.status,
            payment_method: form.payment_method,
            notes: form.notes.trim().to_owned(),
        })
    }
}


#[cfg(test)]
mod new_event_tests {
    use time::macros::date;

    use crate::{
        Error,
        event::{EventFormData, NewEvent},
    };

    #[test]
    fn new_fails_on_empty_name() {
        assert_eq!(NewEvent::new("", None, ""), Err(Error::EmptyEventName));
    }

    #[test]
    fn new_fails_on_whitespace_name() {
        assert_eq!(NewEvent::new(" \t\n", None, ""), Err(Error::EmptyEventName));
    }

    #[test]
    fn new_trims_name_and_notes() {
        let event = NewEvent::new("  Engagement ", None, " at home  ").unwrap();

        assert_eq!(event.name, "Engagement");
        assert_eq!(event.notes, "at home");
    }

    #[test]
    fn form_date_is_parsed() {
        let form = EventFormData {
            name: "Shabbat".to_owned(),
            date: "2025-12-20".to_owned(),
            notes: String::new(),
        };

        let event = NewEvent::try_from(&form).unwrap();

        assert_eq!(event.date, Some(date!(2025 - 12 - 20)));
    }
}
