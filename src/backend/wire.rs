//! JSON shapes exchanged with the events REST server.
//!
//! The server may identify records with either `id` or `_id` (Mongo style).
//! [normalize_event] and [normalize_expense] fold both into a single
//! identifier so that nothing outside this module ever sees `_id`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    event::{
        Event, EventId, Expense, ExpenseData, ExpenseId, ExpenseStatus, NewEvent, PaymentMethod,
        format_date, parse_date,
    },
};

/// An identifier as sent by the server, either a string or a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    fn into_string(self) -> Option<String> {
        match self {
            RawId::Text(text) if text.is_empty() => None,
            RawId::Text(text) => Some(text),
            RawId::Number(number) => Some(number.to_string()),
        }
    }
}

/// An event exactly as the server sent it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEvent {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default, rename = "_id")]
    pub mongo_id: Option<RawId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub expenses: Vec<RawExpense>,
}

/// An expense exactly as the server sent it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExpense {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default, rename = "_id")]
    pub mongo_id: Option<RawId>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Parse an enum field sent by the server, falling back to `T::default()`
/// when the value is missing, empty or unknown.
fn lenient_enum<T>(field: &'static str, value: Option<&str>) -> T
where
    T: FromStr + Default,
{
    let Some(text) = value.map(str::trim).filter(|text| !text.is_empty()) else {
        return T::default();
    };

    text.parse().unwrap_or_else(|_| {
        tracing::warn!("unknown {field} \"{text}\" in expense from the server, using the default");
        T::default()
    })
}

/// Pick `id` if present, otherwise `_id`.
fn canonical_id(id: Option<RawId>, mongo_id: Option<RawId>) -> Option<String> {
    id.and_then(RawId::into_string)
        .or_else(|| mongo_id.and_then(RawId::into_string))
}

/// Convert a server event, and all of its expenses, to the domain type.
///
/// # Errors
///
/// Returns [Error::MissingIdentifier] if the event or one of its expenses has
/// neither `id` nor `_id`.
pub fn normalize_event(raw: RawEvent) -> Result<Event, Error> {
    let id = canonical_id(raw.id, raw.mongo_id).ok_or(Error::MissingIdentifier("event"))?;

    let expenses = raw
        .expenses
        .into_iter()
        .map(normalize_expense)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Event {
        id: EventId::new(id),
        name: raw.name,
        date: raw.date.as_deref().and_then(parse_date),
        notes: raw.notes.unwrap_or_default(),
        expenses,
    })
}

/// Convert a server expense to the domain type.
///
/// # Errors
///
/// Returns [Error::MissingIdentifier] if the expense has neither `id` nor `_id`.
pub fn normalize_expense(raw: RawExpense) -> Result<Expense, Error> {
    let id = canonical_id(raw.id, raw.mongo_id).ok_or(Error::MissingIdentifier("expense"))?;

    Ok(Expense {
        id: ExpenseId::new(id),
        description: raw.description,
        category: raw.category,
        amount: raw.amount,
        date: raw.date.as_deref().and_then(parse_date),
        status: lenient_enum("status", raw.status.as_deref()),
        payment_method: lenient_enum("payment method", raw.payment_method.as_deref()),
        notes: raw.notes.unwrap_or_default(),
    })
}

/// The body of a create event request.
#[derive(Debug, Serialize, PartialEq)]
pub struct EventPayload {
    pub name: String,
    pub date: String,
    pub notes: String,
}

impl From<&NewEvent> for EventPayload {
    fn from(event: &NewEvent) -> Self {
        Self {
            name: event.name.clone(),
            date: format_date(event.date),
            notes: event.notes.clone(),
        }
    }
}

/// The body of a create or update expense request.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpensePayload {
    pub description: String,
    pub category: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub status: ExpenseStatus,
    pub payment_method: PaymentMethod,
    pub notes: String,
}

impl From<&ExpenseData> for ExpensePayload {
    fn from(expense: &ExpenseData) -> Self {
        Self {
            description: expense.description.clone(),
            category: expense.category.clone(),
            amount: expense.amount,
            date: expense.date.map(|date| format_date(Some(date))),
            status: expense.status,
            payment_method: expense.payment_method,
            notes: expense.notes.clone(),
        }
    }
}
