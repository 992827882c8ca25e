//! Where events and expenses are stored.
//!
//! The app either talks to the events REST server or, when given a database
//! path, keeps everything in a local SQLite file. Both offer the same operations.

mod rest;
mod sqlite;
mod wire;

pub use rest::RestBackend;
pub use sqlite::{SqliteBackend, add_expense, create_event, initialize};

use crate::{
    Error,
    event::{Event, EventId, Expense, ExpenseData, ExpenseId, NewEvent},
};

/// The store the app reads from and writes to.
#[derive(Debug, Clone)]
pub enum Backend {
    /// The events REST server.
    Rest(RestBackend),
    /// A local SQLite database.
    Sqlite(SqliteBackend),
}

impl Backend {
    /// Fetch every event with its expenses.
    pub async fn list_events(&self) -> Result<Vec<Event>, Error> {
        match self {
            Backend::Rest(backend) => backend.list_events().await,
            Backend::Sqlite(backend) => backend.list_events().await,
        }
    }

    /// Create an event, returning it with its new ID.
    pub async fn create_event(&self, event: &NewEvent) -> Result<Event, Error> {
        match self {
            Backend::Rest(backend) => backend.create_event(event).await,
            Backend::Sqlite(backend) => backend.create_event(event).await,
        }
    }

    /// Delete an event and its expenses.
    pub async fn delete_event(&self, event_id: &EventId) -> Result<(), Error> {
        match self {
            Backend::Rest(backend) => backend.delete_event(event_id).await,
            Backend::Sqlite(backend) => backend.delete_event(event_id).await,
        }
    }

    /// Add an expense to an event, returning it with its new ID.
    pub async fn add_expense(
        &self,
        event_id: &EventId,
        expense: &ExpenseData,
    ) -> Result<Expense, Error> {
        match self {
            Backend::Rest(backend) => backend.add_expense(event_id, expense).await,
            Backend::Sqlite(backend) => backend.add_expense(event_id, expense).await,
        }
    }

    /// Replace the fields of an expense.
    pub async fn update_expense(
        &self,
        event_id: &EventId,
        expense_id: &ExpenseId,
        expense: &ExpenseData,
    ) -> Result<Expense, Error> {
        match self {
            Backend::Rest(backend) => backend.update_expense(event_id, expense_id, expense).await,
            Backend::Sqlite(backend) => {
                backend
                    .update_expense(event_id, expense_id, expense)
                    .await
            }
        }
    }

    /// Delete an expense from an event.
    pub async fn delete_expense(
        &self,
        event_id: &EventId,
        expense_id: &ExpenseId,
    ) -> Result<(), Error> {
        match self {
            Backend::Rest(backend) => backend.delete_expense(event_id, expense_id).await,
            Backend::Sqlite(backend) => backend.delete_expense(event_id, expense_id).await,
        }
    }
}

impl From<RestBackend> for Backend {
    fn from(backend: RestBackend) -> Self {
        Backend::Rest(backend)
    }
}

impl From<SqliteBackend> for Backend {
    fn from(backend: SqliteBackend) -> Self {
        Backend::Sqlite(backend)
    }
}
