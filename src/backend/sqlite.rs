//! A local SQLite store with the same operations as the REST server.
//!
//! Row IDs are integers in the database and exposed as strings. An ID that
//! is not an integer cannot refer to a stored row and is treated as missing.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use rusqlite::{Connection, Row, types::Type};

use crate::{
    Error,
    event::{
        Event, EventId, Expense, ExpenseData, ExpenseId, NewEvent, format_date, parse_date,
    },
};

/// Stores events and expenses in a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteBackend {
    /// Wrap `connection`, creating the tables if they do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the tables cannot be created.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        initialize(&connection)?;

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }

    pub async fn list_events(&self) -> Result<Vec<Event>, Error> {
        list_events(&*self.lock()?)
    }

    pub async fn create_event(&self, event: &NewEvent) -> Result<Event, Error> {
        create_event(event, &*self.lock()?)
    }

    pub async fn delete_event(&self, event_id: &EventId) -> Result<(), Error> {
        delete_event(event_id, &*self.lock()?)
    }

    pub async fn add_expense(
        &self,
        event_id: &EventId,
        expense: &ExpenseData,
    ) -> Result<Expense, Error> {
        add_expense(event_id, expense, &*self.lock()?)
    }

    pub async fn update_expense(
        &self,
        event_id: &EventId,
        expense_id: &ExpenseId,
        expense: &ExpenseData,
    ) -> Result<Expense, Error> {
        update_expense(event_id, expense_id, expense, &*self.lock()?)
    }

    pub async fn delete_expense(
        &self,
        event_id: &EventId,
        expense_id: &ExpenseId,
    ) -> Result<(), Error> {
        delete_expense(event_id, expense_id, &*self.lock()?)
    }
}

/// Create the event and expense tables and indexes.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS event (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            date TEXT,
            notes TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY,
            event_id INTEGER NOT NULL REFERENCES event(id) ON DELETE CASCADE,
            description TEXT NOT NULL,
            category TEXT NOT NULL,
            amount REAL NOT NULL,
            date TEXT,
            status TEXT NOT NULL,
            payment_method TEXT NOT NULL,
            notes TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_expense_event_id ON expense(event_id);",
    )
}

fn parse_row_id(id: &str) -> Option<i64> {
    id.parse().ok()
}

/// Retrieve all events in creation order, each with its expenses in creation order.
pub fn list_events(connection: &Connection) -> Result<Vec<Event>, Error> {
    let mut events: Vec<Event> = connection
        .prepare("SELECT id, name, date, notes FROM event ORDER BY id ASC;")?
        .query_map([], map_event_row)?
        .collect::<Result<_, _>>()?;

    let positions: HashMap<EventId, usize> = events
        .iter()
        .enumerate()
        .map(|(position, event)| (event.id.clone(), position))
        .collect();

    let mut statement = connection.prepare(
        "SELECT id, description, category, amount, date, status, payment_method, notes, event_id
        FROM expense ORDER BY id ASC;",
    )?;
    let rows = statement.query_map([], |row| {
        let event_id: i64 = row.get(8)?;
        Ok((EventId::new(event_id.to_string()), map_expense_row(row)?))
    })?;

    for row in rows {
        let (event_id, expense) = row?;

        if let Some(&position) = positions.get(&event_id) {
            events[position].expenses.push(expense);
        }
    }

    Ok(events)
}

/// Create an event and return it with its generated ID.
pub fn create_event(event: &NewEvent, connection: &Connection) -> Result<Event, Error> {
    connection.execute(
        "INSERT INTO event (name, date, notes) VALUES (?1, ?2, ?3);",
        (
            &event.name,
            event.date.map(|date| format_date(Some(date))),
            &event.notes,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Event {
        id: EventId::new(id.to_string()),
        name: event.name.clone(),
        date: event.date,
        notes: event.notes.clone(),
        expenses: Vec::new(),
    })
}

/// Delete an event and all of its expenses.
///
/// The expenses are removed by the foreign key cascade, which requires the
/// connection to have been set up with [initialize].
pub fn delete_event(event_id: &EventId, connection: &Connection) -> Result<(), Error> {
    let id = parse_row_id(event_id.as_ref()).ok_or(Error::DeleteMissingEvent)?;

    let rows_affected = connection.execute("DELETE FROM event WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingEvent);
    }

    Ok(())
}

/// Add an expense to the end of an event's expense list.
///
/// # Errors
///
/// Returns [Error::NotFound] if the event does not exist.
pub fn add_expense(
    event_id: &EventId,
    expense: &ExpenseData,
    connection: &Connection,
) -> Result<Expense, Error> {
    let id = parse_row_id(event_id.as_ref()).ok_or(Error::NotFound)?;

    let event_exists: bool = connection.query_row(
        "SELECT EXISTS (SELECT 1 FROM event WHERE id = ?1)",
        [id],
        |row| row.get(0),
    )?;

    if !event_exists {
        return Err(Error::NotFound);
    }

    connection.execute(
        "INSERT INTO expense (event_id, description, category, amount, date, status, payment_method, notes)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
        (
            id,
            &expense.description,
            &expense.category,
            expense.amount,
            expense.date.map(|date| format_date(Some(date))),
            expense.status.as_str(),
            expense.payment_method.as_str(),
            &expense.notes,
        ),
    )?;

    let expense_id = connection.last_insert_rowid();

    Ok(expense
        .clone()
        .into_expense(ExpenseId::new(expense_id.to_string())))
}

/// Replace every field of an expense that belongs to `event_id`.
pub fn update_expense(
    event_id: &EventId,
    expense_id: &ExpenseId,
    expense: &ExpenseData,
    connection: &Connection,
) -> Result<Expense, Error> {
    let (Some(event_row_id), Some(expense_row_id)) = (
        parse_row_id(event_id.as_ref()),
        parse_row_id(expense_id.as_ref()),
    ) else {
        return Err(Error::UpdateMissingExpense);
    };

    let rows_affected = connection.execute(
        "UPDATE expense
        SET description = ?1, category = ?2, amount = ?3, date = ?4, status = ?5,
            payment_method = ?6, notes = ?7
        WHERE id = ?8 AND event_id = ?9",
        (
            &expense.description,
            &expense.category,
            expense.amount,
            expense.date.map(|date| format_date(Some(date))),
            expense.status.as_str(),
            expense.payment_method.as_str(),
            &expense.notes,
            expense_row_id,
            event_row_id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingExpense);
    }

    Ok(expense.clone().into_expense(expense_id.clone()))
}

/// Delete an expense that belongs to `event_id`.
pub fn delete_expense(
    event_id: &EventId,
    expense_id: &ExpenseId,
    connection: &Connection,
) -> Result<(), Error> {
    let (Some(event_row_id), Some(expense_row_id)) = (
        parse_row_id(event_id.as_ref()),
        parse_row_id(expense_id.as_ref()),
    ) else {
        return Err(Error::DeleteMissingExpense);
    };

    let rows_affected = connection.execute(
        "DELETE FROM expense WHERE id = ?1 AND event_id = ?2",
        [expense_row_id, event_row_id],
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingExpense);
    }

    Ok(())
}

fn map_event_row(row: &Row) -> Result<Event, rusqlite::Error> {
    let id: i64 = row.get(0)?;
    let date: Option<String> = row.get(2)?;

    Ok(Event {
        id: EventId::new(id.to_string()),
        name: row.get(1)?,
        date: date.as_deref().and_then(parse_date),
        notes: row.get(3)?,
        expenses: Vec::new(),
    })
}

fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id: i64 = row.get(0)?;
    let date: Option<String> = row.get(4)?;
    let status: String = row.get(5)?;
    let payment_method: String = row.get(6)?;

    Ok(Expense {
        id: ExpenseId::new(id.to_string()),
        description: row.get(1)?,
        category: row.get(2)?,
        amount: row.get(3)?,
        date: date.as_deref().and_then(parse_date),
        status: status
            .parse()
            .map_err(|error| conversion_failure(5, error))?,
        payment_method: payment_method
            .parse()
            .map_err(|error| conversion_failure(6, error))?,
        notes: row.get(7)?,
    })
}

fn conversion_failure(column: usize, error: Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(error))
}
