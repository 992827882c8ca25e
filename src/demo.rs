//! Sample events for trying the app without a REST server.

use rusqlite::Connection;
use time::{Date, macros::date};

use crate::{
    Error,
    backend::{add_expense, create_event},
    event::{Event, ExpenseData, ExpenseStatus, NewEvent, PaymentMethod},
};

struct DemoExpense {
    description: &'static str,
    category: &'static str,
    amount: f64,
    date: Date,
    status: ExpenseStatus,
    payment_method: PaymentMethod,
    notes: &'static str,
}

struct DemoEvent {
    name: &'static str,
    date: Date,
    notes: &'static str,
    expenses: &'static [DemoExpense],
}

const DEMO_EVENTS: &[DemoEvent] = &[
    DemoEvent {
        name: "אירוסין ז' כסלו",
        date: date!(2025 - 11 - 09),
        notes: "אירוסין בבית ההורים",
        expenses: &[
            DemoExpense {
                description: "אולם",
                category: "אולם",
                amount: 10000.0,
                date: date!(2025 - 10 - 01),
                status: ExpenseStatus::Paid,
                payment_method: PaymentMethod::Check,
                notes: "שולם במעמד הסגירה",
            },
            DemoExpense {
                description: "צילום סטילס",
                category: "צילום",
                amount: 4000.0,
                date: date!(2025 - 10 - 10),
                status: ExpenseStatus::Partial,
                payment_method: PaymentMethod::Transfer,
                notes: "שולם מקדמה",
            },
            DemoExpense {
                description: "עיצוב פרחים",
                category: "עיצוב",
                amount: 2000.0,
                date: date!(2025 - 10 - 20),
                status: ExpenseStatus::Unpaid,
                payment_method: PaymentMethod::Other,
                notes: "",
            },
        ],
    },
    DemoEvent {
        name: "שבת חתן",
        date: date!(2025 - 12 - 20),
        notes: "אצל המשפחה",
        expenses: &[
            DemoExpense {
                description: "אוכל לשבת",
                category: "אוכל",
                amount: 6000.0,
                date: date!(2025 - 12 - 10),
                status: ExpenseStatus::Unpaid,
                payment_method: PaymentMethod::Transfer,
                notes: "",
            },
            DemoExpense {
                description: "שירה",
                category: "מוזיקה",
                amount: 2500.0,
                date: date!(2025 - 12 - 12),
                status: ExpenseStatus::Unpaid,
                payment_method: PaymentMethod::Cash,
                notes: "",
            },
        ],
    },
    DemoEvent {
        name: "שבע ברכות",
        date: date!(2026 - 01 - 05),
        notes: "",
        expenses: &[DemoExpense {
            description: "קייטרינג",
            category: "אוכל",
            amount: 3000.0,
            date: date!(2025 - 12 - 30),
            status: ExpenseStatus::Unpaid,
            payment_method: PaymentMethod::Transfer,
            notes: "",
        }],
    },
];

/// Insert the demo events and their expenses, returning what was stored.
///
/// The tables must already exist.
pub fn insert_demo_events(connection: &Connection) -> Result<Vec<Event>, Error> {
    let mut events = Vec::with_capacity(DEMO_EVENTS.len());

    for demo_event in DEMO_EVENTS {
        let new_event = NewEvent::new(demo_event.name, Some(demo_event.date), demo_event.notes)?;
        let mut event = create_event(&new_event, connection)?;

        for demo_expense in demo_event.expenses {
            let expense = ExpenseData {
                description: demo_expense.description.to_owned(),
                category: demo_expense.category.to_owned(),
                amount: demo_expense.amount,
                date: Some(demo_expense.date),
                status: demo_expense.status,
                payment_method: demo_expense.payment_method,
                notes: demo_expense.notes.to_owned(),
            };

            event.expenses.push(add_expense(&event.id, &expense, connection)?);
        }

        tracing::debug!(
            "inserted demo event {:?} with {} expenses",
            event.name,
            event.expenses.len()
        );
        events.push(event);
    }

    Ok(events)
}
