//! HTTP JSON client for the events REST server.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::{
    Error,
    backend::wire::{
        EventPayload, ExpensePayload, RawEvent, RawExpense, normalize_event, normalize_expense,
    },
    event::{Event, EventId, Expense, ExpenseData, ExpenseId, NewEvent},
};

/// Talks to the events REST server at `base_url`.
#[derive(Debug, Clone)]
pub struct RestBackend {
    http_client: Client,
    base_url: String,
}

impl RestBackend {
    /// Create a client for the server at `base_url`, e.g. "http://localhost:3001".
    ///
    /// # Errors
    ///
    /// Returns [Error::BackendRequest] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn events_url(&self) -> String {
        format!("{}/api/events", self.base_url)
    }

    fn event_url(&self, event_id: &EventId) -> String {
        format!("{}/api/events/{event_id}", self.base_url)
    }

    fn expenses_url(&self, event_id: &EventId) -> String {
        format!("{}/api/events/{event_id}/expenses", self.base_url)
    }

    fn expense_url(&self, event_id: &EventId, expense_id: &ExpenseId) -> String {
        format!(
            "{}/api/events/{event_id}/expenses/{expense_id}",
            self.base_url
        )
    }

    /// Fetch every event with its expenses.
    pub async fn list_events(&self) -> Result<Vec<Event>, Error> {
        let response = self.http_client.get(self.events_url()).send().await?;
        let raw_events: Vec<RawEvent> = read_json(response).await?;

        raw_events.into_iter().map(normalize_event).collect()
    }

    /// Create an event, returning it as stored by the server.
    pub async fn create_event(&self, event: &NewEvent) -> Result<Event, Error> {
        let response = self
            .http_client
            .post(self.events_url())
            .json(&EventPayload::from(event))
            .send()
            .await?;

        normalize_event(read_json(response).await?)
    }

    /// Delete an event and its expenses.
    pub async fn delete_event(&self, event_id: &EventId) -> Result<(), Error> {
        let response = self
            .http_client
            .delete(self.event_url(event_id))
            .send()
            .await?;

        check_status(&response)
    }

    /// Add an expense to an event, returning it as stored by the server.
    pub async fn add_expense(
        &self,
        event_id: &EventId,
        expense: &ExpenseData,
    ) -> Result<Expense, Error> {
        let response = self
            .http_client
            .post(self.expenses_url(event_id))
            .json(&ExpensePayload::from(expense))
            .send()
            .await?;

        normalize_expense(read_json::<RawExpense>(response).await?)
    }

    /// Replace the fields of an expense, returning it as stored by the server.
    pub async fn update_expense(
        &self,
        event_id: &EventId,
        expense_id: &ExpenseId,
        expense: &ExpenseData,
    ) -> Result<Expense, Error> {
        let response = self
            .http_client
            .put(self.expense_url(event_id, expense_id))
            .json(&ExpensePayload::from(expense))
            .send()
            .await?;

        normalize_expense(read_json::<RawExpense>(response).await?)
    }

    /// Delete an expense from an event.
    pub async fn delete_expense(
        &self,
        event_id: &EventId,
        expense_id: &ExpenseId,
    ) -> Result<(), Error> {
        let response = self
            .http_client
            .delete(self.expense_url(event_id, expense_id))
            .send()
            .await?;

        check_status(&response)
    }
}

/// Fail with [Error::BackendStatus] unless the response was a success.
fn check_status(response: &Response) -> Result<(), Error> {
    let status = response.status();

    if status.is_success() {
        Ok(())
    } else {
        tracing::error!("{} returned {status}", response.url());
        Err(Error::BackendStatus(status.as_u16()))
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
    check_status(&response)?;

    Ok(response.json().await?)
}

#[cfg(test)]
mod rest_backend_tests {
    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };

    use axum::{
        Json, Router,
        extract::{Path, State},
        http::StatusCode,
        routing::{delete, get, post, put},
    };
    use serde_json::{Value, json};
    use tokio::net::TcpListener;

    use crate::{
        Error,
        backend::rest::RestBackend,
        event::{EventId, ExpenseData, ExpenseId, ExpenseStatus, NewEvent, PaymentMethod},
    };

    /// What the fake server has received.
    #[derive(Debug, Default)]
    struct Received {
        bodies: Vec<Value>,
        deleted: Vec<String>,
    }

    type FakeState = Arc<Mutex<Received>>;

    async fn list_events() -> Json<Value> {
        Json(json!([
            {
                "_id": "6571b2f0c9e77c0012ab34cd",
                "name": "Engagement",
                "date": "2025-11-09T00:00:00.000Z",
                "notes": "At the parents' house",
                "expenses": [
                    {"_id": "e1", "description": "Hall", "category": "Hall", "amount": 10000,
                     "status": "paid", "paymentMethod": "check"},
                    {"_id": "e2", "description": "Stills photography", "category": "Photo",
                     "amount": 4000, "status": "partial"}
                ]
            },
            {"_id": "6571b2f0c9e77c0012ab34ff", "name": "Shabbat", "expenses": []}
        ]))
    }

    async fn create_event(
        State(state): State<FakeState>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        let mut event = body.clone();
        event["_id"] = json!("new-event");
        event["expenses"] = json!([]);
        state.lock().unwrap().bodies.push(body);

        (StatusCode::CREATED, Json(event))
    }

    async fn add_expense(
        State(state): State<FakeState>,
        Path(_event_id): Path<String>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        let mut expense = body.clone();
        expense["_id"] = json!("new-expense");
        state.lock().unwrap().bodies.push(body);

        (StatusCode::CREATED, Json(expense))
    }

    async fn update_expense(
        State(state): State<FakeState>,
        Path((_event_id, expense_id)): Path<(String, String)>,
        Json(body): Json<Value>,
    ) -> Result<Json<Value>, StatusCode> {
        if expense_id == "missing" {
            return Err(StatusCode::NOT_FOUND);
        }

        let mut expense = body.clone();
        expense["_id"] = json!(expense_id);
        state.lock().unwrap().bodies.push(body);

        Ok(Json(expense))
    }

    async fn delete_expense(
        State(state): State<FakeState>,
        Path((event_id, expense_id)): Path<(String, String)>,
    ) -> StatusCode {
        state
            .lock()
            .unwrap()
            .deleted
            .push(format!("{event_id}/{expense_id}"));

        StatusCode::NO_CONTENT
    }

    async fn delete_event() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Start a fake events server on a random port.
    async fn start_fake_server() -> (RestBackend, FakeState) {
        let state = FakeState::default();
        let app = Router::new()
            .route("/api/events", get(list_events).post(create_event))
            .route("/api/events/{event_id}", delete(delete_event))
            .route("/api/events/{event_id}/expenses", post(add_expense))
            .route(
                "/api/events/{event_id}/expenses/{expense_id}",
                put(update_expense).delete(delete_expense),
            )
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Could not bind fake server");
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let backend = RestBackend::new(&format!("http://{address}/"), Duration::from_secs(5))
            .expect("Could not create REST backend");

        (backend, state)
    }

    fn hall_data() -> ExpenseData {
        ExpenseData {
            description: "Hall".to_owned(),
            category: "Hall".to_owned(),
            amount: 12000.0,
            date: None,
            status: ExpenseStatus::Paid,
            payment_method: PaymentMethod::Transfer,
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn list_events_normalizes_mongo_ids() {
        let (backend, _) = start_fake_server().await;

        let events = backend.list_events().await.unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, EventId::new("6571b2f0c9e77c0012ab34cd"));
        assert_eq!(events[0].expenses[1].id, ExpenseId::new("e2"));
        assert_eq!(events[0].expenses[1].payment_method, PaymentMethod::Other);
        assert_eq!(events[0].date.unwrap().to_string(), "2025-11-09");
        assert!(events[1].expenses.is_empty());
    }

    #[tokio::test]
    async fn create_event_posts_trimmed_payload() {
        let (backend, received) = start_fake_server().await;
        let new_event = NewEvent::new("  Groom's shabbat ", None, " with family ").unwrap();

        let event = backend.create_event(&new_event).await.unwrap();

        assert_eq!(event.id, EventId::new("new-event"));
        assert_eq!(event.name, "Groom's shabbat");
        assert_eq!(
            received.lock().unwrap().bodies,
            vec![json!({"name": "Groom's shabbat", "date": "", "notes": "with family"})]
        );
    }

    #[tokio::test]
    async fn add_and_update_expense_send_camel_case() {
        let (backend, received) = start_fake_server().await;
        let event_id = EventId::new("evt-1");

        let added = backend.add_expense(&event_id, &hall_data()).await.unwrap();
        let updated = backend
            .update_expense(&event_id, &ExpenseId::new("e1"), &hall_data())
            .await
            .unwrap();

        assert_eq!(added.id, ExpenseId::new("new-expense"));
        assert_eq!(updated.id, ExpenseId::new("e1"));
        assert_eq!(updated.amount, 12000.0);
        let bodies = &received.lock().unwrap().bodies;
        assert_eq!(bodies[0]["paymentMethod"], json!("transfer"));
        assert!(bodies[0].get("date").is_none());
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let (backend, _) = start_fake_server().await;

        let update_result = backend
            .update_expense(&EventId::new("evt-1"), &ExpenseId::new("missing"), &hall_data())
            .await;
        let delete_result = backend.delete_event(&EventId::new("evt-1")).await;

        assert_eq!(update_result, Err(Error::BackendStatus(404)));
        assert_eq!(delete_result, Err(Error::BackendStatus(500)));
    }

    #[tokio::test]
    async fn delete_expense_hits_expense_url() {
        let (backend, received) = start_fake_server().await;

        backend
            .delete_expense(&EventId::new("evt-1"), &ExpenseId::new("e2"))
            .await
            .unwrap();

        assert_eq!(received.lock().unwrap().deleted, vec!["evt-1/e2"]);
    }

    #[tokio::test]
    async fn unreachable_server_is_a_request_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);
        let backend =
            RestBackend::new(&format!("http://{address}"), Duration::from_secs(2)).unwrap();

        let result = backend.list_events().await;

        assert!(
            matches!(result, Err(Error::BackendRequest(_))),
            "got {result:?}"
        );
    }
}
