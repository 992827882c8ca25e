//! Implements a struct that holds the state of the web server.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::response::Response;

use crate::{
    Error,
    backend::Backend,
    view_state::{Action, ViewState, reduce},
};

/// The user facing message when the events cannot be loaded.
pub const LOAD_EVENTS_FAILED: &str = "Could not load events from the server";

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Where events and expenses are stored.
    pub backend: Backend,

    /// What the user currently sees. Only ever replaced through [reduce].
    pub view_state: Arc<Mutex<ViewState>>,
}

impl AppState {
    /// Create a new [AppState] with an empty, not yet loaded, view state.
    pub fn new(backend: impl Into<Backend>) -> Self {
        Self {
            backend: backend.into(),
            view_state: Arc::new(Mutex::new(ViewState::default())),
        }
    }

    fn lock_view_state(&self) -> Result<MutexGuard<'_, ViewState>, Error> {
        self.view_state.lock().map_err(|error| {
            tracing::error!("could not acquire view state lock: {error}");
            Error::ViewStateLockError
        })
    }

    /// Apply `action` to the view state and return the new state.
    pub fn dispatch(&self, action: Action) -> Result<ViewState, Error> {
        tracing::debug!("dispatching {}", action.name());

        let mut view_state = self.lock_view_state()?;
        *view_state = reduce(&view_state, action);

        Ok(view_state.clone())
    }

    /// A copy of the current view state.
    pub fn snapshot(&self) -> Result<ViewState, Error> {
        Ok(self.lock_view_state()?.clone())
    }

    /// Load the events from the backend unless they have been loaded already.
    ///
    /// A failed load is recorded in the view state and retried on the next call.
    pub async fn ensure_events_loaded(&self) -> Result<ViewState, Error> {
        let view_state = self.snapshot()?;

        if view_state.loaded {
            return Ok(view_state);
        }

        match self.backend.list_events().await {
            Ok(events) => self.dispatch(Action::EventsLoaded(events)),
            Err(error) => {
                tracing::error!("could not load events: {error}");
                self.dispatch(Action::RequestFailed(LOAD_EVENTS_FAILED.to_owned()))
            }
        }
    }

    /// Record a failed backend request in the view state and build the alert
    /// response for it.
    ///
    /// `message` is the user facing description of what failed, the details of
    /// `error` are only logged.
    pub fn report_failure(&self, message: &str, error: Error) -> Response {
        tracing::error!("{message}: {error}");

        if let Err(lock_error) = self.dispatch(Action::RequestFailed(message.to_owned())) {
            return lock_error.into_alert_response();
        }

        error.into_alert_response_with_message(message)
    }
}
