//! The cached UI state and the reducer that updates it.
//!
//! Handlers never mutate [ViewState] directly. They talk to the backend and
//! then describe what happened with an [Action], which [reduce] folds into a
//! new state.

use crate::event::{Event, EventId, Expense, ExpenseId};

/// What the user currently sees: the cached events, which one is open and the
/// last error message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub events: Vec<Event>,
    pub selected_event_id: Option<EventId>,
    /// A user facing message from the last failed backend request.
    pub error: Option<String>,
    /// Whether the events have been loaded from the backend at least once.
    pub loaded: bool,
}

impl ViewState {
    /// The currently selected event, if any.
    pub fn selected_event(&self) -> Option<&Event> {
        let id = self.selected_event_id.as_ref()?;
        self.event(id)
    }

    /// Look up a cached event by ID.
    pub fn event(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|event| &event.id == id)
    }
}

/// Something that happened which changes the view state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    EventsLoaded(Vec<Event>),
    EventCreated(Event),
    EventSelected(EventId),
    EventDeleted(EventId),
    ExpenseAdded(EventId, Expense),
    ExpenseUpdated(EventId, ExpenseId, Expense),
    ExpenseDeleted(EventId, ExpenseId),
    RequestFailed(String),
}

impl Action {
    /// A short name for log messages.
    pub fn name(&self) -> &'static str {
        match self {
            Action::EventsLoaded(_) => "EventsLoaded",
            Action::EventCreated(_) => "EventCreated",
            Action::EventSelected(_) => "EventSelected",
            Action::EventDeleted(_) => "EventDeleted",
            Action::ExpenseAdded(..) => "ExpenseAdded",
            Action::ExpenseUpdated(..) => "ExpenseUpdated",
            Action::ExpenseDeleted(..) => "ExpenseDeleted",
            Action::RequestFailed(_) => "RequestFailed",
        }
    }
}

/// Produce the state that results from applying `action` to `state`.
///
/// `state` is left untouched. Every action except [Action::RequestFailed]
/// clears the error message.
pub fn reduce(state: &ViewState, action: Action) -> ViewState {
    let mut next = state.clone();

    match action {
        Action::RequestFailed(message) => {
            next.error = Some(message);
            return next;
        }
        Action::EventsLoaded(events) => {
            next.events = events;
            next.loaded = true;

            let selection_exists = next
                .selected_event_id
                .as_ref()
                .is_some_and(|id| next.event(id).is_some());

            if !selection_exists {
                next.selected_event_id = next.events.first().map(|event| event.id.clone());
            }
        }
        Action::EventCreated(event) => {
            next.selected_event_id = Some(event.id.clone());
            next.events.push(event);
        }
        Action::EventSelected(id) => {
            if next.event(&id).is_some() {
                next.selected_event_id = Some(id);
            }
        }
        Action::EventDeleted(id) => {
            next.events.retain(|event| event.id != id);

            if next.events.is_empty() {
                next.selected_event_id = None;
            } else if next.selected_event_id.as_ref() == Some(&id) {
                next.selected_event_id = next.events.first().map(|event| event.id.clone());
            }
        }
        Action::ExpenseAdded(event_id, expense) => {
            if let Some(event) = event_mut(&mut next, &event_id) {
                event.expenses.push(expense);
            }
        }
        Action::ExpenseUpdated(event_id, expense_id, expense) => {
            let existing = event_mut(&mut next, &event_id).and_then(|event| {
                event
                    .expenses
                    .iter_mut()
                    .find(|existing| existing.id == expense_id)
            });

            if let Some(existing) = existing {
                *existing = expense;
            }
        }
        Action::ExpenseDeleted(event_id, expense_id) => {
            if let Some(event) = event_mut(&mut next, &event_id) {
                event.expenses.retain(|expense| expense.id != expense_id);
            }
        }
    }

    next.error = None;
    next
}

fn event_mut<'a>(state: &'a mut ViewState, id: &EventId) -> Option<&'a mut Event> {
    state.events.iter_mut().find(|event| &event.id == id)
}

#[cfg(test)]
mod reduce_tests {
    use crate::{
        aggregation::test_expenses::expense,
        event::{Event, EventId, ExpenseId, ExpenseStatus},
        view_state::{Action, ViewState, reduce},
    };

    fn event(id: &str, name: &str) -> Event {
        Event {
            id: EventId::new(id),
            name: name.to_owned(),
            date: None,
            notes: String::new(),
            expenses: Vec::new(),
        }
    }

    fn loaded_state() -> ViewState {
        reduce(
            &ViewState::default(),
            Action::EventsLoaded(vec![event("evt-1", "Engagement"), event("evt-2", "Shabbat")]),
        )
    }

    #[test]
    fn events_loaded_selects_first_event() {
        let state = loaded_state();

        assert!(state.loaded);
        assert_eq!(state.events.len(), 2);
        assert_eq!(state.selected_event_id, Some(EventId::new("evt-1")));
    }

    #[test]
    fn events_loaded_keeps_existing_selection() {
        let state = reduce(&loaded_state(), Action::EventSelected(EventId::new("evt-2")));

        let state = reduce(
            &state,
            Action::EventsLoaded(vec![event("evt-1", "Engagement"), event("evt-2", "Shabbat")]),
        );

        assert_eq!(state.selected_event_id, Some(EventId::new("evt-2")));
    }

    #[test]
    fn empty_load_selects_nothing() {
        let state = reduce(&ViewState::default(), Action::EventsLoaded(Vec::new()));

        assert!(state.loaded);
        assert_eq!(state.selected_event_id, None);
        assert_eq!(state.selected_event(), None);
    }

    #[test]
    fn reduce_does_not_modify_input() {
        let before = loaded_state();
        let copy = before.clone();

        let _ = reduce(&before, Action::EventDeleted(EventId::new("evt-1")));

        assert_eq!(before, copy);
    }

    #[test]
    fn created_event_is_appended_and_selected() {
        let state = reduce(&loaded_state(), Action::EventCreated(event("evt-3", "Sheva brachot")));

        assert_eq!(state.events.last().unwrap().name, "Sheva brachot");
        assert_eq!(state.selected_event_id, Some(EventId::new("evt-3")));
    }

    #[test]
    fn selecting_unknown_event_is_ignored() {
        let state = reduce(&loaded_state(), Action::EventSelected(EventId::new("nope")));

        assert_eq!(state.selected_event_id, Some(EventId::new("evt-1")));
    }

    #[test]
    fn deleting_only_event_clears_selection() {
        let state = reduce(
            &ViewState::default(),
            Action::EventsLoaded(vec![event("evt-1", "Engagement")]),
        );

        let state = reduce(&state, Action::EventDeleted(EventId::new("evt-1")));

        assert!(state.events.is_empty());
        assert_eq!(state.selected_event_id, None);
    }

    #[test]
    fn deleting_selected_event_selects_first_remaining() {
        let state = reduce(&loaded_state(), Action::EventDeleted(EventId::new("evt-1")));

        assert_eq!(state.selected_event_id, Some(EventId::new("evt-2")));
    }

    #[test]
    fn deleting_other_event_keeps_selection() {
        let state = reduce(&loaded_state(), Action::EventDeleted(EventId::new("evt-2")));

        assert_eq!(state.events.len(), 1);
        assert_eq!(state.selected_event_id, Some(EventId::new("evt-1")));
    }

    #[test]
    fn expense_actions_modify_matching_event() {
        let event_id = EventId::new("evt-2");
        let hall = expense("exp-1", "Hall", "Hall", 100.0, ExpenseStatus::Unpaid);
        let food = expense("exp-2", "Food", "Food", 50.0, ExpenseStatus::Unpaid);

        let state = reduce(&loaded_state(), Action::ExpenseAdded(event_id.clone(), hall.clone()));
        let state = reduce(&state, Action::ExpenseAdded(event_id.clone(), food.clone()));
        assert_eq!(state.event(&event_id).unwrap().expenses, vec![hall.clone(), food.clone()]);
        assert!(state.event(&EventId::new("evt-1")).unwrap().expenses.is_empty());

        let paid_hall = expense("exp-1", "Hall", "Hall", 120.0, ExpenseStatus::Paid);
        let state = reduce(
            &state,
            Action::ExpenseUpdated(event_id.clone(), ExpenseId::new("exp-1"), paid_hall.clone()),
        );
        assert_eq!(state.event(&event_id).unwrap().expenses, vec![paid_hall, food.clone()]);

        let state = reduce(
            &state,
            Action::ExpenseDeleted(event_id.clone(), ExpenseId::new("exp-1")),
        );
        assert_eq!(state.event(&event_id).unwrap().expenses, vec![food]);
    }

    #[test]
    fn request_failed_sets_error_and_keeps_data() {
        let before = loaded_state();

        let state = reduce(&before, Action::RequestFailed("Could not add the expense".to_owned()));

        assert_eq!(state.error.as_deref(), Some("Could not add the expense"));
        assert_eq!(state.events, before.events);
        assert_eq!(state.selected_event_id, before.selected_event_id);
    }

    #[test]
    fn successful_action_clears_error() {
        let state = reduce(&loaded_state(), Action::RequestFailed("oops".to_owned()));

        let state = reduce(&state, Action::EventSelected(EventId::new("evt-2")));

        assert_eq!(state.error, None);
    }
}
