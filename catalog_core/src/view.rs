pub mod transaction;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    data::UserId,
    digest::{digest_of, DigestOutput, Digestible},
    filter::SearchQuery,
};

pub use transaction::{execute_all_or_roll_back, Rollback, Transaction, TransactionError};

/// The mutable state of the catalog page. It is only ever changed by
/// executing a `ViewEvent`.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// The raw contents of the search box, as typed.
    pub search: String,
    /// The users that have a tab in the filter panel, in display order.
    pub user_tabs: Vec<UserId>,
    /// Set once any user tab has been clicked. The tabs do not filter the
    /// table; this only decides whether the "All" tab is drawn as active.
    pub user_tab_selected: bool,
}

impl ViewState {
    pub fn new(user_tabs: Vec<UserId>) -> Self {
        Self { user_tabs, ..Default::default() }
    }

    pub fn query(&self) -> SearchQuery {
        SearchQuery::new(&self.search)
    }

    /// The clear button is shown whenever the search box holds anything, even
    /// if it is only whitespace.
    pub fn clear_button_visible(&self) -> bool {
        !self.search.is_empty()
    }

    pub fn all_users_tab_active(&self) -> bool {
        !self.user_tab_selected
    }
}

/// The digest only covers what decides which rows are visible, so two states
/// whose searches normalize to the same query have the same digest.
impl Digestible for ViewState {
    fn digest(&self) -> DigestOutput {
        digest_of(self.query().as_str())
    }
}

/// The input events that the catalog page reacts to.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "value", rename_all = "camelCase")]
pub enum ViewEvent {
    /// The search box now holds the given text.
    SearchChanged(String),
    /// The clear button was pressed; the search box is emptied.
    FiltersCleared,
    /// A user tab was clicked.
    UserTabSelected(UserId),
}

impl fmt::Display for ViewEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewEvent::SearchChanged(search) => write!(f, "search changed to {search:?}"),
            ViewEvent::FiltersCleared => write!(f, "filters cleared"),
            ViewEvent::UserTabSelected(id) => write!(f, "user tab {id} selected"),
        }
    }
}

impl Transaction<ViewState> for ViewEvent {
    fn execute(&self, state: &mut ViewState) -> Result<Rollback<ViewState>, TransactionError> {
        match self {
            ViewEvent::SearchChanged(search) => Ok(replace_search(state, search.clone())),
            ViewEvent::FiltersCleared => Ok(replace_search(state, String::new())),
            ViewEvent::UserTabSelected(id) => {
                if !state.user_tabs.contains(id) {
                    return Err(TransactionError::UnknownUser(*id));
                }
                let previous = state.user_tab_selected;
                state.user_tab_selected = true;
                Ok(Box::new(move |state: &mut ViewState| state.user_tab_selected = previous))
            }
        }
    }
}

fn replace_search(state: &mut ViewState, search: String) -> Rollback<ViewState> {
    let previous = std::mem::replace(&mut state.search, search);
    Box::new(move |state: &mut ViewState| state.search = previous.clone())
}

/// Owns the `ViewState` and remembers the events applied to it so that they
/// can be undone.
#[derive(Default)]
pub struct ViewStore {
    state: ViewState,
    /// The events that were executed to reach `self.state`, along with their
    /// rollback functions, oldest first.
    history: Vec<(ViewEvent, Rollback<ViewState>)>,
}

impl ViewStore {
    pub fn new(state: ViewState) -> Self {
        Self { state, history: Vec::new() }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Applies the event to the state. On error the state is unchanged.
    pub fn dispatch(&mut self, event: ViewEvent) -> Result<(), TransactionError> {
        let rollback = event.execute(&mut self.state)?;
        debug!(%event, "view event applied");
        self.history.push((event, rollback));
        Ok(())
    }

    /// Applies all events, or none of them if one fails. Returns the error and
    /// index of the failing event.
    pub fn dispatch_all(
        &mut self,
        events: impl IntoIterator<Item = ViewEvent>,
    ) -> Result<(), (TransactionError, usize)> {
        let applied = execute_all_or_roll_back(&mut self.state, events)?;
        self.history.extend(applied);
        Ok(())
    }

    /// Rolls back the most recent event and returns it, or returns `None` if
    /// there is nothing to undo.
    pub fn undo(&mut self) -> Option<ViewEvent> {
        let (event, rollback) = self.history.pop()?;
        rollback(&mut self.state);
        debug!(%event, "view event undone");
        Some(event)
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl fmt::Debug for ViewStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewStore")
            .field("state", &self.state)
            .field("history", &self.history.iter().map(|(event, _)| event).collect::<Vec<_>>())
            .finish()
    }
}
