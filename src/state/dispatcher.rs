//! Action dispatcher for interactive callers

use tracing::{debug, info};

use crate::data::data_view::{RecordTable, TableView};
use crate::state::events::TableAction;
use crate::state::table_state::TableState;

/// Owns a table's selection state on behalf of an interactive caller
///
/// The engine itself is stateless; this is the "caller" side that keeps
/// the current `TableState` and a bounded history of dispatched actions
/// for debugging.
pub struct StateDispatcher {
    state: TableState,

    /// Action history for debugging
    action_history: Vec<TableAction>,

    /// Maximum action history size
    max_history: usize,
}

impl StateDispatcher {
    pub fn new(state: TableState) -> Self {
        Self {
            state,
            action_history: Vec::new(),
            max_history: 100,
        }
    }

    /// Start from the table's initial state
    pub fn for_table<T>(table: &RecordTable<T>) -> Self {
        Self::new(table.initial_state())
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Apply an action and return the new state
    pub fn dispatch<T>(
        &mut self,
        table: &RecordTable<T>,
        data: &[T],
        action: TableAction,
    ) -> &TableState {
        debug!("StateDispatcher: Dispatching action: {:?}", action);

        let next = table.transition(data, &self.state, &action);
        if next != self.state {
            info!("StateDispatcher: State changed by {:?}", action);
        }
        self.state = next;

        self.action_history.push(action);
        if self.action_history.len() > self.max_history {
            self.action_history.remove(0);
        }

        &self.state
    }

    /// Evaluate the table against the current state
    pub fn view<'a, T>(&self, table: &RecordTable<T>, data: &'a [T]) -> TableView<'a, T> {
        table.evaluate(data, &self.state)
    }

    /// Get action history for debugging
    pub fn get_action_history(&self) -> &[TableAction] {
        &self.action_history
    }
}
