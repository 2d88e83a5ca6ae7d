//! Table state and transitions
//!
//! `TableState` is owned by the caller. `reduce` is the pure transition
//! function; `StateDispatcher` is optional wiring for callers that want to
//! keep the state, the data and an action history together.

pub mod dispatcher;
pub mod events;
pub mod table_state;
