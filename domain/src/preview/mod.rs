//! Preview pane state

pub mod state;
