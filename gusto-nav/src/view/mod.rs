//! View contract for route targets.
//!
//! Views are registered per route and dispatched by name; the active view
//! receives the parameters the router forwarded for the current path.

pub mod traits;

pub use traits::{share, Action, Event, SharedView, View, ViewSlot};
