pub mod application;
pub mod error;
pub mod router;
pub mod source;
pub mod state;
pub mod task;
pub mod view;

pub use error::{Error, Result};

// Re-export common types for convenience
pub use application::{AppContext, Application};
pub use router::{NavigationState, Params, PathPattern, Route, Router};
pub use source::{HttpSlugSource, RestaurantRecord, SlugSource};
pub use state::{Entity, WeakEntity};
pub use task::{TaskHandle, TaskTracker};
pub use view::{share, Action, Event, SharedView, View};
