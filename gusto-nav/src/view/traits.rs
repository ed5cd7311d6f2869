use crate::router::Params;
use ratatui::layout::Rect;
use std::sync::{Arc, Mutex, OnceLock};

/// Event type for view interactions.
#[derive(Debug, Clone)]
pub enum Event {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize(u16, u16),
    FocusGained,
    FocusLost,
    Paste(String),
    Custom(String),
}

/// Action that a view can return after handling an event.
#[derive(Debug)]
pub enum Action {
    /// Navigate to the given path, e.g. `/restaurant/trattoria-roma`.
    Navigate(String),
    /// Return to the previously visited path.
    Back,
    Quit,
    Noop,
}

/// A renderable route target.
///
/// `params` holds whatever the matched route forwarded: path parameters when
/// the route opted in, plus any preset parameters attached at registration.
pub trait View: Send + Sync + 'static {
    /// Called when navigation arrives at this view's route.
    fn on_enter(&mut self, params: &Params) {
        let _ = params;
    }

    /// Called when navigation leaves this view's route.
    fn on_exit(&mut self) {}

    /// Called when the application is about to shut down.
    fn on_shutdown(&mut self) {}

    /// Render the view into the given area.
    fn render(&mut self, frame: &mut ratatui::Frame, area: Rect, params: &Params);

    /// Handle an event, returning an optional action.
    fn handle_event(&mut self, event: Event, params: &Params) -> Option<Action> {
        let _ = (event, params);
        None
    }
}

/// Shared handle to a view instance.
pub type SharedView = Arc<Mutex<dyn View>>;

/// Wrap a view for registration.
pub fn share<V: View>(view: V) -> SharedView {
    Arc::new(Mutex::new(view))
}

/// How a route holds its view: constructed up front, or built on first
/// resolution (the not-found fallback is typically lazy).
pub enum ViewSlot {
    Eager(SharedView),
    Lazy {
        cell: OnceLock<SharedView>,
        build: Box<dyn Fn() -> SharedView + Send + Sync>,
    },
}

impl ViewSlot {
    /// The view, building it if this slot is lazy and untouched.
    pub fn resolve(&self) -> SharedView {
        match self {
            ViewSlot::Eager(view) => view.clone(),
            ViewSlot::Lazy { cell, build } => cell.get_or_init(|| build()).clone(),
        }
    }

    /// The view only if it has already been built.
    pub fn resolved(&self) -> Option<SharedView> {
        match self {
            ViewSlot::Eager(view) => Some(view.clone()),
            ViewSlot::Lazy { cell, .. } => cell.get().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Blank;

    impl View for Blank {
        fn render(&mut self, _frame: &mut ratatui::Frame, _area: Rect, _params: &Params) {}
    }

    #[test]
    fn lazy_slot_builds_once() {
        static BUILDS: AtomicUsize = AtomicUsize::new(0);

        let slot = ViewSlot::Lazy {
            cell: OnceLock::new(),
            build: Box::new(|| {
                BUILDS.fetch_add(1, Ordering::SeqCst);
                share(Blank)
            }),
        };

        assert!(slot.resolved().is_none());
        let first = slot.resolve();
        let second = slot.resolve();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
        assert!(slot.resolved().is_some());
    }
}
