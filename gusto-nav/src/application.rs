//! Hosting shell: owns the terminal and drives the router's active view.

use crate::error::{self, Error};
use crate::router::Router;
use crate::state::Entity;
use crate::task::{TaskHandle, TaskTracker};
use crate::view::{Action, Event};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use snafu::ResultExt;
use std::io::{self, stdout};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

/// Handle to application-wide services, cloneable into tasks.
#[derive(Clone)]
pub struct AppContext {
    /// Internal: Channel to trigger a re-render.
    re_render_tx: mpsc::UnboundedSender<()>,
    /// Tasks aborted on shutdown.
    tasks: Arc<Mutex<TaskTracker>>,
}

impl AppContext {
    /// Create a new entity with the given value.
    pub fn new_entity<T>(&self, value: T) -> Entity<T>
    where
        T: Send + Sync + 'static,
    {
        Entity::new(value)
    }

    /// Spawn a tracked task. It is aborted at application shutdown, so work
    /// still in flight at teardown is discarded.
    pub fn spawn<F, Fut>(&self, f: F)
    where
        F: FnOnce(AppContext) -> Fut + Send + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        let cx = self.clone();
        let handle = tokio::spawn(async move {
            f(cx).await;
        });
        if let Ok(mut tasks) = self.tasks.lock() {
            tasks.track(TaskHandle::new(handle.abort_handle()));
        }
    }

    /// Re-render whenever `entity` changes.
    pub fn subscribe<T>(&self, entity: &Entity<T>)
    where
        T: Send + Sync + 'static,
    {
        let mut rx = entity.subscribe();
        let tx = self.re_render_tx.clone();
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let _ = tx.send(());
            }
        });
    }

    /// Trigger a re-render.
    pub fn refresh(&self) {
        let _ = self.re_render_tx.send(());
    }
}

/// Main application runtime.
pub struct Application;

impl Application {
    /// Create a new application instance.
    pub fn new() -> Self {
        Self
    }

    /// Run the shell around `router`.
    ///
    /// `setup` runs once inside the runtime before the event loop starts —
    /// spawn dynamic route registration there. The loop renders whatever
    /// view the router's current state resolves to and feeds input events
    /// back to it; `Navigate`/`Back` actions go through the router.
    pub fn run<F>(self, router: Router, setup: F) -> anyhow::Result<()>
    where
        F: FnOnce(&AppContext) -> anyhow::Result<()>,
    {
        let rt = Runtime::new().map_err(|e| anyhow::anyhow!("Failed to start tokio: {}", e))?;

        let (re_render_tx, re_render_rx) = mpsc::unbounded_channel();
        let tasks = Arc::new(Mutex::new(TaskTracker::new()));
        let app_context = AppContext {
            re_render_tx,
            tasks: tasks.clone(),
        };

        let _guard = rt.enter();
        setup(&app_context)?;
        drop(_guard);

        let result = rt.block_on(self.run_loop(app_context, &router, re_render_rx));

        // anything still in flight is discarded, the table stays as it was
        if let Ok(mut tasks) = tasks.lock() {
            tasks.abort_all();
        }
        result
    }

    async fn run_loop(
        &self,
        app: AppContext,
        router: &Router,
        re_render_rx: mpsc::UnboundedReceiver<()>,
    ) -> anyhow::Result<()> {
        enable_raw_mode().context(error::TerminalSnafu)?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).context(error::TerminalSnafu)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context(error::TerminalSnafu)?;

        let result = self
            .run_app_loop(app, router, &mut terminal, re_render_rx)
            .await;

        disable_raw_mode().context(error::TerminalSnafu)?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context(error::TerminalSnafu)?;
        terminal.show_cursor().context(error::TerminalSnafu)?;

        result
    }

    async fn run_app_loop(
        &self,
        app: AppContext,
        router: &Router,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        mut re_render_rx: mpsc::UnboundedReceiver<()>,
    ) -> anyhow::Result<()> {
        // Forward navigation changes into the render channel
        let mut nav_rx = router.subscribe();
        let forward = app.clone();
        tokio::spawn(async move {
            while nav_rx.changed().await.is_ok() {
                forward.refresh();
            }
        });

        // Initial render
        app.refresh();

        loop {
            tokio::select! {
                _ = re_render_rx.recv() => {
                    let state = router.current()?;
                    terminal.draw(|frame| {
                        let area = frame.area();
                        if let Some(view) = state.route.as_deref().and_then(|n| router.view(n)) {
                            if let Ok(mut view) = view.lock() {
                                view.render(frame, area, &state.params);
                            }
                        }
                    })?;
                }
                event_ready = async { event::poll(Duration::from_millis(100)) } => {
                    if let Ok(true) = event_ready {
                        let crossterm_event = event::read()?;
                        let internal_event = match crossterm_event {
                            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
                            CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
                            CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
                            CrosstermEvent::FocusGained => Some(Event::FocusGained),
                            CrosstermEvent::FocusLost => Some(Event::FocusLost),
                            CrosstermEvent::Paste(s) => Some(Event::Paste(s)),
                            _ => None,
                        };

                        if let Some(event) = internal_event {
                            let state = router.current()?;
                            let action = match state.route.as_deref().and_then(|n| router.view(n)) {
                                Some(view) => {
                                    let mut guard = view.lock().map_err(|_| Error::LockPoisoned)?;
                                    guard.handle_event(event, &state.params)
                                }
                                None => None,
                            };
                            app.refresh();

                            match action {
                                Some(Action::Navigate(path)) => {
                                    router.navigate(&path)?;
                                }
                                Some(Action::Back) => {
                                    router.go_back()?;
                                }
                                Some(Action::Quit) => {
                                    router.shutdown()?;
                                    return Ok(());
                                }
                                Some(Action::Noop) | None => {}
                            }
                        }
                    }
                }
            }
        }
    }
}
