//! Path-based navigation: route table, matching and observable state.
//!
//! The router is an explicit instance owned by the hosting shell; tests and
//! embedders build as many independent routers as they like.

pub mod pattern;

pub use pattern::{Params, PathPattern, Segment};

use crate::error::{self, Error, Result};
use crate::source::SlugSource;
use crate::state::{Entity, SharedState};
use crate::view::{SharedView, ViewSlot};
use std::sync::{Arc, OnceLock, RwLock};
use tokio::sync::watch;
use tracing::{debug, warn};

/// A declarative mapping from a path pattern to a named view.
pub struct Route {
    name: String,
    pattern: PathPattern,
    view: ViewSlot,
    forward_params: bool,
    preset: Params,
}

impl Route {
    /// Register `view` under `pattern`. Fails fast on a malformed pattern.
    pub fn new(pattern: &str, name: impl Into<String>, view: SharedView) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            pattern: PathPattern::parse(pattern)?,
            view: ViewSlot::Eager(view),
            forward_params: false,
            preset: Params::new(),
        })
    }

    /// Like [`Route::new`], but the view is built on first resolution.
    pub fn lazy<F>(pattern: &str, name: impl Into<String>, build: F) -> Result<Self>
    where
        F: Fn() -> SharedView + Send + Sync + 'static,
    {
        Ok(Self {
            name: name.into(),
            pattern: PathPattern::parse(pattern)?,
            view: ViewSlot::Lazy {
                cell: OnceLock::new(),
                build: Box::new(build),
            },
            forward_params: false,
            preset: Params::new(),
        })
    }

    /// Forward extracted path parameters to the view.
    pub fn forward_params(mut self) -> Self {
        self.forward_params = true;
        self
    }

    /// Attach a parameter handed to the view on every match of this route.
    pub fn preset(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.preset.insert(key.into(), value.into());
        self
    }

    /// The route's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The route's path pattern.
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }
}

/// Where navigation currently points.
///
/// Read by the hosting shell to render the matched view; mutated only by the
/// [`Router`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NavigationState {
    /// The raw requested path.
    pub path: String,
    /// Name of the matched route; `None` until the first navigation.
    pub route: Option<String>,
    /// Parameters forwarded to the view: path parameters when the route
    /// opted in, plus any preset parameters.
    pub params: Params,
}

/// Path-based router with an observable [`NavigationState`].
///
/// # Example
/// ```ignore
/// let router = Router::new(vec![
///     Route::new("/", "home", share(HomePage::default()))?,
///     Route::new("/restaurant/:slug", "RestaurantDetails", details)?.forward_params(),
///     Route::lazy("/*", "notFound", || share(NotFoundPage::default()))?,
/// ])?;
/// router.navigate("/restaurant/trattoria-roma")?;
/// ```
#[derive(Clone)]
pub struct Router {
    table: SharedState<Vec<Route>>,
    state: Entity<NavigationState>,
    history: SharedState<Vec<String>>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router").finish_non_exhaustive()
    }
}

impl Router {
    /// Build a router from the startup route table.
    ///
    /// The table must contain exactly one catch-all route, declared last,
    /// and route names must be unique.
    pub fn new(routes: Vec<Route>) -> Result<Self> {
        let mut catch_all: Option<usize> = None;
        for (idx, route) in routes.iter().enumerate() {
            if routes[..idx].iter().any(|r| r.name == route.name) {
                return error::DuplicateNameSnafu { name: &route.name }.fail();
            }
            if route.pattern.is_catch_all() {
                if catch_all.is_some() {
                    return error::ExtraCatchAllSnafu { name: &route.name }.fail();
                }
                catch_all = Some(idx);
            }
        }
        match catch_all {
            None => error::MissingCatchAllSnafu.fail(),
            Some(idx) if idx + 1 != routes.len() => error::CatchAllNotFinalSnafu {
                name: &routes[idx].name,
            }
            .fail(),
            Some(_) => Ok(Self {
                table: Arc::new(RwLock::new(routes)),
                state: Entity::new(NavigationState::default()),
                history: Arc::new(RwLock::new(Vec::new())),
            }),
        }
    }

    /// Resolve `path` against the route table and make it current.
    ///
    /// Matching is synchronous and linear in segment count: literal routes
    /// are tried first, then parameterized ones, then the catch-all, in
    /// declared order within each tier. Every path resolves to exactly one
    /// route — unknown paths land on the catch-all. Subscribers are notified
    /// of the new state; navigating to the current destination is a no-op.
    pub fn navigate(&self, path: &str) -> Result<NavigationState> {
        self.commit(path, true)
    }

    /// Return to the previously visited path. `Ok(false)` when there is no
    /// history to pop.
    pub fn go_back(&self) -> Result<bool> {
        let target = self
            .history
            .write()
            .map_err(|_| Error::LockPoisoned)?
            .pop();
        match target {
            Some(path) => {
                self.commit(&path, false)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Whether there is history to go back to.
    pub fn can_go_back(&self) -> bool {
        self.history.read().map(|h| !h.is_empty()).unwrap_or(false)
    }

    /// Insert a route ahead of the catch-all, so the catch-all stays
    /// last-checked.
    ///
    /// Fails with [`Error::DuplicateName`] on a name collision, leaving the
    /// table untouched. The insertion is atomic with respect to `navigate`:
    /// a concurrent lookup observes the table before or after it, never a
    /// partial list.
    pub fn add_route(&self, route: Route) -> Result<()> {
        let mut table = self.table.write().map_err(|_| Error::LockPoisoned)?;
        if table.iter().any(|r| r.name == route.name) {
            return error::DuplicateNameSnafu { name: &route.name }.fail();
        }
        let at = table
            .iter()
            .position(|r| r.pattern.is_catch_all())
            .unwrap_or(table.len());
        table.insert(at, route);
        Ok(())
    }

    /// Fetch restaurant slugs from `source` and register a literal route for
    /// each: path `/<slug>`, name `Slug-<slug>`, rendered by `view` with the
    /// slug preset as a parameter.
    ///
    /// Source failures are logged and swallowed: the table keeps serving its
    /// previous state and the caller sees `Ok`. Malformed slugs and
    /// duplicate names are skipped the same way. Navigation is never blocked
    /// — the table lock is only taken per insertion, after the fetch
    /// completes.
    pub async fn register_dynamic_routes(
        &self,
        source: &dyn SlugSource,
        view: SharedView,
    ) -> Result<()> {
        let slugs = match source.fetch_slugs().await {
            Ok(slugs) => slugs,
            Err(err) => {
                warn!(error = %err, "failed to load restaurant slugs, keeping static routes");
                return Ok(());
            }
        };

        for slug in slugs {
            let route = match Route::new(&format!("/{slug}"), format!("Slug-{slug}"), view.clone())
            {
                Ok(route) => route.preset("slug", &slug),
                Err(err) => {
                    warn!(%slug, error = %err, "skipping malformed slug");
                    continue;
                }
            };
            match self.add_route(route) {
                Ok(()) => debug!(%slug, "registered dynamic route"),
                Err(Error::DuplicateName { name }) => {
                    warn!(%name, "skipping dynamic route, name already registered");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    /// The current navigation state.
    pub fn current(&self) -> Result<NavigationState> {
        self.state.read(|s| s.clone())
    }

    /// Subscribe to navigation changes.
    pub fn subscribe(&self) -> watch::Receiver<()> {
        self.state.subscribe()
    }

    /// Resolve the registered view for `name`.
    pub fn view(&self, name: &str) -> Option<SharedView> {
        let table = self.table.read().ok()?;
        table
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.view.resolve())
    }

    /// Registered route names, in match-tier-agnostic declared order.
    pub fn route_names(&self) -> Result<Vec<String>> {
        let table = self.table.read().map_err(|_| Error::LockPoisoned)?;
        Ok(table.iter().map(|r| r.name.clone()).collect())
    }

    /// Run `on_shutdown` for every view that has been built.
    pub fn shutdown(&self) -> Result<()> {
        let views: Vec<SharedView> = {
            let table = self.table.read().map_err(|_| Error::LockPoisoned)?;
            table.iter().filter_map(|r| r.view.resolved()).collect()
        };
        for view in views {
            view.lock().map_err(|_| Error::LockPoisoned)?.on_shutdown();
        }
        Ok(())
    }

    fn commit(&self, path: &str, push_history: bool) -> Result<NavigationState> {
        let previous = self.state.read(|s| s.clone())?;
        let next = {
            let table = self.table.read().map_err(|_| Error::LockPoisoned)?;
            // the table always carries a catch-all, so a match is guaranteed
            let (route, extracted) =
                match_route(&table, path).ok_or(Error::MissingCatchAll)?;
            let mut params = route.preset.clone();
            if route.forward_params {
                params.extend(extracted);
            }
            NavigationState {
                path: path.to_string(),
                route: Some(route.name.clone()),
                params,
            }
        };

        if next == previous {
            return Ok(next);
        }

        if let Some(view) = previous.route.as_deref().and_then(|n| self.view(n)) {
            view.lock().map_err(|_| Error::LockPoisoned)?.on_exit();
        }
        if let Some(view) = next.route.as_deref().and_then(|n| self.view(n)) {
            view.lock()
                .map_err(|_| Error::LockPoisoned)?
                .on_enter(&next.params);
        }

        if push_history && previous.route.is_some() {
            self.history
                .write()
                .map_err(|_| Error::LockPoisoned)?
                .push(previous.path);
        }

        self.state.update(|s| *s = next.clone())?;
        Ok(next)
    }
}

/// Tiered lookup: exact literal match wins over parameterized match wins
/// over catch-all; declared order within a tier.
fn match_route<'t>(table: &'t [Route], path: &str) -> Option<(&'t Route, Params)> {
    let literal = table.iter().filter(|r| r.pattern.is_literal());
    let parameterized = table
        .iter()
        .filter(|r| !r.pattern.is_literal() && !r.pattern.is_catch_all());
    let fallback = table.iter().filter(|r| r.pattern.is_catch_all());

    literal
        .chain(parameterized)
        .chain(fallback)
        .find_map(|route| route.pattern.matches(path).map(|params| (route, params)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{share, View};
    use ratatui::layout::Rect;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Blank;

    impl View for Blank {
        fn render(&mut self, _frame: &mut ratatui::Frame, _area: Rect, _params: &Params) {}
    }

    /// Counts lifecycle calls so navigation dispatch is observable.
    #[derive(Default)]
    struct Probe {
        enters: Arc<AtomicUsize>,
        exits: Arc<AtomicUsize>,
    }

    impl View for Probe {
        fn on_enter(&mut self, _params: &Params) {
            self.enters.fetch_add(1, Ordering::SeqCst);
        }

        fn on_exit(&mut self) {
            self.exits.fetch_add(1, Ordering::SeqCst);
        }

        fn render(&mut self, _frame: &mut ratatui::Frame, _area: Rect, _params: &Params) {}
    }

    fn ordering_routes() -> Vec<Route> {
        vec![
            Route::new("/", "home", share(Blank)).unwrap(),
            Route::new("/checkout", "checkout", share(Blank)).unwrap(),
            Route::new("/confirm", "confirm", share(Blank)).unwrap(),
            Route::new("/restaurant/:slug", "RestaurantDetails", share(Blank))
                .unwrap()
                .forward_params(),
            Route::lazy("/*", "notFound", || share(Blank)).unwrap(),
        ]
    }

    #[test]
    fn parameterized_route_binds_slug() {
        let router = Router::new(ordering_routes()).unwrap();
        let state = router.navigate("/restaurant/trattoria-roma").unwrap();

        assert_eq!(state.route.as_deref(), Some("RestaurantDetails"));
        assert_eq!(state.params["slug"], "trattoria-roma");
        assert_eq!(state.path, "/restaurant/trattoria-roma");
    }

    #[test]
    fn unknown_path_falls_back_to_catch_all() {
        let router = Router::new(ordering_routes()).unwrap();
        let state = router.navigate("/unknown/path").unwrap();
        assert_eq!(state.route.as_deref(), Some("notFound"));
        assert!(state.params.is_empty());
    }

    #[test]
    fn duplicate_add_route_leaves_table_unchanged() {
        let router = Router::new(ordering_routes()).unwrap();
        let before = router.route_names().unwrap();

        let err = router
            .add_route(Route::new("/checkout/express", "checkout", share(Blank)).unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateName { name } if name == "checkout"));
        assert_eq!(router.route_names().unwrap(), before);
    }

    #[test]
    fn added_route_stays_ahead_of_catch_all() {
        let router = Router::new(ordering_routes()).unwrap();
        router
            .add_route(Route::new("/about", "about", share(Blank)).unwrap())
            .unwrap();

        let names = router.route_names().unwrap();
        assert_eq!(names.last().map(String::as_str), Some("notFound"));
        assert!(names.contains(&"about".to_string()));

        // and it actually matches instead of the catch-all
        let state = router.navigate("/about").unwrap();
        assert_eq!(state.route.as_deref(), Some("about"));
    }

    #[test]
    fn navigation_sequence_has_no_stale_state() {
        let router = Router::new(ordering_routes()).unwrap();

        let first = router.navigate("/").unwrap();
        let second = router.navigate("/checkout").unwrap();
        let third = router.navigate("/").unwrap();

        assert_eq!(first.route.as_deref(), Some("home"));
        assert_eq!(second.route.as_deref(), Some("checkout"));
        assert_eq!(third.route.as_deref(), Some("home"));
        assert_eq!(first, third);
        assert_ne!(first, second);
    }

    #[test]
    fn navigate_is_idempotent() {
        let router = Router::new(ordering_routes()).unwrap();
        let first = router.navigate("/checkout").unwrap();
        let second = router.navigate("/checkout").unwrap();
        assert_eq!(first, second);
        assert_eq!(router.current().unwrap(), first);
    }

    #[test]
    fn subscribers_observe_navigation() {
        let router = Router::new(ordering_routes()).unwrap();
        let mut rx = router.subscribe();

        router.navigate("/checkout").unwrap();
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn exact_literal_wins_over_parameterized() {
        let probe = Probe::default();
        let enters = probe.enters.clone();

        let routes = vec![
            Route::new("/:anything", "wildcard-ish", share(Blank))
                .unwrap()
                .forward_params(),
            Route::new("/checkout", "checkout", share(probe)).unwrap(),
            Route::lazy("/*", "notFound", || share(Blank)).unwrap(),
        ];
        let router = Router::new(routes).unwrap();

        // declared later, but literal beats the parameter tier
        let state = router.navigate("/checkout").unwrap();
        assert_eq!(state.route.as_deref(), Some("checkout"));
        assert_eq!(enters.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn lifecycle_runs_on_exit_and_enter() {
        let home = Probe::default();
        let home_exits = home.exits.clone();
        let checkout = Probe::default();
        let checkout_enters = checkout.enters.clone();

        let routes = vec![
            Route::new("/", "home", share(home)).unwrap(),
            Route::new("/checkout", "checkout", share(checkout)).unwrap(),
            Route::lazy("/*", "notFound", || share(Blank)).unwrap(),
        ];
        let router = Router::new(routes).unwrap();

        router.navigate("/").unwrap();
        router.navigate("/checkout").unwrap();

        assert_eq!(home_exits.load(Ordering::SeqCst), 1);
        assert_eq!(checkout_enters.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn go_back_revisits_previous_path() {
        let router = Router::new(ordering_routes()).unwrap();
        router.navigate("/").unwrap();
        router.navigate("/checkout").unwrap();

        assert!(router.can_go_back());
        assert!(router.go_back().unwrap());
        assert_eq!(router.current().unwrap().route.as_deref(), Some("home"));
        assert!(!router.go_back().unwrap());
    }

    #[test]
    fn rejects_table_without_catch_all() {
        let routes = vec![Route::new("/", "home", share(Blank)).unwrap()];
        assert!(matches!(
            Router::new(routes).unwrap_err(),
            Error::MissingCatchAll
        ));
    }

    #[test]
    fn rejects_catch_all_not_declared_last() {
        let routes = vec![
            Route::lazy("/*", "notFound", || share(Blank)).unwrap(),
            Route::new("/", "home", share(Blank)).unwrap(),
        ];
        assert!(matches!(
            Router::new(routes).unwrap_err(),
            Error::CatchAllNotFinal { .. }
        ));
    }

    #[test]
    fn rejects_duplicate_names_at_startup() {
        let routes = vec![
            Route::new("/", "home", share(Blank)).unwrap(),
            Route::new("/again", "home", share(Blank)).unwrap(),
            Route::lazy("/*", "notFound", || share(Blank)).unwrap(),
        ];
        assert!(matches!(
            Router::new(routes).unwrap_err(),
            Error::DuplicateName { .. }
        ));
    }

    mod dynamic {
        use super::*;
        use crate::source::SlugSource;
        use async_trait::async_trait;

        struct StaticSource(Vec<&'static str>);

        #[async_trait]
        impl SlugSource for StaticSource {
            async fn fetch_slugs(&self) -> Result<Vec<String>> {
                Ok(self.0.iter().map(|s| s.to_string()).collect())
            }
        }

        struct FailingSource;

        #[async_trait]
        impl SlugSource for FailingSource {
            async fn fetch_slugs(&self) -> Result<Vec<String>> {
                error::SourceUnavailableSnafu {
                    message: "connection refused",
                }
                .fail()
            }
        }

        #[tokio::test]
        async fn registers_a_route_per_slug() {
            let router = Router::new(ordering_routes()).unwrap();
            let source = StaticSource(vec!["trattoria-roma", "sushi-kyo"]);

            router
                .register_dynamic_routes(&source, share(Blank))
                .await
                .unwrap();

            let state = router.navigate("/sushi-kyo").unwrap();
            assert_eq!(state.route.as_deref(), Some("Slug-sushi-kyo"));
            assert_eq!(state.params["slug"], "sushi-kyo");
            assert_eq!(
                router.route_names().unwrap().last().map(String::as_str),
                Some("notFound")
            );
        }

        #[tokio::test]
        async fn source_failure_leaves_table_unchanged() {
            let router = Router::new(ordering_routes()).unwrap();
            let before = router.route_names().unwrap();

            router
                .register_dynamic_routes(&FailingSource, share(Blank))
                .await
                .unwrap();

            assert_eq!(router.route_names().unwrap(), before);
        }

        #[tokio::test]
        async fn duplicate_slugs_are_skipped() {
            let router = Router::new(ordering_routes()).unwrap();
            let source = StaticSource(vec!["trattoria-roma", "trattoria-roma"]);

            router
                .register_dynamic_routes(&source, share(Blank))
                .await
                .unwrap();

            let names = router.route_names().unwrap();
            let count = names.iter().filter(|n| *n == "Slug-trattoria-roma").count();
            assert_eq!(count, 1);
        }
    }
}
