//! Restaurant-ordering front end built on the gusto-nav router.

mod config;
mod model;
mod pages;

use gusto_nav::{share, Application, Entity, HttpSlugSource, Route, Router};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::model::Cart;
use crate::pages::{
    CheckoutPage, ConfirmPage, DynamicPage, HomePage, NotFoundPage, RestaurantPage,
};

fn main() -> anyhow::Result<()> {
    // Log to stderr so the alternate screen stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gusto=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env();
    let cart = Entity::new(Cart::default());
    let catalog = model::catalog();

    let routes = vec![
        Route::new(
            "/",
            "home",
            share(HomePage::new(catalog.clone(), cart.clone())),
        )?,
        Route::new(
            "/checkout",
            "checkout",
            share(CheckoutPage::new(cart.clone())),
        )?,
        Route::new("/confirm", "confirm", share(ConfirmPage::new(cart.clone())))?,
        Route::new(
            "/restaurant/:slug",
            "RestaurantDetails",
            share(RestaurantPage::new(catalog, cart)),
        )?
        .forward_params(),
        Route::lazy("/*", "notFound", || share(NotFoundPage::default()))?,
    ];

    let router = Router::new(routes)?;
    router.navigate("/")?;

    let registration_router = router.clone();
    Application::new().run(router, move |cx| {
        if let Some(base_url) = config.api_base_url {
            let source = HttpSlugSource::new(base_url)?;
            let router = registration_router;
            cx.spawn(move |cx| async move {
                if let Err(err) = router
                    .register_dynamic_routes(&source, share(DynamicPage::default()))
                    .await
                {
                    warn!(error = %err, "dynamic route registration failed");
                }
                // the original forced a re-render once registration finished
                cx.refresh();
            });
        }
        Ok(())
    })
}
