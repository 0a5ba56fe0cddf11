//! Terminal host for the product listing.

#[cfg(not(target_arch = "wasm32"))]
use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use anyhow::Context;
#[cfg(not(target_arch = "wasm32"))]
use storefront_client::{ClientConfig, HttpCatalogSource, LoadOutcome, ProductsComponent};
#[cfg(not(target_arch = "wasm32"))]
use storefront_events::{CartDispatcher, InMemoryCart, TracingNotifier};

/// Optional category filter applied after the catalog loads.
#[cfg(not(target_arch = "wasm32"))]
const CATEGORY_ENV: &str = "STOREFRONT_CATEGORY";

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storefront_observability::init();

    let config = ClientConfig::from_env().context("failed to read storefront configuration")?;
    tracing::info!(url = %config.products_url(), "starting storefront listing");

    let source = Arc::new(HttpCatalogSource::new(&config));
    let dispatcher = CartDispatcher::new(Arc::new(InMemoryCart::new()), Arc::new(TracingNotifier));
    let component = ProductsComponent::new(source, dispatcher);

    let load = component.spawn_mount().context("failed to mount listing")?;

    let outcome = tokio::select! {
        outcome = load => outcome.context("listing load task panicked")?,
        _ = tokio::signal::ctrl_c() => {
            component.unmount();
            LoadOutcome::Cancelled
        }
    };

    match &outcome {
        LoadOutcome::Loaded { count } => tracing::info!(count, "listing ready"),
        LoadOutcome::Failed(e) => tracing::warn!(error = %e, "listing shows an empty catalog"),
        LoadOutcome::Cancelled => return Ok(()),
    }

    if let Ok(category) = std::env::var(CATEGORY_ENV) {
        component.filter_by_category(category.trim());
    }

    println!("{}", component.view());
    component.unmount();

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
