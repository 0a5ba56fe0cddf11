//! Leptos application with routing.

use std::sync::Arc;
use std::time::Duration;

use leptos::*;
use leptos_router::*;
use storefront_events::{CartDispatcher, CartStore, InMemoryCart, Notifier, ToastSlot};

use crate::component::{LoadOutcome, ProductsComponent};
use crate::config::ClientConfig;
use crate::fetch::HttpCatalogSource;
use crate::render::{
    CARD_IMAGE_HEIGHT, CardAction, HEADING, PlaceholderBlock, PlaceholderLayout, ProductCard,
    ProductGrid, ProductsView,
};

/// How long a toast stays on screen.
const TOAST_DURATION: Duration = Duration::from_secs(2);

/// Shared cart store, provided to every page through context.
#[derive(Clone)]
pub struct CartContext(pub Arc<dyn CartStore>);

/// Toast notifier backed by a signal rendered by [`Toast`].
#[derive(Clone, Copy)]
struct ToastNotifier {
    slot: RwSignal<ToastSlot>,
}

impl Notifier for ToastNotifier {
    fn success(&self, message: &str) {
        let mut ticket = 0;
        self.slot.update(|s| ticket = s.show(message));

        let slot = self.slot;
        set_timeout(
            move || {
                slot.update(|s| {
                    s.expire(ticket);
                })
            },
            TOAST_DURATION,
        );
    }
}

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    let toast = create_rw_signal(ToastSlot::default());
    provide_context(CartContext(Arc::new(InMemoryCart::new())));
    provide_context(ToastNotifier { slot: toast });

    view! {
        <Router>
            <Toast slot=toast/>
            <Routes>
                <Route path="/" view=Products/>
            </Routes>
        </Router>
    }
}

#[component]
fn Toast(slot: RwSignal<ToastSlot>) -> impl IntoView {
    move || {
        slot.with(|s| s.message().map(str::to_string))
            .map(|text| view! { <div class="toast show position-fixed top-0 end-0 m-3">{text}</div> })
    }
}

/// Product listing page.
#[component]
fn Products() -> impl IntoView {
    let CartContext(cart) = expect_context::<CartContext>();
    let notifier = expect_context::<ToastNotifier>();

    let source = Arc::new(HttpCatalogSource::new(&ClientConfig::default()));
    let dispatcher = CartDispatcher::new(cart, Arc::new(notifier));
    let listing = store_value(ProductsComponent::new(source, dispatcher));

    // Bumped after every state change the view must pick up.
    let revision = create_rw_signal(0u64);
    let refresh = move || revision.update(|r| *r += 1);

    match listing.with_value(|c| c.mount()) {
        Ok(load) => spawn_local(async move {
            if load.await != LoadOutcome::Cancelled {
                refresh();
            }
        }),
        Err(e) => tracing::warn!(error = %e, "listing mounted twice"),
    }

    on_cleanup(move || {
        listing.try_with_value(|c| c.unmount());
    });

    let current = move || {
        revision.get();
        listing.with_value(|c| c.view())
    };

    view! {
        <div class="container my-3 py-3">
            <div class="row">
                <div class="col-12">
                    <h2 class="display-5 text-center">{HEADING}</h2>
                    <hr/>
                </div>
            </div>
            <div class="row justify-content-center">
                {move || match current() {
                    ProductsView::Loading(layout) => loading_view(layout).into_view(),
                    ProductsView::Loaded(grid) => grid_view(grid, listing, refresh).into_view(),
                }}
            </div>
        </div>
    }
}

fn loading_view(layout: PlaceholderLayout) -> impl IntoView {
    layout
        .blocks
        .into_iter()
        .map(|block| match block {
            PlaceholderBlock::Header { height, width } => view! {
                <div class="col-12 py-5 text-center">
                    <div class="skeleton" style=format!("height: {height}px; width: {width}px")></div>
                </div>
            },
            PlaceholderBlock::Card { height } => view! {
                <div class="col-md-4 col-sm-6 col-xs-8 col-12 mb-4">
                    <div class="skeleton" style=format!("height: {height}px")></div>
                </div>
            },
        })
        .collect_view()
}

fn grid_view(
    grid: ProductGrid,
    listing: StoredValue<ProductsComponent>,
    refresh: impl Fn() + Copy + 'static,
) -> impl IntoView {
    let buttons = grid
        .filters
        .into_iter()
        .map(|filter| {
            view! {
                <button
                    class="btn btn-outline-dark btn-sm m-2"
                    on:click=move |_| {
                        listing.with_value(|c| c.apply_filter(filter));
                        refresh();
                    }
                >
                    {filter.label()}
                </button>
            }
        })
        .collect_view();

    let cards = grid
        .cards
        .into_iter()
        .map(|card| card_view(card, listing))
        .collect_view();

    view! {
        <div class="buttons text-center py-5">{buttons}</div>
        {cards}
    }
}

fn card_view(card: ProductCard, listing: StoredValue<ProductsComponent>) -> impl IntoView {
    let id = card.id;

    let action = match card.action {
        CardAction::AddToCart => view! {
            <button
                class="btn btn-dark w-100 mt-auto"
                on:click=move |_| {
                    if let Err(e) = listing.with_value(|c| c.press_card_action(id)) {
                        tracing::warn!(product_id = %id, error = %e, "add to cart ignored");
                    }
                }
            >
                {CardAction::AddToCart.label()}
            </button>
        },
        CardAction::OutOfStock => view! {
            <button class="btn btn-secondary w-100 mt-auto" disabled=true>
                {CardAction::OutOfStock.label()}
            </button>
        },
    };

    let variants = card
        .variants
        .into_iter()
        .map(|variant| view! { <option>{variant}</option> })
        .collect_view();

    view! {
        <div id=id.to_string() class="col-md-4 col-sm-6 col-xs-8 col-12 mb-4">
            <div class="card h-100 shadow-sm text-center">
                <img
                    class="card-img-top p-3"
                    src=card.image
                    alt=card.title.clone()
                    height=CARD_IMAGE_HEIGHT
                    style="object-fit: contain"
                />
                <div class="card-body d-flex flex-column">
                    <h5 class="card-title text-truncate">{card.title}</h5>
                    <p class="card-text small">{card.description}</p>
                    <p class="lead fw-bold">{card.price}</p>
                    <select class="form-select mb-3">{variants}</select>
                    {action}
                </div>
                <div class="card-footer bg-white">
                    <A href=card.detail_href class="btn btn-outline-dark btn-sm">
                        "Buy Now"
                    </A>
                </div>
            </div>
        </div>
    }
}
