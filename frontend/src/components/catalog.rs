//! 商品目录页
//!
//! 管理员表单、商品卡片网格和购物车面板。

use crate::cart::CartStore;
use crate::components::product_form::ProductForm;
use crate::controllers::catalog::CatalogController;
use crate::controllers::orders::OrderController;
use crate::view_state::ViewState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront_shared::Product;

#[component]
pub fn CatalogPanel() -> impl IntoView {
    let catalog = expect_context::<CatalogController>();
    let view = expect_context::<ViewState>();
    let products = catalog.products();
    let loading = move || catalog.status().get().is_loading();

    view! {
        <div class="grid grid-cols-1 lg:grid-cols-4 gap-6">
            <div class="lg:col-span-3 space-y-6">
                <Show when=move || view.is_admin()>
                    <ProductForm />
                </Show>

                <Show when=move || products.with(|p| p.is_empty()) && !loading()>
                    <div class="text-center py-8 text-base-content/50">"No products yet."</div>
                </Show>

                <div class="grid grid-cols-1 md:grid-cols-2 xl:grid-cols-3 gap-4">
                    <For
                        each=move || products.get()
                        key=|p| p.id
                        children=move |product| view! { <ProductCard product=product /> }
                    />
                </div>
            </div>

            <CartPanel />
        </div>
    }
}

#[component]
fn ProductCard(product: Product) -> impl IntoView {
    let catalog = expect_context::<CatalogController>();
    let view = expect_context::<ViewState>();
    let cart = expect_context::<RwSignal<CartStore>>();
    let id = product.id;
    let in_cart = move || cart.with(|c| c.quantity(id));

    let on_delete = move |_| {
        spawn_local(async move {
            // 失败已写入错误横幅
            let _ = catalog.delete_product(id).await;
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h3 class="card-title">
                    {product.name}
                    <Show when=move || { in_cart() > 0 }>
                        <span class="badge badge-secondary">{move || format!("In cart: {}", in_cart())}</span>
                    </Show>
                </h3>
                <p class="text-base-content/70 text-sm">{product.description}</p>
                <div class="flex justify-between text-sm">
                    <span class="font-bold">{format!("${}", product.price)}</span>
                    <span class="text-base-content/60">{format!("Stock: {}", product.quantity)}</span>
                </div>
                <div class="card-actions justify-end">
                    <button class="btn btn-primary btn-sm" on:click=move |_| catalog.add_to_cart(id)>
                        "Add to Cart"
                    </button>
                    <Show when=move || view.is_admin()>
                        <button class="btn btn-error btn-outline btn-sm" on:click=on_delete>
                            "Delete"
                        </button>
                    </Show>
                </div>
            </div>
        </div>
    }
}

#[component]
fn CartPanel() -> impl IntoView {
    let cart = expect_context::<RwSignal<CartStore>>();
    let orders = expect_context::<OrderController>();
    let (placing, set_placing) = signal(false);

    let on_place = move |_| {
        set_placing.set(true);
        spawn_local(async move {
            let _ = orders.place_order().await;
            set_placing.set(false);
        });
    };

    view! {
        <Show when=move || !cart.with(|c| c.is_empty())>
            <div class="card bg-base-100 shadow-xl h-fit">
                <div class="card-body">
                    <h3 class="card-title">"Cart"</h3>
                    <ul class="space-y-1 text-sm">
                        <For
                            each=move || cart.with(|c| c.lines())
                            key=|line| (line.product_id, line.quantity)
                            children=|line| {
                                view! {
                                    <li>{format!("Product ID {}: {}", line.product_id, line.quantity)}</li>
                                }
                            }
                        />
                    </ul>
                    <button class="btn btn-success w-full mt-2" on:click=on_place disabled=move || placing.get()>
                        <Show when=move || placing.get()>
                            <span class="loading loading-spinner"></span>
                        </Show>
                        "Place Order"
                    </button>
                </div>
            </div>
        </Show>
    }
}
