use crate::auth::use_auth;
use crate::components::catalog::CatalogPanel;
use crate::components::orders::OrdersPanel;
use crate::controllers::ErrorBanner;
use crate::controllers::catalog::CatalogController;
use crate::controllers::orders::OrderController;
use crate::view_state::ViewState;
use crate::web::history;
use crate::web::route::AppTab;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 商城外壳：页头、标签栏、错误横幅和当前标签页内容
#[component]
pub fn ShopPage() -> impl IntoView {
    let auth = use_auth();
    let view = expect_context::<ViewState>();
    let catalog = expect_context::<CatalogController>();
    let orders = expect_context::<OrderController>();
    let banner = expect_context::<ErrorBanner>();

    // 初始加载
    Effect::new(move |_| {
        if !auth.session().authenticated() {
            return;
        }
        spawn_local(async move { catalog.refresh().await });
        if view.is_active(AppTab::Orders) {
            spawn_local(async move { orders.refresh().await });
        }
    });

    // 浏览器前进/后退时同步标签页
    let _ = window_event_listener(leptos::ev::popstate, move |_| {
        let tab = history::initial_tab();
        spawn_local(async move { view.select(tab).await });
    });

    let select_tab = move |tab: AppTab| {
        history::push_tab(tab);
        spawn_local(async move { view.select(tab).await });
    };

    let username = move || auth.username().unwrap_or_default();
    let on_logout = move |_| auth.logout();

    let tab_class = move |tab: AppTab| {
        if view.active_tab().get() == tab {
            "tab tab-active"
        } else {
            "tab"
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-6">
                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1 gap-2">
                        <a class="btn btn-ghost text-xl">"Storefront"</a>
                        <Show when=move || view.is_admin()>
                            <span class="badge badge-warning">"[ADMIN MODE]"</span>
                        </Show>
                    </div>
                    <div class="flex-none gap-2">
                        <span class="text-sm text-base-content/70">{username}</span>
                        <button on:click=on_logout class="btn btn-outline btn-error">
                            "Logout"
                        </button>
                    </div>
                </div>

                <div role="tablist" class="tabs tabs-boxed bg-base-100 shadow">
                    <a role="tab" class=move || tab_class(AppTab::Products)
                        on:click=move |_| select_tab(AppTab::Products)>
                        {AppTab::Products.label()}
                    </a>
                    <a role="tab" class=move || tab_class(AppTab::Orders)
                        on:click=move |_| select_tab(AppTab::Orders)>
                        {AppTab::Orders.label()}
                    </a>
                </div>

                <Show when=move || banner.get().is_some()>
                    <div role="alert" class="alert alert-error shadow-lg">
                        <span>{move || banner.get().map(|e| e.to_string()).unwrap_or_default()}</span>
                    </div>
                </Show>

                {move || match view.active_tab().get() {
                    AppTab::Products => view! { <CatalogPanel /> }.into_any(),
                    AppTab::Orders => view! { <OrdersPanel /> }.into_any(),
                }}
            </div>
        </div>
    }
}
