use crate::controllers::orders::OrderController;
use leptos::prelude::*;

/// 订单列表页
#[component]
pub fn OrdersPanel() -> impl IntoView {
    let orders = expect_context::<OrderController>();
    let list = orders.orders();
    let loading = move || orders.status().get().is_loading();

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="p-6 pb-2">
                    <h3 class="card-title">"My Orders"</h3>
                </div>
                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"ID"</th>
                                <th>"Date"</th>
                                <th>"Status"</th>
                                <th>"Total"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || loading() && list.with(|o| o.is_empty())>
                                <tr>
                                    <td colspan="4" class="text-center py-8">
                                        <span class="loading loading-dots loading-md"></span>
                                    </td>
                                </tr>
                            </Show>
                            <Show when=move || !loading() && list.with(|o| o.is_empty())>
                                <tr>
                                    <td colspan="4" class="text-center py-8 text-base-content/50">
                                        "No orders yet."
                                    </td>
                                </tr>
                            </Show>
                            <For
                                each=move || list.get()
                                key=|order| order.id
                                children=|order| {
                                    view! {
                                        <tr>
                                            <td>{order.id}</td>
                                            <td>{order.date}</td>
                                            <td><span class="badge badge-ghost">{order.status}</span></td>
                                            <td>{format!("${}", order.total_amount)}</td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}
