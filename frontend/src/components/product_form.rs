//! 新建商品表单（仅管理员可见）
//!
//! 输入直接绑定到控制器持有的草稿信号上，提交失败时草稿保留，
//! 成功后由控制器重置。

use crate::controllers::catalog::CatalogController;
use leptos::prelude::*;
use leptos::task::spawn_local;
use rust_decimal::Decimal;
use std::str::FromStr;

#[component]
pub fn ProductForm() -> impl IntoView {
    let catalog = expect_context::<CatalogController>();
    let draft = catalog.draft();
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        set_submitting.set(true);
        spawn_local(async move {
            let _ = catalog.add_product().await;
            set_submitting.set(false);
        });
    };

    let can_submit = move || draft.with(|d| d.is_submittable()) && !submitting.get();

    view! {
        <div class="card bg-base-100 shadow-xl">
            <form class="card-body" on:submit=on_submit>
                <h3 class="card-title">"Add Product"</h3>

                <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    <div class="form-control">
                        <label for="p_name" class="label">
                            <span class="label-text">"Name"</span>
                        </label>
                        <input id="p_name" required
                            type="text"
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                draft.update(|d| d.name = value);
                            }
                            prop:value=move || draft.with(|d| d.name.clone())
                            class="input input-bordered w-full"
                        />
                    </div>
                    <div class="form-control">
                        <label for="p_price" class="label">
                            <span class="label-text">"Price"</span>
                        </label>
                        <input id="p_price"
                            type="number" min="0" step="0.01"
                            on:input=move |ev| {
                                if let Ok(price) = Decimal::from_str(&event_target_value(&ev)) {
                                    draft.update(|d| d.price = price);
                                }
                            }
                            prop:value=move || draft.with(|d| d.price.to_string())
                            class="input input-bordered w-full"
                        />
                    </div>
                    <div class="form-control">
                        <label for="p_quantity" class="label">
                            <span class="label-text">"Quantity"</span>
                        </label>
                        <input id="p_quantity"
                            type="number" min="0"
                            on:input=move |ev| {
                                if let Ok(quantity) = event_target_value(&ev).parse::<i32>() {
                                    draft.update(|d| d.quantity = quantity);
                                }
                            }
                            prop:value=move || draft.with(|d| d.quantity.to_string())
                            class="input input-bordered w-full"
                        />
                    </div>
                </div>

                <div class="form-control">
                    <label for="p_description" class="label">
                        <span class="label-text">"Description"</span>
                    </label>
                    <textarea id="p_description"
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.description = value);
                        }
                        prop:value=move || draft.with(|d| d.description.clone())
                        class="textarea textarea-bordered w-full"
                    ></textarea>
                </div>

                <div class="card-actions justify-end">
                    <button type="submit" class="btn btn-primary" disabled=move || !can_submit()>
                        <Show when=move || submitting.get()>
                            <span class="loading loading-spinner"></span>
                        </Show>
                        "Add Product"
                    </button>
                </div>
            </form>
        </div>
    }
}
