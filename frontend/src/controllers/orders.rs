use super::{ErrorBanner, LoadStatus};
use crate::api::StorefrontApi;
use crate::cart::CartStore;
use crate::web::dialog::Dialogs;
use crate::web::route::AppTab;
use leptos::prelude::*;
use std::rc::Rc;
use storefront_shared::{ApiError, Order};

pub const ORDER_PLACED: &str = "Order placed successfully!";
pub const ORDER_FAILED: &str = "Failed to place order";

/// `place_order` 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOrder {
    /// 购物车为空，没有发送请求
    EmptyCart,
    Placed,
}

#[derive(Clone, Copy)]
pub struct OrderController {
    api: StoredValue<StorefrontApi, LocalStorage>,
    dialogs: StoredValue<Rc<dyn Dialogs>, LocalStorage>,
    orders: RwSignal<Vec<Order>>,
    status: RwSignal<LoadStatus>,
    cart: RwSignal<CartStore>,
    banner: ErrorBanner,
    /// 与 `ViewState` 共享的当前标签页
    active_tab: RwSignal<AppTab>,
}

impl OrderController {
    pub fn new(
        api: StorefrontApi,
        dialogs: Rc<dyn Dialogs>,
        cart: RwSignal<CartStore>,
        banner: ErrorBanner,
        active_tab: RwSignal<AppTab>,
    ) -> Self {
        Self {
            api: StoredValue::new_local(api),
            dialogs: StoredValue::new_local(dialogs),
            orders: RwSignal::new(Vec::new()),
            status: RwSignal::new(LoadStatus::Idle),
            cart,
            banner,
            active_tab,
        }
    }

    pub fn orders(&self) -> RwSignal<Vec<Order>> {
        self.orders
    }

    pub fn status(&self) -> RwSignal<LoadStatus> {
        self.status
    }

    pub async fn refresh(&self) {
        self.status.set(LoadStatus::Loading);

        let api = self.api.get_value();
        match api.list_orders().await {
            Ok(orders) => {
                tracing::debug!(count = orders.len(), "orders loaded");
                self.orders.set(orders);
                self.status.set(LoadStatus::Loaded);
                self.banner.clear();
            }
            Err(e) => {
                let error = e.classify();
                tracing::warn!(error = %e, status = ?error.status_code(), "failed to load orders");
                self.status.set(LoadStatus::Error(error.clone()));
                self.banner.show(error);
            }
        }
    }

    /// 提交购物车
    ///
    /// 成功后清空购物车，若此时订单页处于激活状态则刷新订单列表
    /// （在请求完成后判断，提交期间切换到订单页也会看到新订单）；
    /// 失败时购物车保持不变，方便用户重试。
    pub async fn place_order(&self) -> Result<PlaceOrder, ApiError> {
        let lines = self.cart.with_untracked(|cart| cart.to_order_lines());
        if lines.order_lines.is_empty() {
            return Ok(PlaceOrder::EmptyCart);
        }

        let api = self.api.get_value();
        match api.create_order(&lines).await {
            Ok(()) => {
                tracing::info!(lines = lines.order_lines.len(), "order placed");
                self.acknowledge(ORDER_PLACED);
                self.cart.update(|cart| cart.clear());
                if self.active_tab.get_untracked() == AppTab::Orders {
                    self.refresh().await;
                }
                Ok(PlaceOrder::Placed)
            }
            Err(e) => {
                let error = e.classify();
                tracing::warn!(error = %e, status = ?error.status_code(), "failed to place order");
                self.banner.show(error.clone());
                self.acknowledge(ORDER_FAILED);
                Err(error)
            }
        }
    }

    fn acknowledge(&self, message: &str) {
        self.dialogs.with_value(|d| d.acknowledge(message));
    }
}
