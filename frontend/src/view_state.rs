//! 视图状态
//!
//! 持有当前激活的标签页，并从会话的角色声明派生管理员标志。
//! `is_admin` 只决定是否渲染管理员入口（新建表单、删除按钮、徽章），
//! 不构成任何授权，后端必须独立校验特权接口。

use crate::auth::IdentityProvider;
use crate::controllers::orders::OrderController;
use crate::web::route::AppTab;
use leptos::prelude::*;
use std::rc::Rc;
use storefront_shared::ADMIN_ROLE;

/// 会话是否带有管理员角色；未认证或没有解析后的令牌时为 false
pub fn is_admin(session: &dyn IdentityProvider) -> bool {
    session.authenticated()
        && session
            .token_parsed()
            .is_some_and(|claims| claims.has_role(ADMIN_ROLE))
}

#[derive(Clone, Copy)]
pub struct ViewState {
    active_tab: RwSignal<AppTab>,
    session: StoredValue<Rc<dyn IdentityProvider>, LocalStorage>,
    orders: OrderController,
}

impl ViewState {
    /// `active_tab` 与 `OrderController` 共享同一个信号
    pub fn new(
        active_tab: RwSignal<AppTab>,
        session: Rc<dyn IdentityProvider>,
        orders: OrderController,
    ) -> Self {
        Self {
            active_tab,
            session: StoredValue::new_local(session),
            orders,
        }
    }

    pub fn active_tab(&self) -> RwSignal<AppTab> {
        self.active_tab
    }

    pub fn is_active(&self, tab: AppTab) -> bool {
        self.active_tab.get_untracked() == tab
    }

    /// 切换标签页；切到订单页时立即刷新订单列表
    pub async fn select(&self, tab: AppTab) {
        self.active_tab.set(tab);
        if tab == AppTab::Orders {
            self.orders.refresh().await;
        }
    }

    pub fn is_admin(&self) -> bool {
        self.session.with_value(|s| is_admin(s.as_ref()))
    }
}
