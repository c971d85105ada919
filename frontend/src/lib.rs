//! 商城前端应用
//!
//! 采用 Context-Driven 架构：
//! - `auth`: 身份提供方契约、请求令牌守卫、认证上下文
//! - `api`: 经过令牌守卫的类型化后端客户端
//! - `cart` / `controllers` / `view_state`: 客户端状态与业务流程
//! - `components`: UI 组件层

pub mod api;
pub mod auth;
pub mod cart;
pub mod config;
pub mod controllers;
pub mod view_state;
mod components {
    pub mod catalog;
    pub mod orders;
    pub mod product_form;
    pub mod shop;
}
mod serde_helper;
#[cfg(test)]
mod test_support;

// 浏览器原生 API 封装模块
pub mod web {
    pub mod dialog;
    pub mod history;
    pub mod http;
    pub mod keycloak;
    pub mod route;
}

use crate::api::StorefrontApi;
use crate::auth::{AuthContext, AuthGate, IdentityProvider};
use crate::cart::CartStore;
use crate::components::shop::ShopPage;
use crate::config::AppConfig;
use crate::controllers::ErrorBanner;
use crate::controllers::catalog::CatalogController;
use crate::controllers::orders::OrderController;
use crate::view_state::ViewState;
use crate::web::dialog::{BrowserDialogs, Dialogs};
use crate::web::http::FetchHttpClient;

use leptos::prelude::*;
use std::rc::Rc;

#[component]
pub fn App(session: Rc<dyn IdentityProvider>, config: AppConfig) -> impl IntoView {
    // 1. 认证上下文与请求管线
    let auth_ctx = AuthContext::new(session.clone());
    provide_context(auth_ctx);

    let gate = Rc::new(AuthGate::new(session.clone()));
    let api = StorefrontApi::new(&config.api_base_url, Rc::new(FetchHttpClient), gate);
    let dialogs: Rc<dyn Dialogs> = Rc::new(BrowserDialogs);

    // 2. 共享状态：购物车与错误横幅
    let cart = RwSignal::new(CartStore::new());
    let banner = ErrorBanner::new();

    // 3. 控制器
    let catalog = CatalogController::new(api.clone(), dialogs.clone(), cart, banner);
    let active_tab = RwSignal::new(web::history::initial_tab());
    let orders = OrderController::new(api, dialogs, cart, banner, active_tab);
    let view = ViewState::new(active_tab, session, orders);

    provide_context(cart);
    provide_context(banner);
    provide_context(catalog);
    provide_context(orders);
    provide_context(view);

    view! { <ShopPage /> }
}
