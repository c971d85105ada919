//! History API 封装
//!
//! 所有对 window.history / window.location 的操作都集中在此模块。

use super::route::AppTab;
use wasm_bindgen::prelude::*;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 从当前 URL 解析初始标签页
pub fn initial_tab() -> AppTab {
    AppTab::from_path(&current_path())
}

/// 推送 History 状态，使 URL 与激活的标签页一致
pub fn push_tab(tab: AppTab) {
    if current_path() == tab.to_path() {
        return;
    }
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(tab.to_path()));
        }
    }
}
