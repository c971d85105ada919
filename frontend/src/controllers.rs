//! 页面控制器
//!
//! 控制器只持有 `Copy` 的信号句柄和本地存储的 `StoredValue`，
//! 可以直接 move 进事件闭包和 `spawn_local` 中。
//! 所有失败都在控制器内部分类并写入错误横幅，不再向上抛出。

pub mod catalog;
pub mod orders;

use leptos::prelude::*;
use storefront_shared::ApiError;

/// 列表加载状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error(ApiError),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }
}

/// 最近一次失败的错误横幅（全局唯一，新错误覆盖旧错误）
#[derive(Clone, Copy)]
pub struct ErrorBanner(RwSignal<Option<ApiError>>);

impl ErrorBanner {
    pub fn new() -> Self {
        Self(RwSignal::new(None))
    }

    pub fn show(&self, error: ApiError) {
        self.0.set(Some(error));
    }

    pub fn clear(&self) {
        self.0.set(None);
    }

    /// 当前错误（响应式读取）
    pub fn get(&self) -> Option<ApiError> {
        self.0.get()
    }

    pub fn get_untracked(&self) -> Option<ApiError> {
        self.0.get_untracked()
    }
}

impl Default for ErrorBanner {
    fn default() -> Self {
        Self::new()
    }
}
