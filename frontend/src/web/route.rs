//! 标签页定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。

use std::fmt::Display;

/// 应用标签页
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppTab {
    /// 商品目录 (默认)
    #[default]
    Products,
    /// 订单列表
    Orders,
}

impl AppTab {
    /// 将 URL path 解析为标签页，未知路径回落到商品目录
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/orders" => Self::Orders,
            _ => Self::Products,
        }
    }

    /// 获取标签页对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Products => "/products",
            Self::Orders => "/orders",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Products => "Products",
            Self::Orders => "My Orders",
        }
    }
}

impl Display for AppTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
