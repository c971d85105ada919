use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

pub mod error;
pub mod protocol;

pub use error::ApiError;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 管理员角色标识（`realm_access.roles` 中的取值）
pub const ADMIN_ROLE: &str = "ADMIN";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// 商品标识，与后端的 `Long` 主键一致
pub type ProductId = i64;

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// 库存数量
    pub quantity: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

/// 新建商品的表单草稿
///
/// 提交成功后重置为 `Default`，提交失败时保留用户输入。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewProductDraft {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: i32,
    pub description: String,
}

impl NewProductDraft {
    /// 仅用于界面体验：名称为空时禁用提交按钮，真正的校验在后端。
    pub fn is_submittable(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// `POST /orders` 的请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLines {
    pub order_lines: Vec<OrderLine>,
}

// =========================================================
// 会话声明 (Token Claims)
// =========================================================

/// 解码后的访问令牌中客户端关心的部分
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub preferred_username: Option<String>,
    #[serde(default)]
    pub realm_access: Option<RealmAccess>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealmAccess {
    #[serde(default)]
    pub roles: Vec<String>,
}

impl TokenClaims {
    pub fn roles(&self) -> &[String] {
        self.realm_access
            .as_ref()
            .map(|access| access.roles.as_slice())
            .unwrap_or_default()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles().iter().any(|r| r == role)
    }
}

/// 后端可能对可选字符串返回 `null`
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
