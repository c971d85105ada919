//! 认证模块
//!
//! - `IdentityProvider`: 外部身份提供方（浏览器中的 Keycloak 适配器）的契约
//! - `AuthGate`: 每个外发请求的令牌新鲜度检查与 Bearer 头注入
//! - `AuthContext`: 通过 Leptos Context 共享的会话句柄

use crate::web::http::HttpRequest;
use futures::lock::Mutex;
use leptos::prelude::*;
use std::rc::Rc;
use storefront_shared::{HEADER_AUTHORIZATION, TokenClaims};
use thiserror::Error;

// =========================================================
// 常量定义
// =========================================================

/// 距离过期不足该秒数即视为需要刷新
pub const TOKEN_EXPIRY_LEEWAY_SECS: u32 = 5;
/// 刷新时要求的最短剩余有效期
pub const TOKEN_MIN_VALIDITY_SECS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("identity provider initialization failed: {0}")]
    InitFailed(String),
    #[error("token refresh failed: {0}")]
    RefreshFailed(String),
    #[error("session has no access token")]
    MissingToken,
}

/// 身份提供方契约
///
/// 会话的生命周期完全由身份提供方管理，客户端只在每次渲染和每次请求时读取。
#[async_trait::async_trait(?Send)]
pub trait IdentityProvider {
    fn authenticated(&self) -> bool;
    fn token(&self) -> Option<String>;
    fn token_parsed(&self) -> Option<TokenClaims>;
    fn is_token_expired(&self, leeway_secs: u32) -> bool;
    /// 刷新令牌，返回是否真的发生了刷新
    async fn update_token(&self, min_validity_secs: u32) -> Result<bool, AuthError>;
    fn logout(&self);
}

// =========================================================
// AuthGate
// =========================================================

/// 请求装饰器：确保请求携带有效的 Bearer 令牌
///
/// 令牌即将过期时先刷新并等待完成，刷新失败则整个请求失败、不发出。
/// 并发的刷新尝试通过异步锁串行化，拿到锁后重新检查新鲜度，
/// 因此同一时刻只有一个刷新在进行。
pub struct AuthGate {
    session: Rc<dyn IdentityProvider>,
    refresh_lock: Mutex<()>,
}

impl AuthGate {
    pub fn new(session: Rc<dyn IdentityProvider>) -> Self {
        Self {
            session,
            refresh_lock: Mutex::new(()),
        }
    }

    pub async fn authorize(&self, req: HttpRequest) -> Result<HttpRequest, AuthError> {
        self.ensure_fresh().await?;

        let token = self.session.token().ok_or(AuthError::MissingToken)?;
        Ok(req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token)))
    }

    async fn ensure_fresh(&self) -> Result<(), AuthError> {
        if !self.session.is_token_expired(TOKEN_EXPIRY_LEEWAY_SECS) {
            return Ok(());
        }

        let _guard = self.refresh_lock.lock().await;

        // 等锁期间可能已有其他请求完成了刷新
        if !self.session.is_token_expired(TOKEN_EXPIRY_LEEWAY_SECS) {
            tracing::debug!("token refreshed by a concurrent request");
            return Ok(());
        }

        tracing::debug!(
            min_validity = TOKEN_MIN_VALIDITY_SECS,
            "access token near expiry, refreshing"
        );
        match self.session.update_token(TOKEN_MIN_VALIDITY_SECS).await {
            Ok(refreshed) => {
                tracing::debug!(refreshed, "token refresh completed");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "token refresh failed, request dropped");
                Err(e)
            }
        }
    }
}

// =========================================================
// AuthContext
// =========================================================

/// 认证上下文
///
/// 会话句柄不是 `Send` 的，存放在本地存储的 `StoredValue` 中，
/// 上下文本身保持 `Copy`，方便在闭包之间传递。
#[derive(Clone, Copy)]
pub struct AuthContext {
    session: StoredValue<Rc<dyn IdentityProvider>, LocalStorage>,
}

impl AuthContext {
    pub fn new(session: Rc<dyn IdentityProvider>) -> Self {
        Self {
            session: StoredValue::new_local(session),
        }
    }

    pub fn session(&self) -> Rc<dyn IdentityProvider> {
        self.session.get_value()
    }

    pub fn username(&self) -> Option<String> {
        self.session
            .with_value(|s| s.token_parsed())
            .and_then(|claims| claims.preferred_username)
    }

    /// 注销交给身份提供方，页面会被重定向离开
    pub fn logout(&self) {
        tracing::info!("logging out");
        self.session.with_value(|s| s.logout());
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
