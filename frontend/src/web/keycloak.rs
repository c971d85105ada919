//! Keycloak 浏览器适配器绑定
//!
//! `keycloak.js` 以全局 `Keycloak` 类的形式由 index.html 加载，
//! 此模块通过 `wasm_bindgen` 调用它，并实现 `IdentityProvider`。

use crate::auth::{AuthError, IdentityProvider};
use crate::config::KeycloakConfig;
use crate::serde_helper;
use serde::Serialize;
use storefront_shared::TokenClaims;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Keycloak)]
    type KeycloakJs;

    #[wasm_bindgen(constructor, js_class = "Keycloak", catch)]
    fn new(config: &JsValue) -> Result<KeycloakJs, JsValue>;

    #[wasm_bindgen(method)]
    fn init(this: &KeycloakJs, options: &JsValue) -> js_sys::Promise;

    #[wasm_bindgen(method, getter)]
    fn authenticated(this: &KeycloakJs) -> Option<bool>;

    #[wasm_bindgen(method, getter)]
    fn token(this: &KeycloakJs) -> Option<String>;

    #[wasm_bindgen(method, getter, js_name = tokenParsed)]
    fn token_parsed(this: &KeycloakJs) -> JsValue;

    // 没有令牌时会抛出异常
    #[wasm_bindgen(method, catch, js_name = isTokenExpired)]
    fn is_token_expired(this: &KeycloakJs, min_validity: u32) -> Result<bool, JsValue>;

    #[wasm_bindgen(method, js_name = updateToken)]
    fn update_token(this: &KeycloakJs, min_validity: u32) -> js_sys::Promise;

    #[wasm_bindgen(method)]
    fn logout(this: &KeycloakJs) -> js_sys::Promise;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InitOptions {
    on_load: &'static str,
    pkce_method: &'static str,
    check_login_iframe: bool,
}

/// 浏览器中的 Keycloak 会话
pub struct KeycloakSession {
    inner: KeycloakJs,
}

impl KeycloakSession {
    pub fn new(config: &KeycloakConfig) -> Result<Self, AuthError> {
        let config =
            serde_helper::to_value(config).map_err(|e| AuthError::InitFailed(e.to_string()))?;
        let inner =
            KeycloakJs::new(&config).map_err(|e| AuthError::InitFailed(format!("{:?}", e)))?;
        Ok(Self { inner })
    }

    /// 初始化适配器；未登录时浏览器会被重定向到登录页
    pub async fn init(&self) -> Result<bool, AuthError> {
        let options = InitOptions {
            on_load: "login-required",
            pkce_method: "S256",
            check_login_iframe: false,
        };
        let options =
            serde_helper::to_value(&options).map_err(|e| AuthError::InitFailed(e.to_string()))?;
        let authenticated = JsFuture::from(self.inner.init(&options))
            .await
            .map_err(|e| AuthError::InitFailed(format!("{:?}", e)))?;
        Ok(authenticated.as_bool().unwrap_or(false))
    }
}

#[async_trait::async_trait(?Send)]
impl IdentityProvider for KeycloakSession {
    fn authenticated(&self) -> bool {
        self.inner.authenticated().unwrap_or(false)
    }

    fn token(&self) -> Option<String> {
        self.inner.token()
    }

    fn token_parsed(&self) -> Option<TokenClaims> {
        serde_helper::from_value(self.inner.token_parsed()).ok()
    }

    fn is_token_expired(&self, leeway_secs: u32) -> bool {
        self.inner.is_token_expired(leeway_secs).unwrap_or(true)
    }

    async fn update_token(&self, min_validity_secs: u32) -> Result<bool, AuthError> {
        let refreshed = JsFuture::from(self.inner.update_token(min_validity_secs))
            .await
            .map_err(|e| {
                AuthError::RefreshFailed(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
            })?;
        Ok(refreshed.as_bool().unwrap_or(false))
    }

    fn logout(&self) {
        // 返回的 Promise 在重定向前完成，无需等待
        let _ = self.inner.logout();
    }
}
