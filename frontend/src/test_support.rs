//! 测试工具：Mock 身份提供方、HTTP 客户端与对话框

use crate::auth::{AuthError, IdentityProvider};
use crate::web::dialog::Dialogs;
use crate::web::http::{HttpClient, HttpError, HttpRequest, HttpResponse};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use storefront_shared::protocol::HttpMethod;
use storefront_shared::{RealmAccess, TokenClaims};

pub const BASE_URL: &str = "http://localhost:8085";

// =========================================================
// FakeIdentity
// =========================================================

pub struct FakeIdentity {
    authenticated: Cell<bool>,
    token: RefCell<Option<String>>,
    claims: RefCell<Option<TokenClaims>>,
    expired: Cell<bool>,
    next_token: RefCell<Option<String>>,
    fail_refresh: Cell<bool>,
    refresh_calls: RefCell<Vec<u32>>,
    leeway_checks: RefCell<Vec<u32>>,
    logged_out: Cell<bool>,
}

impl FakeIdentity {
    pub fn new(token: &str) -> Self {
        Self {
            authenticated: Cell::new(true),
            token: RefCell::new(Some(token.to_string())),
            claims: RefCell::new(Some(TokenClaims {
                preferred_username: Some("alice".to_string()),
                realm_access: Some(RealmAccess {
                    roles: vec!["USER".to_string()],
                }),
            })),
            expired: Cell::new(false),
            next_token: RefCell::new(None),
            fail_refresh: Cell::new(false),
            refresh_calls: RefCell::new(Vec::new()),
            leeway_checks: RefCell::new(Vec::new()),
            logged_out: Cell::new(false),
        }
    }

    pub fn unauthenticated() -> Self {
        let identity = Self::new("");
        identity.authenticated.set(false);
        *identity.token.borrow_mut() = None;
        *identity.claims.borrow_mut() = None;
        identity
    }

    pub fn with_roles(roles: &[&str]) -> Self {
        let identity = Self::new("tok");
        *identity.claims.borrow_mut() = Some(TokenClaims {
            preferred_username: Some("alice".to_string()),
            realm_access: Some(RealmAccess {
                roles: roles.iter().map(|r| r.to_string()).collect(),
            }),
        });
        identity
    }

    pub fn without_claims() -> Self {
        let identity = Self::new("tok");
        *identity.claims.borrow_mut() = None;
        identity
    }

    /// 标记令牌即将过期，下一次刷新换成 `next_token`
    pub fn expire(&self, next_token: &str) {
        self.expired.set(true);
        *self.next_token.borrow_mut() = Some(next_token.to_string());
    }

    pub fn fail_refresh(&self) {
        self.fail_refresh.set(true);
    }

    pub fn refresh_calls(&self) -> Vec<u32> {
        self.refresh_calls.borrow().clone()
    }

    pub fn leeway_checks(&self) -> Vec<u32> {
        self.leeway_checks.borrow().clone()
    }

    pub fn logged_out(&self) -> bool {
        self.logged_out.get()
    }
}

#[async_trait::async_trait(?Send)]
impl IdentityProvider for FakeIdentity {
    fn authenticated(&self) -> bool {
        self.authenticated.get()
    }

    fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn token_parsed(&self) -> Option<TokenClaims> {
        self.claims.borrow().clone()
    }

    fn is_token_expired(&self, leeway_secs: u32) -> bool {
        self.leeway_checks.borrow_mut().push(leeway_secs);
        self.expired.get()
    }

    async fn update_token(&self, min_validity_secs: u32) -> Result<bool, AuthError> {
        self.refresh_calls.borrow_mut().push(min_validity_secs);
        // 让出一次执行权，模拟真实刷新的挂起
        tokio::task::yield_now().await;

        if self.fail_refresh.get() {
            return Err(AuthError::RefreshFailed("refresh token expired".to_string()));
        }
        if let Some(next) = self.next_token.borrow_mut().take() {
            *self.token.borrow_mut() = Some(next);
        }
        self.expired.set(false);
        Ok(true)
    }

    fn logout(&self) {
        self.logged_out.set(true);
        self.authenticated.set(false);
    }
}

// =========================================================
// MockHttpClient
// =========================================================

enum MockReply {
    Respond(u16, String),
    Unreachable,
}

/// 按 (方法, URL) 预设响应，并记录所有发出的请求
pub struct MockHttpClient {
    responses: RefCell<HashMap<(String, String), MockReply>>,
    pub requests: RefCell<Vec<HttpRequest>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn key(method: HttpMethod, path: &str) -> (String, String) {
        (method.as_str().to_string(), format!("{}{}", BASE_URL, path))
    }

    pub fn mock_response(&self, method: HttpMethod, path: &str, status: u16, body: serde_json::Value) {
        self.responses
            .borrow_mut()
            .insert(Self::key(method, path), MockReply::Respond(status, body.to_string()));
    }

    pub fn mock_empty(&self, method: HttpMethod, path: &str, status: u16) {
        self.responses
            .borrow_mut()
            .insert(Self::key(method, path), MockReply::Respond(status, String::new()));
    }

    /// 模拟连接失败（没有任何响应）
    pub fn mock_unreachable(&self, method: HttpMethod, path: &str) {
        self.responses
            .borrow_mut()
            .insert(Self::key(method, path), MockReply::Unreachable);
    }

    pub fn sent(&self) -> Vec<(HttpMethod, String)> {
        self.requests
            .borrow()
            .iter()
            .map(|r| (r.method, r.url.trim_start_matches(BASE_URL).to_string()))
            .collect()
    }

    pub fn sent_count(&self, method: HttpMethod, path: &str) -> usize {
        self.sent()
            .into_iter()
            .filter(|(m, p)| *m == method && p == path)
            .count()
    }

    pub fn last_body(&self) -> Option<serde_json::Value> {
        self.requests
            .borrow()
            .iter()
            .rev()
            .find_map(|r| r.body.as_deref())
            .and_then(|b| serde_json::from_str(b).ok())
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let key = (req.method.as_str().to_string(), req.url.clone());
        self.requests.borrow_mut().push(req);
        // 请求在途时让出一次执行权，测试可在此期间观察或修改状态
        tokio::task::yield_now().await;

        match self.responses.borrow().get(&key) {
            Some(MockReply::Respond(status, body)) => Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            }),
            Some(MockReply::Unreachable) => {
                Err(HttpError::NetworkError("connection refused".to_string()))
            }
            None => Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            }),
        }
    }
}

// =========================================================
// ScriptedDialogs
// =========================================================

pub struct ScriptedDialogs {
    confirm_answer: Cell<bool>,
    pub prompts: RefCell<Vec<String>>,
    pub acknowledgments: RefCell<Vec<String>>,
}

impl ScriptedDialogs {
    pub fn accepting() -> Self {
        Self {
            confirm_answer: Cell::new(true),
            prompts: RefCell::new(Vec::new()),
            acknowledgments: RefCell::new(Vec::new()),
        }
    }

    pub fn declining() -> Self {
        let dialogs = Self::accepting();
        dialogs.confirm_answer.set(false);
        dialogs
    }

    pub fn acknowledged(&self) -> Vec<String> {
        self.acknowledgments.borrow().clone()
    }
}

impl Dialogs for ScriptedDialogs {
    fn confirm(&self, message: &str) -> bool {
        self.prompts.borrow_mut().push(message.to_string());
        self.confirm_answer.get()
    }

    fn acknowledge(&self, message: &str) {
        self.acknowledgments.borrow_mut().push(message.to_string());
    }
}
