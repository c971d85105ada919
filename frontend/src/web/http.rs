//! HTTP 请求封装模块
//!
//! `HttpClient` trait 抽象出一次请求/响应往返，生产环境使用 `web_sys::fetch`，
//! 测试中注入 Mock 实现。

use storefront_shared::protocol::HttpMethod;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// HTTP 错误类型（未收到可用响应）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    /// 请求构建失败
    #[error("请求构建失败: {0}")]
    RequestBuildFailed(String),
    /// 网络请求失败
    #[error("网络错误: {0}")]
    NetworkError(String),
    /// 响应体读取失败
    #[error("响应读取失败: {0}")]
    ResponseReadFailed(String),
}

/// 通用 HTTP 请求结构
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    /// 设置请求头（同名覆盖）
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// 设置 JSON 请求体
    pub fn with_json_body(self, body: String) -> Self {
        let mut req = self.with_header("Content-Type", "application/json");
        req.body = Some(body);
        req
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 检查响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 客户端特性 (Trait)
///
/// (?Send) 因为浏览器环境下的 JS 类型不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError>;
}

// =========================================================
// 实现层: Fetch 客户端 (Production)
// =========================================================

#[derive(Clone, Copy, Debug, Default)]
pub struct FetchHttpClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let headers = Headers::new()
            .map_err(|e| HttpError::RequestBuildFailed(format!("创建 Headers 失败: {:?}", e)))?;

        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| HttpError::RequestBuildFailed(format!("设置 Header 失败: {:?}", e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| HttpError::RequestBuildFailed(format!("{:?}", e)))?;

        let window = web_sys::window()
            .ok_or_else(|| HttpError::NetworkError("无法获取 window 对象".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| HttpError::NetworkError(format!("{:?}", e)))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| HttpError::NetworkError(format!("Response 类型转换失败: {:?}", e)))?;

        let status = response.status();
        let body = read_text(&response).await;
        finish_response(status, body)
    }
}

async fn read_text(response: &Response) -> Result<String, HttpError> {
    let promise = response
        .text()
        .map_err(|e| HttpError::ResponseReadFailed(format!("{:?}", e)))?;
    let text = JsFuture::from(promise)
        .await
        .map_err(|e| HttpError::ResponseReadFailed(format!("{:?}", e)))?;
    Ok(text.as_string().unwrap_or_default())
}

/// 组装响应
///
/// 非 2xx 响应只需要状态码，响应体读取失败时按空响应体处理；
/// 2xx 响应体读取失败则视为未收到可用响应。
fn finish_response(
    status: u16,
    body: Result<String, HttpError>,
) -> Result<HttpResponse, HttpError> {
    match body {
        Ok(body) => Ok(HttpResponse { status, body }),
        Err(e) if !(200..300).contains(&status) => {
            tracing::debug!(status, error = %e, "error response body unreadable, using empty body");
            Ok(HttpResponse {
                status,
                body: String::new(),
            })
        }
        Err(e) => Err(e),
    }
}
