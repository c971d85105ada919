use crate::auth::{AuthError, AuthGate};
use crate::web::http::{HttpClient, HttpError, HttpRequest};
use std::rc::Rc;
use storefront_shared::protocol::{
    ApiRequest, DeleteProductRequest, ListOrdersRequest, ListProductsRequest,
};
use storefront_shared::{ApiError, NewProductDraft, Order, OrderLines, Product, ProductId};
use thiserror::Error;

/// 一次 API 调用的失败原因（未分类）
///
/// 调用方可以直接匹配具体原因，界面层则通过 `classify` 使用统一的 `ApiError`。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// 令牌刷新失败，请求未发出
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// 未收到响应
    #[error(transparent)]
    Http(#[from] HttpError),
    /// 非 2xx 响应
    #[error("unexpected status {0}")]
    Status(u16),
    /// 2xx 响应但响应体不符合约定
    #[error("failed to decode response ({status}): {message}")]
    Decode { status: u16, message: String },
}

impl RequestError {
    pub fn classify(&self) -> ApiError {
        match self {
            RequestError::Status(status) => {
                ApiError::from_status(*status).unwrap_or(ApiError::ServerError(*status))
            }
            RequestError::Decode { status, .. } => ApiError::ServerError(*status),
            RequestError::Auth(e) => ApiError::network(e.to_string()),
            RequestError::Http(e) => ApiError::network(e.to_string()),
        }
    }
}

impl From<RequestError> for ApiError {
    fn from(e: RequestError) -> Self {
        e.classify()
    }
}

/// 后端商品/订单 API 的类型化客户端
///
/// 每个操作恰好一次往返，经过 `AuthGate`，不缓存、不重试。
#[derive(Clone)]
pub struct StorefrontApi {
    base_url: String,
    http: Rc<dyn HttpClient>,
    gate: Rc<AuthGate>,
}

impl StorefrontApi {
    pub fn new(base_url: &str, http: Rc<dyn HttpClient>, gate: Rc<AuthGate>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            http,
            gate,
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    // 核心泛型方法
    async fn execute<T: ApiRequest>(&self, req: &T) -> Result<T::Response, RequestError> {
        let mut http_req = HttpRequest::new(self.url(&req.path()), T::METHOD);
        if T::METHOD.has_body() {
            let body = serde_json::to_string(req)
                .map_err(|e| HttpError::RequestBuildFailed(e.to_string()))?;
            http_req = http_req.with_json_body(body);
        }

        let http_req = self.gate.authorize(http_req).await?;
        tracing::debug!(method = T::METHOD.as_str(), url = %http_req.url, "sending request");

        let res = self.http.send(http_req).await?;
        if !res.ok() {
            return Err(RequestError::Status(res.status));
        }

        // DELETE 等可能返回空响应体
        let body = if res.body.trim().is_empty() {
            "null"
        } else {
            res.body.as_str()
        };
        serde_json::from_str(body).map_err(|e| RequestError::Decode {
            status: res.status,
            message: e.to_string(),
        })
    }

    /// 获取商品列表
    pub async fn list_products(&self) -> Result<Vec<Product>, RequestError> {
        self.execute(&ListProductsRequest).await
    }

    /// 新建商品（管理员）
    pub async fn create_product(&self, draft: &NewProductDraft) -> Result<(), RequestError> {
        self.execute(draft).await.map(|_| ())
    }

    /// 删除商品（管理员）
    pub async fn delete_product(&self, id: ProductId) -> Result<(), RequestError> {
        self.execute(&DeleteProductRequest { id }).await.map(|_| ())
    }

    /// 获取订单列表
    pub async fn list_orders(&self) -> Result<Vec<Order>, RequestError> {
        self.execute(&ListOrdersRequest).await
    }

    /// 提交订单
    pub async fn create_order(&self, lines: &OrderLines) -> Result<(), RequestError> {
        self.execute(lines).await.map(|_| ())
    }
}
