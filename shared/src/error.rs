use thiserror::Error;

// =========================================================
// 错误分类 (Classified Errors)
// =========================================================

/// 面向界面的错误分类
///
/// 所有请求失败最终都归入这四类之一，`Display` 即错误横幅上显示的文本。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 401: 令牌无效或已过期（刷新后仍被拒绝）
    #[error("Unauthorized (401)")]
    Unauthorized,
    /// 403: 已认证但角色不足
    #[error("Access Denied (403)")]
    Forbidden,
    /// 其他非 2xx 状态码
    #[error("Error: {0}")]
    ServerError(u16),
    /// 未收到任何响应（连接失败、DNS、令牌刷新失败等）
    #[error("Network Error")]
    NetworkError { detail: String },
}

impl ApiError {
    /// 根据响应状态码分类；2xx 返回 `None`
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            401 => Some(Self::Unauthorized),
            403 => Some(Self::Forbidden),
            other => Some(Self::ServerError(other)),
        }
    }

    pub fn network(detail: impl Into<String>) -> Self {
        Self::NetworkError {
            detail: detail.into(),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Forbidden => Some(403),
            Self::ServerError(status) => Some(*status),
            Self::NetworkError { .. } => None,
        }
    }
}
