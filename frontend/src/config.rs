//! 运行时配置
//!
//! 浏览器端没有进程环境变量，配置在构建时通过 `option_env!` 注入，
//! 未设置时使用本地开发默认值。

use serde::Serialize;

// =========================================================
// 常量定义
// =========================================================
const DEFAULT_API_URL: &str = "http://localhost:8085";
const DEFAULT_KEYCLOAK_URL: &str = "http://localhost:8080";
const DEFAULT_KEYCLOAK_REALM: &str = "microservices-realm";
const DEFAULT_KEYCLOAK_CLIENT: &str = "storefront";

/// 传给 Keycloak 适配器构造函数的配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeycloakConfig {
    pub url: String,
    pub realm: String,
    pub client_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// 后端网关地址
    pub api_base_url: String,
    pub keycloak: KeycloakConfig,
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("STOREFRONT_API_URL"),
            option_env!("STOREFRONT_KEYCLOAK_URL"),
            option_env!("STOREFRONT_KEYCLOAK_REALM"),
            option_env!("STOREFRONT_KEYCLOAK_CLIENT"),
        )
    }

    fn from_values(
        api_url: Option<&str>,
        keycloak_url: Option<&str>,
        realm: Option<&str>,
        client_id: Option<&str>,
    ) -> Self {
        fn or_default(value: Option<&str>, default: &str) -> String {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .to_string()
        }

        Self {
            api_base_url: or_default(api_url, DEFAULT_API_URL),
            keycloak: KeycloakConfig {
                url: or_default(keycloak_url, DEFAULT_KEYCLOAK_URL),
                realm: or_default(realm, DEFAULT_KEYCLOAK_REALM),
                client_id: or_default(client_id, DEFAULT_KEYCLOAK_CLIENT),
            },
        }
    }
}
