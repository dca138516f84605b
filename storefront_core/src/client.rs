//! 商店后端 REST 客户端
//!
//! 所有请求共用同一个 cookie jar，会话由服务端 cookie 标识，客户端不管理 token。

use crate::error::{Error, Result};
use crate::types::*;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 客户端配置
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// 服务器 URL
    pub server_url: String,
    /// 请求超时（秒）
    pub timeout: u64,
    /// 是否验证 TLS 证书
    pub verify_tls: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".to_string(),
            timeout: 30,
            verify_tls: true,
        }
    }
}

/// 商店客户端
pub struct StorefrontClient {
    config: ClientConfig,
    base_url: Url,
    http_client: Client,
    /// 会话 cookie
    cookies: Arc<Jar>,
}

impl StorefrontClient {
    /// 创建新的客户端实例
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.server_url)
            .map_err(|e| Error::InvalidState(format!("Invalid server url {}: {}", config.server_url, e)))?;
        let cookies = Arc::new(Jar::default());

        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .danger_accept_invalid_certs(!config.verify_tls)
            .cookie_provider(Arc::clone(&cookies))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self {
            config,
            base_url,
            http_client,
            cookies,
        })
    }

    /// 使用默认配置创建客户端
    pub fn with_server_url(server_url: &str) -> Result<Self> {
        let config = ClientConfig {
            server_url: server_url.to_string(),
            ..ClientConfig::default()
        };
        Self::new(config)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.server_url.trim_end_matches('/'), path)
    }

    /// 导出当前会话 cookie（`name=value; name2=value2`）
    pub fn session_cookie(&self) -> Option<String> {
        self.cookies
            .cookies(&self.base_url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }

    /// 恢复会话 cookie（从文件读取）
    pub fn restore_session_cookie(&self, cookie: &str) -> Result<()> {
        let pairs: Vec<&str> = cookie
            .split(';')
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .collect();
        if pairs.is_empty() {
            return Err(Error::InvalidState("Empty session cookie".to_string()));
        }
        for pair in pairs {
            self.cookies.add_cookie_str(pair, &self.base_url);
        }
        debug!("Session cookie restored for {}", self.base_url);
        Ok(())
    }

    /// 发送请求并检查 HTTP 状态码
    pub(crate) async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response> {
        let url = self.url(path);
        debug!("{} {}", method, url);

        let mut builder = self.http_client.request(method, &url);
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Network(format!("Failed to connect to {}: {}", url, e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_default();
        debug!("HTTP {} from {}: {}", status, url, text);

        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// 发送请求并解析 JSON 响应
    pub(crate) async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        let response = self.request(method, path, body).await?;
        response
            .json()
            .await
            .map_err(|e| Error::Encoding(format!("Failed to parse response from {}: {}", path, e)))
    }

    /// 获取当前会话用户
    pub async fn me(&self) -> Result<User> {
        let data: AuthResponse = self.request_json(Method::GET, "/api/auth/me", None).await?;
        Ok(data.user)
    }

    /// 用户登录
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        info!("Logging in user: {}", email);

        let data: AuthResponse = self
            .request_json(
                Method::POST,
                "/api/auth/login",
                Some(serde_json::json!({
                    "email": email,
                    "password": password,
                })),
            )
            .await?;

        info!("User logged in successfully: {}", data.user.id);
        Ok(data.user)
    }

    /// 用户注册
    pub async fn register(&self, data: &RegisterData) -> Result<User> {
        info!("Registering user: {}", data.email);

        let body = serde_json::to_value(data).map_err(|e| Error::Encoding(e.to_string()))?;
        let data: AuthResponse = self
            .request_json(Method::POST, "/api/auth/register", Some(body))
            .await?;

        info!("User registered successfully: {}", data.user.id);
        Ok(data.user)
    }

    /// 用户登出
    pub async fn logout(&self) -> Result<()> {
        self.request(Method::POST, "/api/auth/logout", None).await?;
        info!("User logged out successfully");
        Ok(())
    }

    /// 获取订单列表
    pub async fn orders(&self) -> Result<Vec<Order>> {
        self.request_json(Method::GET, "/api/orders", None).await
    }

    /// 获取商店运行时配置
    pub async fn store_config(&self) -> Result<StoreConfig> {
        match self.request_json(Method::GET, "/api/config", None).await {
            Ok(config) => Ok(config),
            Err(Error::Api { status, .. }) => {
                warn!("Config request returned HTTP {}, using defaults", status);
                Ok(StoreConfig::default())
            }
            Err(e) => Err(e),
        }
    }
}
