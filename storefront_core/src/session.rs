//! 会话状态
//!
//! 当前登录用户的唯一来源。由组合根持有，通过克隆句柄传递给依赖它的视图。
//!
//! 状态迁移：`Unknown → {Authenticated, Anonymous}`，
//! `Authenticated → Anonymous`（登出或会话检查失败），
//! `Anonymous → Authenticated`（登录或注册成功）。

use crate::client::StorefrontClient;
use crate::error::Error;
use crate::types::*;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";
pub const NETWORK_ERROR: &str = "Network error";

/// 会话阶段
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    /// 首次会话检查尚未完成
    Unknown,
    Authenticated(User),
    Anonymous,
}

#[derive(Debug)]
struct SessionState {
    user: Option<User>,
    is_loading: bool,
    /// 每次登录、注册、登出都会递增，用于丢弃过期的会话检查结果
    generation: u64,
}

/// 会话存储
#[derive(Clone)]
pub struct SessionStore {
    client: Arc<StorefrontClient>,
    state: Arc<RwLock<SessionState>>,
}

impl SessionStore {
    /// 创建处于 `Unknown` 状态的存储，不发送请求
    pub fn new(client: Arc<StorefrontClient>) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(SessionState {
                user: None,
                is_loading: true,
                generation: 0,
            })),
        }
    }

    /// 创建存储并执行一次会话检查
    pub async fn mount(client: Arc<StorefrontClient>) -> Self {
        let store = Self::new(client);
        store.check_auth().await;
        store
    }

    pub fn client(&self) -> &Arc<StorefrontClient> {
        &self.client
    }

    /// 当前用户
    pub async fn user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    pub async fn phase(&self) -> SessionPhase {
        let state = self.state.read().await;
        match (&state.user, state.is_loading) {
            (Some(user), _) => SessionPhase::Authenticated(user.clone()),
            (None, true) => SessionPhase::Unknown,
            (None, false) => SessionPhase::Anonymous,
        }
    }

    /// 检查当前会话
    ///
    /// 成功时设置用户，任何失败都清空用户。无论结果如何都会清除 loading 标志。
    pub async fn check_auth(&self) {
        let generation = self.state.read().await.generation;

        let user = match self.client.me().await {
            Ok(user) => Some(user),
            Err(Error::Api { status, .. }) => {
                debug!("Session check returned HTTP {}", status);
                None
            }
            Err(e) => {
                warn!("Auth check error: {}", e);
                None
            }
        };

        let mut state = self.state.write().await;
        state.is_loading = false;
        if state.generation != generation {
            debug!("Discarding stale session check result");
            return;
        }
        state.user = user;
    }

    /// 用户登录
    ///
    /// 失败时不修改当前用户。
    pub async fn login(&self, email: &str, password: &str) -> AuthOutcome {
        let result = self.client.login(email, password).await;
        self.settle(result, LOGIN_FAILED, "Login error").await
    }

    /// 用户注册
    pub async fn register(&self, data: &RegisterData) -> AuthOutcome {
        let result = self.client.register(data).await;
        self.settle(result, REGISTRATION_FAILED, "Registration error")
            .await
    }

    /// 用户登出
    ///
    /// 请求失败只记录日志，用户始终被清空。
    pub async fn logout(&self) {
        if let Err(e) = self.client.logout().await {
            warn!("Logout error: {}", e);
        }

        let mut state = self.state.write().await;
        state.generation += 1;
        state.user = None;
        state.is_loading = false;
        info!("Session cleared");
    }

    async fn settle(
        &self,
        result: crate::Result<User>,
        default_message: &str,
        context: &str,
    ) -> AuthOutcome {
        match result {
            Ok(user) => {
                let mut state = self.state.write().await;
                state.generation += 1;
                state.user = Some(user);
                state.is_loading = false;
                AuthOutcome::ok()
            }
            Err(Error::Api { message, .. }) if !message.is_empty() => AuthOutcome::failed(message),
            Err(Error::Api { .. }) => AuthOutcome::failed(default_message),
            Err(e) => {
                warn!("{}: {}", context, e);
                AuthOutcome::failed(NETWORK_ERROR)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_store() -> SessionStore {
        // 端口 9 (discard) 上没有服务
        let client = StorefrontClient::with_server_url("http://127.0.0.1:9").unwrap();
        SessionStore::new(Arc::new(client))
    }

    #[tokio::test]
    async fn test_new_store_is_unknown() {
        let store = offline_store();
        assert!(store.is_loading().await);
        assert_eq!(store.phase().await, SessionPhase::Unknown);
    }

    #[tokio::test]
    async fn test_check_auth_network_failure_is_anonymous() {
        let store = offline_store();
        store.check_auth().await;
        assert!(!store.is_loading().await);
        assert!(store.user().await.is_none());
        assert_eq!(store.phase().await, SessionPhase::Anonymous);
    }

    #[tokio::test]
    async fn test_login_network_failure_reports_network_error() {
        let store = offline_store();
        let outcome = store.login("a@b.com", "secret1").await;
        assert_eq!(outcome, AuthOutcome::failed(NETWORK_ERROR));
        assert!(store.user().await.is_none());
    }

    #[tokio::test]
    async fn test_logout_network_failure_still_clears_user() {
        let store = offline_store();
        store.state.write().await.user = Some(User {
            id: "1".to_string(),
            ..User::default()
        });

        store.logout().await;
        assert!(store.user().await.is_none());
        assert!(!store.is_loading().await);
        assert_eq!(store.phase().await, SessionPhase::Anonymous);
    }
}
