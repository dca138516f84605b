//! 身份来源合并
//!
//! 会话存储优先，其次是 Telegram 身份。

use crate::types::User;
use serde::{Deserialize, Serialize};

/// Telegram 提供的用户信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramUser {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl From<TelegramUser> for User {
    fn from(tg: TelegramUser) -> Self {
        User {
            id: tg.id.to_string(),
            first_name: tg.first_name,
            last_name: tg.last_name,
            telegram_username: tg.username.clone(),
            username: tg.username,
            telegram_id: Some(tg.id),
            ..User::default()
        }
    }
}

/// Telegram 身份来源
#[derive(Debug, Clone, Default)]
pub struct TelegramIdentity {
    user: Option<TelegramUser>,
    is_loading: bool,
}

impl TelegramIdentity {
    /// 尚在等待 Telegram 环境初始化
    pub fn pending() -> Self {
        Self {
            user: None,
            is_loading: true,
        }
    }

    /// 初始化完成（不在 Telegram 中运行时为 `None`）
    pub fn resolved(user: Option<TelegramUser>) -> Self {
        Self {
            user,
            is_loading: false,
        }
    }

    pub fn user(&self) -> Option<User> {
        self.user.clone().map(User::from)
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }
}

/// 合并后的身份快照，路由只依赖它
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentitySnapshot {
    pub user: Option<User>,
    pub is_loading: bool,
}

impl IdentitySnapshot {
    pub fn merge(
        session_user: Option<User>,
        session_loading: bool,
        telegram: &TelegramIdentity,
    ) -> Self {
        Self {
            user: session_user.or_else(|| telegram.user()),
            is_loading: session_loading || telegram.is_loading(),
        }
    }

    pub fn has_user(&self) -> bool {
        self.user.is_some()
    }
}
