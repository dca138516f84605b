//! 商店客户端核心库
//!
//! 提供店面客户端的状态层，包括：
//! - 会话存储（登录、注册、登出、会话检查）
//! - Telegram 身份合并与页面路由守卫
//! - 购物车、收藏、订单历史
//! - 价格格式化与表单校验

pub mod app;
pub mod cart;
pub mod catalog;
pub mod client;
pub mod error;
pub mod favorites;
pub mod identity;
pub mod money;
pub mod notify;
pub mod orders;
pub mod pages;
pub mod router;
pub mod session;
pub mod types;
pub mod validation;

pub use app::Storefront;
pub use cart::{CartApi, CartState};
pub use client::{ClientConfig, StorefrontClient};
pub use error::{Error, Result};
pub use favorites::{FavoritesApi, FavoritesState};
pub use identity::{IdentitySnapshot, TelegramIdentity, TelegramUser};
pub use notify::Notification;
pub use router::{Navigation, Page, Router, Screen};
pub use session::{SessionPhase, SessionStore};
pub use types::*;
