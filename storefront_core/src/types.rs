//! 数据类型定义

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 商品变体属性（如尺码、材质）
pub type Attributes = BTreeMap<String, String>;

/// 用户信息
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_id: Option<i64>,
}

/// 注册请求数据，仅用于发送注册请求，不在客户端保存
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterData {
    pub email: String,
    pub password: String,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram_username: Option<String>,
}

/// 登录 / 注册的结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuthOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

/// 购物车条目（服务端返回的原始结构）
///
/// `cart_id` 是购物车行的主键，`id` / `product_id` 指向商品。
/// 两者的统一在 [`crate::catalog`] 中完成。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_id: Option<String>,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    pub name: String,
    /// 价格（最小货币单位）
    pub price: i64,
    pub quantity: u32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_attributes: Option<Attributes>,
}

/// 视图使用的购物车行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    /// 购物车行标识：优先 `cart_id`，否则商品 id
    pub id: String,
    pub product_id: String,
    pub name: String,
    pub price: i64,
    pub quantity: u32,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_attributes: Option<Attributes>,
}

/// 收藏条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteItem {
    pub id: String,
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub images: Vec<String>,
}

/// 视图使用的收藏卡片
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteCard {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub images: Vec<String>,
    pub is_favorite: bool,
}

/// 订单中的商品
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_attributes: Option<serde_json::Value>,
}

/// 订单
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub total: i64,
    pub status: String,
    pub created_at: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// 货币符号位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyPosition {
    Before,
    #[default]
    #[serde(other)]
    After,
}

/// 货币配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    pub symbol: String,
    pub position: CurrencyPosition,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: "₽".to_string(),
            position: CurrencyPosition::After,
        }
    }
}

/// 商店运行时配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub currency: CurrencyConfig,
}

/// `/api/auth/*` 成功响应
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: User,
}

/// 失败响应体
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_optional_fields() {
        let user: User = serde_json::from_str(r#"{"id":"1","email":"a@b.com"}"#).unwrap();
        assert_eq!(user.id, "1");
        assert_eq!(user.email.as_deref(), Some("a@b.com"));
        assert!(user.telegram_id.is_none());
    }

    #[test]
    fn test_currency_position_unknown_falls_back_to_after() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"currency":{"symbol":"$","position":"middle"}}"#).unwrap();
        assert_eq!(config.currency.symbol, "$");
        assert_eq!(config.currency.position, CurrencyPosition::After);
    }

    #[test]
    fn test_store_config_defaults() {
        let config: StoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.currency.symbol, "₽");
        assert_eq!(config.currency.position, CurrencyPosition::After);
    }

    #[test]
    fn test_register_data_skips_absent_fields() {
        let data = RegisterData {
            email: "a@b.com".to_string(),
            password: "secret1".to_string(),
            first_name: "Anna".to_string(),
            last_name: None,
            phone: "+79990000000".to_string(),
            telegram_username: Some("@anna".to_string()),
        };
        let value = serde_json::to_value(&data).unwrap();
        assert!(value.get("last_name").is_none());
        assert_eq!(value["telegram_username"], "@anna");
    }
}
