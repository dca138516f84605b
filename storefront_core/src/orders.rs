//! 个人资料与订单历史

use crate::client::StorefrontClient;
use crate::money;
use crate::types::*;
use tracing::{debug, warn};

pub const DEFAULT_NAME: &str = "Пользователь";
pub const PENDING_LABEL: &str = "В обработке";

/// 订单状态显示文本
pub fn status_label(status: &str) -> &str {
    if status == "pending" {
        PENDING_LABEL
    } else {
        status
    }
}

/// 个人资料
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub telegram_username: Option<String>,
}

impl From<&User> for Profile {
    fn from(user: &User) -> Self {
        let full_name = [&user.first_name, &user.last_name]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");

        Profile {
            full_name: if full_name.is_empty() {
                DEFAULT_NAME.to_string()
            } else {
                full_name
            },
            email: user.email.clone(),
            phone: user.phone.clone().filter(|s| !s.is_empty()),
            telegram_username: user.telegram_username.clone().filter(|s| !s.is_empty()),
        }
    }
}

/// 订单历史，仅在组件生命周期内保存
#[derive(Debug, Clone, Default)]
pub struct OrderHistory {
    orders: Vec<Order>,
    is_loading: bool,
}

impl OrderHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// 加载订单
    ///
    /// 无用户时不发送请求；请求失败时保留原列表。
    pub async fn load(&mut self, client: &StorefrontClient, user: Option<&User>) {
        let Some(user) = user else {
            return;
        };
        if user.id.is_empty() {
            return;
        }

        self.is_loading = true;
        match client.orders().await {
            Ok(orders) => {
                debug!("Loaded {} orders for user {}", orders.len(), user.id);
                self.orders = orders;
            }
            Err(e) => warn!("Error loading orders: {}", e),
        }
        self.is_loading = false;
    }
}

/// 订单摘要行，供终端 / 视图直接显示
pub fn order_summary(order: &Order, currency: &CurrencyConfig) -> String {
    format!(
        "{}  {}  {}",
        money::format_order_date(&order.created_at),
        money::format_price(order.total, currency),
        status_label(&order.status)
    )
}

/// 订单商品行：名称、颜色、数量
pub fn order_item_line(item: &OrderItem) -> String {
    match &item.selected_color {
        Some(color) => format!("{} • {} × {}", item.name, color, item.quantity),
        None => format!("{} × {}", item.name, item.quantity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_label() {
        assert_eq!(status_label("pending"), "В обработке");
        assert_eq!(status_label("shipped"), "shipped");
    }

    #[test]
    fn test_profile_full_name() {
        let user = User {
            id: "1".to_string(),
            first_name: Some("Анна".to_string()),
            last_name: Some("Иванова".to_string()),
            ..User::default()
        };
        assert_eq!(Profile::from(&user).full_name, "Анна Иванова");

        let user = User {
            id: "1".to_string(),
            last_name: Some("Иванова".to_string()),
            ..User::default()
        };
        assert_eq!(Profile::from(&user).full_name, "Иванова");
    }

    #[test]
    fn test_profile_default_name() {
        let user = User {
            id: "1".to_string(),
            first_name: Some(String::new()),
            ..User::default()
        };
        assert_eq!(Profile::from(&user).full_name, DEFAULT_NAME);
    }

    #[test]
    fn test_order_summary_and_items() {
        let order = Order {
            id: "o1".to_string(),
            total: 250_000,
            status: "pending".to_string(),
            created_at: "2024-03-05T14:07:00Z".to_string(),
            items: vec![OrderItem {
                id: "p1".to_string(),
                name: "Лампа".to_string(),
                price: 125_000,
                quantity: 2,
                selected_color: Some("белый".to_string()),
                selected_attributes: None,
            }],
        };
        assert_eq!(
            order_summary(&order, &CurrencyConfig::default()),
            "05.03.2024, 14:07  2500.00 ₽  В обработке"
        );
        assert_eq!(order_item_line(&order.items[0]), "Лампа • белый × 2");
    }

    #[tokio::test]
    async fn test_load_without_user_sends_nothing() {
        let client = StorefrontClient::with_server_url("http://127.0.0.1:9").unwrap();
        let mut history = OrderHistory::new();
        history.load(&client, None).await;
        assert!(history.orders().is_empty());
        assert!(!history.is_loading());
    }
}
