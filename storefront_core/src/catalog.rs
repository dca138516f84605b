//! 购物车 / 收藏的视图适配
//!
//! 纯函数，每次渲染时根据当前状态重新计算。

use crate::types::*;

impl CartItem {
    /// 购物车行标识：`cart_id`，缺失时退回商品 id
    pub fn line_id(&self) -> &str {
        self.cart_id.as_deref().unwrap_or(&self.id)
    }

    /// 商品 id：`product_id`，缺失时退回 `id`
    pub fn product_key(&self) -> &str {
        self.product_id.as_deref().unwrap_or(&self.id)
    }

    /// 是否可以用 `id` 定位到本条目
    pub fn matches(&self, id: &str) -> bool {
        self.cart_id.as_deref() == Some(id) || self.id == id
    }
}

impl From<&CartItem> for CartLine {
    fn from(item: &CartItem) -> Self {
        CartLine {
            id: item.line_id().to_string(),
            product_id: item.product_key().to_string(),
            name: item.name.clone(),
            price: item.price,
            quantity: item.quantity,
            images: item.images.clone(),
            selected_color: item.selected_color.clone(),
            selected_attributes: item.selected_attributes.clone(),
        }
    }
}

impl From<&FavoriteItem> for FavoriteCard {
    fn from(item: &FavoriteItem) -> Self {
        FavoriteCard {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            images: item.images.clone(),
            is_favorite: true,
        }
    }
}

pub fn cart_lines(items: &[CartItem]) -> Vec<CartLine> {
    items.iter().map(CartLine::from).collect()
}

pub fn favorite_cards(items: &[FavoriteItem]) -> Vec<FavoriteCard> {
    items.iter().map(FavoriteCard::from).collect()
}

/// 购物车商品总数（数量之和）
pub fn cart_count(lines: &[CartLine]) -> u64 {
    lines.iter().map(|line| u64::from(line.quantity)).sum()
}

/// 购物车中的商品 id，用于“已在购物车”标记
pub fn cart_product_ids(items: &[CartItem]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.product_key().to_string())
        .collect()
}

/// 按 `cart_id` 或 `id` 查找购物车条目
pub fn find_cart_item<'a>(items: &'a [CartItem], id: &str) -> Option<&'a CartItem> {
    items.iter().find(|item| item.matches(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(cart_id: Option<&str>, id: &str, product_id: Option<&str>, quantity: u32) -> CartItem {
        CartItem {
            cart_id: cart_id.map(str::to_string),
            id: id.to_string(),
            product_id: product_id.map(str::to_string),
            name: format!("Product {}", id),
            price: 129_900,
            quantity,
            images: vec![format!("/img/{}.jpg", id)],
            selected_color: None,
            selected_attributes: None,
        }
    }

    #[test]
    fn test_cart_line_prefers_cart_id() {
        let lines = cart_lines(&[item(Some("c1"), "p1", None, 2), item(None, "p2", None, 1)]);
        assert_eq!(lines[0].id, "c1");
        assert_eq!(lines[0].product_id, "p1");
        assert_eq!(lines[1].id, "p2");
    }

    #[test]
    fn test_product_ids_prefer_product_id() {
        let items = [item(Some("c1"), "x", Some("p1"), 1), item(None, "p2", None, 1)];
        assert_eq!(cart_product_ids(&items), vec!["p1", "p2"]);
    }

    #[test]
    fn test_cart_count_sums_quantities() {
        let lines = cart_lines(&[item(Some("c1"), "p1", None, 2), item(Some("c2"), "p2", None, 3)]);
        assert_eq!(cart_count(&lines), 5);
        assert_eq!(cart_count(&[]), 0);
    }

    #[test]
    fn test_find_cart_item_by_either_key() {
        let items = [item(Some("c1"), "p1", None, 1)];
        assert_eq!(find_cart_item(&items, "p1").and_then(|i| i.cart_id.as_deref()), Some("c1"));
        assert_eq!(find_cart_item(&items, "c1").map(|i| i.id.as_str()), Some("p1"));
        assert!(find_cart_item(&items, "p9").is_none());
    }

    #[test]
    fn test_favorite_cards_are_marked() {
        let cards = favorite_cards(&[FavoriteItem {
            id: "p1".to_string(),
            name: "Lamp".to_string(),
            price: 4_500,
            images: vec![],
        }]);
        assert_eq!(cards.len(), 1);
        assert!(cards[0].is_favorite);
    }
}
