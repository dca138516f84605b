//! 购物车状态
//!
//! 镜像服务端购物车。视图传入的 id 可能是 `cart_id` 也可能是商品 id，
//! 修改请求一律使用解析出的 `cart_id`。

use crate::catalog;
use crate::client::StorefrontClient;
use crate::error::Result;
use crate::types::*;
use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// 加入购物车请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddToCart {
    pub product_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_attributes: Option<Attributes>,
}

/// 购物车后端接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartApi: Send + Sync {
    async fn list(&self) -> Result<Vec<CartItem>>;
    async fn add(&self, request: AddToCart) -> Result<()>;
    async fn update_quantity(&self, cart_id: &str, quantity: u32) -> Result<()>;
    async fn remove(&self, cart_id: &str) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

#[async_trait]
impl CartApi for StorefrontClient {
    async fn list(&self) -> Result<Vec<CartItem>> {
        self.request_json(Method::GET, "/api/cart", None).await
    }

    async fn add(&self, request: AddToCart) -> Result<()> {
        let body = serde_json::to_value(&request)
            .map_err(|e| crate::Error::Encoding(e.to_string()))?;
        self.request(Method::POST, "/api/cart", Some(body)).await?;
        Ok(())
    }

    async fn update_quantity(&self, cart_id: &str, quantity: u32) -> Result<()> {
        let path = format!("/api/cart/{}", cart_id);
        self.request(
            Method::PATCH,
            &path,
            Some(serde_json::json!({ "quantity": quantity })),
        )
        .await?;
        Ok(())
    }

    async fn remove(&self, cart_id: &str) -> Result<()> {
        let path = format!("/api/cart/{}", cart_id);
        self.request(Method::DELETE, &path, None).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.request(Method::DELETE, "/api/cart", None).await?;
        Ok(())
    }
}

/// 购物车状态
pub struct CartState<A: CartApi> {
    api: Arc<A>,
    items: Vec<CartItem>,
    is_loading: bool,
}

impl<A: CartApi> CartState<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            items: Vec::new(),
            is_loading: true,
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// 重新拉取购物车
    pub async fn refresh(&mut self) -> Result<()> {
        let result = self.api.list().await;
        self.is_loading = false;
        self.items = result?;
        debug!("Cart refreshed: {} items", self.items.len());
        Ok(())
    }

    /// 加入购物车
    pub async fn add(
        &mut self,
        product_id: &str,
        selected_color: Option<String>,
        selected_attributes: Option<Attributes>,
    ) -> Result<()> {
        info!("Adding product {} to cart", product_id);
        self.api
            .add(AddToCart {
                product_id: product_id.to_string(),
                selected_color,
                selected_attributes,
            })
            .await?;
        // cart_id 由服务端分配
        self.refresh().await
    }

    /// 修改数量，返回是否发送了请求
    ///
    /// 找不到对应条目时不做任何事。数量为 0 时移除条目。
    pub async fn change_quantity(&mut self, id: &str, quantity: u32) -> Result<bool> {
        if quantity == 0 {
            return self.remove(id).await;
        }
        let Some(cart_id) = self.resolve(id) else {
            debug!("No cart item for {}, quantity change ignored", id);
            return Ok(false);
        };

        self.api.update_quantity(&cart_id, quantity).await?;
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.cart_id.as_deref() == Some(cart_id.as_str()))
        {
            item.quantity = quantity;
        }
        Ok(true)
    }

    /// 移除条目，返回是否发送了请求
    pub async fn remove(&mut self, id: &str) -> Result<bool> {
        let Some(cart_id) = self.resolve(id) else {
            debug!("No cart item for {}, removal ignored", id);
            return Ok(false);
        };

        self.api.remove(&cart_id).await?;
        self.items
            .retain(|item| item.cart_id.as_deref() != Some(cart_id.as_str()));
        Ok(true)
    }

    /// 清空购物车
    pub async fn clear(&mut self) -> Result<()> {
        self.api.clear().await?;
        self.items.clear();
        info!("Cart cleared");
        Ok(())
    }

    fn resolve(&self, id: &str) -> Option<String> {
        catalog::find_cart_item(&self.items, id).and_then(|item| item.cart_id.clone())
    }

    pub fn lines(&self) -> Vec<CartLine> {
        catalog::cart_lines(&self.items)
    }

    pub fn count(&self) -> u64 {
        catalog::cart_count(&self.lines())
    }

    pub fn product_ids(&self) -> Vec<String> {
        catalog::cart_product_ids(&self.items)
    }

    pub fn contains_product(&self, product_id: &str) -> bool {
        self.items.iter().any(|item| item.product_key() == product_id)
    }
}
