//! 收藏状态

use crate::catalog;
use crate::client::StorefrontClient;
use crate::error::Result;
use crate::types::*;
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;
use tracing::{debug, info};

/// 收藏后端接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoritesApi: Send + Sync {
    async fn list(&self) -> Result<Vec<FavoriteItem>>;
    async fn add(&self, product_id: &str) -> Result<FavoriteItem>;
    async fn remove(&self, product_id: &str) -> Result<()>;
}

#[async_trait]
impl FavoritesApi for StorefrontClient {
    async fn list(&self) -> Result<Vec<FavoriteItem>> {
        self.request_json(Method::GET, "/api/favorites", None).await
    }

    async fn add(&self, product_id: &str) -> Result<FavoriteItem> {
        self.request_json(
            Method::POST,
            "/api/favorites",
            Some(serde_json::json!({ "product_id": product_id })),
        )
        .await
    }

    async fn remove(&self, product_id: &str) -> Result<()> {
        let path = format!("/api/favorites/{}", product_id);
        self.request(Method::DELETE, &path, None).await?;
        Ok(())
    }
}

/// 收藏状态，按 id 去重
pub struct FavoritesState<A: FavoritesApi> {
    api: Arc<A>,
    items: Vec<FavoriteItem>,
    is_loading: bool,
}

impl<A: FavoritesApi> FavoritesState<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            items: Vec::new(),
            is_loading: true,
        }
    }

    pub fn items(&self) -> &[FavoriteItem] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub async fn refresh(&mut self) -> Result<()> {
        let result = self.api.list().await;
        self.is_loading = false;
        let mut items = result?;
        let mut seen = std::collections::HashSet::new();
        items.retain(|item| seen.insert(item.id.clone()));
        self.items = items;
        debug!("Favorites refreshed: {} items", self.items.len());
        Ok(())
    }

    /// 切换收藏状态，返回切换后是否已收藏
    pub async fn toggle(&mut self, product_id: &str) -> Result<bool> {
        if self.is_favorite(product_id) {
            self.api.remove(product_id).await?;
            self.items.retain(|item| item.id != product_id);
            info!("Removed {} from favorites", product_id);
            Ok(false)
        } else {
            let item = self.api.add(product_id).await?;
            if !self.is_favorite(&item.id) {
                self.items.push(item);
            }
            info!("Added {} to favorites", product_id);
            Ok(true)
        }
    }

    /// 逐个取消全部收藏
    pub async fn clear_all(&mut self) -> Result<()> {
        for id in self.ids() {
            self.toggle(&id).await?;
        }
        Ok(())
    }

    pub fn ids(&self) -> Vec<String> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    pub fn is_favorite(&self, product_id: &str) -> bool {
        self.items.iter().any(|item| item.id == product_id)
    }

    pub fn cards(&self) -> Vec<FavoriteCard> {
        catalog::favorite_cards(&self.items)
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn favorite(id: &str) -> FavoriteItem {
        FavoriteItem {
            id: id.to_string(),
            name: format!("Item {}", id),
            price: 1_000,
            images: vec![],
        }
    }

    #[tokio::test]
    async fn test_toggle_twice_round_trips() {
        let mut api = MockFavoritesApi::new();
        api.expect_add()
            .withf(|id| id == "p1")
            .times(1)
            .returning(|id| Ok(favorite(id)));
        api.expect_remove()
            .withf(|id| id == "p1")
            .times(1)
            .returning(|_| Ok(()));

        let mut favorites = FavoritesState::new(Arc::new(api));
        assert_eq!(favorites.count(), 0);

        assert!(favorites.toggle("p1").await.unwrap());
        assert_eq!(favorites.count(), 1);
        assert!(favorites.cards()[0].is_favorite);

        assert!(!favorites.toggle("p1").await.unwrap());
        assert_eq!(favorites.count(), 0);
    }

    #[tokio::test]
    async fn test_refresh_deduplicates() {
        let mut api = MockFavoritesApi::new();
        api.expect_list()
            .times(1)
            .returning(|| Ok(vec![favorite("p1"), favorite("p2"), favorite("p1")]));

        let mut favorites = FavoritesState::new(Arc::new(api));
        favorites.refresh().await.unwrap();
        assert!(!favorites.is_loading());
        assert_eq!(favorites.ids(), vec!["p1", "p2"]);
    }

    #[tokio::test]
    async fn test_clear_all_removes_every_item() {
        let mut api = MockFavoritesApi::new();
        api.expect_list()
            .times(1)
            .returning(|| Ok(vec![favorite("p1"), favorite("p2")]));
        api.expect_remove().times(2).returning(|_| Ok(()));

        let mut favorites = FavoritesState::new(Arc::new(api));
        favorites.refresh().await.unwrap();
        favorites.clear_all().await.unwrap();
        assert_eq!(favorites.count(), 0);
    }

    #[test]
    fn test_failed_add_leaves_favorites_unchanged() {
        let mut api = MockFavoritesApi::new();
        api.expect_add()
            .times(1)
            .returning(|_| Err(crate::Error::Network("timeout".to_string())));

        let mut favorites = FavoritesState::new(Arc::new(api));
        let result = tokio_test::block_on(favorites.toggle("p1"));
        assert!(result.is_err());
        assert!(!favorites.is_favorite("p1"));
    }
}
