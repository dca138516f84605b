//! 组合根
//!
//! 持有客户端、会话、Telegram 身份、购物车、收藏、订单与路由，
//! 视图通过引用读取状态，通过这里的处理函数修改状态。

use crate::cart::CartState;
use crate::client::{ClientConfig, StorefrontClient};
use crate::error::{Error, Result};
use crate::favorites::FavoritesState;
use crate::identity::{IdentitySnapshot, TelegramIdentity};
use crate::notify::Notification;
use crate::orders::OrderHistory;
use crate::pages;
use crate::router::{Navigation, Page, Router, Screen};
use crate::session::SessionStore;
use crate::types::*;
use crate::validation::{LoginForm, RegistrationForm};
use std::sync::Arc;
use tracing::{info, warn};

pub struct Storefront {
    client: Arc<StorefrontClient>,
    session: SessionStore,
    telegram: TelegramIdentity,
    cart: CartState<StorefrontClient>,
    favorites: FavoritesState<StorefrontClient>,
    orders: OrderHistory,
    config: StoreConfig,
    router: Router,
}

impl Storefront {
    /// 创建客户端并执行启动时的会话检查
    pub async fn start(config: ClientConfig, telegram: TelegramIdentity) -> Result<Self> {
        let client = Arc::new(StorefrontClient::new(config)?);
        Ok(Self::with_client(client, telegram).await)
    }

    /// 使用已有客户端（例如已恢复会话 cookie）
    pub async fn with_client(client: Arc<StorefrontClient>, telegram: TelegramIdentity) -> Self {
        let session = SessionStore::mount(Arc::clone(&client)).await;
        let config = client.store_config().await.unwrap_or_else(|e| {
            warn!("Failed to load store config: {}", e);
            StoreConfig::default()
        });

        let mut app = Self {
            cart: CartState::new(Arc::clone(&client)),
            favorites: FavoritesState::new(Arc::clone(&client)),
            client,
            session,
            telegram,
            orders: OrderHistory::new(),
            config,
            router: Router::new(),
        };
        app.on_identity_changed().await;
        app
    }

    pub fn client(&self) -> &Arc<StorefrontClient> {
        &self.client
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn cart(&self) -> &CartState<StorefrontClient> {
        &self.cart
    }

    pub fn favorites(&self) -> &FavoritesState<StorefrontClient> {
        &self.favorites
    }

    pub fn orders(&self) -> &OrderHistory {
        &self.orders
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn page(&self) -> &Page {
        self.router.page()
    }

    /// 会话用户优先，其次 Telegram 用户
    pub async fn identity(&self) -> IdentitySnapshot {
        IdentitySnapshot::merge(
            self.session.user().await,
            self.session.is_loading().await,
            &self.telegram,
        )
    }

    /// 当前用户，未登录时返回 `NotAuthenticated`
    pub async fn require_user(&self) -> Result<User> {
        self.identity().await.user.ok_or(Error::NotAuthenticated)
    }

    pub async fn screen(&self) -> Screen {
        self.router.screen(&self.identity().await)
    }

    /// Telegram 身份就绪或变化
    pub async fn set_telegram(&mut self, telegram: TelegramIdentity) {
        self.telegram = telegram;
        self.on_identity_changed().await;
    }

    pub async fn navigate(&mut self, event: Navigation) -> &Page {
        let identity = self.identity().await;
        self.router.navigate(event, &identity)
    }

    pub async fn open_product(&mut self, product_id: &str) -> &Page {
        self.navigate(Navigation::OpenProduct(product_id.to_string()))
            .await
    }

    pub async fn login(&mut self, form: &LoginForm) -> Notification {
        let submission = pages::submit_login(&self.session, form).await;
        if let Some(event) = submission.navigation.clone() {
            self.navigate(event).await;
            self.on_identity_changed().await;
        }
        submission.notification
    }

    pub async fn register(&mut self, form: &RegistrationForm) -> Notification {
        let submission = pages::submit_register(&self.session, form).await;
        if let Some(event) = submission.navigation.clone() {
            self.navigate(event).await;
            self.on_identity_changed().await;
        }
        submission.notification
    }

    pub async fn logout(&mut self) {
        self.session.logout().await;
        // 上一个账号的数据不再可见
        self.orders = OrderHistory::new();
        self.cart = CartState::new(Arc::clone(&self.client));
        self.favorites = FavoritesState::new(Arc::clone(&self.client));
        self.on_identity_changed().await;
    }

    /// 重新执行路由守卫，有用户时同步购物车与收藏
    async fn on_identity_changed(&mut self) {
        let identity = self.identity().await;
        self.router.sync(&identity);

        if identity.has_user() {
            if let Err(e) = self.cart.refresh().await {
                warn!("Failed to load cart: {}", e);
            }
            if let Err(e) = self.favorites.refresh().await {
                warn!("Failed to load favorites: {}", e);
            }
        }
        info!("Identity synced, page: {:?}", self.router.page());
    }

    pub async fn load_orders(&mut self) -> &[Order] {
        let user = self.identity().await.user;
        self.orders.load(&self.client, user.as_ref()).await;
        self.orders.orders()
    }

    pub async fn add_to_cart(
        &mut self,
        product_id: &str,
        selected_color: Option<String>,
        selected_attributes: Option<Attributes>,
    ) -> Result<()> {
        self.cart
            .add(product_id, selected_color, selected_attributes)
            .await
    }

    pub async fn change_quantity(&mut self, id: &str, quantity: u32) -> Result<bool> {
        self.cart.change_quantity(id, quantity).await
    }

    pub async fn remove_item(&mut self, id: &str) -> Result<bool> {
        self.cart.remove(id).await
    }

    pub async fn clear_cart(&mut self) -> Result<()> {
        self.cart.clear().await
    }

    pub async fn toggle_favorite(&mut self, product_id: &str) -> Result<bool> {
        self.favorites.toggle(product_id).await
    }

    pub async fn clear_favorites(&mut self) -> Result<()> {
        self.favorites.clear_all().await
    }

    /// 首页角标：购物车数量、收藏数量
    pub fn badges(&self) -> (u64, usize) {
        (self.cart.count(), self.favorites.count())
    }

    /// 商品页标记：已收藏、已在购物车
    pub fn product_flags(&self, product_id: &str) -> (bool, bool) {
        (
            self.favorites.is_favorite(product_id),
            self.cart.contains_product(product_id),
        )
    }
}
