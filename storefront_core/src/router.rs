//! 页面路由
//!
//! 有限状态路由，未登录用户在非登录/注册页面时被重定向到登录页。
//! 页面不持久化，新的路由总是从首页开始。

use crate::identity::IdentitySnapshot;

/// 页面
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Cart,
    Favorites,
    /// 商品详情页，携带商品 id
    Product(String),
    Login,
    Register,
}

impl Page {
    pub fn is_auth_page(&self) -> bool {
        matches!(self, Page::Login | Page::Register)
    }
}

/// 导航事件（对应视图回调）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    OpenCart,
    OpenFavorites,
    OpenProduct(String),
    /// 返回首页
    Back,
    ToLogin,
    ToRegister,
    /// 登录或注册成功
    AuthSucceeded,
}

/// 当前可见的视图
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Login,
    Register,
    Home,
    Cart,
    Favorites,
    Product(String),
}

/// 路由守卫
///
/// 身份已确定、无用户且不在登录/注册页时跳转到登录页，否则保持不变。
pub fn gate(has_user: bool, is_loading: bool, page: Page) -> Page {
    if !is_loading && !has_user && !page.is_auth_page() {
        Page::Login
    } else {
        page
    }
}

/// 页面迁移
pub fn transition(page: Page, event: Navigation) -> Page {
    match event {
        Navigation::OpenCart => Page::Cart,
        Navigation::OpenFavorites => Page::Favorites,
        // 空 id 的商品页无意义，保持原页面
        Navigation::OpenProduct(id) if id.is_empty() => page,
        Navigation::OpenProduct(id) => Page::Product(id),
        Navigation::Back | Navigation::AuthSucceeded => Page::Home,
        Navigation::ToLogin => Page::Login,
        Navigation::ToRegister => Page::Register,
    }
}

/// 路由器
#[derive(Debug, Clone, Default)]
pub struct Router {
    page: Page,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 身份变化后重新执行守卫
    pub fn sync(&mut self, identity: &IdentitySnapshot) -> &Page {
        let page = std::mem::take(&mut self.page);
        self.page = gate(identity.has_user(), identity.is_loading, page);
        &self.page
    }

    /// 处理导航事件并执行守卫
    pub fn navigate(&mut self, event: Navigation, identity: &IdentitySnapshot) -> &Page {
        let page = std::mem::take(&mut self.page);
        self.page = transition(page, event);
        self.sync(identity)
    }

    /// 当前应渲染的视图
    pub fn screen(&self, identity: &IdentitySnapshot) -> Screen {
        if identity.is_loading {
            return Screen::Loading;
        }
        match &self.page {
            Page::Login => Screen::Login,
            Page::Register => Screen::Register,
            _ if !identity.has_user() => Screen::Loading,
            Page::Home => Screen::Home,
            Page::Cart => Screen::Cart,
            Page::Favorites => Screen::Favorites,
            Page::Product(id) => Screen::Product(id.clone()),
        }
    }
}
