//! 商店命令行客户端

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use storefront_core::money::format_price;
use storefront_core::orders::{order_item_line, order_summary, Profile};
use storefront_core::pages::{submit_login, submit_register};
use storefront_core::validation::{LoginForm, RegistrationForm};
use storefront_core::{
    ClientConfig, Notification, SessionPhase, SessionStore, Storefront, StorefrontClient,
    TelegramIdentity,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Storefront command line client", long_about = None)]
struct Cli {
    /// 服务器地址
    #[arg(short, long, default_value = "http://127.0.0.1:5000")]
    server: String,

    /// 请求超时（秒）
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// 会话 cookie 文件路径
    #[arg(long, default_value = ".session")]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 用户登录
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// 用户注册
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(short, long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "")]
        telegram_username: String,
        #[arg(short, long)]
        password: String,
        /// 确认密码
        #[arg(long)]
        confirm_password: String,
    },
    /// 用户登出
    Logout,
    /// 显示当前用户
    Whoami,
    /// 订单历史
    Orders,
    /// 购物车
    Cart {
        #[command(subcommand)]
        action: Option<CartAction>,
    },
    /// 收藏
    Favorites {
        #[command(subcommand)]
        action: Option<FavoritesAction>,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// 加入购物车
    Add {
        product_id: String,
        #[arg(long)]
        color: Option<String>,
    },
    /// 修改数量（购物车行 id 或商品 id）
    Quantity { id: String, quantity: u32 },
    /// 移除条目
    Remove { id: String },
    /// 清空购物车
    Clear,
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// 切换收藏
    Toggle { product_id: String },
    /// 取消全部收藏
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = ClientConfig {
        server_url: cli.server.clone(),
        timeout: cli.timeout,
        verify_tls: false,
    };
    let client = Arc::new(StorefrontClient::new(config)?);
    restore_session(&client, &cli.session_file)?;

    match cli.command {
        Commands::Login { email, password } => {
            do_login(client, &cli.session_file, LoginForm { email, password }).await?;
        }
        Commands::Register {
            first_name,
            last_name,
            email,
            phone,
            telegram_username,
            password,
            confirm_password,
        } => {
            let form = RegistrationForm {
                first_name,
                last_name,
                email,
                phone,
                telegram_username,
                password,
                confirm_password,
            };
            do_register(client, &cli.session_file, form).await?;
        }
        Commands::Logout => {
            do_logout(client, &cli.session_file).await?;
        }
        Commands::Whoami => {
            do_whoami(client).await?;
        }
        Commands::Orders => {
            do_orders(client).await?;
        }
        Commands::Cart { action } => {
            do_cart(client, action).await?;
        }
        Commands::Favorites { action } => {
            do_favorites(client, action).await?;
        }
    }

    Ok(())
}

fn restore_session(client: &StorefrontClient, session_file: &Path) -> anyhow::Result<()> {
    match std::fs::read_to_string(session_file) {
        Ok(cookie) if !cookie.trim().is_empty() => {
            client.restore_session_cookie(cookie.trim())?;
            debug!("Session restored from {:?}", session_file);
        }
        _ => {}
    }
    Ok(())
}

fn save_session(client: &StorefrontClient, session_file: &Path) -> anyhow::Result<()> {
    if let Some(cookie) = client.session_cookie() {
        std::fs::write(session_file, cookie)?;
        println!("Сессия сохранена в {:?}", session_file);
    }
    Ok(())
}

fn print_notification(notification: &Notification) {
    println!("{}: {}", notification.title, notification.description);
}

async fn do_login(
    client: Arc<StorefrontClient>,
    session_file: &Path,
    form: LoginForm,
) -> anyhow::Result<()> {
    let session = SessionStore::new(Arc::clone(&client));
    let submission = submit_login(&session, &form).await;
    print_notification(&submission.notification);

    if !submission.succeeded() {
        anyhow::bail!("{}", submission.notification.description);
    }
    save_session(&client, session_file)
}

async fn do_register(
    client: Arc<StorefrontClient>,
    session_file: &Path,
    form: RegistrationForm,
) -> anyhow::Result<()> {
    let session = SessionStore::new(Arc::clone(&client));
    let submission = submit_register(&session, &form).await;
    print_notification(&submission.notification);

    if !submission.succeeded() {
        anyhow::bail!("{}", submission.notification.description);
    }
    save_session(&client, session_file)
}

async fn do_logout(client: Arc<StorefrontClient>, session_file: &Path) -> anyhow::Result<()> {
    let session = SessionStore::new(client);
    session.logout().await;

    // 删除会话文件
    let _ = std::fs::remove_file(session_file);

    println!("Вы вышли из аккаунта");
    Ok(())
}

async fn signed_in(client: Arc<StorefrontClient>) -> anyhow::Result<Storefront> {
    let app = Storefront::with_client(client, TelegramIdentity::resolved(None)).await;
    app.require_user()
        .await
        .map_err(|e| anyhow::anyhow!("Не выполнен вход (выполните `storefront login`): {}", e))?;
    Ok(app)
}

async fn do_whoami(client: Arc<StorefrontClient>) -> anyhow::Result<()> {
    let session = SessionStore::mount(client).await;
    match session.phase().await {
        SessionPhase::Authenticated(user) => {
            let profile = Profile::from(&user);
            println!("Имя: {}", profile.full_name);
            if let Some(email) = profile.email {
                println!("Email: {}", email);
            }
            if let Some(phone) = profile.phone {
                println!("Телефон: {}", phone);
            }
            if let Some(telegram) = profile.telegram_username {
                println!("Telegram: {}", telegram);
            }
        }
        SessionPhase::Anonymous | SessionPhase::Unknown => {
            println!("Не выполнен вход");
        }
    }
    Ok(())
}

async fn do_orders(client: Arc<StorefrontClient>) -> anyhow::Result<()> {
    let mut app = signed_in(client).await?;
    let currency = app.config().currency.clone();
    let orders = app.load_orders().await;

    if orders.is_empty() {
        println!("Заказов пока нет");
        return Ok(());
    }
    for order in orders {
        println!("{}", order_summary(order, &currency));
        for item in &order.items {
            println!("    {}", order_item_line(item));
        }
    }
    Ok(())
}

async fn do_cart(client: Arc<StorefrontClient>, action: Option<CartAction>) -> anyhow::Result<()> {
    let mut app = signed_in(client).await?;

    match action {
        Some(CartAction::Add { product_id, color }) => {
            app.add_to_cart(&product_id, color, None).await?;
        }
        Some(CartAction::Quantity { id, quantity }) => {
            if !app.change_quantity(&id, quantity).await? {
                println!("Товар {} не найден в корзине", id);
            }
        }
        Some(CartAction::Remove { id }) => {
            if !app.remove_item(&id).await? {
                println!("Товар {} не найден в корзине", id);
            }
        }
        Some(CartAction::Clear) => {
            app.clear_cart().await?;
        }
        None => {}
    }

    let currency = &app.config().currency;
    let lines = app.cart().lines();
    if lines.is_empty() {
        println!("Корзина пуста");
        return Ok(());
    }
    let mut total = 0i64;
    for line in &lines {
        total += line.price * i64::from(line.quantity);
        let color = line
            .selected_color
            .as_deref()
            .map(|c| format!(" • {}", c))
            .unwrap_or_default();
        println!(
            "[{}] {}{} × {}  {}",
            line.id,
            line.name,
            color,
            line.quantity,
            format_price(line.price, currency)
        );
    }
    println!("Товаров: {}, итого: {}", app.cart().count(), format_price(total, currency));
    Ok(())
}

async fn do_favorites(
    client: Arc<StorefrontClient>,
    action: Option<FavoritesAction>,
) -> anyhow::Result<()> {
    let mut app = signed_in(client).await?;

    match action {
        Some(FavoritesAction::Toggle { product_id }) => {
            if app.toggle_favorite(&product_id).await? {
                println!("Добавлено в избранное");
            } else {
                println!("Удалено из избранного");
            }
        }
        Some(FavoritesAction::Clear) => {
            app.clear_favorites().await?;
        }
        None => {}
    }

    let currency = &app.config().currency;
    let cards = app.favorites().cards();
    if cards.is_empty() {
        println!("В избранном пусто");
    }
    for card in cards {
        let in_cart = if app.cart().contains_product(&card.id) {
            " (в корзине)"
        } else {
            ""
        };
        println!(
            "[{}] {}  {}{}",
            card.id,
            card.name,
            format_price(card.price, currency),
            in_cart
        );
    }
    Ok(())
}
