use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use pixel_application::caching::Cache;
use pixel_application::catalog;
use pixel_application::context::AppContext;
use pixel_application::dispatcher::Dispatcher;
use pixel_application::users::{CreateUser, DeleteUserById, GetAllUsers, GetUserById};
use pixel_application::{InMemoryDispatcher, Outcome};
use pixel_infrastructure::{
    DatabaseSettings, InMemoryCache, InMemoryScopeFactory, InMemoryStore, SeedOptions,
    seed_catalog,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use uuid::Uuid;

/// PixelStore 请求管道演示
#[derive(Debug, Parser)]
#[command(name = "pixel-demo", version)]
struct Settings {
    /// 存储提供方：memory | file
    #[arg(long, env = "PIXEL_DATABASE_PROVIDER", default_value = "memory")]
    database_provider: String,

    /// file 提供方的快照文件路径
    #[arg(long, env = "PIXEL_CONNECTION_STRING")]
    connection_string: Option<String>,

    /// 种子用户/商品数量
    #[arg(long, env = "PIXEL_SEED_COUNT", default_value_t = pixel_infrastructure::seed::DEFAULT_ITEMS_TO_GENERATE)]
    seed_count: usize,

    /// 以 JSON 输出日志
    #[arg(long, env = "PIXEL_LOG_JSON", default_value_t = false)]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let builder = fmt().with_env_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    );
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

fn describe<T: std::fmt::Debug>(outcome: &Outcome<T>) -> String {
    match outcome {
        Outcome::Success(value) => format!("ok: {value:?}"),
        Outcome::Failure(failure) => format!("{}: {}", failure.kind(), failure.message()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::parse();
    init_tracing(settings.log_json);

    let database = DatabaseSettings::parse(
        &settings.database_provider,
        settings.connection_string.clone(),
    )?;
    let store = InMemoryStore::connect(&database).await?;

    let cancel = CancellationToken::new();
    let options = SeedOptions {
        count: settings.seed_count,
        ..SeedOptions::default()
    };
    let report = seed_catalog(&store, options, &cancel)
        .await
        .context("seeding catalog")?;
    info!(?report, "seed finished");

    let cache: Arc<dyn Cache> = Arc::new(InMemoryCache::new());
    let scopes = Arc::new(InMemoryScopeFactory::new(store.clone()));
    let dispatcher = catalog::register(InMemoryDispatcher::builder(scopes), cache).build()?;
    info!(requests = ?dispatcher.registered_requests(), "dispatcher ready");

    let ctx = AppContext::builder()
        .correlation_id(Uuid::new_v4().to_string())
        .cancellation(cancel)
        .build();

    let users = dispatcher.send(&ctx, GetAllUsers).await?;
    println!("GetAllUsers -> {} users", users.value().map_or(0, Vec::len));

    let Some(first) = users.value().and_then(|all| all.first()).cloned() else {
        println!("no users to work with");
        return Ok(());
    };

    let found = dispatcher.send(&ctx, GetUserById { user_id: first.id }).await?;
    println!("GetUserById({}) -> {}", first.id, describe(&found));

    let deleted = dispatcher.send(&ctx, DeleteUserById { user_id: first.id }).await?;
    println!("DeleteUserById({}) -> {}", first.id, describe(&deleted));

    let again = dispatcher.send(&ctx, GetUserById { user_id: first.id }).await?;
    println!("GetUserById({}) -> {}", first.id, describe(&again));

    let invalid = dispatcher
        .send(
            &ctx,
            CreateUser {
                first_name: String::new(),
                last_name: "Doe".into(),
                email: "not-an-email".into(),
            },
        )
        .await?;
    println!("CreateUser(invalid) -> {}", describe(&invalid));

    Ok(())
}
