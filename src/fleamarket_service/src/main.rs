use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr};
use fleamarket_adapters::{
    auth::{Argon2Hasher, JwtSessionIssuer},
    config::MarketSettings,
    email::{MockNotifier, PostmarkNotifier},
    persistence::{HashMapCodeStore, HashMapGoodsStore, HashMapUserStore, RedisCodeStore},
};
use fleamarket_application::VerificationService;
use fleamarket_core::{CodeStore, MailAddress, Notifier};
use fleamarket_service::MarketService;
use reqwest::Client as HttpClient;
use tokio::net::TcpListener;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = MarketSettings::load().wrap_err("Failed to load settings")?;

    match settings.redis.clone() {
        Some(redis) => {
            let redis_client = redis::Client::open(format!("redis://{}/", redis.host_name))?;
            let redis_conn = redis_client
                .get_multiplexed_async_connection()
                .await
                .wrap_err("Failed to connect to Redis")?;
            with_notifier(settings, RedisCodeStore::new(redis_conn)).await
        }
        None => {
            tracing::warn!("No Redis host configured, keeping verification codes in memory");
            let code_store = HashMapCodeStore::new();
            spawn_purge(code_store.clone());
            with_notifier(settings, code_store).await
        }
    }
}

async fn with_notifier<C>(settings: MarketSettings, code_store: C) -> Result<()>
where
    C: CodeStore + Clone + 'static,
{
    match settings.email_client.clone() {
        Some(email_client) => {
            let http_client = HttpClient::builder()
                .timeout(email_client.timeout())
                .build()?;

            let notifier = PostmarkNotifier::new(
                email_client.base_url.clone(),
                MailAddress::try_from(email_client.sender.clone())?,
                email_client.auth_token.clone(),
                http_client,
                settings.verification.code_ttl(),
            );
            run(settings, code_store, notifier).await
        }
        None => {
            tracing::warn!("No Postmark settings, verification codes are only logged");
            run(settings, code_store, MockNotifier::new()).await
        }
    }
}

async fn run<C, N>(settings: MarketSettings, code_store: C, notifier: N) -> Result<()>
where
    C: CodeStore + Clone + 'static,
    N: Notifier + Clone + 'static,
{
    let collaborator_timeout = settings.verification.collaborator_timeout();

    let verification = VerificationService::new(code_store, notifier)
        .with_code_ttl(settings.verification.code_ttl())
        .with_timeout(collaborator_timeout);

    let market_service = MarketService::new(
        verification,
        HashMapUserStore::new(),
        HashMapGoodsStore::new(),
        Argon2Hasher::new(),
        JwtSessionIssuer::new(settings.session.jwt_config()),
        collaborator_timeout,
    );

    let listener = TcpListener::bind(settings.app.address.as_str()).await?;
    tracing::info!("Starting fleamarket service...");

    market_service
        .run_standalone(listener, Some(settings.allowed_origins))
        .await?;

    Ok(())
}

/// Drop expired codes from the in-memory store now and then.
fn spawn_purge(code_store: HashMapCodeStore) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        loop {
            interval.tick().await;
            let purged = code_store.purge_expired();
            if purged > 0 {
                tracing::debug!(purged, "Purged expired verification codes");
            }
        }
    });
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
