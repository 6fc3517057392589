//! Activity Hub API server.

use std::error::Error;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use activity_hub::adapters::auth::{JwtConfig, JwtSessionValidator};
use activity_hub::adapters::http::{build_router, Dependencies};
use activity_hub::adapters::postgres::{
    PostgresActivityRepository, PostgresClickRecorder, PostgresCompanyRepository,
    PostgresFavoriteRepository,
};
use activity_hub::config::AppConfig;
use activity_hub::domain::billing::StripeWebhookVerifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    if config.payment.is_test_mode() {
        info!("Stripe is in test mode");
    }

    let addr = config.server.listen_addr;

    info!(
        database = %config.database.redacted_url(),
        max_connections = config.database.max_connections,
        "Connecting to database"
    );
    let pool = config.database.pool_options().connect(&config.database.url).await?;

    if config.database.run_migrations {
        info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let jwt = JwtConfig::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_issuer.clone(),
        config.auth.jwt_audience.clone(),
    )
    .with_leeway(config.auth.leeway_secs);

    let deps = Dependencies {
        companies: Arc::new(PostgresCompanyRepository::new(pool.clone())),
        activities: Arc::new(PostgresActivityRepository::new(pool.clone())),
        favorites: Arc::new(PostgresFavoriteRepository::new(pool.clone())),
        clicks: Arc::new(PostgresClickRecorder::new(pool)),
        session_validator: Arc::new(JwtSessionValidator::new(jwt)),
        webhook_verifier: Arc::new(StripeWebhookVerifier::new(
            config.payment.stripe_webhook_secret.clone(),
        )),
        default_trial_days: config.payment.default_trial_days,
    };

    let app = build_router(deps, &config.server);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// JSON logs in production, compact logs elsewhere. `RUST_LOG` overrides
/// `server.log_filter`.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_filter));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
