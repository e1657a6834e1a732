use std::io;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vouchers::config::{Config, DatabaseConfig, LogFormat, StoreKind};
use vouchers::health::HealthState;
use vouchers::middleware::{json_config, ErrorHandler, RequestId};
use vouchers::vouchers::{
    InMemoryVoucherRepository, MySqlVoucherRepository, VoucherRepository, VoucherService,
};

fn init_tracing(format: LogFormat, log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("vouchers={},actix_web=info", log_level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load configuration
    let config = Config::from_env().map_err(io::Error::other)?;
    config.validate().map_err(io::Error::other)?;

    init_tracing(config.app.log_format, &config.app.log_level);

    tracing::info!("Starting voucher service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let (repository, health): (Arc<dyn VoucherRepository>, HealthState) =
        match (config.store, &config.database) {
            (StoreKind::MySql, Some(database)) => {
                let pool = database.create_pool().await.map_err(io::Error::other)?;
                DatabaseConfig::run_migrations(&pool)
                    .await
                    .map_err(io::Error::other)?;

                tracing::info!(
                    "Database pool initialized ({} connections)",
                    database.pool_size
                );

                (
                    Arc::new(MySqlVoucherRepository::new(pool.clone())),
                    HealthState { pool: Some(pool) },
                )
            }
            _ => {
                tracing::warn!("Using in-memory voucher store; data is lost on restart");
                (
                    Arc::new(InMemoryVoucherRepository::new()),
                    HealthState::default(),
                )
            }
        };

    let service = web::Data::new(Arc::new(VoucherService::new(repository)));
    let health = web::Data::new(health);

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(ErrorHandler)
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .app_data(json_config())
            .app_data(service.clone())
            .app_data(health.clone())
            .configure(vouchers::modules::configure)
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}
