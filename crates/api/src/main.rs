use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookings_api::config::ServerConfig;
use bookings_api::router::build_app_router;
use bookings_api::state::AppState;
use bookings_db::DbPool;
use bookings_mail::{EmailConfig, EmailDelivery, LogDelivery, MailQueue, MailTransport, MailWorker};

/// How long queued mail may take to flush after the server stops.
const MAIL_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        in_production = config.in_production,
        "Loaded server configuration",
    );

    let pool = connect_database().await;
    if let Some(admin) = &config.admin {
        bookings_api::auth::bootstrap_admin(&pool, admin)
            .await
            .expect("Failed to bootstrap administrator account");
    }

    let mail_cancel = CancellationToken::new();
    let (mail, mail_handle) = start_mail_worker(config.mail_queue_capacity, mail_cancel.clone());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        mail,
    };
    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(
        config.host.parse().expect("HOST must be an IP address"),
        config.port,
    );
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!(%addr, "Bookings server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // Handlers are gone; close the queue and flush what is buffered.
    mail_cancel.cancel();
    if tokio::time::timeout(MAIL_DRAIN_TIMEOUT, mail_handle).await.is_err() {
        tracing::warn!("Mail worker did not drain in time, remaining mail dropped");
    }
    tracing::info!("Shutdown complete");
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookings_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect, confirm the database answers, and bring the schema up to date.
async fn connect_database() -> DbPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = bookings_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    bookings_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    bookings_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database ready");
    pool
}

/// SMTP when `SMTP_HOST` is set, otherwise mail is only logged.
fn mail_transport() -> Arc<dyn MailTransport> {
    match EmailConfig::from_env() {
        Some(smtp) => {
            tracing::info!(host = %smtp.smtp_host, port = smtp.smtp_port, "SMTP delivery enabled");
            Arc::new(EmailDelivery::new(&smtp).expect("Invalid SMTP configuration"))
        }
        None => {
            tracing::warn!("SMTP_HOST not set, emails will be logged instead of sent");
            Arc::new(LogDelivery)
        }
    }
}

fn start_mail_worker(capacity: usize, cancel: CancellationToken) -> (MailQueue, JoinHandle<()>) {
    let (queue, receiver) = MailQueue::new(capacity);
    let worker = MailWorker::new(mail_transport());
    let handle = tokio::spawn(async move { worker.run(receiver, cancel).await });
    tracing::info!(capacity, "Mail worker started");
    (queue, handle)
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let interrupt = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        () = interrupt => "SIGINT",
        () = terminate => "SIGTERM",
    };
    tracing::info!(signal, "Shutting down, draining connections");
}
