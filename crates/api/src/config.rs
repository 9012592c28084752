/// Administrator account created at startup when it does not exist yet.
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub email: String,
    pub password: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Marks session cookies `Secure` when true.
    pub in_production: bool,
    /// Session lifetime in hours (default: `24`).
    pub session_lifetime_hours: i64,
    /// Sender address of every outbound email.
    pub mail_from: String,
    /// Recipient of new-reservation notifications.
    pub owner_email: String,
    /// Messages buffered between handlers and the mail worker.
    pub mail_queue_capacity: usize,
    /// Startup admin account, if both `ADMIN_EMAIL` and `ADMIN_PASSWORD` are set.
    pub admin: Option<AdminBootstrap>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                       |
    /// |--------------------------|-------------------------------|
    /// | `HOST`                   | `0.0.0.0`                     |
    /// | `PORT`                   | `8080`                        |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                          |
    /// | `IN_PRODUCTION`          | `false`                       |
    /// | `SESSION_LIFETIME_HOURS` | `24`                          |
    /// | `MAIL_FROM`              | `reservations@bookings.local` |
    /// | `OWNER_EMAIL`            | `owner@bookings.local`        |
    /// | `MAIL_QUEUE_CAPACITY`    | `100`                         |
    /// | `ADMIN_EMAIL`            | unset                         |
    /// | `ADMIN_PASSWORD`         | unset                         |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let in_production: bool = std::env::var("IN_PRODUCTION")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("IN_PRODUCTION must be true or false");

        let session_lifetime_hours: i64 = std::env::var("SESSION_LIFETIME_HOURS")
            .unwrap_or_else(|_| "24".into())
            .parse()
            .expect("SESSION_LIFETIME_HOURS must be a valid i64");

        let mail_from =
            std::env::var("MAIL_FROM").unwrap_or_else(|_| "reservations@bookings.local".into());
        let owner_email =
            std::env::var("OWNER_EMAIL").unwrap_or_else(|_| "owner@bookings.local".into());

        let mail_queue_capacity: usize = std::env::var("MAIL_QUEUE_CAPACITY")
            .unwrap_or_else(|_| bookings_mail::queue::DEFAULT_CAPACITY.to_string())
            .parse()
            .expect("MAIL_QUEUE_CAPACITY must be a valid usize");

        let admin = match (std::env::var("ADMIN_EMAIL"), std::env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) if !email.is_empty() && !password.is_empty() => {
                Some(AdminBootstrap { email, password })
            }
            _ => None,
        };

        Self {
            host,
            port,
            request_timeout_secs,
            in_production,
            session_lifetime_hours,
            mail_from,
            owner_email,
            mail_queue_capacity,
            admin,
        }
    }
}
