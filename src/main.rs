use std::process::exit;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sakay_admin::client::auth::{FileTokenStore, TokenStore};
use sakay_admin::{ApiClient, Config};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sakay_admin=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    tracing::info!("Using API at {}", config.api_base_url);

    let store = Arc::new(FileTokenStore::new(&config.token_dir));
    let client = ApiClient::new(&config, store.clone());

    // Without a stored token, sign in from the environment
    if store.token().is_none() {
        let email = std::env::var("ADMIN_EMAIL").unwrap_or_default();
        let password = std::env::var("ADMIN_PASSWORD").unwrap_or_default();
        if email.is_empty() || password.is_empty() {
            tracing::error!("No stored session; set ADMIN_EMAIL and ADMIN_PASSWORD to sign in");
            exit(1);
        }

        match client.login(&email, &password).await {
            Ok(envelope) if envelope.success => {
                tracing::info!("Signed in as {}", email);
            }
            Ok(envelope) => {
                let message = envelope
                    .errors
                    .first()
                    .map(String::as_str)
                    .unwrap_or("Login failed");
                tracing::error!("Login rejected: {}", message);
                exit(1);
            }
            Err(err) => {
                tracing::error!("Login failed: {}", err.user_message());
                exit(1);
            }
        }
    }

    let (stats, recent) = tokio::join!(client.dashboard_stats(), client.recent_bookings(5));

    match stats.and_then(|env| env.into_data("Failed to load dashboard stats")) {
        Ok(stats) => {
            tracing::info!(
                "Platform: {} users, {} riders, {} bookings, total revenue {:.2}",
                stats.total_users,
                stats.total_riders,
                stats.total_bookings,
                stats.total_revenue
            );
        }
        Err(err) => tracing::error!("Stats unavailable: {}", err.user_message()),
    }

    match recent.and_then(|env| env.into_data("Failed to load recent bookings")) {
        Ok(bookings) => {
            for booking in &bookings {
                tracing::info!(
                    "Booking #{} [{:?}] fare {:?}",
                    booking.id,
                    booking.status,
                    booking.display_fare()
                );
            }
        }
        Err(err) => tracing::error!("Recent bookings unavailable: {}", err.user_message()),
    }
}
