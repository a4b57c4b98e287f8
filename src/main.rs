//! adhikar - Forest Rights Act claim form digitization.
//!
//! Recognizes scanned claim forms, extracts their fields and validates the
//! claim against the statutory rules.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    let default_filter = if adhikar::cli::is_verbose() {
        "adhikar=info"
    } else {
        "adhikar=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    adhikar::cli::run().await
}
