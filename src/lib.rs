pub mod config;
pub mod error;
pub mod password;
pub mod db;
pub mod registry;
pub mod snapshot;
pub mod backup;
pub mod restore;

pub use config::Config;
pub use error::{ AppError, Result };

use tracing_subscriber::{ layer::SubscriberExt, util::SubscriberInitExt };

/// Initialize tracing for the one-shot maintenance binaries.
pub fn init_tracing() {
    tracing_subscriber
        ::registry()
        .with(
            tracing_subscriber::EnvFilter
                ::try_from_default_env()
                .unwrap_or_else(|_| "cointrade=info".into())
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
