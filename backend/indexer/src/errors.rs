//! Errors raised while indexing Duckly sale and Genesis events.
//!
//! Poll failures are logged by the indexer loop and retried on the next tick;
//! API handlers turn them into a `500` JSON body (see `api.rs`).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexerError {
    /// Event store or cursor query failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Transport failure talking to Soroban RPC, or an undecodable response body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// `getEvents` rejected the request outright (`-32600` / `-32601`).
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Missing `CONTRACT_IDS` or an unparsable numeric setting.
    #[error("Configuration error: {0}")]
    Config(String),

    /// `getEvents` answered without a result.
    #[error("Event parse error: {0}")]
    EventParse(String),
}

pub type Result<T> = std::result::Result<T, IndexerError>;
