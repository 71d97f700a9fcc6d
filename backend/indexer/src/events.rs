//! Canonical event kinds emitted by the Duckly sale and Genesis contracts.
//!
//! These mirror the topics published in `contracts/duckly_sale/src/events.rs`
//! and `contracts/duckly_genesis/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the Duckly contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Tiered sale mint (`minted` topic).
    Minted,
    /// Genesis batch mint (`batch_mnt` topic).
    BatchMint,
    /// MYDLY debited for a Genesis mint (`payment` topic).
    PaymentProcessed,
    /// A sale tier was opened (`batch_opn` topic).
    BatchOpened,
    /// A sale tier was closed (`batch_cls` topic).
    BatchClosed,
    /// Proceeds swept to the owner (`withdraw` topic).
    Withdrawn,
    /// Genesis drop paused (`paused` topic).
    Paused,
    /// Genesis drop unpaused (`unpaused` topic).
    Unpaused,
    /// A Genesis token changed hands (`transfer` topic).
    Transferred,
    /// A Genesis token was burned (`burned` topic).
    Burned,
    /// Contract ownership moved (`owner` topic).
    OwnershipTransferred,
    /// An event from a watched contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "minted" => Self::Minted,
            "batch_mnt" => Self::BatchMint,
            "payment" => Self::PaymentProcessed,
            "batch_opn" => Self::BatchOpened,
            "batch_cls" => Self::BatchClosed,
            "withdraw" => Self::Withdrawn,
            "paused" => Self::Paused,
            "unpaused" => Self::Unpaused,
            "transfer" => Self::Transferred,
            "burned" => Self::Burned,
            "owner" => Self::OwnershipTransferred,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minted => "minted",
            Self::BatchMint => "batch_mint",
            Self::PaymentProcessed => "payment_processed",
            Self::BatchOpened => "batch_opened",
            Self::BatchClosed => "batch_closed",
            Self::Withdrawn => "withdrawn",
            Self::Paused => "paused",
            Self::Unpaused => "unpaused",
            Self::Transferred => "transferred",
            Self::Burned => "burned",
            Self::OwnershipTransferred => "ownership_transferred",
            Self::Unknown => "unknown",
        }
    }
}

/// A fully decoded Duckly event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DucklyEvent {
    /// RPC event id (or a synthesised `ledger:tx:index` key), unique per event.
    pub event_id: String,
    pub event_type: String,
    /// Second topic: an account, a sale tier or a token id depending on the kind.
    pub subject: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub quantity: Option<i64>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_id: String,
    pub event_type: String,
    pub subject: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub quantity: Option<i64>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
