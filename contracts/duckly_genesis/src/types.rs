//! # Types
//!
//! Configuration for the Genesis drop. Unlike the tiered sale there are no
//! batches and no holder checks: every mint is admissible while the contract
//! is unpaused and supply remains.

use soroban_sdk::{contracttype, Address};

/// Stroops per whole MYDLY (7-decimal Stellar asset).
pub const MYDLY_UNIT: i128 = 10_000_000;

/// Price of a single Genesis Duckly before discounts.
pub const PUBLIC_MINT_PRICE: i128 = 100 * MYDLY_UNIT;

/// Supply cap of the Genesis drop.
pub const MAX_SUPPLY_GENESIS: u32 = 1_000;

/// The all-zero ed25519 account, used as the burn / null address on Stellar.
pub const ZERO_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GenesisConfig {
    /// MYDLY token contract; buyers pre-authorise an allowance on it.
    pub payment_token: Address,
    /// Undiscounted price of one Duckly in token stroops.
    pub unit_price: i128,
    pub max_supply: u32,
}

impl GenesisConfig {
    pub fn standard(payment_token: Address) -> Self {
        GenesisConfig {
            payment_token,
            unit_price: PUBLIC_MINT_PRICE,
            max_supply: MAX_SUPPLY_GENESIS,
        }
    }
}
