//! # Types
//!
//! Shared data structures for the Duckly sale.
//!
//! ## Config / State split
//!
//! - [`SaleConfig`] is written once by `init` and never mutated.
//! - [`SaleState`] is the single mutable aggregate: batch gates, per-tier
//!   counters, total supply and the identifier cursor. It is rewritten on
//!   every successful mint and every batch toggle.
//!
//! Per-address counters (public mints, holder-tier consumption) and token
//! ownership live in persistent storage, see [`crate::storage`].

use soroban_sdk::{contracttype, Address};

/// Stroops per whole unit of a 7-decimal Stellar asset.
pub const STROOPS_PER_UNIT: i128 = 10_000_000;

/// Supply cap of the standard Duckly sale.
pub const MAX_SUPPLY: u32 = 2048;

/// Most Ducklys a single address may mint through the open batch.
pub const PUBLIC_MINT_LIMIT: u32 = 10;

pub const PRICE_GUEIO_HOLDERS: i128 = 16 * STROOPS_PER_UNIT;
pub const PRICE_APPLE_TREE_HOLDERS: i128 = 18 * STROOPS_PER_UNIT;
pub const PRICE_OPEN: i128 = 20 * STROOPS_PER_UNIT;

/// The three eligibility classes, in allocation priority order.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Tier {
    /// Holders of the Gueio collection.
    GueioHolders,
    /// Holders of the AppleTree collection.
    AppleTreeHolders,
    /// Anyone.
    Open,
}

/// Unit price charged for each tier.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierPrices {
    pub gueio_holders: i128,
    pub apple_tree_holders: i128,
    pub open: i128,
}

impl TierPrices {
    pub fn standard() -> Self {
        TierPrices {
            gueio_holders: PRICE_GUEIO_HOLDERS,
            apple_tree_holders: PRICE_APPLE_TREE_HOLDERS,
            open: PRICE_OPEN,
        }
    }
}

/// Immutable sale configuration, written once at `init`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleConfig {
    /// Token the buyer pays with (the native asset contract in production).
    pub payment_token: Address,
    /// Companion collection granting the first tier.
    pub gueio: Address,
    /// Companion collection granting the second tier.
    pub apple_tree: Address,
    pub max_supply: u32,
    pub public_mint_limit: u32,
    /// Ducklys a holder may mint per companion token held.
    pub mints_per_holding: u32,
    pub prices: TierPrices,
}

impl SaleConfig {
    /// The configuration the sale was launched with.
    pub fn standard(payment_token: Address, gueio: Address, apple_tree: Address) -> Self {
        SaleConfig {
            payment_token,
            gueio,
            apple_tree,
            max_supply: MAX_SUPPLY,
            public_mint_limit: PUBLIC_MINT_LIMIT,
            mints_per_holding: 1,
            prices: TierPrices::standard(),
        }
    }
}

/// Mutable sale state. Created zeroed with every batch closed.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SaleState {
    pub batch_gueio_holders: bool,
    pub batch_apple_tree_holders: bool,
    pub batch_open: bool,
    pub minted_with_gueio: u32,
    pub minted_with_apple_tree: u32,
    pub minted_open: u32,
    pub total_supply: u32,
    pub next_token_id: u32,
}

impl SaleState {
    pub fn is_batch_open(&self, tier: Tier) -> bool {
        match tier {
            Tier::GueioHolders => self.batch_gueio_holders,
            Tier::AppleTreeHolders => self.batch_apple_tree_holders,
            Tier::Open => self.batch_open,
        }
    }

    pub fn set_batch(&mut self, tier: Tier, open: bool) {
        match tier {
            Tier::GueioHolders => self.batch_gueio_holders = open,
            Tier::AppleTreeHolders => self.batch_apple_tree_holders = open,
            Tier::Open => self.batch_open = open,
        }
    }
}

/// How the units of one mint are attributed across tiers.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Allocation {
    pub gueio_holders: u32,
    pub apple_tree_holders: u32,
    pub open: u32,
}

impl Allocation {
    pub fn units(&self, tier: Tier) -> u32 {
        match tier {
            Tier::GueioHolders => self.gueio_holders,
            Tier::AppleTreeHolders => self.apple_tree_holders,
            Tier::Open => self.open,
        }
    }

    pub fn total(&self) -> u32 {
        self.gueio_holders + self.apple_tree_holders + self.open
    }
}

/// Preview of what a mint would allocate and charge.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintQuote {
    pub allocation: Allocation,
    pub price: i128,
}

/// Outcome of a successful mint.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintReceipt {
    /// First identifier issued; the rest follow contiguously.
    pub first_token_id: u32,
    pub quantity: u32,
    pub allocation: Allocation,
    pub price: i128,
}
