//! # Storage
//!
//! Typed helpers over the two Soroban storage tiers used by the sale.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key      | Type         | Description                              |
//! |----------|--------------|------------------------------------------|
//! | `Owner`  | `Address`    | Sale owner, gates administrative calls   |
//! | `Config` | `SaleConfig` | Immutable sale configuration             |
//! | `State`  | `SaleState`  | Batch gates, tier counters, id cursor    |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                        | Type      | Description                          |
//! |----------------------------|-----------|--------------------------------------|
//! | `PublicMinted(addr)`       | `u32`     | Units minted through the open batch  |
//! | `HolderMinted(tier, addr)` | `u32`     | Units consumed from a holder tier    |
//! | `TokenOwner(id)`           | `Address` | Owner of an issued Duckly            |
//! | `Balance(addr)`            | `u32`     | Number of Ducklys held               |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{SaleConfig, SaleState, Tier};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Owner,
    Config,
    State,
    PublicMinted(Address),
    HolderMinted(Tier, Address),
    TokenOwner(u32),
    Balance(Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Owner)
}

pub fn get_owner(env: &Env) -> Result<Address, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(Error::NotInitialized)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
    bump_instance(env);
}

pub fn load_config(env: &Env) -> Result<SaleConfig, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn save_config(env: &Env, config: &SaleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

pub fn load_state(env: &Env) -> Result<SaleState, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::State)
        .ok_or(Error::NotInitialized)
}

pub fn save_state(env: &Env, state: &SaleState) {
    env.storage().instance().set(&DataKey::State, state);
    bump_instance(env);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

fn read_counter(env: &Env, key: &DataKey) -> u32 {
    let value: Option<u32> = env.storage().persistent().get(key);
    if value.is_some() {
        bump_persistent(env, key);
    }
    value.unwrap_or(0)
}

fn write_counter(env: &Env, key: &DataKey, value: u32) {
    env.storage().persistent().set(key, &value);
    bump_persistent(env, key);
}

pub fn public_minted(env: &Env, account: &Address) -> u32 {
    read_counter(env, &DataKey::PublicMinted(account.clone()))
}

pub fn add_public_minted(env: &Env, account: &Address, units: u32) {
    let key = DataKey::PublicMinted(account.clone());
    let current = read_counter(env, &key);
    write_counter(env, &key, current + units);
}

pub fn holder_minted(env: &Env, tier: Tier, account: &Address) -> u32 {
    read_counter(env, &DataKey::HolderMinted(tier, account.clone()))
}

pub fn add_holder_minted(env: &Env, tier: Tier, account: &Address, units: u32) {
    let key = DataKey::HolderMinted(tier, account.clone());
    let current = read_counter(env, &key);
    write_counter(env, &key, current + units);
}

// ── Token Ownership ──────────────────────────────────────────────────

pub fn balance_of(env: &Env, account: &Address) -> u32 {
    read_counter(env, &DataKey::Balance(account.clone()))
}

pub fn token_owner(env: &Env, token_id: u32) -> Result<Address, Error> {
    let key = DataKey::TokenOwner(token_id);
    let owner: Address = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::TokenNotFound)?;
    bump_persistent(env, &key);
    Ok(owner)
}

/// Assign `quantity` contiguous identifiers starting at `first` to `to`.
pub fn issue_tokens(env: &Env, to: &Address, first: u32, quantity: u32) {
    for token_id in first..first + quantity {
        let key = DataKey::TokenOwner(token_id);
        env.storage().persistent().set(&key, to);
        bump_persistent(env, &key);
    }
    let key = DataKey::Balance(to.clone());
    let held = read_counter(env, &key);
    write_counter(env, &key, held + quantity);
}
