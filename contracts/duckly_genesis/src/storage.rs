//! # Storage
//!
//! ## Instance storage
//!
//! | Key           | Type            | Description                     |
//! |---------------|-----------------|---------------------------------|
//! | `Owner`       | `Address`       | Contract owner                  |
//! | `Config`      | `GenesisConfig` | Payment token, price and cap    |
//! | `Paused`      | `bool`          | Pause gate                      |
//! | `NextTokenId` | `u32`           | Identifier cursor / minted count |
//!
//! ## Persistent storage
//!
//! | Key              | Type      | Description             |
//! |------------------|-----------|-------------------------|
//! | `TokenOwner(id)` | `Address` | Owner of a live token   |
//! | `Balance(addr)`  | `u32`     | Number of tokens held   |

use soroban_sdk::{contracttype, Address, Env};

use crate::types::GenesisConfig;
use crate::Error;

const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Owner,
    Config,
    Paused,
    NextTokenId,
    TokenOwner(u32),
    Balance(Address),
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
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

pub fn load_config(env: &Env) -> Result<GenesisConfig, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn save_config(env: &Env, config: &GenesisConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
    bump_instance(env);
}

/// Number of tokens ever minted, which is also the next identifier.
pub fn next_token_id(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::NextTokenId)
        .unwrap_or(0)
}

pub fn balance_of(env: &Env, account: &Address) -> u32 {
    let key = DataKey::Balance(account.clone());
    let held: Option<u32> = env.storage().persistent().get(&key);
    if held.is_some() {
        bump_persistent(env, &key);
    }
    held.unwrap_or(0)
}

fn set_balance(env: &Env, account: &Address, held: u32) {
    let key = DataKey::Balance(account.clone());
    env.storage().persistent().set(&key, &held);
    bump_persistent(env, &key);
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

/// Mint `quantity` contiguous identifiers to `to`, returning the first one.
pub fn issue_tokens(env: &Env, to: &Address, quantity: u32) -> u32 {
    let first = next_token_id(env);
    for token_id in first..first + quantity {
        let key = DataKey::TokenOwner(token_id);
        env.storage().persistent().set(&key, to);
        bump_persistent(env, &key);
    }
    set_balance(env, to, balance_of(env, to) + quantity);
    env.storage()
        .instance()
        .set(&DataKey::NextTokenId, &(first + quantity));
    bump_instance(env);
    first
}

pub fn move_token(env: &Env, token_id: u32, from: &Address, to: &Address) {
    let key = DataKey::TokenOwner(token_id);
    env.storage().persistent().set(&key, to);
    bump_persistent(env, &key);
    set_balance(env, from, balance_of(env, from) - 1);
    set_balance(env, to, balance_of(env, to) + 1);
}

pub fn remove_token(env: &Env, token_id: u32, owner: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::TokenOwner(token_id));
    set_balance(env, owner, balance_of(env, owner) - 1);
}
