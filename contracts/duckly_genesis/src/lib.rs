//! # Duckly Genesis Contract
//!
//! Single-tier Duckly drop paid in MYDLY. Buyers approve an allowance on the
//! MYDLY token and the contract debits the (possibly discounted) cost with
//! `transfer_from` when minting.
//!
//! | Phase     | Entry Point(s)                                              |
//! |-----------|-------------------------------------------------------------|
//! | Bootstrap | [`DucklyGenesis::init`]                                     |
//! | Minting   | `safe_mint`, `mint_three`, `mint_five`, `mint_bulk`         |
//! | Tokens    | `transfer`, `burn`, `balance`, `owner_of`                   |
//! | Admin     | `pause`, `unpause`, `withdraw`, `transfer_ownership`        |
//!
//! Minting, transfers and burns are blocked while paused. Pricing lives in
//! [`pricing`].

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, log, token, Address, Env, String};

mod access;
pub mod events;
pub mod pricing;
mod storage;
pub mod types;

#[cfg(test)]
mod test_events;

pub use types::{GenesisConfig, MAX_SUPPLY_GENESIS, PUBLIC_MINT_PRICE, ZERO_ACCOUNT};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized  = 1,
    NotInitialized      = 2,
    NotOwner            = 3,
    InvalidConfig       = 4,
    InvalidQuantity     = 5,
    ZeroAddress         = 6,
    ExceedsMaxSupply    = 7,
    /// Allowance or balance below the cost of the mint.
    InsufficientPayment = 8,
    WithdrawFailed      = 9,
    ContractPaused      = 10,
    NotPaused           = 11,
    TokenNotFound       = 12,
    NotTokenOwner       = 13,
    Overflow            = 14,
}

#[contract]
pub struct DucklyGenesis;

#[contractimpl]
impl DucklyGenesis {
    /// Initialise the drop. Must be called exactly once.
    pub fn init(env: Env, owner: Address, config: GenesisConfig) -> Result<(), Error> {
        owner.require_auth();
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        if config.unit_price <= 0 || config.max_supply == 0 {
            return Err(Error::InvalidConfig);
        }

        storage::set_owner(&env, &owner);
        storage::save_config(&env, &config);
        storage::set_paused(&env, false);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Minting
    // ─────────────────────────────────────────────────────────

    /// Mint one Duckly to `to` at full price. Returns the token id.
    pub fn safe_mint(env: Env, payer: Address, to: Address) -> Result<u32, Error> {
        mint_batch(&env, &payer, &to, 1)
    }

    /// Mint three Ducklys at a 10 % discount. Returns the first token id.
    pub fn mint_three(env: Env, payer: Address, to: Address) -> Result<u32, Error> {
        mint_batch(&env, &payer, &to, 3)
    }

    /// Mint five Ducklys at a 15 % discount. Returns the first token id.
    pub fn mint_five(env: Env, payer: Address, to: Address) -> Result<u32, Error> {
        mint_batch(&env, &payer, &to, 5)
    }

    /// Mint `quantity` Ducklys, discounted by quantity. Returns the first token id.
    pub fn mint_bulk(env: Env, payer: Address, to: Address, quantity: u32) -> Result<u32, Error> {
        mint_batch(&env, &payer, &to, quantity)
    }

    /// Cost of minting `quantity` Ducklys after the bulk discount.
    pub fn mint_cost(env: Env, quantity: u32) -> Result<i128, Error> {
        let config = storage::load_config(&env)?;
        pricing::mint_cost(quantity, config.unit_price)
    }

    // ─────────────────────────────────────────────────────────
    // Token operations
    // ─────────────────────────────────────────────────────────

    pub fn transfer(env: Env, from: Address, to: Address, token_id: u32) -> Result<(), Error> {
        from.require_auth();
        access::require_not_paused(&env)?;
        if is_zero_address(&env, &to) {
            return Err(Error::ZeroAddress);
        }
        if storage::token_owner(&env, token_id)? != from {
            return Err(Error::NotTokenOwner);
        }

        storage::move_token(&env, token_id, &from, &to);
        events::transferred(&env, token_id, &from, &to);
        Ok(())
    }

    pub fn burn(env: Env, owner: Address, token_id: u32) -> Result<(), Error> {
        owner.require_auth();
        access::require_not_paused(&env)?;
        if storage::token_owner(&env, token_id)? != owner {
            return Err(Error::NotTokenOwner);
        }

        storage::remove_token(&env, token_id, &owner);
        events::burned(&env, token_id, &owner);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Administration
    // ─────────────────────────────────────────────────────────

    pub fn pause(env: Env, caller: Address) -> Result<(), Error> {
        access::require_owner(&env, &caller)?;
        access::require_not_paused(&env)?;
        storage::set_paused(&env, true);
        events::paused(&env, &caller);
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), Error> {
        access::require_owner(&env, &caller)?;
        access::require_paused(&env)?;
        storage::set_paused(&env, false);
        events::unpaused(&env, &caller);
        Ok(())
    }

    /// Sweep the collected MYDLY to the owner.
    pub fn withdraw(env: Env, caller: Address) -> Result<i128, Error> {
        access::require_owner(&env, &caller)?;
        let config = storage::load_config(&env)?;

        let payment = token::Client::new(&env, &config.payment_token);
        let contract = env.current_contract_address();
        let amount = payment.balance(&contract);
        if amount <= 0 {
            return Err(Error::WithdrawFailed);
        }

        payment.transfer(&contract, &caller, &amount);
        events::withdraw_processed(&env, &caller, amount);
        Ok(amount)
    }

    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<(), Error> {
        access::require_owner(&env, &caller)?;
        storage::set_owner(&env, &new_owner);
        events::ownership_transferred(&env, &caller, &new_owner);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn owner(env: Env) -> Result<Address, Error> {
        storage::get_owner(&env)
    }

    pub fn paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    pub fn config(env: Env) -> Result<GenesisConfig, Error> {
        storage::load_config(&env)
    }

    pub fn public_mint_price(env: Env) -> Result<i128, Error> {
        Ok(storage::load_config(&env)?.unit_price)
    }

    pub fn max_supply_genesis(env: Env) -> Result<u32, Error> {
        Ok(storage::load_config(&env)?.max_supply)
    }

    /// Tokens ever minted, burned ones included.
    pub fn total_minted(env: Env) -> u32 {
        storage::next_token_id(&env)
    }

    pub fn balance(env: Env, owner: Address) -> u32 {
        storage::balance_of(&env, &owner)
    }

    pub fn owner_of(env: Env, token_id: u32) -> Result<Address, Error> {
        storage::token_owner(&env, token_id)
    }
}

fn is_zero_address(env: &Env, address: &Address) -> bool {
    *address == Address::from_string(&String::from_str(env, ZERO_ACCOUNT))
}

fn mint_batch(env: &Env, payer: &Address, to: &Address, quantity: u32) -> Result<u32, Error> {
    payer.require_auth();
    access::require_not_paused(env)?;

    if quantity == 0 {
        return Err(Error::InvalidQuantity);
    }
    if is_zero_address(env, to) {
        return Err(Error::ZeroAddress);
    }

    let config = storage::load_config(env)?;
    match storage::next_token_id(env).checked_add(quantity) {
        Some(after) if after <= config.max_supply => {}
        _ => return Err(Error::ExceedsMaxSupply),
    }

    let cost = pricing::mint_cost(quantity, config.unit_price)?;
    let payment = token::Client::new(env, &config.payment_token);
    let contract = env.current_contract_address();
    if payment.allowance(payer, &contract) < cost || payment.balance(payer) < cost {
        return Err(Error::InsufficientPayment);
    }

    payment.transfer_from(&contract, payer, &contract, &cost);
    let start_token_id = storage::issue_tokens(env, to, quantity);

    log!(env, "genesis mint", payer.clone(), to.clone(), start_token_id, quantity, cost);

    events::batch_mint(env, to, start_token_id, quantity);
    events::payment_processed(env, payer, cost);
    Ok(start_token_id)
}
