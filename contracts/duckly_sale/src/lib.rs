//! # Duckly Sale Contract
//!
//! Batched, multi-tier sale of the Duckly collection. Minting is gated by three
//! owner-controlled batches and priced by the tier each unit is attributed to:
//!
//! | Tier               | Gate                          | Bound per address                     |
//! |--------------------|-------------------------------|---------------------------------------|
//! | `GueioHolders`     | `open_batch_gueio_holders`    | Gueio held × `mints_per_holding`      |
//! | `AppleTreeHolders` | `open_batch_apple_tree_holders` | AppleTree held × `mints_per_holding` |
//! | `Open`             | `open_batch_open`             | `public_mint_limit` in total          |
//!
//! | Phase      | Entry Point(s)                                   |
//! |------------|--------------------------------------------------|
//! | Bootstrap  | [`DucklySale::init`]                             |
//! | Batches    | `open_batch_*`, `close_batch_*`                  |
//! | Minting    | [`DucklySale::mint`], [`DucklySale::quote`]      |
//! | Treasury   | `withdraw`, `transfer_ownership`                 |
//! | Queries    | counters, gates, `balance`, `owner_of`, `config` |
//!
//! ## Architecture
//!
//! Tier attribution and pricing live in [`allocation`] as pure functions.
//! Storage access is delegated to [`storage`], the owner gate to [`access`].
//! This file wires the companion collections and the payment token around
//! them and applies the effects of a mint once every check has passed.

#![no_std]

use soroban_sdk::{
    contract, contractclient, contracterror, contractimpl, log, token, Address, Env,
};

pub mod allocation;
mod access;
pub mod events;
mod storage;
pub mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;

use allocation::{MintContext, TIER_ORDER};
pub use types::{
    Allocation, MintQuote, MintReceipt, SaleConfig, SaleState, Tier, TierPrices,
    MAX_SUPPLY, PUBLIC_MINT_LIMIT,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized      = 1,
    NotInitialized          = 2,
    NotOwner                = 3,
    InvalidConfig           = 4,
    InvalidQuantity         = 5,
    /// No open batch admits the caller for the requested units.
    BatchClosed             = 6,
    SoldOut                 = 7,
    PublicMintLimitExceeded = 8,
    /// The paid amount differs from the computed price.
    InsufficientPayment     = 9,
    WithdrawFailed          = 10,
    TokenNotFound           = 11,
    Overflow                = 12,
}

/// Read-only view of a companion collection.
#[allow(dead_code)]
#[contractclient(name = "HolderRegistryClient")]
pub trait HolderRegistry {
    /// Number of tokens of the collection held by `id`.
    fn balance(env: Env, id: Address) -> u32;
}

#[contract]
pub struct DucklySale;

#[contractimpl]
impl DucklySale {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the sale. Every batch starts closed and every counter at zero.
    ///
    /// Must be called exactly once; later calls fail with `AlreadyInitialized`.
    pub fn init(env: Env, owner: Address, config: SaleConfig) -> Result<(), Error> {
        owner.require_auth();
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        validate_config(&config)?;

        storage::set_owner(&env, &owner);
        storage::save_config(&env, &config);
        storage::save_state(&env, &SaleState::default());
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Batch administration
    // ─────────────────────────────────────────────────────────

    pub fn open_batch_gueio_holders(env: Env, caller: Address) -> Result<(), Error> {
        toggle_batch(&env, &caller, Tier::GueioHolders, true)
    }

    pub fn close_batch_gueio_holders(env: Env, caller: Address) -> Result<(), Error> {
        toggle_batch(&env, &caller, Tier::GueioHolders, false)
    }

    pub fn open_batch_apple_tree_holders(env: Env, caller: Address) -> Result<(), Error> {
        toggle_batch(&env, &caller, Tier::AppleTreeHolders, true)
    }

    pub fn close_batch_apple_tree_holders(env: Env, caller: Address) -> Result<(), Error> {
        toggle_batch(&env, &caller, Tier::AppleTreeHolders, false)
    }

    pub fn open_batch_open(env: Env, caller: Address) -> Result<(), Error> {
        toggle_batch(&env, &caller, Tier::Open, true)
    }

    pub fn close_batch_open(env: Env, caller: Address) -> Result<(), Error> {
        toggle_batch(&env, &caller, Tier::Open, false)
    }

    // ─────────────────────────────────────────────────────────
    // Minting
    // ─────────────────────────────────────────────────────────

    /// Mint `quantity` Ducklys to `caller`, paying exactly `paid_amount` of the
    /// payment token.
    ///
    /// Units go to the Gueio holder tier first, then the AppleTree holder tier,
    /// then the open tier. The request is all-or-nothing: nothing is debited or
    /// written unless every check passes.
    pub fn mint(
        env: Env,
        caller: Address,
        quantity: u32,
        paid_amount: i128,
    ) -> Result<MintReceipt, Error> {
        caller.require_auth();

        let config = storage::load_config(&env)?;
        let mut state = storage::load_state(&env)?;
        let quote = plan(&env, &config, &state, &caller, quantity)?;

        if paid_amount != quote.price {
            return Err(Error::InsufficientPayment);
        }

        token::Client::new(&env, &config.payment_token).transfer(
            &caller,
            &env.current_contract_address(),
            &paid_amount,
        );

        let allocation = quote.allocation;
        state.minted_with_gueio += allocation.gueio_holders;
        state.minted_with_apple_tree += allocation.apple_tree_holders;
        state.minted_open += allocation.open;
        state.total_supply += quantity;

        let first_token_id = state.next_token_id;
        state.next_token_id += quantity;
        storage::save_state(&env, &state);

        for tier in TIER_ORDER {
            let units = allocation.units(tier);
            if units == 0 {
                continue;
            }
            match tier {
                Tier::Open => storage::add_public_minted(&env, &caller, units),
                holders => storage::add_holder_minted(&env, holders, &caller, units),
            }
        }

        storage::issue_tokens(&env, &caller, first_token_id, quantity);

        log!(&env, "duckly mint", caller, first_token_id, quantity, quote.price);

        events::minted(
            &env,
            events::DucklyMinted {
                to: caller,
                first_token_id,
                quantity,
                allocation: allocation.clone(),
                price: quote.price,
            },
        );

        Ok(MintReceipt {
            first_token_id,
            quantity,
            allocation,
            price: quote.price,
        })
    }

    /// Preview the allocation and the exact price `mint` would charge `caller`.
    pub fn quote(env: Env, caller: Address, quantity: u32) -> Result<MintQuote, Error> {
        let config = storage::load_config(&env)?;
        let state = storage::load_state(&env)?;
        plan(&env, &config, &state, &caller, quantity)
    }

    // ─────────────────────────────────────────────────────────
    // Treasury & ownership
    // ─────────────────────────────────────────────────────────

    /// Sweep the collected payment-token balance to the owner.
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
        events::withdrawn(&env, &caller, amount);
        Ok(amount)
    }

    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<(), Error> {
        access::require_owner(&env, &caller)?;
        storage::set_owner(&env, &new_owner);
        events::ownership_transferred(&env, &caller, &new_owner);
        Ok(())
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        storage::get_owner(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn config(env: Env) -> Result<SaleConfig, Error> {
        storage::load_config(&env)
    }

    pub fn sale_state(env: Env) -> Result<SaleState, Error> {
        storage::load_state(&env)
    }

    pub fn is_batch_gueio_holders(env: Env) -> Result<bool, Error> {
        Ok(storage::load_state(&env)?.batch_gueio_holders)
    }

    pub fn is_batch_apple_tree_holders(env: Env) -> Result<bool, Error> {
        Ok(storage::load_state(&env)?.batch_apple_tree_holders)
    }

    pub fn is_batch_open(env: Env) -> Result<bool, Error> {
        Ok(storage::load_state(&env)?.batch_open)
    }

    pub fn minted_with_gueio(env: Env) -> Result<u32, Error> {
        Ok(storage::load_state(&env)?.minted_with_gueio)
    }

    pub fn minted_with_apple_tree(env: Env) -> Result<u32, Error> {
        Ok(storage::load_state(&env)?.minted_with_apple_tree)
    }

    pub fn minted_open(env: Env) -> Result<u32, Error> {
        Ok(storage::load_state(&env)?.minted_open)
    }

    pub fn total_supply(env: Env) -> Result<u32, Error> {
        Ok(storage::load_state(&env)?.total_supply)
    }

    pub fn next_token_id(env: Env) -> Result<u32, Error> {
        Ok(storage::load_state(&env)?.next_token_id)
    }

    pub fn max_supply(env: Env) -> Result<u32, Error> {
        Ok(storage::load_config(&env)?.max_supply)
    }

    /// Units `account` has minted through the open batch.
    pub fn public_mint_count(env: Env, account: Address) -> u32 {
        storage::public_minted(&env, &account)
    }

    /// Units `account` has consumed from a holder tier.
    pub fn holder_mint_count(env: Env, tier: Tier, account: Address) -> u32 {
        match tier {
            Tier::Open => storage::public_minted(&env, &account),
            holders => storage::holder_minted(&env, holders, &account),
        }
    }

    pub fn balance(env: Env, owner: Address) -> u32 {
        storage::balance_of(&env, &owner)
    }

    pub fn owner_of(env: Env, token_id: u32) -> Result<Address, Error> {
        storage::token_owner(&env, token_id)
    }
}

fn validate_config(config: &SaleConfig) -> Result<(), Error> {
    let prices = &config.prices;
    if config.max_supply == 0
        || config.mints_per_holding == 0
        || prices.gueio_holders <= 0
        || prices.apple_tree_holders <= 0
        || prices.open <= 0
    {
        return Err(Error::InvalidConfig);
    }
    Ok(())
}

fn toggle_batch(env: &Env, caller: &Address, tier: Tier, open: bool) -> Result<(), Error> {
    access::require_owner(env, caller)?;
    let mut state = storage::load_state(env)?;
    state.set_batch(tier, open);
    storage::save_state(env, &state);
    events::batch_toggled(env, tier, open, caller);
    Ok(())
}

/// Remaining holder allowance for `tier`, queried only while its batch is open.
fn holder_remaining(
    env: &Env,
    config: &SaleConfig,
    state: &SaleState,
    caller: &Address,
    tier: Tier,
) -> u32 {
    let registry = match tier {
        Tier::GueioHolders => &config.gueio,
        Tier::AppleTreeHolders => &config.apple_tree,
        Tier::Open => return 0,
    };
    if !state.is_batch_open(tier) {
        return 0;
    }
    let held = HolderRegistryClient::new(env, registry).balance(caller);
    allocation::remaining_allowance(
        held,
        config.mints_per_holding,
        storage::holder_minted(env, tier, caller),
    )
}

/// Run every admission check against one snapshot and price the result.
fn plan(
    env: &Env,
    config: &SaleConfig,
    state: &SaleState,
    caller: &Address,
    quantity: u32,
) -> Result<MintQuote, Error> {
    let windows = allocation::windows(
        state,
        holder_remaining(env, config, state, caller, Tier::GueioHolders),
        holder_remaining(env, config, state, caller, Tier::AppleTreeHolders),
    );
    let context = MintContext {
        quantity,
        total_supply: state.total_supply,
        max_supply: config.max_supply,
        public_minted: storage::public_minted(env, caller),
        public_mint_limit: config.public_mint_limit,
    };

    let allocation = allocation::allocate(&windows, &context)?;
    let price = allocation::price(&allocation, &config.prices)?;
    Ok(MintQuote { allocation, price })
}
