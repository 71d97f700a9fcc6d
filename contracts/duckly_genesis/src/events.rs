//! Contract events published by the Genesis drop.
//!
//! | Topic                     | Data                 |
//! |---------------------------|----------------------|
//! | `("batch_mnt", to)`       | [`BatchMint`]        |
//! | `("payment", payer)`      | `i128` amount        |
//! | `("withdraw", owner)`     | `i128` amount        |
//! | `("paused",)`             | caller `Address`     |
//! | `("unpaused",)`           | caller `Address`     |
//! | `("transfer", token_id)`  | [`Transferred`]      |
//! | `("burned", token_id)`    | owner `Address`      |
//! | `("owner",)`              | [`OwnershipTransferred`] |

use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchMint {
    pub to: Address,
    pub start_token_id: u32,
    pub quantity: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transferred {
    pub from: Address,
    pub to: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferred {
    pub previous_owner: Address,
    pub new_owner: Address,
}

pub fn batch_mint(env: &Env, to: &Address, start_token_id: u32, quantity: u32) {
    env.events().publish(
        (symbol_short!("batch_mnt"), to.clone()),
        BatchMint {
            to: to.clone(),
            start_token_id,
            quantity,
        },
    );
}

pub fn payment_processed(env: &Env, payer: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("payment"), payer.clone()), amount);
}

pub fn withdraw_processed(env: &Env, owner: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("withdraw"), owner.clone()), amount);
}

pub fn paused(env: &Env, by: &Address) {
    env.events().publish((symbol_short!("paused"),), by.clone());
}

pub fn unpaused(env: &Env, by: &Address) {
    env.events().publish((symbol_short!("unpaused"),), by.clone());
}

pub fn transferred(env: &Env, token_id: u32, from: &Address, to: &Address) {
    env.events().publish(
        (symbol_short!("transfer"), token_id),
        Transferred {
            from: from.clone(),
            to: to.clone(),
        },
    );
}

pub fn burned(env: &Env, token_id: u32, owner: &Address) {
    env.events()
        .publish((symbol_short!("burned"), token_id), owner.clone());
}

pub fn ownership_transferred(env: &Env, previous_owner: &Address, new_owner: &Address) {
    env.events().publish(
        (symbol_short!("owner"),),
        OwnershipTransferred {
            previous_owner: previous_owner.clone(),
            new_owner: new_owner.clone(),
        },
    );
}
