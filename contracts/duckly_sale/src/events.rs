//! Contract events published by the sale.
//!
//! | Topic                      | Data                   |
//! |----------------------------|------------------------|
//! | `("minted", to)`           | [`DucklyMinted`]       |
//! | `("batch_opn", tier)`      | owner `Address`        |
//! | `("batch_cls", tier)`      | owner `Address`        |
//! | `("withdraw",)`            | [`Withdrawn`]          |
//! | `("owner",)`               | [`OwnershipTransferred`] |

use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::types::{Allocation, Tier};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DucklyMinted {
    pub to: Address,
    pub first_token_id: u32,
    pub quantity: u32,
    pub allocation: Allocation,
    pub price: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdrawn {
    pub to: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferred {
    pub previous_owner: Address,
    pub new_owner: Address,
}

pub fn minted(env: &Env, event: DucklyMinted) {
    env.events()
        .publish((symbol_short!("minted"), event.to.clone()), event);
}

pub fn batch_toggled(env: &Env, tier: Tier, open: bool, by: &Address) {
    let topic = if open {
        symbol_short!("batch_opn")
    } else {
        symbol_short!("batch_cls")
    };
    env.events().publish((topic, tier), by.clone());
}

pub fn withdrawn(env: &Env, to: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("withdraw"),),
        Withdrawn {
            to: to.clone(),
            amount,
        },
    );
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
