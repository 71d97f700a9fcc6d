//! # Allocation
//!
//! Admission control and pricing for a single mint request, written as plain
//! functions over snapshot values so they can be exercised without a host.
//!
//! A request is attributed greedily over an ordered list of [`TierWindow`]s:
//!
//! ```text
//! [GueioHolders (bounded)] ──► [AppleTreeHolders (bounded)] ──► [Open (unbounded)]
//! ```
//!
//! A closed window is skipped. Whatever is left after the last window makes
//! the whole request fail; a request is never partially fulfilled.

use crate::types::{Allocation, SaleState, Tier, TierPrices};
use crate::Error;

/// Allocation priority, highest first.
pub const TIER_ORDER: [Tier; 3] = [Tier::GueioHolders, Tier::AppleTreeHolders, Tier::Open];

/// One entry of the ordered eligibility list.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TierWindow {
    pub tier: Tier,
    pub open: bool,
    /// Units the caller may still take from this tier. `None` means unbounded.
    pub remaining: Option<u32>,
}

impl TierWindow {
    pub fn holders(tier: Tier, open: bool, remaining: u32) -> Self {
        TierWindow {
            tier,
            open,
            remaining: Some(remaining),
        }
    }

    pub fn public(open: bool) -> Self {
        TierWindow {
            tier: Tier::Open,
            open,
            remaining: None,
        }
    }

    /// True when this window would accept at least one unit.
    pub fn admits(&self) -> bool {
        self.open && self.remaining.map_or(true, |r| r > 0)
    }
}

/// Snapshot of the counters a request is checked against.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MintContext {
    pub quantity: u32,
    pub total_supply: u32,
    pub max_supply: u32,
    /// Units the caller already took from the open tier.
    pub public_minted: u32,
    pub public_mint_limit: u32,
}

/// Units a holder may still mint in a holder tier.
pub fn remaining_allowance(balance: u32, mints_per_holding: u32, consumed: u32) -> u32 {
    balance.saturating_mul(mints_per_holding).saturating_sub(consumed)
}

/// Build the ordered window list from the sale state and the remaining
/// holder allowances snapshotted at call entry.
pub fn windows(state: &SaleState, gueio_remaining: u32, apple_tree_remaining: u32) -> [TierWindow; 3] {
    [
        TierWindow::holders(Tier::GueioHolders, state.batch_gueio_holders, gueio_remaining),
        TierWindow::holders(
            Tier::AppleTreeHolders,
            state.batch_apple_tree_holders,
            apple_tree_remaining,
        ),
        TierWindow::public(state.batch_open),
    ]
}

/// Decide how `ctx.quantity` units are attributed across `windows`.
///
/// Checks run in a fixed order and the first failure wins:
/// `InvalidQuantity`, `BatchClosed`, `SoldOut`, residual `BatchClosed`,
/// `PublicMintLimitExceeded`.
pub fn allocate(windows: &[TierWindow], ctx: &MintContext) -> Result<Allocation, Error> {
    if ctx.quantity == 0 {
        return Err(Error::InvalidQuantity);
    }

    if !windows.iter().any(TierWindow::admits) {
        return Err(Error::BatchClosed);
    }

    match ctx.total_supply.checked_add(ctx.quantity) {
        Some(after) if after <= ctx.max_supply => {}
        _ => return Err(Error::SoldOut),
    }

    let mut allocation = Allocation::default();
    let mut residual = ctx.quantity;

    for window in windows.iter().filter(|w| w.open) {
        if residual == 0 {
            break;
        }
        let take = window.remaining.map_or(residual, |r| r.min(residual));
        match window.tier {
            Tier::GueioHolders => allocation.gueio_holders += take,
            Tier::AppleTreeHolders => allocation.apple_tree_holders += take,
            Tier::Open => allocation.open += take,
        }
        residual -= take;
    }

    if residual > 0 {
        return Err(Error::BatchClosed);
    }

    if allocation.open > 0
        && ctx.public_minted.saturating_add(allocation.open) > ctx.public_mint_limit
    {
        return Err(Error::PublicMintLimitExceeded);
    }

    Ok(allocation)
}

/// Total price of an allocation.
pub fn price(allocation: &Allocation, prices: &TierPrices) -> Result<i128, Error> {
    let line = |units: u32, unit_price: i128| {
        i128::from(units)
            .checked_mul(unit_price)
            .ok_or(Error::Overflow)
    };

    let gueio = line(allocation.gueio_holders, prices.gueio_holders)?;
    let apple_tree = line(allocation.apple_tree_holders, prices.apple_tree_holders)?;
    let open = line(allocation.open, prices.open)?;

    gueio
        .checked_add(apple_tree)
        .and_then(|subtotal| subtotal.checked_add(open))
        .ok_or(Error::Overflow)
}
