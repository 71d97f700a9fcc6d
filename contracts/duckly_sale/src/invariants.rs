#![allow(dead_code)]

extern crate std;

use crate::types::{SaleConfig, SaleState};

/// INV-1: the per-tier counters always add up to the total supply.
pub fn assert_tier_counters_conserved(state: &SaleState) {
    let attributed = state.minted_with_gueio + state.minted_with_apple_tree + state.minted_open;
    assert_eq!(
        attributed, state.total_supply,
        "INV-1 violated: {} + {} + {} != total supply {}",
        state.minted_with_gueio, state.minted_with_apple_tree, state.minted_open, state.total_supply
    );
}

/// INV-2: the identifier cursor tracks the total supply exactly.
pub fn assert_cursor_matches_supply(state: &SaleState) {
    assert_eq!(
        state.next_token_id, state.total_supply,
        "INV-2 violated: next token id {} != total supply {}",
        state.next_token_id, state.total_supply
    );
}

/// INV-3: the supply cap is never exceeded.
pub fn assert_within_cap(state: &SaleState, config: &SaleConfig) {
    assert!(
        state.total_supply <= config.max_supply,
        "INV-3 violated: total supply {} above cap {}",
        state.total_supply,
        config.max_supply
    );
}

/// INV-4: an address never exceeds the public mint limit.
pub fn assert_public_limit(public_minted: u32, config: &SaleConfig) {
    assert!(
        public_minted <= config.public_mint_limit,
        "INV-4 violated: {} public mints above limit {}",
        public_minted,
        config.public_mint_limit
    );
}

/// INV-5: a failed call leaves the sale state untouched.
pub fn assert_state_unchanged(before: &SaleState, after: &SaleState) {
    assert_eq!(before, after, "INV-5 violated: failed mint mutated the sale state");
}

/// Run every stateless sale invariant.
pub fn assert_all_sale_invariants(state: &SaleState, config: &SaleConfig) {
    assert_tier_counters_conserved(state);
    assert_cursor_matches_supply(state);
    assert_within_cap(state, config);
}
