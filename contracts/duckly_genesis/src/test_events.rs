extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, IntoVal, TryIntoVal,
};

use crate::events::{BatchMint, OwnershipTransferred, Transferred};
use crate::test::setup;
use crate::types::PUBLIC_MINT_PRICE;

const P: i128 = PUBLIC_MINT_PRICE;

#[test]
fn test_mint_emits_batch_mint_then_payment() {
    let g = setup();
    let payer = g.payer(10 * P, 10 * P);
    let to = Address::generate(&g.env);

    g.client.mint_five(&payer, &to);

    let all_events = g.env.events().all();
    let len = all_events.len();
    let batch_event = all_events.get(len - 2).expect("batch_mnt event missing");
    let payment_event = all_events.get(len - 1).expect("payment event missing");

    // Topic: (symbol_short!("batch_mnt"), to)
    assert_eq!(batch_event.0, g.client.address);
    assert_eq!(
        batch_event.1,
        vec![
            &g.env,
            symbol_short!("batch_mnt").into_val(&g.env),
            to.into_val(&g.env),
        ]
    );
    let data: BatchMint = batch_event.2.try_into_val(&g.env).unwrap();
    assert_eq!(
        data,
        BatchMint {
            to: to.clone(),
            start_token_id: 0,
            quantity: 5,
        }
    );

    // Topic: (symbol_short!("payment"), payer)
    assert_eq!(
        payment_event.1,
        vec![
            &g.env,
            symbol_short!("payment").into_val(&g.env),
            payer.into_val(&g.env),
        ]
    );
    let amount: i128 = payment_event.2.try_into_val(&g.env).unwrap();
    assert_eq!(amount, 5 * P * 85 / 100);
}

#[test]
fn test_withdraw_event() {
    let g = setup();
    let payer = g.payer(10 * P, 10 * P);
    g.client.safe_mint(&payer, &payer);

    g.client.withdraw(&g.owner);

    let all_events = g.env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("withdraw"), owner)
    assert_eq!(
        last_event.1,
        vec![
            &g.env,
            symbol_short!("withdraw").into_val(&g.env),
            g.owner.into_val(&g.env),
        ]
    );
    let amount: i128 = last_event.2.try_into_val(&g.env).unwrap();
    assert_eq!(amount, P);
}

#[test]
fn test_pause_and_unpause_events() {
    let g = setup();

    g.client.pause(&g.owner);
    let last_event = g.env.events().all().last().expect("No events found");
    assert_eq!(
        last_event.1,
        vec![&g.env, symbol_short!("paused").into_val(&g.env)]
    );
    let by: Address = last_event.2.try_into_val(&g.env).unwrap();
    assert_eq!(by, g.owner);

    g.client.unpause(&g.owner);
    let last_event = g.env.events().all().last().expect("No events found");
    assert_eq!(
        last_event.1,
        vec![&g.env, symbol_short!("unpaused").into_val(&g.env)]
    );
}

#[test]
fn test_transfer_and_burn_events() {
    let g = setup();
    let payer = g.payer(10 * P, 10 * P);
    let other = Address::generate(&g.env);
    g.client.mint_bulk(&payer, &payer, &2);

    g.client.transfer(&payer, &other, &1);
    let last_event = g.env.events().all().last().expect("No events found");
    assert_eq!(
        last_event.1,
        vec![
            &g.env,
            symbol_short!("transfer").into_val(&g.env),
            1u32.into_val(&g.env),
        ]
    );
    let data: Transferred = last_event.2.try_into_val(&g.env).unwrap();
    assert_eq!(
        data,
        Transferred {
            from: payer.clone(),
            to: other.clone(),
        }
    );

    g.client.burn(&other, &1);
    let last_event = g.env.events().all().last().expect("No events found");
    assert_eq!(
        last_event.1,
        vec![
            &g.env,
            symbol_short!("burned").into_val(&g.env),
            1u32.into_val(&g.env),
        ]
    );
    let owner: Address = last_event.2.try_into_val(&g.env).unwrap();
    assert_eq!(owner, other);
}

#[test]
fn test_ownership_event_names_both_owners() {
    let g = setup();
    let successor = Address::generate(&g.env);

    g.client.transfer_ownership(&g.owner, &successor);

    let last_event = g.env.events().all().last().expect("No events found");
    assert_eq!(
        last_event.1,
        vec![&g.env, symbol_short!("owner").into_val(&g.env)]
    );
    let data: OwnershipTransferred = last_event.2.try_into_val(&g.env).unwrap();
    assert_eq!(
        data,
        OwnershipTransferred {
            previous_owner: g.owner.clone(),
            new_owner: successor,
        }
    );
}
