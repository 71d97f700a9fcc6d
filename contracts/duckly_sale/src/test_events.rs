extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, IntoVal, TryIntoVal,
};

use crate::events::{DucklyMinted, OwnershipTransferred, Withdrawn};
use crate::test::setup;
use crate::types::{PRICE_GUEIO_HOLDERS, PRICE_OPEN};
use crate::{Allocation, Tier};

#[test]
fn test_minted_event() {
    let sale = setup();
    let buyer = sale.buyer(1, 0);
    sale.client.open_batch_gueio_holders(&sale.owner);
    sale.client.open_batch_open(&sale.owner);

    sale.client.mint(&buyer, &3, &(PRICE_GUEIO_HOLDERS + 2 * PRICE_OPEN));

    let all_events = sale.env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("minted"), to)
    assert_eq!(last_event.0, sale.client.address);
    let expected_topics = vec![
        &sale.env,
        symbol_short!("minted").into_val(&sale.env),
        buyer.into_val(&sale.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: DucklyMinted = last_event.2.try_into_val(&sale.env).unwrap();
    assert_eq!(
        event_data,
        DucklyMinted {
            to: buyer.clone(),
            first_token_id: 0,
            quantity: 3,
            allocation: Allocation {
                gueio_holders: 1,
                apple_tree_holders: 0,
                open: 2,
            },
            price: PRICE_GUEIO_HOLDERS + 2 * PRICE_OPEN,
        }
    );
}

#[test]
fn test_batch_toggle_events() {
    let sale = setup();

    sale.client.open_batch_apple_tree_holders(&sale.owner);
    let last_event = sale.env.events().all().last().expect("No events found");
    let expected_topics = vec![
        &sale.env,
        symbol_short!("batch_opn").into_val(&sale.env),
        Tier::AppleTreeHolders.into_val(&sale.env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let by: Address = last_event.2.try_into_val(&sale.env).unwrap();
    assert_eq!(by, sale.owner);

    sale.client.close_batch_apple_tree_holders(&sale.owner);
    let last_event = sale.env.events().all().last().expect("No events found");
    let expected_topics = vec![
        &sale.env,
        symbol_short!("batch_cls").into_val(&sale.env),
        Tier::AppleTreeHolders.into_val(&sale.env),
    ];
    assert_eq!(last_event.1, expected_topics);
}

#[test]
fn test_withdraw_event() {
    let sale = setup();
    let buyer = sale.buyer(0, 0);
    sale.client.open_batch_open(&sale.owner);
    sale.client.mint(&buyer, &1, &PRICE_OPEN);

    sale.client.withdraw(&sale.owner);

    let last_event = sale.env.events().all().last().expect("No events found");
    assert_eq!(
        last_event.1,
        vec![&sale.env, symbol_short!("withdraw").into_val(&sale.env)]
    );
    let event_data: Withdrawn = last_event.2.try_into_val(&sale.env).unwrap();
    assert_eq!(
        event_data,
        Withdrawn {
            to: sale.owner.clone(),
            amount: PRICE_OPEN,
        }
    );
}

#[test]
fn test_ownership_event() {
    let sale = setup();
    let successor = Address::generate(&sale.env);

    sale.client.transfer_ownership(&sale.owner, &successor);

    let last_event = sale.env.events().all().last().expect("No events found");
    let event_data: OwnershipTransferred = last_event.2.try_into_val(&sale.env).unwrap();
    assert_eq!(
        event_data,
        OwnershipTransferred {
            previous_owner: sale.owner.clone(),
            new_owner: successor,
        }
    );
}
