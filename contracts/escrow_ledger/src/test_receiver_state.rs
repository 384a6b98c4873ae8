extern crate std;

use soroban_sdk::{testutils::Address as _, token, Address, Env};

use crate::invariants;
use crate::{Error, EscrowLedger, EscrowLedgerClient, ReceiverState};

const PRICE: i128 = 9001;

fn setup(is_public: bool) -> (Env, EscrowLedgerClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(EscrowLedger, ());
    let client = EscrowLedgerClient::new(&env, &contract_id);
    let owner = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let token = env
        .register_stellar_asset_contract_v2(token_admin)
        .address();
    client.initialize(&owner, &is_public, &PRICE, &token);
    (env, client, owner, token)
}

fn mint(env: &Env, token: &Address, to: &Address, amount: i128) {
    token::StellarAssetClient::new(env, token).mint(to, &amount);
}

#[test]
fn test_untouched_address_reads_default() {
    let (env, client, owner, _token) = setup(false);

    // Nobody has been touched, including the owner itself.
    assert_eq!(
        client.state_of_given_address(&owner),
        ReceiverState::Default
    );
    for _ in 0..3 {
        let stranger = Address::generate(&env);
        assert_eq!(
            client.state_of_given_address(&stranger),
            ReceiverState::Default
        );
    }
}

#[test]
fn test_whitelist_moves_default_to_allowed() {
    let (env, client, owner, _token) = setup(false);
    let receiver = Address::generate(&env);

    let before = client.state_of_given_address(&receiver);
    client.whitelist_receiver(&owner, &receiver);
    let after = client.state_of_given_address(&receiver);

    invariants::assert_valid_state_transition(before, after);
    assert_eq!(after, ReceiverState::Allowed);
}

#[test]
fn test_whitelist_is_idempotent() {
    let (env, client, owner, _token) = setup(false);
    let receiver = Address::generate(&env);

    client.whitelist_receiver(&owner, &receiver);
    client.whitelist_receiver(&owner, &receiver);

    assert_eq!(
        client.state_of_given_address(&receiver),
        ReceiverState::Allowed
    );
}

#[test]
fn test_whitelist_does_not_downgrade_complete() {
    let (env, client, owner, token) = setup(false);
    let receiver = Address::generate(&env);
    mint(&env, &token, &receiver, PRICE);

    client.whitelist_receiver(&owner, &receiver);
    client.complete_payment(&receiver, &PRICE);
    let before = client.state_of_given_address(&receiver);

    // Re-whitelisting a completed address is a silent no-op.
    client.whitelist_receiver(&owner, &receiver);
    let after = client.state_of_given_address(&receiver);

    invariants::assert_complete_is_terminal(before, after);
    assert_eq!(after, ReceiverState::Complete);
}

#[test]
fn test_payment_moves_allowed_to_complete() {
    let (env, client, owner, token) = setup(false);
    let receiver = Address::generate(&env);
    mint(&env, &token, &receiver, PRICE);

    client.whitelist_receiver(&owner, &receiver);
    let before = client.state_of_given_address(&receiver);
    client.complete_payment(&receiver, &PRICE);
    let after = client.state_of_given_address(&receiver);

    invariants::assert_valid_state_transition(before, after);
    assert_eq!(after, ReceiverState::Complete);
}

#[test]
fn test_public_payment_moves_default_to_complete() {
    let (env, client, _owner, token) = setup(true);
    let payer = Address::generate(&env);
    mint(&env, &token, &payer, PRICE);

    let before = client.state_of_given_address(&payer);
    client.complete_payment(&payer, &PRICE);
    let after = client.state_of_given_address(&payer);

    invariants::assert_valid_state_transition(before, after);
    assert_eq!(after, ReceiverState::Complete);
}

#[test]
fn test_force_completion_from_default() {
    let (env, client, owner, _token) = setup(false);
    let receiver = Address::generate(&env);

    client.force_completion_for_address(&owner, &receiver);
    assert_eq!(
        client.state_of_given_address(&receiver),
        ReceiverState::Complete
    );
}

#[test]
fn test_force_completion_from_allowed() {
    let (env, client, owner, _token) = setup(false);
    let receiver = Address::generate(&env);

    client.whitelist_receiver(&owner, &receiver);
    let before = client.state_of_given_address(&receiver);
    client.force_completion_for_address(&owner, &receiver);
    let after = client.state_of_given_address(&receiver);

    invariants::assert_valid_state_transition(before, after);
    assert_eq!(after, ReceiverState::Complete);
}

#[test]
fn test_force_completion_from_complete_stays_complete() {
    let (env, client, owner, token) = setup(true);
    let payer = Address::generate(&env);
    mint(&env, &token, &payer, PRICE);

    client.complete_payment(&payer, &PRICE);
    let before = client.state_of_given_address(&payer);

    client.force_completion_for_address(&owner, &payer);
    let after = client.state_of_given_address(&payer);

    invariants::assert_complete_is_terminal(before, after);
    // No re-credit either: the single accepted payment is all there is.
    assert_eq!(client.balance(), PRICE);
}

#[test]
fn test_complete_is_terminal_under_every_operation() {
    let (env, client, owner, token) = setup(false);
    let receiver = Address::generate(&env);
    mint(&env, &token, &receiver, PRICE * 2);

    client.whitelist_receiver(&owner, &receiver);
    client.complete_payment(&receiver, &PRICE);

    client.whitelist_receiver(&owner, &receiver);
    assert_eq!(
        client.state_of_given_address(&receiver),
        ReceiverState::Complete
    );

    let result = client.try_complete_payment(&receiver, &PRICE);
    assert_eq!(result, Err(Ok(Error::AlreadyComplete)));
    assert_eq!(
        client.state_of_given_address(&receiver),
        ReceiverState::Complete
    );

    client.force_completion_for_address(&owner, &receiver);
    assert_eq!(
        client.state_of_given_address(&receiver),
        ReceiverState::Complete
    );

    assert_eq!(client.balance(), PRICE);
}

#[test]
fn test_receivers_are_independent() {
    let (env, client, owner, token) = setup(false);
    let receiver_a = Address::generate(&env);
    let receiver_b = Address::generate(&env);
    let receiver_c = Address::generate(&env);
    mint(&env, &token, &receiver_a, PRICE);

    client.whitelist_receiver(&owner, &receiver_a);
    client.whitelist_receiver(&owner, &receiver_b);
    client.complete_payment(&receiver_a, &PRICE);

    assert_eq!(
        client.state_of_given_address(&receiver_a),
        ReceiverState::Complete
    );
    assert_eq!(
        client.state_of_given_address(&receiver_b),
        ReceiverState::Allowed
    );
    assert_eq!(
        client.state_of_given_address(&receiver_c),
        ReceiverState::Default
    );
}
