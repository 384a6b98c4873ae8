//! # Escrow Ledger Contract
//!
//! A minimal owner-gated escrow: the owner deploys the ledger with a fixed
//! price and a visibility mode, counterparties pay exactly the price of the
//! custody token to complete their escrow, and the owner may withdraw the
//! accumulated funds or mark a counterparty complete without an on-ledger
//! transfer.
//!
//! | Phase        | Entry Point(s)                                       |
//! |--------------|------------------------------------------------------|
//! | Bootstrap    | [`EscrowLedger::initialize`]                         |
//! | Owner admin  | `set_price`, `whitelist_receiver`, `force_completion_for_address`, `withdraw_all_funds` |
//! | Settlement   | [`EscrowLedger::complete_payment`]                   |
//! | Queries      | `state_of_given_address`, `owner`, `visibility`, `price`, `token`, `balance` |
//!
//! ## Architecture
//!
//! Storage access is fully delegated to [`storage`]; the completion
//! notification lives in [`events`]. This file contains only the public
//! entry points and their precondition checks.
//!
//! Owner gating is a single equality check against the stored owner
//! address. There are no roles: four operations require `caller == owner`,
//! everything else is open.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, token, Address, Env};

pub mod events;
mod storage;
mod types;

#[cfg(test)]
mod test_receiver_state;

use events::emit_escrow_complete;
use storage::{
    has_owner, load_balance, load_owner, load_price, load_receiver_state, load_token,
    load_visibility, save_balance, save_owner, save_price, save_receiver_state, save_token,
    save_visibility,
};
pub use types::{ReceiverState, Visibility};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// `initialize` was called a second time.
    AlreadyInitialized = 1,
    /// The contract has not been initialised yet.
    NotInitialized = 2,
    /// A non-owner attempted an owner-only action.
    Unauthorized = 3,
    /// Payment amount does not equal the current price.
    IncorrectAmount = 4,
    /// Caller is not whitelisted under private visibility.
    NotAuthorized = 5,
    /// Caller has already completed payment.
    AlreadyComplete = 6,
    /// The withdrawal destination rejected the token transfer.
    TransferFailed = 7,
    /// Price must be non-negative.
    InvalidPrice = 8,
}

/// Authorise `caller` and check it against the stored owner.
fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if *caller != load_owner(env)? {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

#[contract]
pub struct EscrowLedger;

#[contractimpl]
impl EscrowLedger {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the ledger.
    ///
    /// Must be called exactly once immediately after deployment.
    ///
    /// - `owner` is the only identity permitted to change the price,
    ///   whitelist receivers, force-complete, or withdraw. Must sign.
    /// - `is_public` fixes the visibility mode forever: `true` lets any
    ///   address complete payment, `false` restricts completion to
    ///   whitelisted addresses.
    /// - `initial_price` is the amount required to complete payment, in the
    ///   custody token's smallest unit. May be changed later via
    ///   [`EscrowLedger::set_price`].
    /// - `token` is the SEP-41 token contract funds are denominated in.
    ///
    /// ## Errors
    /// - [`Error::AlreadyInitialized`] on a second call
    /// - [`Error::InvalidPrice`] if `initial_price` is negative
    pub fn initialize(
        env: Env,
        owner: Address,
        is_public: bool,
        initial_price: i128,
        token: Address,
    ) -> Result<(), Error> {
        owner.require_auth();
        if has_owner(&env) {
            return Err(Error::AlreadyInitialized);
        }
        if initial_price < 0 {
            return Err(Error::InvalidPrice);
        }

        save_owner(&env, &owner);
        save_visibility(
            &env,
            if is_public {
                &Visibility::Public
            } else {
                &Visibility::Private
            },
        );
        save_price(&env, initial_price);
        save_token(&env, &token);
        // Initialise the balance explicitly so `balance` is always readable.
        save_balance(&env, 0);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Owner operations
    // ─────────────────────────────────────────────────────────

    /// Set the escrow price to `new_price`.
    ///
    /// Unconditional once authorised: no bound on raising or reducing, and
    /// no restriction after payments have occurred.
    ///
    /// ## Errors
    /// - [`Error::Unauthorized`] if `caller` is not the owner
    /// - [`Error::InvalidPrice`] if `new_price` is negative
    pub fn set_price(env: Env, caller: Address, new_price: i128) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        if new_price < 0 {
            return Err(Error::InvalidPrice);
        }
        save_price(&env, new_price);
        Ok(())
    }

    /// Whitelist `receiver`, permitting it to complete payment under
    /// private visibility.
    ///
    /// Moves `Default` to `Allowed`. Re-whitelisting an `Allowed` address
    /// is a no-op, and so is whitelisting a `Complete` address: completion
    /// is terminal and must not be downgraded.
    ///
    /// ## Errors
    /// - [`Error::Unauthorized`] if `caller` is not the owner
    pub fn whitelist_receiver(env: Env, caller: Address, receiver: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        if load_receiver_state(&env, &receiver) == ReceiverState::Default {
            save_receiver_state(&env, &receiver, ReceiverState::Allowed);
        }
        Ok(())
    }

    /// Mark `address` complete without moving any funds.
    ///
    /// Owner override for deals settled off-ledger: the address transitions
    /// to `Complete` from any prior state and an [`events::EscrowComplete`]
    /// with `amount_paid == 0` is published. The zero amount is the signal
    /// that no on-ledger transfer backed the completion.
    ///
    /// ## Errors
    /// - [`Error::Unauthorized`] if `caller` is not the owner
    pub fn force_completion_for_address(
        env: Env,
        caller: Address,
        address: Address,
    ) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        save_receiver_state(&env, &address, ReceiverState::Complete);
        emit_escrow_complete(&env, address, 0);
        Ok(())
    }

    /// Transfer the entire custodial balance to `destination` and reset it
    /// to zero.
    ///
    /// Balance-conservative: either the whole balance moves and resets, or
    /// the call fails and the balance is unchanged.
    ///
    /// ## Errors
    /// - [`Error::Unauthorized`] if `caller` is not the owner
    /// - [`Error::TransferFailed`] if `destination` cannot accept the
    ///   transfer (e.g. a deauthorized token account)
    pub fn withdraw_all_funds(env: Env, caller: Address, destination: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;

        let amount = load_balance(&env);
        let client = token::Client::new(&env, &load_token(&env)?);
        if client
            .try_transfer(&env.current_contract_address(), &destination, &amount)
            .is_err()
        {
            return Err(Error::TransferFailed);
        }
        save_balance(&env, 0);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Settlement
    // ─────────────────────────────────────────────────────────

    /// Complete the escrow for `caller` by paying exactly the current price.
    ///
    /// Preconditions, checked in order:
    /// 1. `amount` equals the current price, else [`Error::IncorrectAmount`].
    /// 2. Under public visibility any caller passes; under private
    ///    visibility the caller must be whitelisted, else
    ///    [`Error::NotAuthorized`].
    /// 3. The caller must not already be complete, else
    ///    [`Error::AlreadyComplete`].
    ///
    /// On success `amount` of the custody token moves from the caller into
    /// the contract, the custodial balance grows by `amount`, the caller's
    /// state becomes `Complete`, and an [`events::EscrowComplete`] is
    /// published. Any failing precondition aborts the invocation with no
    /// partial effect.
    pub fn complete_payment(env: Env, caller: Address, amount: i128) -> Result<(), Error> {
        caller.require_auth();

        if amount != load_price(&env)? {
            return Err(Error::IncorrectAmount);
        }

        let state = load_receiver_state(&env, &caller);
        if load_visibility(&env)? == Visibility::Private && state == ReceiverState::Default {
            return Err(Error::NotAuthorized);
        }
        if state == ReceiverState::Complete {
            return Err(Error::AlreadyComplete);
        }

        let client = token::Client::new(&env, &load_token(&env)?);
        client.transfer(&caller, &env.current_contract_address(), &amount);

        save_balance(&env, load_balance(&env) + amount);
        save_receiver_state(&env, &caller, ReceiverState::Complete);

        emit_escrow_complete(&env, caller, amount);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// Return the authorization state of `address`.
    ///
    /// Open to any caller. Addresses never whitelisted or completed read as
    /// `Default`.
    pub fn state_of_given_address(env: Env, address: Address) -> ReceiverState {
        load_receiver_state(&env, &address)
    }

    /// Return the owner address.
    pub fn owner(env: Env) -> Result<Address, Error> {
        load_owner(&env)
    }

    /// Return the visibility mode.
    pub fn visibility(env: Env) -> Result<Visibility, Error> {
        load_visibility(&env)
    }

    /// Return the current escrow price.
    pub fn price(env: Env) -> Result<i128, Error> {
        load_price(&env)
    }

    /// Return the custody token contract address.
    pub fn token(env: Env) -> Result<Address, Error> {
        load_token(&env)
    }

    /// Return the custodial balance (0 before any accepted payment).
    pub fn balance(env: Env) -> i128 {
        load_balance(&env)
    }
}
