//! Completion notification published for off-chain consumers.
//!
//! The event is an observability hook, not a control-flow mechanism: nothing
//! in the contract reads it back. Indexers subscribe to the `("complete",
//! payer)` topics and decode the [`EscrowComplete`] payload.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

/// Payload of the completion event.
///
/// `amount_paid` is the on-ledger amount moved by the completing payment,
/// or `0` for an owner force-completion (settled off-ledger).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscrowComplete {
    pub payer: Address,
    pub amount_paid: i128,
}

/// Publish an [`EscrowComplete`] event.
///
/// Topics: `(Symbol("complete"), payer)`. Data: the full struct.
pub fn emit_escrow_complete(env: &Env, payer: Address, amount_paid: i128) {
    env.events().publish(
        (symbol_short!("complete"), payer.clone()),
        EscrowComplete { payer, amount_paid },
    );
}
