//! # Types
//!
//! Shared contract types for the escrow ledger.
//!
//! ## Per-address state as a Finite-State Machine
//!
//! [`ReceiverState`] enforces a strict forward-only lifecycle per address:
//!
//! ```text
//! Default ──► Allowed ──► Complete
//!     └──────────────────►┘
//! ```
//!
//! `Default` is implicit: an address with no stored entry has taken no
//! action. `Allowed` is only reachable through an owner whitelist call and
//! only matters under [`Visibility::Private`]. `Complete` is terminal;
//! no operation moves an address out of it.

use soroban_sdk::contracttype;

/// Who may complete payment. Fixed at construction.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Visibility {
    /// Any address may complete payment.
    Public,
    /// Only whitelisted addresses may complete payment.
    Private,
}

/// Authorization state of a single receiver address.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReceiverState {
    /// No action taken for this address.
    Default,
    /// Whitelisted by the owner.
    Allowed,
    /// Payment completed (or force-completed by the owner). Terminal.
    Complete,
}
