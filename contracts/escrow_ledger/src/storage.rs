//! # Storage
//!
//! Provides typed helpers over Soroban's two storage tiers used by the
//! escrow ledger:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key          | Type         | Description                           |
//! |--------------|--------------|---------------------------------------|
//! | `Owner`      | `Address`    | Contract owner, written once          |
//! | `Visibility` | `Visibility` | Public/private mode, written once     |
//! | `Price`      | `i128`       | Amount required to complete payment   |
//! | `Token`      | `Address`    | Custody token contract, written once  |
//! | `Balance`    | `i128`       | Custodial balance held by the ledger  |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                 | Type            | Description                    |
//! |---------------------|-----------------|--------------------------------|
//! | `Receiver(Address)` | `ReceiverState` | Per-address authorization state|
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days
//! remaining. Receiver entries are created lazily on the first whitelist or
//! completion touch; an absent entry reads as [`ReceiverState::Default`].

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{ReceiverState, Visibility};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
///
/// Instance-tier keys hold the contract-lifetime singletons and are extended
/// together. The persistent-tier `Receiver` key holds per-address state with
/// an independent TTL.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Contract owner (Instance).
    Owner,
    /// Visibility mode (Instance).
    Visibility,
    /// Current escrow price (Instance).
    Price,
    /// Custody token contract (Instance).
    Token,
    /// Custodial balance (Instance).
    Balance,
    /// Authorization state keyed by receiver address (Persistent).
    Receiver(Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Return `true` if the contract has been initialised.
pub fn has_owner(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Owner)
}

/// Read the owner address.
///
/// Returns [`Error::NotInitialized`] if `initialize` was never called.
pub fn load_owner(env: &Env) -> Result<Address, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(Error::NotInitialized)
}

/// Write the owner address. Called once from `initialize`.
pub fn save_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
    bump_instance(env);
}

/// Read the visibility mode.
pub fn load_visibility(env: &Env) -> Result<Visibility, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Visibility)
        .ok_or(Error::NotInitialized)
}

/// Write the visibility mode. Called once from `initialize`.
pub fn save_visibility(env: &Env, visibility: &Visibility) {
    env.storage().instance().set(&DataKey::Visibility, visibility);
    bump_instance(env);
}

/// Read the current price.
pub fn load_price(env: &Env) -> Result<i128, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Price)
        .ok_or(Error::NotInitialized)
}

/// Write the price.
pub fn save_price(env: &Env, price: i128) {
    env.storage().instance().set(&DataKey::Price, &price);
    bump_instance(env);
}

/// Read the custody token contract address.
pub fn load_token(env: &Env) -> Result<Address, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(Error::NotInitialized)
}

/// Write the custody token contract address. Called once from `initialize`.
pub fn save_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::Token, token);
    bump_instance(env);
}

/// Read the custodial balance (0 if never written).
pub fn load_balance(env: &Env) -> i128 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Balance)
        .unwrap_or(0)
}

/// Write the custodial balance.
pub fn save_balance(env: &Env, balance: i128) {
    env.storage().instance().set(&DataKey::Balance, &balance);
    bump_instance(env);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Read the authorization state for `address`.
///
/// Addresses never touched by a whitelist or completion read as
/// [`ReceiverState::Default`].
pub fn load_receiver_state(env: &Env, address: &Address) -> ReceiverState {
    let key = DataKey::Receiver(address.clone());
    match env.storage().persistent().get(&key) {
        Some(state) => {
            // Extend TTL every time we read so live entries stay alive.
            bump_persistent(env, &key);
            state
        }
        None => ReceiverState::Default,
    }
}

/// Write the authorization state for `address` and bump its TTL.
pub fn save_receiver_state(env: &Env, address: &Address, state: ReceiverState) {
    let key = DataKey::Receiver(address.clone());
    env.storage().persistent().set(&key, &state);
    bump_persistent(env, &key);
}
