//! Domain layer: value objects and entities with their own invariants.
//!
//! Everything here is plain owned data; the application engine owns the
//! collections and drives every mutation through these types.

pub mod account;
pub mod analytics;
pub mod event;
pub mod money;
pub mod product;
pub mod ticket;

/// Participant identifier, resolved by the invocation layer.
pub type AccountId = u64;
/// Caller-supplied product identifier.
pub type ProductId = u64;
/// Seconds; supplied by the invocation layer, assumed monotonic.
pub type Timestamp = u64;
