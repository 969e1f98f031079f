//! Application layer: the `StoreEngine` operation surface.
//!
//! The engine owns all marketplace state and applies each call as one
//! atomic unit; the invocation layer supplies caller identity and the
//! current time on every call.

pub mod engine;
