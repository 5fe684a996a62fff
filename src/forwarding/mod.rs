//! Game-event forwarding into guild channels.
//!
//! A [`ForwardRequest`](domain::ForwardRequest) flows through channel
//! configuration lookup, optional debouncing, destination resolution,
//! per-guild mention rewriting, formatting, a cancellable post-process
//! notification, isolated per-channel delivery, and result aggregation.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - Per-kind specializations in [`kinds`]

pub mod adapters;
pub mod domain;
pub mod kinds;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
