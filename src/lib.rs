//! Switchboard: game chat to guild chat forwarding.
//!
//! This crate relays discrete game events (chat lines, joins, leaves,
//! deaths, advancements, server switches, start and stop) into channels of
//! a guild-based messaging platform and announces what was delivered on an
//! internal event bus.
//!
//! # Architecture
//!
//! Switchboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (configuration,
//!   formatting, in-memory collaborators)
//!
//! # Modules
//!
//! - [`forwarding`]: The forwarding pipeline, debouncing, and delivery
//! - [`mention`]: Per-guild mention cache and permission-gated rewriting
//! - [`platform`]: Messaging platform identifiers and channel handles

pub mod forwarding;
pub mod mention;
pub mod platform;
