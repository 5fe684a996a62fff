//! Mention cache and permission gate.
//!
//! Chat text forwarded from the game may contain `@name` and `#name` tokens.
//! This module keeps, per guild, the descriptors needed to turn those tokens
//! into native platform mentions, and decides per sender whether a given
//! mention may be rendered and allowed to notify.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Cache, gate, and rewriting services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
