//! Adapter implementations for mention ports.

pub mod memory;

pub use memory::InMemoryGuildDirectory;
