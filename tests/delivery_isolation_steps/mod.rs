//! Step definitions for delivery isolation scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
