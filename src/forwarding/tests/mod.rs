//! Unit tests for the forwarding pipeline.
//!
//! Tests drive the pipeline through in-memory adapters, one file per
//! concern: the generic flow, debouncing, and guild-scoped mentions.

mod support;
