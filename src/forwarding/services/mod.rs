//! Forwarding orchestration services.

mod aggregator;
mod debounce;
mod delivery;
mod error;
mod pipeline;
mod report;

pub use aggregator::ResultAggregator;
pub use debounce::{DebounceHandle, DebounceOutcome, DebouncePurpose, DebounceRegistry};
pub use delivery::DeliveryExecutor;
pub use error::ForwardError;
pub use pipeline::{ForwardingPipeline, PipelinePorts};
pub use report::{ChannelForward, ForwardOutcome, ForwardReport, NoOpReason};
