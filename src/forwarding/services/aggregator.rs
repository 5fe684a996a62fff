//! Collects delivery results and announces successful clusters.

use crate::forwarding::domain::{DeliveredEvent, DeliveryCluster, DeliveryResult};
use crate::forwarding::ports::ForwardEventBus;
use futures::future::join_all;
use std::future::Future;
use std::sync::Arc;

/// Waits for every delivery of a forward and publishes one delivered event
/// when at least one message landed.
#[derive(Clone)]
pub struct ResultAggregator {
    bus: Arc<dyn ForwardEventBus>,
}

impl ResultAggregator {
    /// Creates an aggregator publishing to `bus`.
    #[must_use]
    pub fn new(bus: Arc<dyn ForwardEventBus>) -> Self {
        Self { bus }
    }

    /// Awaits all `deliveries` and announces the resulting cluster.
    ///
    /// Nothing is published when no delivery succeeded. A publishing
    /// failure is logged and the cluster is still returned.
    pub async fn aggregate<I, A>(&self, deliveries: I, announce: A) -> Option<DeliveryCluster>
    where
        I: IntoIterator,
        I::Item: Future<Output = Vec<DeliveryResult>>,
        A: FnOnce(DeliveryCluster) -> DeliveredEvent,
    {
        let results = join_all(deliveries).await.into_iter().flatten();
        let cluster = DeliveryCluster::from_results(results)?;

        if let Err(err) = self.bus.publish_delivered(announce(cluster.clone())).await {
            tracing::warn!(
                error = %err,
                delivered = cluster.len(),
                "failed to publish delivered event"
            );
        }
        Some(cluster)
    }
}
