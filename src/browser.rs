use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::debug_id::DebugId;

/// One HTTP request/response pair captured by an instrumented browser while
/// loading a page. Forwarded verbatim, never parsed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestResponse {
    pub request: String,
    pub response: String,
}

/// Destination for captured traffic.
///
/// `put` is called from the browser's capture task, concurrently with the
/// crawl blocking in `wait_for_load`, so implementations must not assume
/// they run on the crawling task.
pub trait TrafficSink: Send + Sync {
    fn put(&self, pair: RequestResponse) -> anyhow::Result<()>;
}

impl TrafficSink for crossbeam_channel::Sender<RequestResponse> {
    fn put(&self, pair: RequestResponse) -> anyhow::Result<()> {
        self.send(pair)
            .map_err(|e| anyhow::anyhow!("traffic channel closed: {e}"))
    }
}

impl TrafficSink for tokio::sync::mpsc::UnboundedSender<RequestResponse> {
    fn put(&self, pair: RequestResponse) -> anyhow::Result<()> {
        self.send(pair)
            .map_err(|e| anyhow::anyhow!("traffic channel closed: {e}"))
    }
}

/// A leased instrumented browser instance.
///
/// The crawler owns the lease for the duration of one crawl call and hands
/// the instance back to its [`BrowserPool`] through `free` or `remove`.
#[async_trait]
pub trait Browser: Send + Sync {
    /// Stable identifier of the pooled instance, used in log lines.
    fn instance_id(&self) -> u64;

    /// Tag the instance with the crawl's debug id for its own diagnostics.
    fn set_debug_id(&self, id: &DebugId);

    /// Command the instance to start loading `url`.
    async fn load_url(&self, url: &str) -> anyhow::Result<()>;

    /// Block until the page load finished or the instance's own deadline
    /// expired. `Ok(false)` means the load did not complete in time.
    async fn wait_for_load(&self) -> anyhow::Result<bool>;

    /// Halt in-progress loading activity.
    async fn stop(&self) -> anyhow::Result<()>;
}

/// Fixed-size pool of instrumented browser instances.
///
/// `acquire`, `free` and `remove` must tolerate concurrent use from several
/// crawls; the crawler only guarantees that each acquired instance is passed
/// to exactly one of `free`/`remove`, exactly once.
#[async_trait]
pub trait BrowserPool: Send + Sync {
    /// Lease an instance configured to stream every captured pair into
    /// `sink` for the entire lease.
    async fn acquire(&self, sink: Arc<dyn TrafficSink>) -> anyhow::Result<Box<dyn Browser>>;

    /// Return a healthy instance so another crawl can reuse it.
    async fn free(&self, browser: Box<dyn Browser>) -> anyhow::Result<()>;

    /// Discard a suspect instance; the pool replaces or shrinks.
    async fn remove(&self, browser: Box<dyn Browser>) -> anyhow::Result<()>;

    /// Shut down all idle and leased instances.
    async fn terminate_all(&self);
}
