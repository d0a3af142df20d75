use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::browser::{RequestResponse, TrafficSink};
use crate::debug_id::DebugId;

/// Pass-through sink wrapping the caller's queue, counting every forwarded
/// pair.
///
/// One relay belongs to exactly one crawl call. `put` runs on the browser's
/// capture task while the crawl blocks in `wait_for_load`, so the count is
/// an atomic and `count` can be read at any time. The count only grows
/// within a call, it is never reset.
#[derive(Clone)]
pub struct TrafficRelay {
    sink: Arc<dyn TrafficSink>,
    debug_id: DebugId,
    count: Arc<AtomicUsize>,
    log_traffic: bool,
}

impl TrafficRelay {
    pub fn new(sink: Arc<dyn TrafficSink>, debug_id: DebugId, log_traffic: bool) -> Self {
        Self {
            sink,
            debug_id,
            count: Arc::new(AtomicUsize::new(0)),
            log_traffic,
        }
    }

    /// Pairs forwarded so far.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn debug_id(&self) -> &DebugId {
        &self.debug_id
    }
}

impl TrafficSink for TrafficRelay {
    /// No filtering, transformation or buffering: count, forward, return
    /// whatever the wrapped sink returned.
    fn put(&self, pair: RequestResponse) -> anyhow::Result<()> {
        let count = self.count.fetch_add(1, Ordering::SeqCst) + 1;
        if self.log_traffic {
            log::debug!(
                "received request/response pair from browser, count is {count} (did: {})",
                self.debug_id
            );
        }
        self.sink.put(pair)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    fn pair() -> RequestResponse {
        RequestResponse {
            request: "GET / HTTP/1.1".into(),
            response: "HTTP/1.1 200 OK".into(),
        }
    }

    struct FailingSink;

    impl TrafficSink for FailingSink {
        fn put(&self, _pair: RequestResponse) -> anyhow::Result<()> {
            anyhow::bail!("sink is closed")
        }
    }

    #[test]
    fn counts_every_forwarded_pair() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let relay = TrafficRelay::new(Arc::new(tx), DebugId::new(8), false);

        for _ in 0..5 {
            relay.put(pair()).unwrap();
        }

        assert_eq!(5, relay.count());
        assert_eq!(5, rx.try_iter().count());
    }

    #[test]
    fn sink_error_propagates_and_still_counts() {
        let relay = TrafficRelay::new(Arc::new(FailingSink), DebugId::new(8), false);

        let err = relay.put(pair()).unwrap_err();
        assert!(err.to_string().contains("sink is closed"));
        assert_eq!(1, relay.count());
    }

    #[test]
    fn concurrent_puts_are_all_counted() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let relay = TrafficRelay::new(Arc::new(tx), DebugId::new(8), false);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let relay = relay.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        relay.put(pair()).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(800, relay.count());
        assert_eq!(800, rx.try_iter().count());
    }
}
