use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::browser::{Browser, BrowserPool, TrafficSink};
use crate::config::CrawlerConfig;
use crate::debug_id::DebugId;
use crate::disposition::{default_disposition, Disposition, DispositionPolicy, PhaseOutcome};
use crate::error::CrawlError;
use crate::relay::TrafficRelay;

/// Drives one page load at a time through a pooled instrumented browser.
///
/// The steps of a crawl are:
/// * lease an instance from the pool, wired to stream captured traffic
///   into the caller's sink
/// * load the URL and wait for the load to settle
/// * return the instance to the pool, or evict it when it is suspect
///
/// The crawler keeps no mutable state across calls besides the pool handle,
/// so concurrent `crawl` calls on one instance are independent, bounded only
/// by the pool's own size.
pub struct BrowserCrawler {
    pool: Mutex<Option<Arc<dyn BrowserPool>>>,
    config: CrawlerConfig,
    policy: DispositionPolicy,
}

impl BrowserCrawler {
    pub fn new(pool: Arc<dyn BrowserPool>) -> Self {
        Self::with_config(pool, CrawlerConfig::default())
    }

    pub fn with_config(pool: Arc<dyn BrowserPool>, config: CrawlerConfig) -> Self {
        Self {
            pool: Mutex::new(Some(pool)),
            config,
            policy: default_disposition,
        }
    }

    /// Replace the [`default_disposition`] policy deciding what happens to
    /// the leased instance on each exit path.
    pub fn with_policy(mut self, policy: DispositionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Crawl `url` once, streaming every request/response pair the browser
    /// generates into `sink`.
    ///
    /// Suspends the caller for the whole acquire, load, wait, dispose
    /// sequence; deadlines for the load itself belong to the browser's
    /// `wait_for_load` contract. Pairs already delivered to `sink` are not
    /// retracted when the crawl fails. Retrying is the caller's decision.
    pub async fn crawl(&self, url: &str, sink: Arc<dyn TrafficSink>) -> Result<(), CrawlError> {
        let debug_id = DebugId::new(self.config.debug_id_len);

        log::debug!("starting browser crawl for {url} (did: {debug_id})");

        let Some(pool) = self.pool_handle() else {
            log::debug!("crawl of {url} rejected, crawler is terminated (did: {debug_id})");
            return Err(CrawlError::Acquire {
                source: anyhow::anyhow!("crawler is terminated"),
            });
        };

        let relay = TrafficRelay::new(sink, debug_id.clone(), self.config.log_traffic);

        let browser = match pool.acquire(Arc::new(relay.clone())).await {
            Ok(browser) => browser,
            Err(e) => {
                log::debug!("failed to get a browser instance: \"{e}\" (did: {debug_id})");
                return Err(CrawlError::Acquire { source: e });
            }
        };

        log::debug!(
            "using browser {} to load {url} (did: {debug_id})",
            browser.instance_id()
        );

        browser.set_debug_id(&debug_id);
        let start = Instant::now();

        if let Err(e) = browser.load_url(url).await {
            log::debug!(
                "failed to load {url} using browser {}: \"{e}\" (did: {debug_id})",
                browser.instance_id()
            );
            self.dispose(&pool, browser, PhaseOutcome::LoadFailed, &debug_id)
                .await;
            return Err(CrawlError::Load {
                url: url.to_string(),
                source: e,
            });
        }

        // Captured pairs reach the sink from the browser's capture task while
        // this await is pending; a failure below does not retract them.
        let completed = match browser.wait_for_load().await {
            Ok(completed) => completed,
            Err(e) => {
                log::debug!(
                    "error while waiting for page load of {url} using browser {}: \"{e}\" \
                     (did: {debug_id})",
                    browser.instance_id()
                );
                self.dispose(&pool, browser, PhaseOutcome::WaitFailed, &debug_id)
                    .await;
                return Err(CrawlError::Wait {
                    url: url.to_string(),
                    source: e,
                });
            }
        };

        let outcome = if completed {
            PhaseOutcome::Loaded
        } else {
            let spent = start.elapsed().as_secs_f64();
            log::debug!(
                "browser did not finish loading {url} in {spent:.2} seconds (did: {debug_id})"
            );

            // Keep the instance from loading on in the background.
            if let Err(e) = browser.stop().await {
                log::debug!(
                    "failed to stop browser {}: \"{e}\" (did: {debug_id})",
                    browser.instance_id()
                );
                self.dispose(&pool, browser, PhaseOutcome::StopFailed, &debug_id)
                    .await;
                return Err(CrawlError::Stop { source: e });
            }
            PhaseOutcome::Stopped
        };

        self.dispose(&pool, browser, outcome, &debug_id).await;

        let spent = start.elapsed().as_secs_f64();
        log::debug!(
            "extracted {} request/response pairs from {url} in {spent:.2} seconds (did: {debug_id})",
            relay.count()
        );

        Ok(())
    }

    /// Shut down every pooled instance and release the pool handle. Later
    /// `crawl` calls fail with [`CrawlError::Acquire`] without touching the
    /// pool; a second `terminate` finds nothing to do.
    pub async fn terminate(&self) {
        let pool = match self.pool.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(pool) = pool {
            pool.terminate_all().await;
        }
    }

    fn pool_handle(&self) -> Option<Arc<dyn BrowserPool>> {
        match self.pool.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Exactly one disposition per leased instance. Disposition failures are
    /// best-effort cleanup: logged, never propagated over the phase's own
    /// result.
    async fn dispose(
        &self,
        pool: &Arc<dyn BrowserPool>,
        browser: Box<dyn Browser>,
        outcome: PhaseOutcome,
        debug_id: &DebugId,
    ) {
        match (self.policy)(outcome) {
            Disposition::Free => {
                if let Err(e) = pool.free(browser).await {
                    log::warn!(
                        "failed to return browser instance to the pool: {e} (did: {debug_id})"
                    );
                }
            }
            Disposition::Remove => {
                if let Err(e) = pool.remove(browser).await {
                    log::warn!(
                        "failed to remove browser instance from the pool: {e} (did: {debug_id})"
                    );
                }
            }
            Disposition::Ignore => {}
        }
    }
}
