//! Crawl a page with a pooled instrumented browser and capture the HTTP
//! traffic it generates.
//!
//! [`BrowserCrawler::crawl`] leases an instance from a [`BrowserPool`],
//! loads a URL, streams every captured request/response pair into a
//! caller-supplied [`TrafficSink`], and guarantees the instance is either
//! returned to the pool or evicted from it, never both, never neither.

mod browser;
mod config;
mod crawler;
mod debug_id;
mod disposition;
mod error;
mod relay;

pub use browser::{Browser, BrowserPool, RequestResponse, TrafficSink};
pub use config::CrawlerConfig;
pub use crawler::BrowserCrawler;
pub use debug_id::DebugId;
pub use disposition::{default_disposition, Disposition, DispositionPolicy, PhaseOutcome};
pub use error::CrawlError;
pub use relay::TrafficRelay;

pub use anyhow;
pub use async_trait::async_trait;
