use thiserror::Error;

/// Failure of one crawl attempt.
///
/// By the time any of these reaches the caller, the pool disposition for the
/// leased instance (if one was acquired) has already happened. Traffic
/// delivered to the sink before the failure is not retracted.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("failed to get a browser instance: \"{source}\"")]
    Acquire { source: anyhow::Error },

    #[error("failed to load {url}: \"{source}\"")]
    Load { url: String, source: anyhow::Error },

    #[error("error while waiting for page load of {url}: \"{source}\"")]
    Wait { url: String, source: anyhow::Error },

    #[error("failed to stop browser instance: \"{source}\"")]
    Stop { source: anyhow::Error },
}
