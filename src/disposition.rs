/// How one crawl attempt ended, as far as the pool needs to know.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseOutcome {
    /// The page load completed.
    Loaded,
    /// The page load did not complete in time and the instance was stopped
    /// cleanly.
    Stopped,
    /// No instance was obtained from the pool.
    AcquireFailed,
    /// The navigation command failed.
    LoadFailed,
    /// Waiting for the load raised an error.
    WaitFailed,
    /// Stopping an unfinished load failed.
    StopFailed,
}

/// What to do with the leased instance at the end of the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Return it to the pool for reuse.
    Free,
    /// Discard it, the pool replaces or shrinks.
    Remove,
    /// Nothing to dispose.
    Ignore,
}

/// Maps a crawl outcome to a pool disposition.
///
/// Returning `Ignore` for an outcome that holds a live lease drops the
/// instance without telling the pool; only `AcquireFailed` has nothing to
/// dispose.
pub type DispositionPolicy = fn(PhaseOutcome) -> Disposition;

/// An instance involved in any failure after acquisition is presumed
/// corrupted and removed.
///
/// A stopped-but-unfinished load still frees the instance, which may hand
/// the next crawl a browser with stale half-loaded state; override the
/// policy to map [`PhaseOutcome::Stopped`] to [`Disposition::Remove`] if
/// that matters more than keeping the pool warm.
pub fn default_disposition(outcome: PhaseOutcome) -> Disposition {
    match outcome {
        PhaseOutcome::Loaded | PhaseOutcome::Stopped => Disposition::Free,
        PhaseOutcome::AcquireFailed => Disposition::Ignore,
        PhaseOutcome::LoadFailed | PhaseOutcome::WaitFailed | PhaseOutcome::StopFailed => {
            Disposition::Remove
        }
    }
}
