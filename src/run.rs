//! Run-level helpers. The transport engine owns the run loop; the only
//! thing the geometry side contributes is the progress-report cadence.

/// Progress-report interval for a run: every 10% of the requested events,
/// never less than every event.
#[must_use]
pub fn progress_interval(events: u64) -> u64 {
    (events / 10).max(1)
}
