//! Keystroke debounce with cancel-on-supersede
//!
//! Every keystroke bumps a generation counter and takes a ticket; a
//! request task sleeps out the quiet window and then checks whether its
//! ticket is still current. A superseded ticket means a newer keystroke
//! exists and the task must drop out before issuing any request. The
//! same ticket gates response application, so a slow early response
//! can never overwrite a newer one.
//!
//! The debouncer is owned state, not module-global: two search boxes
//! get two debouncers and cannot cancel each other.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Default quiet window between the last keystroke and the quick
/// search request.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: AtomicU64,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: AtomicU64::new(0),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Register a keystroke: supersedes every outstanding ticket and
    /// returns the new one.
    pub fn note_keystroke(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// The ticket of the most recent keystroke.
    pub fn current(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Whether a ticket is still the most recent one.
    pub fn is_current(&self, ticket: u64) -> bool {
        self.current() == ticket
    }

    /// Sleep out the quiet window, then report whether this ticket
    /// survived it. `false` means a newer keystroke arrived and the
    /// caller must not issue its request.
    pub async fn settle(&self, ticket: u64) -> bool {
        tokio::time::sleep(self.delay).await;
        self.is_current(ticket)
    }
}
