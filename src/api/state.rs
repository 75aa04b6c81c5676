//! Application state
//!
//! Shared state accessible by all API handlers. The storage root is the
//! only thing handlers need; every storage operation takes it explicitly.

use std::path::{Path, PathBuf};
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Storage root holding reading logs and locations.json
    root: PathBuf,
    /// Server start time for uptime reporting
    start_time: Instant,
}

impl AppState {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            start_time: Instant::now(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
