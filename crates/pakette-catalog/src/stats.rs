//! Counters for one scan pass
//!
//! `containers_opened` is the instrumentation hook for cache-hit
//! verification: a rescan of an unchanged tree must leave it at zero.

/// Counters accumulated over one scan
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    /// Container files observed on disk
    pub files_seen: u64,
    /// Records reused from the cache without container I/O
    pub reused: u64,
    /// Records freshly derived from container contents
    pub rederived: u64,
    /// Files skipped because derivation failed
    pub failed: u64,
    /// Cache entries evicted because their file disappeared
    pub evicted: u64,
    /// Container files actually opened and parsed
    pub containers_opened: u64,
}
