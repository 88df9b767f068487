//! Core tunables shared by the ring-buffer engine.

/// Cache line size for alignment (64 bytes on most CPUs).
pub const CACHE_LINE_SIZE: usize = 64;

/// Default capacity used by the demo/example binaries; not a library default.
pub const DEFAULT_CAPACITY: usize = 1024;
