//! In-Memory Implementations
//!
//! 进程内状态，重启即丢失

mod reference_cache;

pub use reference_cache::InMemoryReferenceCache;
