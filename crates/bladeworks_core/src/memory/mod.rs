//! # Memory Management
//!
//! Pre-allocated pools for zero-allocation gameplay.
//!
//! ## Design Philosophy
//!
//! Pools are sized once when the engine starts. During gameplay:
//! - No heap allocations when a swing starts or ends
//! - Stale handles are detected, never dereferenced
//! - Predictable, flat latency

mod pool;

pub use pool::{InstanceHandle, InstancePool};
