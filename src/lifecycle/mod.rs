//! Lifecycle Module - navigation signals and the region state machine.
//!
//! - [`Navigator`] - the host framework's two-signal seam
//! - [`LifecycleCoordinator`] - per-region slots, revert-before-open
//! - [`RegionSpec`] / [`RegionId`] - region declarations and keys
//! - [`LifecycleHandle`] - subscription handle with detach/Drop cleanup

mod coordinator;
mod navigation;

pub use coordinator::{LifecycleCoordinator, LifecycleHandle, RegionId, RegionSpec};
pub use navigation::Navigator;
