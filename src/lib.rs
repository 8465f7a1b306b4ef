//! # spark-fx
//!
//! Scoped visual-effect lifecycle for navigation-driven UIs.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity.
//!
//! ## Architecture
//!
//! Page frameworks that reuse DOM nodes across logical page loads need their
//! visual effects torn down and rebuilt exactly once per navigation, or
//! repeated forward/back navigation leaves stale inline styles and dead
//! triggers on persisted elements. spark-fx packages that protocol:
//!
//! ```text
//! Navigator signals → LifecycleCoordinator → EffectRegistry → Document
//!   (complete /          (per-region slot,      (open/revert,    (inline
//!    about-to-start)      revert-before-open)    attribution)     styles)
//! ```
//!
//! Every region owns one lifecycle slot holding at most one live
//! [`ScopeHandle`]. On *navigation-complete* the coordinator reverts the
//! slot, resolves the region root in the new page, and - only if present -
//! opens a fresh scope in which all effect declarations are recorded. On
//! *navigation-about-to-start* it reverts unconditionally. Reverting restores
//! every touched style to its pre-scope value and stops every trigger, so
//! the page is indistinguishable from one the scope never touched.
//!
//! Content stays visible when none of this runs: hidden-until-animated state
//! may only be established inside an open scope, and [`contract`] makes that
//! rule auditable.
//!
//! ## Modules
//!
//! - [`types`] - Core types (ScopeId, LifecyclePhase, NavigationSignal, ...)
//! - [`page`] - Host page model (document arena, selectors, inline styles)
//! - [`effects`] - Scope attribution, registry, scroll triggers, timelines
//! - [`lifecycle`] - Navigator seam and per-region coordinator
//! - [`contract`] - Visibility fallback audit

pub mod contract;
pub mod effects;
pub mod lifecycle;
pub mod page;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use page::{Document, ElementProps, NodeId};

pub use effects::{EffectRegistry, ScopeCtx, ScopeHandle, ScopeStyles, Timeline};

pub use lifecycle::{
    LifecycleCoordinator, LifecycleHandle, Navigator, RegionId, RegionSpec,
};

pub use contract::{ContractViolation, audit_region};
