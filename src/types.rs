//! Core types for spark-fx.
//!
//! These types define the vocabulary everything else builds on: scope
//! identity, region lifecycle phases, navigation signals, and per-region
//! option flags.

// =============================================================================
// Scope Identity
// =============================================================================

/// Identity of an effect scope.
///
/// Allocated by the registry when a scope is opened, never reused within a
/// registry's lifetime. The id survives inside trigger closures after the
/// owning [`crate::ScopeHandle`] has been consumed, which is why it is `Copy`
/// while the handle is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub(crate) u64);

impl ScopeId {
    /// Raw numeric value (for logging and diagnostics).
    pub fn raw(self) -> u64 {
        self.0
    }
}

// =============================================================================
// Lifecycle Phase
// =============================================================================

/// Phase of a region's lifecycle.
///
/// A region is `Active` exactly while it owns one live scope; it is `Idle`
/// otherwise (before first activation, after a revert, or on pages where its
/// root does not resolve).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecyclePhase {
    /// No live scope for the region.
    #[default]
    Idle,
    /// Exactly one live scope for the region.
    Active,
}

// =============================================================================
// Navigation Signals
// =============================================================================

/// The two signals the host navigation system delivers.
///
/// `Complete` fires after the initial page render and after every client-side
/// page swap, in either direction. `AboutToStart` fires immediately before
/// the outgoing page is swapped out. Signals arrive in navigation order:
/// complete, then eventually about-to-start, then complete again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationSignal {
    /// A page finished rendering and is now current.
    Complete,
    /// The current page is about to be swapped out.
    AboutToStart,
}

// =============================================================================
// Region Options
// =============================================================================

bitflags::bitflags! {
    /// Per-region behavior flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct RegionOptions: u8 {
        /// The region intentionally starts hidden in its static styling
        /// (decorative scroll-pinned experiences). Suppresses the visibility
        /// fallback audit for this region. Without this flag, content must be
        /// visible before any scope opens.
        const ALLOW_HIDDEN_START = 1 << 0;
        /// Skip the fallback audit entirely, even in debug builds.
        const SKIP_AUDIT = 1 << 1;
    }
}

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by subscriptions and registrations.
///
/// Call it to release whatever the registration acquired.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_phase_default_is_idle() {
        assert_eq!(LifecyclePhase::default(), LifecyclePhase::Idle);
    }

    #[test]
    fn test_region_options_flags() {
        let opts = RegionOptions::ALLOW_HIDDEN_START;
        assert!(opts.contains(RegionOptions::ALLOW_HIDDEN_START));
        assert!(!opts.contains(RegionOptions::SKIP_AUDIT));

        let none = RegionOptions::default();
        assert!(none.is_empty());
    }

    #[test]
    fn test_scope_id_ordering() {
        assert!(ScopeId(1) < ScopeId(2));
        assert_eq!(ScopeId(7).raw(), 7);
    }
}
