//! Lifecycle Coordinator - per-region state machine.
//!
//! Drives the registry from the two navigation signals:
//!
//! 1. On *complete*: revert whatever the region's slot holds, resolve the
//!    region root in the new document, bail (stay `Idle`) if absent,
//!    otherwise open a fresh scope and go `Active`.
//! 2. On *about-to-start*: revert, go `Idle`.
//!
//! Revert-before-open is structural rather than a convention: the slot is an
//! `Option<ScopeHandle>`, the only path that stores a new handle first
//! `take()`s and reverts the old one, and handles cannot be cloned - so two
//! live scopes for one region cannot be represented. Each region instance
//! owns its own slot, keyed by [`RegionId`]; nothing lives in module scope,
//! and coordinators never interfere with each other.

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{Signal, signal};
use tracing::{trace, warn};

use crate::contract;
use crate::effects::{EffectRegistry, ScopeCtx, ScopeHandle};
use crate::page::Document;
use crate::types::{Cleanup, LifecyclePhase, RegionOptions};

use super::navigation::Navigator;

// =============================================================================
// Region Spec
// =============================================================================

/// Declaration of one animated region: where it lives and what it does.
///
/// The effects callback runs once per activation, inside the scope being
/// opened; everything it declares is reverted on the next navigation signal.
pub struct RegionSpec {
    selector: String,
    options: RegionOptions,
    effects: Rc<dyn Fn(&ScopeCtx)>,
}

impl RegionSpec {
    pub fn new(selector: impl Into<String>, effects: impl Fn(&ScopeCtx) + 'static) -> Self {
        Self {
            selector: selector.into(),
            options: RegionOptions::default(),
            effects: Rc::new(effects),
        }
    }

    /// Set region option flags (e.g. [`RegionOptions::ALLOW_HIDDEN_START`]
    /// for decorative regions that intentionally start hidden).
    pub fn with_options(mut self, options: RegionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }
}

/// Key of a region inside its coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(usize);

// =============================================================================
// Coordinator
// =============================================================================

struct RegionState {
    spec: RegionSpec,
    /// The lifecycle slot: holds the one live scope, or nothing.
    slot: Option<ScopeHandle>,
    phase: Signal<LifecyclePhase>,
}

struct CoordinatorInner {
    registry: EffectRegistry,
    regions: Vec<RegionState>,
}

/// Owns the lifecycle slots of its regions and drives open/revert.
///
/// Clone-able handle; clones share the same slots and registry.
#[derive(Clone)]
pub struct LifecycleCoordinator {
    inner: Rc<RefCell<CoordinatorInner>>,
}

impl LifecycleCoordinator {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(CoordinatorInner {
                registry: EffectRegistry::new(),
                regions: Vec::new(),
            })),
        }
    }

    /// Register a region. Its slot starts empty (`Idle`).
    pub fn add_region(&self, spec: RegionSpec) -> RegionId {
        let mut inner = self.inner.borrow_mut();
        let id = RegionId(inner.regions.len());
        inner.regions.push(RegionState {
            spec,
            slot: None,
            phase: signal(LifecyclePhase::Idle),
        });
        id
    }

    /// Current phase of a region.
    pub fn phase(&self, region: RegionId) -> LifecyclePhase {
        self.inner.borrow().regions[region.0].phase.get()
    }

    /// The region's phase signal, for reactive observers.
    pub fn phase_signal(&self, region: RegionId) -> Signal<LifecyclePhase> {
        self.inner.borrow().regions[region.0].phase.clone()
    }

    /// Number of live scopes across all regions.
    pub fn live_scopes(&self) -> usize {
        self.inner.borrow().registry.live_count()
    }

    /// Total scopes opened since the coordinator was created.
    pub fn open_count(&self) -> u64 {
        self.inner.borrow().registry.open_count()
    }

    /// Total scopes released since the coordinator was created.
    pub fn release_count(&self) -> u64 {
        self.inner.borrow().registry.release_count()
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Handle *navigation-complete*: for every region, revert then re-open
    /// against the newly presented document.
    pub fn handle_navigation_complete(&self, document: &Document) {
        let mut inner = self.inner.borrow_mut();
        let inner = &mut *inner;
        for region in &mut inner.regions {
            deactivate(&mut inner.registry, region);
            activate(&mut inner.registry, region, document);
        }
    }

    /// Handle *navigation-about-to-start*: revert every region.
    pub fn handle_about_to_start(&self) {
        let mut inner = self.inner.borrow_mut();
        let inner = &mut *inner;
        for region in &mut inner.regions {
            deactivate(&mut inner.registry, region);
        }
    }

    /// Revert every region and leave all slots `Idle` (teardown path).
    pub fn revert_all(&self) {
        self.handle_about_to_start();
    }

    // =========================================================================
    // Wiring
    // =========================================================================

    /// Subscribe this coordinator to a navigator's signals.
    ///
    /// If the navigator already presented a document, regions activate
    /// immediately; activation reverts before opening, so a duplicate
    /// complete signal afterwards is harmless.
    ///
    /// The returned handle unsubscribes and reverts everything when detached
    /// or dropped.
    pub fn attach(&self, navigator: &Navigator) -> LifecycleHandle {
        let unsubscribe_complete = {
            let coordinator = self.clone();
            navigator.on_complete(move |document| {
                coordinator.handle_navigation_complete(document);
            })
        };
        let unsubscribe_about = {
            let coordinator = self.clone();
            navigator.on_about_to_start(move || {
                coordinator.handle_about_to_start();
            })
        };

        if let Some(document) = navigator.document() {
            self.handle_navigation_complete(&document);
        }

        LifecycleHandle {
            coordinator: self.clone(),
            unsubscribe_complete: Some(unsubscribe_complete),
            unsubscribe_about: Some(unsubscribe_about),
        }
    }
}

impl Default for LifecycleCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Revert the region's slot, if it holds a scope. Idempotent.
fn deactivate(registry: &mut EffectRegistry, region: &mut RegionState) {
    if let Some(handle) = region.slot.take() {
        registry.revert(handle);
    }
    if region.phase.get() != LifecyclePhase::Idle {
        region.phase.set(LifecyclePhase::Idle);
    }
}

/// Open a fresh scope for the region against `document`. The slot must be
/// empty when this runs; `deactivate` precedes every call.
fn activate(registry: &mut EffectRegistry, region: &mut RegionState, document: &Document) {
    debug_assert!(
        region.slot.is_none(),
        "region {:?} still holds a scope at activation",
        region.spec.selector
    );

    if !region
        .spec
        .options
        .intersects(RegionOptions::ALLOW_HIDDEN_START | RegionOptions::SKIP_AUDIT)
    {
        if let Err(violation) = contract::audit_region(document, &region.spec.selector) {
            warn!(
                selector = %region.spec.selector,
                %violation,
                "region content hidden without an open scope"
            );
        }
    }

    let effects = region.spec.effects.clone();
    match registry.open_scope(document, &region.spec.selector, move |ctx| effects(ctx)) {
        Some(handle) => {
            region.slot = Some(handle);
            region.phase.set(LifecyclePhase::Active);
        }
        None => {
            trace!(selector = %region.spec.selector, "region absent on this page");
        }
    }
}

// =============================================================================
// Lifecycle Handle
// =============================================================================

/// Handle returned by [`LifecycleCoordinator::attach`].
///
/// Holds the two signal subscriptions. Detaching (or dropping) unsubscribes
/// and reverts every live scope, leaving the current document clean.
pub struct LifecycleHandle {
    coordinator: LifecycleCoordinator,
    unsubscribe_complete: Option<Cleanup>,
    unsubscribe_about: Option<Cleanup>,
}

impl LifecycleHandle {
    /// Unsubscribe from the navigator and revert everything.
    pub fn detach(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(cleanup) = self.unsubscribe_complete.take() {
            cleanup();
        }
        if let Some(cleanup) = self.unsubscribe_about.take() {
            cleanup();
        }
        self.coordinator.revert_all();
    }
}

impl Drop for LifecycleHandle {
    fn drop(&mut self) {
        self.release();
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::ElementProps;

    fn page_with_region() -> Document {
        let doc = Document::new();
        doc.append(
            doc.body(),
            ElementProps {
                tag: "section".into(),
                id: Some("services".into()),
                ..Default::default()
            },
        );
        doc
    }

    fn fade_in_region() -> RegionSpec {
        RegionSpec::new("#services", |ctx| {
            ctx.set_style(ctx.root(), "opacity", "0");
        })
    }

    #[test]
    fn test_complete_activates_region() {
        let coordinator = LifecycleCoordinator::new();
        let region = coordinator.add_region(fade_in_region());

        let doc = page_with_region();
        coordinator.handle_navigation_complete(&doc);

        assert_eq!(coordinator.phase(region), LifecyclePhase::Active);
        assert_eq!(coordinator.live_scopes(), 1);
        let root = doc.query("#services").unwrap();
        assert_eq!(doc.inline_style(root, "opacity"), Some("0".to_string()));
    }

    #[test]
    fn test_about_to_start_reverts_and_idles() {
        let coordinator = LifecycleCoordinator::new();
        let region = coordinator.add_region(fade_in_region());

        let doc = page_with_region();
        coordinator.handle_navigation_complete(&doc);
        coordinator.handle_about_to_start();

        assert_eq!(coordinator.phase(region), LifecyclePhase::Idle);
        assert_eq!(coordinator.live_scopes(), 0);
        let root = doc.query("#services").unwrap();
        assert_eq!(doc.inline_style_count(root), 0);
    }

    #[test]
    fn test_about_to_start_twice_is_idempotent() {
        let coordinator = LifecycleCoordinator::new();
        let region = coordinator.add_region(fade_in_region());

        coordinator.handle_navigation_complete(&page_with_region());
        coordinator.handle_about_to_start();
        coordinator.handle_about_to_start();

        assert_eq!(coordinator.phase(region), LifecyclePhase::Idle);
        assert_eq!(coordinator.release_count(), 1);
    }

    #[test]
    fn test_absent_region_stays_idle() {
        let coordinator = LifecycleCoordinator::new();
        let region = coordinator.add_region(fade_in_region());

        coordinator.handle_navigation_complete(&Document::new());

        assert_eq!(coordinator.phase(region), LifecyclePhase::Idle);
        assert_eq!(coordinator.open_count(), 0);
    }

    #[test]
    fn test_back_to_back_completes_keep_one_scope() {
        // The routine is idempotent even if the host misbehaves and fires
        // complete twice without an intervening swap.
        let coordinator = LifecycleCoordinator::new();
        let region = coordinator.add_region(fade_in_region());

        let doc = page_with_region();
        coordinator.handle_navigation_complete(&doc);
        coordinator.handle_navigation_complete(&doc);

        assert_eq!(coordinator.phase(region), LifecyclePhase::Active);
        assert_eq!(coordinator.live_scopes(), 1);
        assert_eq!(coordinator.open_count(), 2);
        assert_eq!(coordinator.release_count(), 1);
    }

    #[test]
    fn test_two_regions_have_independent_slots() {
        let coordinator = LifecycleCoordinator::new();
        let first = coordinator.add_region(fade_in_region());
        let second = coordinator.add_region(RegionSpec::new("#gallery", |ctx| {
            ctx.set_style(ctx.root(), "opacity", "0");
        }));

        // Page only has #services
        coordinator.handle_navigation_complete(&page_with_region());

        assert_eq!(coordinator.phase(first), LifecyclePhase::Active);
        assert_eq!(coordinator.phase(second), LifecyclePhase::Idle);
        assert_eq!(coordinator.live_scopes(), 1);
    }

    #[test]
    fn test_two_coordinators_do_not_interfere() {
        // Same region declaration, two independent instances: each owns its
        // own slot, so reverting one leaves the other live.
        let doc = page_with_region();

        let first = LifecycleCoordinator::new();
        let region_a = first.add_region(fade_in_region());
        let second = LifecycleCoordinator::new();
        let region_b = second.add_region(fade_in_region());

        first.handle_navigation_complete(&doc);
        second.handle_navigation_complete(&doc);
        assert_eq!(first.phase(region_a), LifecyclePhase::Active);
        assert_eq!(second.phase(region_b), LifecyclePhase::Active);

        first.handle_about_to_start();
        assert_eq!(first.phase(region_a), LifecyclePhase::Idle);
        assert_eq!(second.phase(region_b), LifecyclePhase::Active);
        assert_eq!(second.live_scopes(), 1);
    }

    #[test]
    fn test_attach_wires_signals_and_detach_cleans_up() {
        let navigator = Navigator::new();
        let coordinator = LifecycleCoordinator::new();
        let region = coordinator.add_region(fade_in_region());

        let handle = coordinator.attach(&navigator);

        let doc = page_with_region();
        navigator.present(doc.clone());
        assert_eq!(coordinator.phase(region), LifecyclePhase::Active);

        handle.detach();
        assert_eq!(coordinator.phase(region), LifecyclePhase::Idle);
        let root = doc.query("#services").unwrap();
        assert_eq!(doc.inline_style_count(root), 0);

        // Detached: further navigation is ignored
        navigator.present(page_with_region());
        assert_eq!(coordinator.phase(region), LifecyclePhase::Idle);
    }

    #[test]
    fn test_attach_catches_up_on_presented_document() {
        let navigator = Navigator::new();
        navigator.present(page_with_region());

        let coordinator = LifecycleCoordinator::new();
        let region = coordinator.add_region(fade_in_region());
        let _handle = coordinator.attach(&navigator);

        assert_eq!(coordinator.phase(region), LifecyclePhase::Active);
    }
}
