//! Effect Registry - open/revert bookkeeping for scopes.
//!
//! The registry is the seam between regions and the effect system. Opening a
//! scope resolves the region root, runs the registration callback inside a
//! fresh `spark-signals` effect scope (so every trigger registered there is
//! attributed to it), and hands back an owning [`ScopeHandle`]. Reverting
//! stops those triggers and undoes every recorded style write.
//!
//! Handles are not clone-able and revert consumes them: a reverted handle
//! cannot be used again by construction. Reverting a scope that is already
//! gone is a tolerated no-op.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use spark_signals::effect_scope;
use tracing::{debug, trace};

use crate::page::Document;
use crate::types::{Cleanup, ScopeId};

use super::scope::{ScopeCtx, ScopeState};

// =============================================================================
// Scope Handle
// =============================================================================

/// Owning token for one live scope.
///
/// Exactly one exists per open scope; it lives in the owning region's
/// lifecycle slot and is consumed by [`EffectRegistry::revert`].
#[derive(Debug)]
pub struct ScopeHandle {
    id: ScopeId,
}

impl ScopeHandle {
    /// Identity of the scope this handle owns.
    pub fn id(&self) -> ScopeId {
        self.id
    }
}

// =============================================================================
// Registry
// =============================================================================

struct LiveScope {
    state: Rc<RefCell<ScopeState>>,
    /// Stops every trigger effect registered inside the scope.
    stop_triggers: Option<Cleanup>,
}

/// Tracks live scopes and exposes the open/revert operations.
pub struct EffectRegistry {
    scopes: HashMap<ScopeId, LiveScope>,
    next_id: u64,
    opened: u64,
    released: u64,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self {
            scopes: HashMap::new(),
            next_id: 1,
            opened: 0,
            released: 0,
        }
    }

    /// Open a scope for the region `selector` resolves to in `document`.
    ///
    /// Returns `None` without side effects when the root does not resolve -
    /// the progressive-enhancement fallback, not an error. Otherwise the
    /// registration callback runs once, inside the new scope, and the handle
    /// owning the scope is returned.
    pub fn open_scope(
        &mut self,
        document: &Document,
        selector: &str,
        register: impl FnOnce(&ScopeCtx),
    ) -> Option<ScopeHandle> {
        let Some(root) = document.query(selector) else {
            trace!(selector, "region root absent, scope not opened");
            return None;
        };

        let id = ScopeId(self.next_id);
        self.next_id += 1;

        let state = Rc::new(RefCell::new(ScopeState::new(document.clone())));
        let ctx = ScopeCtx::new(state.clone(), document.clone(), root);

        // Triggers registered by the callback land in this effect scope, so
        // one stop call tears them all down on revert.
        let scope = effect_scope(false);
        scope.run(move || register(&ctx));
        let stop_triggers: Cleanup = Box::new(move || scope.stop());

        self.scopes.insert(
            id,
            LiveScope {
                state,
                stop_triggers: Some(stop_triggers),
            },
        );
        self.opened += 1;
        debug!(scope = id.raw(), selector, "scope opened");

        Some(ScopeHandle { id })
    }

    /// Revert a scope: undo every attributed mutation, stop its triggers,
    /// and invalidate the handle. No-op if the scope is already gone.
    pub fn revert(&mut self, handle: ScopeHandle) {
        self.revert_id(handle.id);
    }

    pub(crate) fn revert_id(&mut self, id: ScopeId) {
        let Some(mut live) = self.scopes.remove(&id) else {
            return;
        };

        // Refuse further writes before stopping triggers, then undo. Order
        // matters: a trigger must never observe a half-restored region.
        live.state.borrow_mut().release();
        if let Some(stop) = live.stop_triggers.take() {
            stop();
        }

        self.released += 1;
        debug!(scope = id.raw(), "scope reverted");
    }

    /// Revert every live scope (teardown path).
    pub fn revert_all(&mut self) {
        let ids: Vec<ScopeId> = self.scopes.keys().copied().collect();
        for id in ids {
            self.revert_id(id);
        }
    }

    /// Whether the scope behind `id` is still live.
    pub fn is_live(&self, id: ScopeId) -> bool {
        self.scopes.contains_key(&id)
    }

    /// Number of currently live scopes.
    pub fn live_count(&self) -> usize {
        self.scopes.len()
    }

    /// Total scopes opened over the registry's lifetime.
    pub fn open_count(&self) -> u64 {
        self.opened
    }

    /// Total scopes released over the registry's lifetime.
    pub fn release_count(&self) -> u64 {
        self.released
    }
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
