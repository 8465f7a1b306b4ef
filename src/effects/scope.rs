//! Effect Scope - mutation attribution and undo for one open scope.
//!
//! Every visual mutation issued while a scope is open is recorded against it:
//! style writes remember the inline value they replaced (first write wins, so
//! revert restores the pre-scope state no matter how many times a property
//! changed), and triggers registered inside the scope die with it.
//!
//! # Pattern: registration context
//!
//! A [`ScopeCtx`] exists only while the registration callback runs. Anything
//! that needs to write styles later (a scroll trigger firing on the way down
//! the page) goes through a [`ScopeStyles`] handle, which holds the scope
//! weakly and silently drops writes once the scope is released.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use spark_signals::effect;

use crate::page::{Document, NodeId};

use super::timeline::Timeline;

// =============================================================================
// Scope State
// =============================================================================

/// Undo bookkeeping for one live scope.
pub(crate) struct ScopeState {
    document: Document,
    /// (node, property) -> inline value before this scope first touched it.
    priors: HashMap<(NodeId, String), Option<String>>,
    released: bool,
}

impl ScopeState {
    pub(crate) fn new(document: Document) -> Self {
        Self {
            document,
            priors: HashMap::new(),
            released: false,
        }
    }

    /// Apply an attributed inline style write.
    fn set_style(&mut self, node: NodeId, prop: &str, value: String) {
        if self.released {
            return;
        }
        let prior = self.document.set_inline_style(node, prop, value);
        self.priors.entry((node, prop.to_string())).or_insert(prior);
    }

    /// Put a property back to its pre-scope value without forgetting the
    /// recording (a later write through the scope still reverts correctly).
    fn restore_style(&mut self, node: NodeId, prop: &str) {
        if self.released {
            return;
        }
        if let Some(prior) = self.priors.get(&(node, prop.to_string())) {
            self.document.restore_inline_style(node, prop, prior.clone());
        }
    }

    /// Undo every recorded mutation and refuse all further writes.
    /// Idempotent.
    pub(crate) fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        for ((node, prop), prior) in self.priors.drain() {
            self.document.restore_inline_style(node, &prop, prior);
        }
    }
}

// =============================================================================
// Scope Styles Handle
// =============================================================================

/// Weak, clone-able writer for trigger callbacks.
///
/// Writes are attributed to the owning scope; once the scope is released
/// (or gone entirely) every call is a silent no-op, so a trigger firing into
/// a teardown race cannot leave residue.
#[derive(Clone)]
pub struct ScopeStyles {
    state: Weak<RefCell<ScopeState>>,
}

impl ScopeStyles {
    /// Set an inline style property, attributed to the scope.
    pub fn set_style(&self, node: NodeId, prop: &str, value: impl Into<String>) {
        if let Some(state) = self.state.upgrade() {
            state.borrow_mut().set_style(node, prop, value.into());
        }
    }

    /// Restore a property to its pre-scope value.
    pub fn restore_style(&self, node: NodeId, prop: &str) {
        if let Some(state) = self.state.upgrade() {
            state.borrow_mut().restore_style(node, prop);
        }
    }
}

// =============================================================================
// Scope Context
// =============================================================================

/// Registration context handed to a region's effect callback.
///
/// All declarations issued through it - initial-state writes, scroll-driven
/// triggers, timelines - are attributed to the scope being opened and fully
/// undone when that scope is reverted.
///
/// # Example
///
/// ```ignore
/// registry.open_scope(&doc, "#hero", |ctx| {
///     let title = ctx.document().query(".title").unwrap();
///     ctx.set_style(title, "opacity", "0"); // hidden only inside the scope
///     ctx.on_scroll_progress(move |p, styles| {
///         if p > 0.2 {
///             styles.set_style(title, "opacity", "1");
///         }
///     });
/// });
/// ```
pub struct ScopeCtx {
    state: Rc<RefCell<ScopeState>>,
    document: Document,
    root: NodeId,
}

impl ScopeCtx {
    pub(crate) fn new(state: Rc<RefCell<ScopeState>>, document: Document, root: NodeId) -> Self {
        Self {
            state,
            document,
            root,
        }
    }

    /// The resolved region root the scope was opened for.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The document the scope applies to.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Set an inline style property, attributed to the scope.
    pub fn set_style(&self, node: NodeId, prop: &str, value: impl Into<String>) {
        self.state.borrow_mut().set_style(node, prop, value.into());
    }

    /// A writer that can outlive the registration callback (for triggers).
    pub fn styles(&self) -> ScopeStyles {
        ScopeStyles {
            state: Rc::downgrade(&self.state),
        }
    }

    /// Register a scroll-driven trigger.
    ///
    /// The callback runs immediately with the current scroll progress and
    /// again on every change. It is registered inside the open scope, so it
    /// stops when the scope is reverted.
    pub fn on_scroll_progress(&self, trigger: impl Fn(f64, &ScopeStyles) + 'static) {
        let styles = self.styles();
        let scroll = self.document.scroll_signal();
        let _stop = effect(move || {
            let progress = scroll.get();
            trigger(progress, &styles);
        });
    }

    /// Drive a [`Timeline`] from scroll progress.
    ///
    /// At each scroll position the timeline is sampled and every track is set
    /// to the value of its last keyframe at or before that position; before a
    /// track's first keyframe the property returns to its pre-scope value, so
    /// scrubbing backward leaves no trace of later keyframes.
    pub fn drive(&self, timeline: Timeline) {
        self.on_scroll_progress(move |progress, styles| {
            for (node, prop, value) in timeline.sample(progress) {
                match value {
                    Some(v) => styles.set_style(node, prop, v),
                    None => styles.restore_style(node, prop),
                }
            }
        });
    }
}

// =============================================================================
// Tests
// =============================================================================
