//! Navigation Module - the host framework's two-signal seam.
//!
//! The host's transition system is a black box that fires exactly two
//! signals: *complete* after every page render (the initial one included)
//! and *about-to-start* immediately before the outgoing page is swapped out.
//! [`Navigator`] reduces that system to its observable surface: it owns the
//! currently presented [`Document`] and dispatches the two signals to
//! subscribers in navigation order.
//!
//! # Example
//!
//! ```ignore
//! use spark_fx::lifecycle::Navigator;
//!
//! let nav = Navigator::new();
//! let cleanup = nav.on_complete(|doc| {
//!     println!("page with {} elements rendered", doc.len());
//! });
//!
//! nav.present(first_page);   // fires complete
//! nav.begin_swap();          // fires about-to-start
//! nav.present(second_page);  // fires complete again
//!
//! cleanup();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{Signal, signal};
use tracing::debug;

use crate::page::Document;
use crate::types::{Cleanup, NavigationSignal};

// =============================================================================
// Handler Registry
// =============================================================================

type CompleteHandler = Rc<dyn Fn(&Document)>;
type AboutToStartHandler = Rc<dyn Fn()>;

struct NavigatorInner {
    document: Option<Document>,
    complete_handlers: Vec<(usize, CompleteHandler)>,
    about_handlers: Vec<(usize, AboutToStartHandler)>,
    next_id: usize,
}

impl NavigatorInner {
    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

// =============================================================================
// Navigator
// =============================================================================

/// Dispatcher for the two navigation signals, and owner of the current page.
#[derive(Clone)]
pub struct Navigator {
    inner: Rc<RefCell<NavigatorInner>>,
    last_signal: Signal<Option<NavigationSignal>>,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(NavigatorInner {
                document: None,
                complete_handlers: Vec::new(),
                about_handlers: Vec::new(),
                next_id: 0,
            })),
            last_signal: signal(None),
        }
    }

    /// The currently presented document, if any page has been presented.
    pub fn document(&self) -> Option<Document> {
        self.inner.borrow().document.clone()
    }

    /// The most recent signal. Reactive: reading it inside an effect
    /// re-runs the effect on every navigation.
    pub fn last_signal(&self) -> Option<NavigationSignal> {
        self.last_signal.get()
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Subscribe to *navigation-complete*. The handler receives the newly
    /// presented document. Returns an unsubscribe cleanup.
    pub fn on_complete(&self, handler: impl Fn(&Document) + 'static) -> Cleanup {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id();
            inner.complete_handlers.push((id, Rc::new(handler)));
            id
        };

        let inner = self.inner.clone();
        Box::new(move || {
            inner
                .borrow_mut()
                .complete_handlers
                .retain(|(handler_id, _)| *handler_id != id);
        })
    }

    /// Subscribe to *navigation-about-to-start*. Fires while the outgoing
    /// document is still current. Returns an unsubscribe cleanup.
    pub fn on_about_to_start(&self, handler: impl Fn() + 'static) -> Cleanup {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id();
            inner.about_handlers.push((id, Rc::new(handler)));
            id
        };

        let inner = self.inner.clone();
        Box::new(move || {
            inner
                .borrow_mut()
                .about_handlers
                .retain(|(handler_id, _)| *handler_id != id);
        })
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Install `document` as the current page and fire *navigation-complete*.
    ///
    /// The host calls this after the initial render and after every
    /// client-side swap, in either direction.
    pub fn present(&self, document: Document) {
        let handlers: Vec<CompleteHandler> = {
            let mut inner = self.inner.borrow_mut();
            inner.document = Some(document.clone());
            inner
                .complete_handlers
                .iter()
                .map(|(_, h)| h.clone())
                .collect()
        };

        debug!(elements = document.len(), "navigation complete");
        self.last_signal.set(Some(NavigationSignal::Complete));
        for handler in handlers {
            handler(&document);
        }
    }

    /// Fire *navigation-about-to-start* for the current page.
    pub fn begin_swap(&self) {
        let handlers: Vec<AboutToStartHandler> = {
            let inner = self.inner.borrow();
            inner.about_handlers.iter().map(|(_, h)| h.clone()).collect()
        };

        debug!("navigation about to start");
        self.last_signal.set(Some(NavigationSignal::AboutToStart));
        for handler in handlers {
            handler();
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
