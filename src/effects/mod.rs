//! Effects Module - scoped visual mutations.
//!
//! The attribution layer between regions and the page:
//! - [`EffectRegistry`] - open/revert bookkeeping, the only source of handles
//! - [`ScopeHandle`] - owning token for one live scope
//! - [`ScopeCtx`] / [`ScopeStyles`] - registration context and trigger writer
//! - [`Timeline`] - staged value tracks driven by scroll progress
//!
//! Everything written while a scope is open is undone by reverting that
//! scope; nothing else may touch inline styles.

mod registry;
mod scope;
mod timeline;

pub use registry::{EffectRegistry, ScopeHandle};
pub use scope::{ScopeCtx, ScopeStyles};
pub use timeline::Timeline;
