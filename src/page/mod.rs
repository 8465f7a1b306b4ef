//! Page Module - Host page model.
//!
//! The retained element tree the lifecycle protocol runs against:
//! - [`Document`] - arena of elements, selector queries, inline-style ops
//! - [`ElementProps`] - properties for building a page
//! - [`NodeId`] - handle to one element
//!
//! One document is built per navigation; the navigator swaps the current one.

mod document;
mod node;

pub use document::Document;
pub use node::{ElementProps, NodeId};
