//! Data model for parsed GBP headers: a typed context tree over an owned
//! source buffer, plus the incremental builder that grows it one character
//! at a time.

mod arena;
mod builder;
mod tree;

pub use arena::{Arena, Key};
pub use builder::{Builder, Unterminated};
pub use tree::{ContextTree, Node, NodeKind};
