//! Derived, rebuildable views over the DOM
//!
//! - TextNodeIndex: ordered handles to every run text leaf
//! - VirtualText: the flattened concatenation plus its offset-to-leaf map

pub mod text_nodes;
pub mod virtual_text;

pub use text_nodes::{TextNodeHandle, TextNodeIndex};
pub use virtual_text::{NodeSpan, VirtualText};
