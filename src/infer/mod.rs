//! Structure inference for message trees
//!
//! Converts an arbitrary JSON-like message tree into the body of a structural
//! interface declaration. Inference is pure and total: every input produces
//! text, malformed shapes degrade to a primitive type tag.

mod inferencer;
mod tree;

pub use inferencer::{infer, interface_body};
pub use tree::{FormatTable, MergedOptions, MessageTree};
