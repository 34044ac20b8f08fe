//! The fixed instruction template and the tolerant response grammar.
//!
//! The three-marker answer format (`FIELD_MATCH:`, `METHOD_MATCH:`,
//! `SUMMARY:`) is treated as a narrow wire protocol: the prompt anchors it
//! with worked examples, and the parser degrades gracefully on anything
//! the model emits around it.

pub mod parser;
pub mod prompt;

pub use parser::*;
pub use prompt::*;
