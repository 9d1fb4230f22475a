//! lex-core: Lottie document loading, element extraction, and stack-order merge
//!
//! This crate focuses on a small, well-factored surface:
//! - Typed view over a Lottie document (`assets`, `layers`, `nm`) that keeps raw JSON
//! - Two search policies: every matching asset, first matching layer
//! - Stack-order index: per-key read-modify-write merge of `stack-order.json`
//! - Pretty JSON output shared by both tools
//!
pub mod document;
pub mod error;
pub mod extract;
pub mod json;
pub mod stack_order;

pub use document::{Element, LottieDocument, load_document};
pub use error::{Error, Result};
pub use extract::{Extraction, all_matches, extract, extract_element, first_match};
pub use json::{to_pretty_json, write_json_to_file};
pub use stack_order::{
    INDEX_FILE_NAME, MergeOutcome, StackOrderIndex, StackOrderReport, UNNAMED_LAYER,
    animation_name, index_path, layer_names, update_stack_order,
};
