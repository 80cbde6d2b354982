//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod convert_document;
pub mod copy_content;
