//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod clipboard;
pub mod conversion_transport;
pub mod document_source;
pub mod link_opener;
pub mod preferences_store;
pub mod preview_surface;
