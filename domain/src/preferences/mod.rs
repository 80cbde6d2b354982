//! Conversion preferences
//!
//! The three user-editable settings that shape a conversion: API key,
//! theme and font size.

pub mod font_size;
pub mod settings;
