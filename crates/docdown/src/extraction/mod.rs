//! Conversion helpers shared by the default backends.

pub mod html;
