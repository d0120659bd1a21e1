//! Foundation module - Core utilities and types
//!
//! This module provides the small building blocks shared by the rest of the crate:
//! - Pixel extents for windows, monitors and back-buffers
//! - Logging utilities

pub mod extent;
pub mod logging;

pub use extent::Extent;
