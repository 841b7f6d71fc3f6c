//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types and conversions between 2D outlines and 3D mesh space
//! - Handle-based collections for the node arena
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod logging;
