//! Features - Vertical Feature Slices
//!
//! Each feature contains its page, controller and column definitions.

pub mod users;
