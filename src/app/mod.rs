//! Application host
//!
//! Command-line parsing, logging setup and command handlers.

pub mod actions;
pub mod commands;
pub mod dispatch;
pub mod logging;
