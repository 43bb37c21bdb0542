//! Table Constants
//!
//! Centralized defaults shared by the engine, the users screen and the config.

/// Placeholder rows shown while the first load is in flight
pub const DEFAULT_SKELETON_ROWS: usize = 5;

/// Page size used when none is configured or the query string is invalid
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page size choices offered by the pagination footer
pub const PAGE_SIZE_OPTIONS: [usize; 6] = [5, 10, 20, 30, 40, 50];

/// Message shown when no row survives filtering
pub const DEFAULT_EMPTY_MESSAGE: &str = "No results.";

/// Text drawn in place of a cell that is still loading
pub const SKELETON_CELL: &str = "░░░";

/// Configuration file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "tabula.toml";

/// Log file prefix used by the rolling file appender
pub const LOG_FILE_PREFIX: &str = "tabula.log";
