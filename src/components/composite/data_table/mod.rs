//! DataTable Component
//!
//! A headless data table: filtering, type-aware stable sorting, pagination,
//! controlled or uncontrolled sort and filter state, and skeleton/empty-state
//! decisions over records of any type.

pub mod column;
pub mod data_table;
pub mod pagination;
pub mod sort;
pub mod state;
pub mod text;

pub use column::{Alignment, Column, ColumnWidth};
pub use data_table::{Cell, DataTable, HeaderCell, RenderedRow, TableBody, TableView};
pub use pagination::{PageWindow, Pagination, PaginationConfig};
pub use sort::{SortDescriptor, SortDirection, SortIndicator, SortKey};
pub use state::StateSlot;
pub use text::render_text;
