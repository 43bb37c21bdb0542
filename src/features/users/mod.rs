//! Users feature: account listing with search, role and status filters

mod columns;
mod controller;
mod page;

pub use columns::{EDIT_ACTION, UserTableActions, VIEW_DETAILS_ACTION, user_columns};
pub use controller::{UsersTable, inactive_only};
pub use page::{render_error, render_page};
