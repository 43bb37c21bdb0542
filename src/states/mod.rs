//! State Layer
//!
//! Configuration and listing state shared by the features.

mod app;
mod users;

pub use app::*;
pub use users::*;
