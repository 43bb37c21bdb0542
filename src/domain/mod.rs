//! Domain - Records shown by the application

pub mod user;

pub use user::{User, UserRole, parse_users};
