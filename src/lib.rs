//! Tabula Library
//!
//! A headless data table engine (filter, sort, paginate, skeleton and empty
//! states) and a users listing built on top of it.

pub mod app;
pub mod components;
pub mod constants;
pub mod domain;
pub mod error;
pub mod features;
pub mod helpers;
pub mod states;
