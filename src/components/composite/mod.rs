//! Composite components built from several parts

pub mod data_table;
