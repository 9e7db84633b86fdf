//! Tabular data model.
//!
//! This crate defines the leaf data structures shared by the whole workspace:
//!
//! - **value**: cell values, declared column types, key atoms
//! - **schema**: ordered, uniquely named, typed columns
//! - **table**: immutable tables with row views
//! - **error**: the schema/type error taxonomy

#![deny(unsafe_code)]

pub mod error;
pub mod schema;
pub mod table;
pub mod value;

pub use error::{Result, TableError};
pub use schema::{Column, Schema};
pub use table::{RowView, Table};
pub use value::{ColumnType, KeyAtom, Value, format_numeric};
