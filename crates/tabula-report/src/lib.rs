//! Concrete analysis report pipelines.
//!
//! Two pipelines share the same load → clean → join → aggregate → derive
//! pattern:
//!
//! - **transit**: NTD fare revenue, expenses, and ridership into financial
//!   efficiency metrics per agency and mode
//! - **imdb**: vote-gated dataset dumps into a success scoring used to
//!   shortlist personnel, series, and classic remake candidates
//! - **modes**: NTD code tables

#![deny(unsafe_code)]

pub mod imdb;
pub mod modes;
pub mod transit;

pub use imdb::{ImdbOptions, ImdbReport};
pub use transit::{TransitOptions, TransitReport};
