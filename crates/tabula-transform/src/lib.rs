//! Pure table operations.
//!
//! Everything here is a function from table(s) to a new table:
//!
//! - **transforms**: filter, rename, recode, drop-missing, coercion, sorting
//! - **reshape**: wide-to-long pivoting
//! - **aggregate**: group-by/summarize with na-aware reductions
//! - **join**: inner/left joins and key-based semi-filtering
//! - **derive**: ratio metrics with an explicit undefined-value policy

#![deny(unsafe_code)]

pub mod aggregate;
pub mod derive;
pub mod join;
pub mod reshape;
pub mod transforms;

pub use aggregate::{Reduction, ReductionSpec, group_summarize};
pub use derive::{OnUndefined, derive_ratio};
pub use join::{JoinKind, join, semi_join};
pub use reshape::pivot_longer;
pub use transforms::{
    Recode, SortDirection, coerce_column, drop_missing, filter_rows, recode, rename_columns,
    sort_by,
};
