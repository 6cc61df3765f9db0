//! Query builder utilities
//!
//! This module turns a view schema and its dependencies into nested SQL.

pub mod builder;
pub mod join;
pub mod ordering;
pub mod sql_generation;



pub use builder::{BuildOptions, ViewQueryBuilder};
pub use join::{JoinStep, JoinType, RelationPlan};
pub use ordering::SortOrder;
