//! View Query - SQL generation for virtual views
//!
//! This crate compiles a declarative view (a named projection over joined base
//! relations) into the text of a nested SELECT statement. Every table, column and
//! view name is passed through the identifier sanitizer before it is emitted.

pub mod errors;
pub mod identifier;
pub mod model;
pub mod prelude;
pub mod query_builder;

pub use errors::{ConfigurationError, ViewQueryError};
pub use identifier::{render, SqlIdentifier};
pub use model::{ColumnDef, DependencyDescription, JoinEdge, OrderBy, RelationRef, ViewSchema};
pub use query_builder::{BuildOptions, JoinType, RelationPlan, SortOrder, ViewQueryBuilder};
