//! Convenience re-exports for common view-query usage

// Error types
pub use crate::errors::{ConfigurationError, ViewQueryError};

// View model
pub use crate::model::{ColumnDef, DependencyDescription, JoinEdge, OrderBy, RelationRef, ViewSchema};

// Query building
pub use crate::query_builder::{BuildOptions, JoinType, SortOrder, ViewQueryBuilder};

// Identifier rendering
pub use crate::identifier::{render, SqlIdentifier};
