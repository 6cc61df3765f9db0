//! # Viewsmith
//!
//! Deterministic SQL generation for virtual views. A view is a named projection
//! over one or more base relations joined together; Viewsmith turns its
//! declaration into a nested SELECT, rendering every table, column and view name
//! through an identifier sanitizer.
//!
//! ## Quick Start
//!
//! ```rust
//! use viewsmith::prelude::*;
//!
//! fn main() -> Result<(), ViewSmithError> {
//!     let schema = ViewSchema::new("parent_children")
//!         .column("parents.id")
//!         .column("parents.name")
//!         .column("children.name");
//!
//!     let deps = DependencyDescription::new()
//!         .relation("parents")
//!         .relation("children")
//!         .join(JoinEdge::on_columns("parents.id", "children.id"));
//!
//!     let viewsmith = ViewSmith::new(BuilderConfig::default());
//!     let sql = viewsmith.compile(&schema, &deps)?;
//!
//!     assert!(sql.starts_with("SELECT\n  parents_id,\n  parents_name,\n  children_name\nFROM ("));
//!     assert!(sql.ends_with("    ON parents.id = children.id\n) AS parent_children"));
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod prelude;

// Re-export the main public types for convenience
pub use crate::core::ViewSmith;
pub use crate::errors::ViewSmithError;

// Re-export centralized config
pub use config::{AppConfig, BuilderConfig};

// Re-export the engine crate
pub use view_query;
