//! Convenience re-exports for common Viewsmith usage
//!
//! This prelude module re-exports the most commonly used items from the Viewsmith
//! workspace, making it easier to import everything you need with a single use statement.
//!
//! # Example
//!
//! ```rust
//! use viewsmith::prelude::*;
//!
//! let schema = ViewSchema::new("parent_children").column("parents.id");
//! let deps = DependencyDescription::new().relation("parents");
//! let sql = ViewSmith::default().compile(&schema, &deps).unwrap();
//! assert!(sql.ends_with(") AS parent_children"));
//! ```

// Core Viewsmith components
pub use crate::core::ViewSmith;
pub use crate::errors::ViewSmithError;

// Re-export centralized config
pub use config::{AppConfig, BuilderConfig};

// Re-export commonly used view-query types for convenience
pub use view_query::prelude::*;
