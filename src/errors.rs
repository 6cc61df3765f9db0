//! Error types for the Viewsmith crate
//!
//! This module contains all error types that can be returned by Viewsmith operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewSmithError {
    #[error("View query error: {0}")]
    Query(#[from] view_query::ViewQueryError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
