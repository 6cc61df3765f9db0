//! Core Viewsmith functionality
//!
//! This module contains the main ViewSmith struct, which applies one builder
//! configuration to every view it compiles.

use std::path::Path;
use view_query::{BuildOptions, DependencyDescription, ViewQueryBuilder, ViewSchema};

use crate::errors::ViewSmithError;
use crate::{debug_log, trace_log};
use config::{AppConfig, BuilderConfig};

/// Main Viewsmith coordinator holding the rendering configuration
#[derive(Debug, Clone, Default)]
pub struct ViewSmith {
    config: BuilderConfig,
}

impl ViewSmith {
    /// Create new ViewSmith with the given builder configuration
    pub fn new(config: BuilderConfig) -> Self {
        Self { config }
    }

    /// Create from the configuration located by [`AppConfig::load`]
    pub fn load() -> Result<Self, ViewSmithError> {
        let app_config = AppConfig::load()?;
        Ok(Self::new(app_config.builder))
    }

    /// Create from a TOML configuration file
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> Result<Self, ViewSmithError> {
        let app_config = AppConfig::from_file(path)?;
        Ok(Self::new(app_config.builder))
    }

    /// Get builder configuration reference
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Options passed to every builder created by this instance
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            escape_embedded_quotes: self.config.escape_embedded_quotes,
            strict_aliases: self.config.strict_aliases,
        }
    }

    /// Create a configured builder that owns the given view definition
    pub fn builder(&self, schema: ViewSchema, dependencies: DependencyDescription) -> ViewQueryBuilder {
        ViewQueryBuilder::new(schema, dependencies).with_options(self.build_options())
    }

    /// Compile a view definition into its SQL text
    pub fn compile(
        &self,
        schema: &ViewSchema,
        dependencies: &DependencyDescription,
    ) -> Result<String, ViewSmithError> {
        debug_log!("[COMPILE] View: {}", schema.name);

        let sql = self.builder(schema.clone(), dependencies.clone()).build()?;

        trace_log!("[COMPILE] SQL: {}", sql);
        Ok(sql)
    }

    /// Compile a query returning the first `head_rows` rows of the view
    pub fn compile_head(
        &self,
        schema: &ViewSchema,
        dependencies: &DependencyDescription,
    ) -> Result<String, ViewSmithError> {
        let sql = self
            .builder(schema.clone(), dependencies.clone())
            .head_query(self.config.head_rows)?;
        Ok(sql)
    }

    /// Compile a row count query for the view
    pub fn compile_row_count(
        &self,
        schema: &ViewSchema,
        dependencies: &DependencyDescription,
    ) -> Result<String, ViewSmithError> {
        let sql = self
            .builder(schema.clone(), dependencies.clone())
            .row_count_query()?;
        Ok(sql)
    }
}
