//! View query builder
//!
//! Assembles the nested SELECT for a view: one `SELECT *` subquery per base
//! relation, joined in resolved order, projected and aliased with the view name,
//! then selected from by the outer query.

use crate::errors::{ConfigurationError, ViewQueryError};
use crate::identifier;
use crate::model::{DependencyDescription, ViewSchema};
use crate::query_builder::join::{self, RelationPlan};
use crate::query_builder::sql_generation::SqlGenerator;

/// Rendering switches for [`ViewQueryBuilder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Double embedded `"` characters inside quoted identifiers
    pub escape_embedded_quotes: bool,
    /// Reject explicit column aliases that are not bare identifiers
    pub strict_aliases: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            escape_embedded_quotes: true,
            strict_aliases: true,
        }
    }
}

/// Query builder for a single view.
///
/// The builder owns its schema and dependencies and reads them on every call, so
/// changes made through [`schema_mut`](Self::schema_mut) show up in the next
/// [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct ViewQueryBuilder {
    schema: ViewSchema,
    dependencies: DependencyDescription,
    options: BuildOptions,
}

impl ViewQueryBuilder {
    pub fn new(schema: ViewSchema, dependencies: DependencyDescription) -> Self {
        Self {
            schema,
            dependencies,
            options: BuildOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    pub fn schema(&self) -> &ViewSchema {
        &self.schema
    }

    pub fn schema_mut(&mut self) -> &mut ViewSchema {
        &mut self.schema
    }

    pub fn dependencies(&self) -> &DependencyDescription {
        &self.dependencies
    }

    pub fn dependencies_mut(&mut self) -> &mut DependencyDescription {
        &mut self.dependencies
    }

    pub fn options(&self) -> BuildOptions {
        self.options
    }

    /// Aliases exposed by the outer SELECT, `["*"]` without declared columns
    pub fn column_aliases(&self) -> Vec<String> {
        self.schema
            .column_aliases_with(self.options.escape_embedded_quotes)
    }

    /// The projected join, wrapped and aliased with the view name
    pub fn table_expression(&self) -> Result<String, ViewQueryError> {
        let plan = self.prepare()?;
        Ok(self.render_table_expression(&plan))
    }

    /// Build the complete SQL statement for the view
    pub fn build(&self) -> Result<String, ViewQueryError> {
        let plan = self.prepare()?;
        let sql = self.render_query(&plan, self.schema.limit);

        tracing::debug!(
            "[VIEW_QUERY] View: {}, relations: {}, joins: {}",
            self.schema.name,
            plan.steps.len() + 1,
            plan.steps.len()
        );
        tracing::trace!("[VIEW_QUERY] SQL: {}", sql);

        Ok(sql)
    }

    /// The view query limited to its first `rows` rows
    pub fn head_query(&self, rows: u64) -> Result<String, ViewQueryError> {
        let plan = self.prepare()?;
        Ok(self.render_query(&plan, Some(rows)))
    }

    /// `SELECT COUNT(*)` over the view's table expression
    pub fn row_count_query(&self) -> Result<String, ViewQueryError> {
        let plan = self.prepare()?;
        Ok(SqlGenerator::build_select_block(
            &["COUNT(*)".to_string()],
            &self.render_table_expression(&plan),
            0,
        ))
    }

    /// Validate the inputs and resolve the join order; nothing is rendered on failure
    fn prepare(&self) -> Result<RelationPlan, ViewQueryError> {
        let result = self.validate_schema().and_then(|_| join::resolve(&self.dependencies));

        result.map_err(|error| {
            tracing::warn!("[VIEW_QUERY] Rejected view '{}': {}", self.schema.name, error);
            ViewQueryError::from(error)
        })
    }

    fn validate_schema(&self) -> Result<(), ConfigurationError> {
        if identifier::strip_comment(&self.schema.name).trim().is_empty() {
            return Err(ConfigurationError::EmptyViewName);
        }

        for (index, column) in self.schema.declared_columns().unwrap_or_default().iter().enumerate() {
            if identifier::strip_comment(&column.name).trim().is_empty() {
                return Err(ConfigurationError::EmptyColumnName { index });
            }

            if let Some(alias) = &column.alias {
                if self.options.strict_aliases && !identifier::is_bare_identifier(alias) {
                    return Err(ConfigurationError::UnsafeAlias {
                        alias: alias.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    fn render_table_expression(&self, plan: &RelationPlan) -> String {
        let generator = self.generator();
        let escape = self.options.escape_embedded_quotes;

        let projection: Vec<String> = match self.schema.declared_columns() {
            Some(columns) => columns
                .iter()
                .map(|column| {
                    format!("{} AS {}", generator.identifier(&column.name), column.alias_with(escape))
                })
                .collect(),
            None => vec!["*".to_string()],
        };

        let block =
            SqlGenerator::build_select_block(&projection, &generator.build_join_chain(plan, 1), 1);
        SqlGenerator::build_subquery(&block, &generator.identifier(&self.schema.name), 0)
    }

    fn render_query(&self, plan: &RelationPlan, limit: Option<u64>) -> String {
        let generator = self.generator();
        let mut sql = SqlGenerator::build_select_block(
            &self.column_aliases(),
            &self.render_table_expression(plan),
            0,
        );

        let order_by: Vec<_> = self
            .schema
            .order_by
            .iter()
            .map(|entry| (entry.field.clone(), entry.order))
            .collect();

        for clause in [
            generator.build_order_clause(&order_by),
            SqlGenerator::build_limit_clause(limit),
        ] {
            if !clause.is_empty() {
                sql.push('\n');
                sql.push_str(&clause);
            }
        }

        sql
    }

    fn generator(&self) -> SqlGenerator {
        SqlGenerator::new(self.options.escape_embedded_quotes)
    }
}
