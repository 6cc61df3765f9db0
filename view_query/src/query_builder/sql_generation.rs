//! SQL text layout
//!
//! Blocks are rendered directly at the nesting depth they end up in, two spaces
//! per level. Text that has already been rendered (identifiers, join predicates,
//! nested blocks) is never re-indented, so names and predicates spanning several
//! lines reach the output unchanged.

use crate::identifier::SqlIdentifier;
use crate::query_builder::join::RelationPlan;
use crate::query_builder::ordering::SortOrder;

const INDENT: &str = "  ";

pub struct SqlGenerator {
    escape_embedded_quotes: bool,
}

impl SqlGenerator {
    pub fn new(escape_embedded_quotes: bool) -> Self {
        Self {
            escape_embedded_quotes,
        }
    }

    /// Render an identifier with this generator's quoting rules
    pub fn identifier(&self, name: &str) -> String {
        SqlIdentifier::parse(name).to_sql(self.escape_embedded_quotes)
    }

    /// Build `SELECT` with one item per line followed by `FROM <source>`.
    ///
    /// `source` continues the `FROM` line; any further lines it has must already
    /// be laid out for `depth`.
    pub fn build_select_block(items: &[String], source: &str, depth: usize) -> String {
        let pad = Self::pad(depth);
        let item_lines = items
            .iter()
            .map(|item| format!("{}{}{}", pad, INDENT, item))
            .collect::<Vec<_>>()
            .join(",\n");

        format!("{}SELECT\n{}\n{}FROM {}", pad, item_lines, pad, source)
    }

    /// Wrap a block rendered at `depth + 1` as `(\n<block>\n) AS <alias>`
    pub fn build_subquery(block: &str, alias: &str, depth: usize) -> String {
        format!("(\n{}\n{}) AS {}", block, Self::pad(depth), alias)
    }

    /// `SELECT * FROM <relation>` aliased with the relation's own name
    pub fn build_base_subquery(&self, relation: &str, depth: usize) -> String {
        let name = self.identifier(relation);
        let block = Self::build_select_block(&["*".to_string()], &name, depth + 1);
        Self::build_subquery(&block, &name, depth)
    }

    /// Root subquery followed by one `JOIN ... ON ...` per step
    pub fn build_join_chain(&self, plan: &RelationPlan, depth: usize) -> String {
        let pad = Self::pad(depth);
        let mut chain = self.build_base_subquery(plan.root.as_str(), depth);

        for step in &plan.steps {
            chain.push_str(&format!(
                "\n{}{} {}\n{}{}ON {}",
                pad,
                step.join_type.to_sql(),
                self.build_base_subquery(step.relation.as_str(), depth),
                pad,
                INDENT,
                step.predicate
            ));
        }

        chain
    }

    /// Build ORDER BY clause
    pub fn build_order_clause(&self, order_by: &[(String, SortOrder)]) -> String {
        if order_by.is_empty() {
            return "".to_string();
        }

        let order_items: Vec<String> = order_by
            .iter()
            .map(|(field, order)| format!("{} {}", self.identifier(field), order.to_sql()))
            .collect();

        format!("ORDER BY {}", order_items.join(", "))
    }

    /// Build LIMIT clause
    pub fn build_limit_clause(limit: Option<u64>) -> String {
        match limit {
            Some(limit) => format!("LIMIT {}", limit),
            None => "".to_string(),
        }
    }

    fn pad(depth: usize) -> String {
        INDENT.repeat(depth)
    }
}
