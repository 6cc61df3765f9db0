//! View model
//!
//! Plain value types describing a view and the relations it reads from. They carry
//! serde derives so external loaders can produce them from any format.

use crate::identifier::{self, SqlIdentifier};
use crate::query_builder::join::JoinType;
use crate::query_builder::ordering::SortOrder;
use serde::{Deserialize, Serialize};

/// A named projection over a join of one or more base relations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSchema {
    /// Declared view name, used as the alias of the inner subquery
    pub name: String,
    /// `None` or empty projects everything (`*`)
    #[serde(default)]
    pub columns: Option<Vec<ColumnDef>>,
    #[serde(default)]
    pub order_by: Vec<OrderBy>,
    #[serde(default)]
    pub limit: Option<u64>,
}

impl ViewSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: None,
            order_by: Vec::new(),
            limit: None,
        }
    }

    /// Add a column with an alias derived from its name
    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.columns
            .get_or_insert_with(Vec::new)
            .push(ColumnDef::new(name));
        self
    }

    /// Add a column with an explicit alias
    pub fn column_as(mut self, name: impl Into<String>, alias: impl Into<String>) -> Self {
        self.columns
            .get_or_insert_with(Vec::new)
            .push(ColumnDef::new(name).with_alias(alias));
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.order_by.push(OrderBy {
            field: field.into(),
            order,
        });
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Declared columns, treating an empty list the same as no list
    pub fn declared_columns(&self) -> Option<&[ColumnDef]> {
        self.columns.as_deref().filter(|columns| !columns.is_empty())
    }

    /// Output aliases in declaration order, or `["*"]` when no columns are declared
    pub fn column_aliases(&self) -> Vec<String> {
        self.column_aliases_with(true)
    }

    /// Same as [`column_aliases`](Self::column_aliases) with an explicit quote escaping rule
    pub fn column_aliases_with(&self, escape_embedded_quotes: bool) -> Vec<String> {
        match self.declared_columns() {
            Some(columns) => columns
                .iter()
                .map(|column| column.alias_with(escape_embedded_quotes))
                .collect(),
            None => vec!["*".to_string()],
        }
    }
}

/// One projected column of a view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Raw source reference, usually `relation.column`
    pub name: String,
    /// Overrides the derived alias when set
    #[serde(default)]
    pub alias: Option<String>,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// The explicit alias verbatim, otherwise the flattened name rendered as an identifier
    pub fn alias(&self) -> String {
        self.alias_with(true)
    }

    /// Like [`alias`](Self::alias), choosing whether embedded quotes in a derived
    /// alias are doubled
    pub fn alias_with(&self, escape_embedded_quotes: bool) -> String {
        match &self.alias {
            Some(alias) => alias.clone(),
            None => SqlIdentifier::parse(&identifier::normalize_column_name(&self.name))
                .to_sql(escape_embedded_quotes),
        }
    }

    /// Relation prefix of a dotted reference (`parents.id` -> `parents`)
    pub fn relation(&self) -> Option<&str> {
        self.name
            .split_once('.')
            .map(|(relation, _)| relation)
            .filter(|relation| !relation.is_empty())
    }
}

/// An ORDER BY entry applied to the outer query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    #[serde(default)]
    pub order: SortOrder,
}

/// A base relation a view reads from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationRef {
    pub name: String,
}

impl RelationRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl From<&str> for RelationRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A join between two declared relations.
///
/// `predicate` is copied into the generated SQL exactly as given. It is never
/// sanitized, so it must come from trusted configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinEdge {
    pub left: RelationRef,
    pub right: RelationRef,
    pub predicate: String,
    #[serde(default)]
    pub join_type: JoinType,
}

impl JoinEdge {
    pub fn new(
        left: impl Into<String>,
        right: impl Into<String>,
        predicate: impl Into<String>,
    ) -> Self {
        Self {
            left: RelationRef::new(left),
            right: RelationRef::new(right),
            predicate: predicate.into(),
            join_type: JoinType::Inner,
        }
    }

    /// Build an equality join from two dotted column references.
    ///
    /// ```
    /// use view_query::model::JoinEdge;
    ///
    /// let edge = JoinEdge::on_columns("parents.id", "children.id");
    /// assert_eq!(edge.left.as_str(), "parents");
    /// assert_eq!(edge.right.as_str(), "children");
    /// assert_eq!(edge.predicate, "parents.id = children.id");
    /// ```
    pub fn on_columns(from: &str, to: &str) -> Self {
        let relation_of = |column: &str| {
            column
                .split_once('.')
                .map_or(column, |(relation, _)| relation)
                .to_string()
        };
        Self::new(relation_of(from), relation_of(to), format!("{} = {}", from, to))
    }

    pub fn with_join_type(mut self, join_type: JoinType) -> Self {
        self.join_type = join_type;
        self
    }

    /// The endpoint opposite to `relation`, if `relation` is one of the two
    pub fn other_side(&self, relation: &RelationRef) -> Option<&RelationRef> {
        if &self.left == relation {
            Some(&self.right)
        } else if &self.right == relation {
            Some(&self.left)
        } else {
            None
        }
    }
}

/// Which relations a view depends on and how they are joined
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyDescription {
    pub base_relations: Vec<RelationRef>,
    #[serde(default)]
    pub join_edges: Vec<JoinEdge>,
}

impl DependencyDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn relation(mut self, name: impl Into<String>) -> Self {
        self.base_relations.push(RelationRef::new(name));
        self
    }

    pub fn join(mut self, edge: JoinEdge) -> Self {
        self.join_edges.push(edge);
        self
    }

    /// Infer base relations from dotted column prefixes (first seen first), then
    /// from join endpoints not already covered
    pub fn from_columns(columns: &[ColumnDef], join_edges: Vec<JoinEdge>) -> Self {
        let mut base_relations: Vec<RelationRef> = Vec::new();
        let column_relations = columns.iter().filter_map(ColumnDef::relation);
        let edge_relations = join_edges
            .iter()
            .flat_map(|edge| [edge.left.as_str(), edge.right.as_str()]);

        for name in column_relations.chain(edge_relations) {
            if !base_relations.iter().any(|r| r.as_str() == name) {
                base_relations.push(RelationRef::new(name));
            }
        }

        Self {
            base_relations,
            join_edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent_children() -> ViewSchema {
        ViewSchema::new("parent_children")
            .column("parents.id")
            .column("parents.name")
            .column("children.name")
    }

    #[test]
    fn test_column_aliases_are_flattened() {
        assert_eq!(
            parent_children().column_aliases(),
            vec!["parents_id", "parents_name", "children_name"]
        );
    }

    #[test]
    fn test_column_aliases_without_columns() {
        let mut schema = parent_children();
        schema.columns = None;
        assert_eq!(schema.column_aliases(), vec!["*"]);

        schema.columns = Some(Vec::new());
        assert_eq!(schema.column_aliases(), vec!["*"]);
    }

    #[test]
    fn test_explicit_alias_wins() {
        let column = ColumnDef::new("column UNION SELECT 1").with_alias("parents_id");
        assert_eq!(column.alias(), "parents_id");
    }

    #[test]
    fn test_derived_alias_is_sanitized() {
        assert_eq!(ColumnDef::new("column --").alias(), "column");
        assert_eq!(
            ColumnDef::new("column; DROP TABLE users;").alias(),
            "\"column; DROP TABLE users;\""
        );
    }

    #[test]
    fn test_derived_alias_quote_escaping() {
        let column = ColumnDef::new("a\"b");
        assert_eq!(column.alias(), "\"a\"\"b\"");
        assert_eq!(column.alias_with(false), "\"a\"b\"");

        let schema = ViewSchema::new("v").column("a\"b").column_as("x.y", "xy");
        assert_eq!(schema.column_aliases_with(false), vec!["\"a\"b\"", "xy"]);
    }

    #[test]
    fn test_column_relation_prefix() {
        assert_eq!(ColumnDef::new("parents.id").relation(), Some("parents"));
        assert_eq!(ColumnDef::new("id").relation(), None);
        assert_eq!(ColumnDef::new(".id").relation(), None);
    }

    #[test]
    fn test_join_edge_other_side() {
        let edge = JoinEdge::on_columns("parents.id", "children.parent_id");
        let parents = RelationRef::new("parents");
        let children = RelationRef::new("children");

        assert_eq!(edge.other_side(&parents), Some(&children));
        assert_eq!(edge.other_side(&children), Some(&parents));
        assert_eq!(edge.other_side(&RelationRef::new("pets")), None);
    }

    #[test]
    fn test_dependencies_from_columns() {
        let schema = parent_children();
        let deps = DependencyDescription::from_columns(
            schema.declared_columns().unwrap_or_default(),
            vec![
                JoinEdge::on_columns("parents.id", "children.id"),
                JoinEdge::on_columns("children.id", "toys.child_id"),
            ],
        );

        let names: Vec<&str> = deps.base_relations.iter().map(RelationRef::as_str).collect();
        assert_eq!(names, vec!["parents", "children", "toys"]);
        assert_eq!(deps.join_edges.len(), 2);
    }

    #[test]
    fn test_schema_deserializes_with_defaults() {
        let schema: ViewSchema = serde_json::from_str(
            r#"{"name": "parent_children", "columns": [{"name": "parents.id"}]}"#,
        )
        .unwrap();

        assert_eq!(schema.column_aliases(), vec!["parents_id"]);
        assert!(schema.order_by.is_empty());
        assert_eq!(schema.limit, None);
    }

    #[test]
    fn test_dependencies_deserialize() {
        let deps: DependencyDescription = serde_json::from_str(
            r#"{
                "base_relations": ["parents", "children"],
                "join_edges": [
                    {"left": "parents", "right": "children", "predicate": "parents.id = children.id"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(deps.base_relations[1], RelationRef::new("children"));
        assert_eq!(deps.join_edges[0].join_type, JoinType::Inner);
    }
}
