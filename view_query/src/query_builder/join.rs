//! Join resolution
//!
//! Turns a [`DependencyDescription`] into a [`RelationPlan`]: a root relation
//! followed by the join steps that attach every other relation to it. The walk
//! always starts at the first declared relation and, at each step, takes the first
//! edge in declaration order that reaches a relation not yet joined. Graphs that
//! leave a relation unreachable or contain a redundant (cycle-closing) edge are
//! rejected.

use crate::errors::ConfigurationError;
use crate::model::{DependencyDescription, JoinEdge, RelationRef};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Represents the type of SQL JOIN operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinType {
    /// Plain JOIN - records with matching values in both relations
    #[default]
    Inner,
    /// LEFT JOIN - all records from the left side
    Left,
    /// RIGHT JOIN - all records from the right side
    Right,
    /// FULL OUTER JOIN - records matching on either side
    Full,
}

impl JoinType {
    /// Convert JoinType to SQL string
    pub fn to_sql(&self) -> &'static str {
        match self {
            JoinType::Inner => "JOIN",
            JoinType::Left => "LEFT JOIN",
            JoinType::Right => "RIGHT JOIN",
            JoinType::Full => "FULL OUTER JOIN",
        }
    }
}

/// One relation attached to everything joined before it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinStep {
    pub relation: RelationRef,
    pub join_type: JoinType,
    /// Copied verbatim from the edge
    pub predicate: String,
}

/// Linearized join order for a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationPlan {
    pub root: RelationRef,
    pub steps: Vec<JoinStep>,
}

impl RelationPlan {
    /// Relations in join order, root first
    pub fn relations(&self) -> impl Iterator<Item = &RelationRef> {
        std::iter::once(&self.root).chain(self.steps.iter().map(|step| &step.relation))
    }
}

/// Resolve the join order for a dependency description
pub fn resolve(deps: &DependencyDescription) -> Result<RelationPlan, ConfigurationError> {
    let root = deps
        .base_relations
        .first()
        .ok_or(ConfigurationError::NoBaseRelations)?;

    let mut declared: HashSet<&RelationRef> = HashSet::new();
    for (index, relation) in deps.base_relations.iter().enumerate() {
        if relation.name.trim().is_empty() {
            return Err(ConfigurationError::EmptyRelationName { index });
        }
        if !declared.insert(relation) {
            return Err(ConfigurationError::DuplicateRelation(relation.name.clone()));
        }
    }

    for edge in &deps.join_edges {
        for endpoint in [&edge.left, &edge.right] {
            if !declared.contains(endpoint) {
                return Err(ConfigurationError::UnknownRelation {
                    relation: endpoint.name.clone(),
                    predicate: edge.predicate.clone(),
                });
            }
        }
        if edge.left == edge.right {
            return Err(ConfigurationError::SelfJoin(edge.predicate.clone()));
        }
    }

    let mut joined: HashSet<&RelationRef> = HashSet::from([root]);
    let mut used = vec![false; deps.join_edges.len()];
    let mut steps = Vec::with_capacity(deps.base_relations.len() - 1);

    while joined.len() < deps.base_relations.len() {
        let next = deps
            .join_edges
            .iter()
            .enumerate()
            .filter(|(index, _)| !used[*index])
            .find_map(|(index, edge)| reachable_from(&joined, edge).map(|target| (index, edge, target)));

        let Some((index, edge, target)) = next else {
            let missing = deps
                .base_relations
                .iter()
                .find(|relation| !joined.contains(relation))
                .map(|relation| relation.name.clone())
                .unwrap_or_default();
            return Err(ConfigurationError::Disconnected(missing));
        };

        used[index] = true;
        joined.insert(target);
        steps.push(JoinStep {
            relation: target.clone(),
            join_type: edge.join_type,
            predicate: edge.predicate.clone(),
        });
    }

    // Every relation is joined; any edge left over connects two joined relations
    if let Some(index) = used.iter().position(|was_used| !was_used) {
        return Err(ConfigurationError::Cycle {
            predicate: deps.join_edges[index].predicate.clone(),
        });
    }

    Ok(RelationPlan {
        root: root.clone(),
        steps,
    })
}

/// The endpoint of `edge` that is not yet joined, when the other one is
fn reachable_from<'a>(joined: &HashSet<&RelationRef>, edge: &'a JoinEdge) -> Option<&'a RelationRef> {
    match (joined.contains(&edge.left), joined.contains(&edge.right)) {
        (true, false) => Some(&edge.right),
        (false, true) => Some(&edge.left),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(plan: &RelationPlan) -> Vec<&str> {
        plan.relations().map(RelationRef::as_str).collect()
    }

    #[test]
    fn test_join_type_to_sql() {
        assert_eq!(JoinType::Inner.to_sql(), "JOIN");
        assert_eq!(JoinType::Left.to_sql(), "LEFT JOIN");
        assert_eq!(JoinType::Right.to_sql(), "RIGHT JOIN");
        assert_eq!(JoinType::Full.to_sql(), "FULL OUTER JOIN");
    }

    #[test]
    fn test_resolve_two_relations() {
        let deps = DependencyDescription::new()
            .relation("parents")
            .relation("children")
            .join(JoinEdge::on_columns("parents.id", "children.id"));

        let plan = resolve(&deps).unwrap();

        assert_eq!(plan.root, RelationRef::new("parents"));
        assert_eq!(
            plan.steps,
            vec![JoinStep {
                relation: RelationRef::new("children"),
                join_type: JoinType::Inner,
                predicate: "parents.id = children.id".to_string(),
            }]
        );
    }

    #[test]
    fn test_resolve_single_relation() {
        let deps = DependencyDescription::new().relation("parents");
        let plan = resolve(&deps).unwrap();

        assert_eq!(names(&plan), vec!["parents"]);
        assert!(plan.steps.is_empty());
    }

    #[test]
    fn test_resolve_chain_in_declaration_order() {
        let deps = DependencyDescription::new()
            .relation("a")
            .relation("b")
            .relation("c")
            .join(JoinEdge::on_columns("a.id", "b.a_id"))
            .join(JoinEdge::on_columns("b.id", "c.b_id"));

        assert_eq!(names(&resolve(&deps).unwrap()), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_resolve_edges_declared_out_of_order() {
        // The c-b edge cannot be used until b is joined
        let deps = DependencyDescription::new()
            .relation("a")
            .relation("b")
            .relation("c")
            .join(JoinEdge::on_columns("c.b_id", "b.id"))
            .join(JoinEdge::on_columns("a.id", "b.a_id"));

        let plan = resolve(&deps).unwrap();
        assert_eq!(names(&plan), vec!["a", "b", "c"]);
        assert_eq!(plan.steps[1].predicate, "c.b_id = b.id");
    }

    #[test]
    fn test_resolve_star_shape() {
        let deps = DependencyDescription::new()
            .relation("orders")
            .relation("customers")
            .relation("products")
            .join(JoinEdge::on_columns("orders.customer_id", "customers.id"))
            .join(
                JoinEdge::on_columns("orders.product_id", "products.id")
                    .with_join_type(JoinType::Left),
            );

        let plan = resolve(&deps).unwrap();
        assert_eq!(names(&plan), vec!["orders", "customers", "products"]);
        assert_eq!(plan.steps[1].join_type, JoinType::Left);
    }

    #[test]
    fn test_resolve_errors() {
        let test_cases = [
            (DependencyDescription::new(), ConfigurationError::NoBaseRelations),
            (
                DependencyDescription::new().relation("a").relation(" "),
                ConfigurationError::EmptyRelationName { index: 1 },
            ),
            (
                DependencyDescription::new().relation("a").relation("a"),
                ConfigurationError::DuplicateRelation("a".to_string()),
            ),
            (
                DependencyDescription::new().relation("a").relation("b"),
                ConfigurationError::Disconnected("b".to_string()),
            ),
            (
                DependencyDescription::new()
                    .relation("a")
                    .relation("b")
                    .join(JoinEdge::on_columns("a.id", "x.id")),
                ConfigurationError::UnknownRelation {
                    relation: "x".to_string(),
                    predicate: "a.id = x.id".to_string(),
                },
            ),
            (
                DependencyDescription::new()
                    .relation("a")
                    .join(JoinEdge::on_columns("a.id", "a.parent_id")),
                ConfigurationError::SelfJoin("a.id = a.parent_id".to_string()),
            ),
            (
                DependencyDescription::new()
                    .relation("a")
                    .relation("b")
                    .relation("c")
                    .join(JoinEdge::on_columns("b.id", "c.b_id")),
                ConfigurationError::Disconnected("b".to_string()),
            ),
            (
                DependencyDescription::new()
                    .relation("a")
                    .relation("b")
                    .relation("c")
                    .join(JoinEdge::on_columns("a.id", "b.a_id"))
                    .join(JoinEdge::on_columns("b.id", "c.b_id"))
                    .join(JoinEdge::on_columns("c.id", "a.c_id")),
                ConfigurationError::Cycle {
                    predicate: "c.id = a.c_id".to_string(),
                },
            ),
            (
                DependencyDescription::new()
                    .relation("a")
                    .relation("b")
                    .join(JoinEdge::on_columns("a.id", "b.id"))
                    .join(JoinEdge::on_columns("b.code", "a.code")),
                ConfigurationError::Cycle {
                    predicate: "b.code = a.code".to_string(),
                },
            ),
        ];

        for (deps, expected_error) in test_cases {
            assert_eq!(resolve(&deps), Err(expected_error), "deps: {:?}", deps);
        }
    }
}
