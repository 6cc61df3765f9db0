use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewQueryError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

/// Problems with the view schema or its dependency description, detected before
/// any SQL is produced
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("View name cannot be empty")]
    EmptyViewName,

    #[error("Column at position {index} has an empty name")]
    EmptyColumnName { index: usize },

    #[error("Alias '{alias}' must be a bare identifier (letters, digits and underscores, not starting with a digit)")]
    UnsafeAlias { alias: String },

    #[error("View has no base relations")]
    NoBaseRelations,

    #[error("Base relation at position {index} has an empty name")]
    EmptyRelationName { index: usize },

    #[error("Base relation '{0}' is declared more than once")]
    DuplicateRelation(String),

    #[error("Join '{predicate}' references undeclared relation '{relation}'")]
    UnknownRelation { relation: String, predicate: String },

    #[error("Join '{0}' joins a relation to itself")]
    SelfJoin(String),

    #[error("Relation '{0}' is not connected to the rest of the view by any join")]
    Disconnected(String),

    #[error("Join '{predicate}' closes a cycle in the join graph")]
    Cycle { predicate: String },
}
