//! Error types for the mechanics engine.

/// Errors that can occur during mechanics operations.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A roll trigger label could not be classified.
    #[error("invalid roll trigger: {0}")]
    InvalidTrigger(String),

    /// A dice formula could not be parsed or rewritten.
    #[error("malformed formula: {0}")]
    MalformedFormula(String),

    /// A formula reference does not name a known ability field.
    #[error("unresolved formula reference: @{0}")]
    UnresolvedReference(String),

    /// No item with the given id exists on the sheet.
    #[error("item '{0}' not found")]
    ItemNotFound(String),

    /// An item kind name was not recognised.
    #[error("unknown item kind: {0}")]
    InvalidItemKind(String),

    /// A character sheet document could not be read.
    #[error("invalid character sheet: {0}")]
    InvalidSheet(#[from] serde_json::Error),
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
