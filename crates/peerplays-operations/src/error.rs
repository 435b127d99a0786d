use peerplays_types::TypesError;

use crate::kind::OperationKind;

/// Errors raised while constructing, coercing or decoding operations.
#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    /// A field failed validation; names the operation and field.
    #[error("{operation}.{field}: {source}")]
    Field {
        operation: &'static str,
        field: &'static str,
        source: TypesError,
    },

    /// The kind is registered but this SDK cannot construct it.
    #[error("operation {0} is not supported")]
    Unsupported(OperationKind),

    #[error("unknown operation {0}")]
    UnknownOperation(String),

    /// The JSON value is not `[id, {fields}]` or a field mapping.
    #[error("malformed operation: {0}")]
    Malformed(String),

    /// An underlying codec error (forwarded from `peerplays-types`).
    #[error("codec error: {0}")]
    Types(#[from] TypesError),
}

impl OperationError {
    /// The missing or invalid field name, when the error concerns one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            OperationError::Field { field, .. } => Some(field),
            _ => None,
        }
    }
}
