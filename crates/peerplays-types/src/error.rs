use peerplays_primitives::PrimitivesError;

/// Errors raised while encoding, decoding or coercing chain values.
#[derive(Debug, thiserror::Error)]
pub enum TypesError {
    /// An object id string or triple is malformed.
    #[error("invalid object id: {0}")]
    InvalidObjectId(String),

    /// An object id carries the wrong space/type for the field it fills.
    #[error("wrong object type: expected {expected}, got {got}")]
    WrongObjectType { expected: String, got: String },

    /// A JSON value has the wrong shape for the target type.
    #[error("invalid field value: {0}")]
    InvalidField(String),

    #[error("missing required field {0}")]
    MissingRequiredField(String),

    /// A nested field failed to coerce.
    #[error("{field}: {source}")]
    Field {
        field: String,
        source: Box<TypesError>,
    },

    /// An enumeration value has no matching variant.
    #[error("unknown {name} value {value}")]
    UnknownEnumValue { name: &'static str, value: String },

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("weight threshold must be greater than zero")]
    ZeroThreshold,

    /// The authority can never be satisfied by its own entries.
    #[error("threshold {threshold} exceeds total authority weight {total}")]
    ThresholdTooRestrictive { threshold: u32, total: u64 },

    #[error("memo checksum mismatch")]
    MemoChecksumMismatch,

    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),

    /// An underlying primitives error (forwarded from `peerplays-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] PrimitivesError),
}
