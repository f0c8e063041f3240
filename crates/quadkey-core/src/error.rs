//! Error types for QuadKey
//!
//! All fallible operations return `Result<T, Error>`.
//! Every operation is pure, so an error is final: retrying the same
//! input yields the same error.

/// QuadKey error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// No kind letter can be assigned to the term
    #[error("Unclassifiable term: {0}")]
    UnclassifiableTerm(String),

    /// A persisted kind letter outside the known alphabet
    #[error("Unknown kind letter: {0:?}")]
    UnknownKindLetter(char),

    /// Facet lookup with an index outside the six known positions
    #[error("Invalid quad index: {0}")]
    InvalidFacetIndex(usize),

    /// Slot constructed for a derived (datatype/language) position
    #[error("Unknown quad position: {0}")]
    InvalidSlotPosition(String),
}

/// Result type alias for QuadKey operations
pub type Result<T> = std::result::Result<T, Error>;
