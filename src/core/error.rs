use thiserror::Error;

/// Per-file extraction failures. Recorded for the file and skipped; sibling
/// files in the batch keep processing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractError {
    /// Input is not well-formed XML.
    #[error("malformed document: {0}")]
    Malformed(String),

    /// Well-formed XML but missing the mandatory invoice or event root.
    #[error("unrecognized structure: {0}")]
    UnrecognizedStructure(String),

    /// Cancellation event with no resolvable target access key.
    #[error("cancellation event carries no chNFe reference")]
    MissingReference,
}

/// Batch-level failures surfaced by [`crate::reconcile::import_batch`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportError {
    /// Every file in a non-empty batch failed extraction; nothing was merged.
    #[error("no valid fiscal document among {attempted} file(s)")]
    NoValidDocuments {
        /// Number of files attempted.
        attempted: usize,
    },
}
