/// Errors that callers may need to tell apart.
/// These are returned boxed, so use `downcast_ref::<ConversionError>()` on the error to inspect them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConversionError {
    /// An aligned row could not be interpreted; the whole extraction is aborted
    MalformedRow {
        /// Identifier of the offending row
        row_id: String,
        /// What was wrong with it
        reason: String
    },
    /// Nothing survived extraction, so there is no matrix to write
    EmptyMatrix {
        taxa: usize,
        characters: usize
    }
}

impl std::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionError::MalformedRow { row_id, reason } => write!(f, "Malformed row {row_id}: {reason}"),
            ConversionError::EmptyMatrix { taxa, characters } => write!(f, "Empty matrix: {taxa} taxa and {characters} characters")
        }
    }
}

impl std::error::Error for ConversionError {}
