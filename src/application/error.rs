use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Invalid {field}: line breaks are not allowed ({value:?})")]
    LineBreak { field: &'static str, value: String },

    #[error("Malformed ledger data: {0}")]
    Codec(#[from] csv::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl LedgerError {
    /// True for failures of the file system rather than of the file's content.
    pub fn is_io(&self) -> bool {
        match self {
            LedgerError::LineBreak { .. } => false,
            LedgerError::Storage(_) => true,
            LedgerError::Codec(err) => err.is_io_error(),
        }
    }
}
