use crate::instrument::InstrumentError;

#[derive(Debug, thiserror::Error)]
pub enum EsisError {
    #[error("unsupported configuration with {num_folds} folds: {reason}")]
    UnsupportedConfiguration { num_folds: u32, reason: String },
    #[error("parameter shapes {lhs:?} and {rhs:?} cannot be broadcast together")]
    ShapeMismatch { lhs: Vec<usize>, rhs: Vec<usize> },
    #[error("{name} must not be negative")]
    NegativeLength { name: String },
    #[error("cannot build `::esis::Instrument`")]
    Instrument(#[from] InstrumentError),
}

impl EsisError {
    pub(crate) fn unsupported<S: Into<String>>(num_folds: u32, reason: S) -> Self {
        Self::UnsupportedConfiguration {
            num_folds,
            reason: reason.into(),
        }
    }
}
