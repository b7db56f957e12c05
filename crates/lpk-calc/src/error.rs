use lpk_core::CoreError;
use thiserror::Error;

pub type CalcResult<T> = Result<T, CalcError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Cannot compute duration: {0}")]
    Duration(#[from] CoreError),

    #[error("Roster row '{office}' mirrors the report header and cannot be edited directly")]
    MirroredRosterRow { office: String },

    #[error("Index out of bounds: {what} (index={index}, len={len})")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },
}
