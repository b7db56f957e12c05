use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Missing timestamp field: {what}")]
    MissingTimestamp { what: &'static str },

    #[error("Invalid timestamp for {what}: {value}")]
    InvalidTimestamp { what: &'static str, value: String },

    #[error("Arrival ({arrival}) is before departure ({departure})")]
    ArrivalBeforeDeparture { departure: String, arrival: String },
}
