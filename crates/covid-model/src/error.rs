use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown condition: {0}")]
    UnknownCondition(String),
    #[error("unknown intubation status: {0}")]
    UnknownIntubationStatus(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
