use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("a mapping needs at least one positive or negative metabelief")]
    EmptyMapping,

    #[error("missing required field: {0}")]
    MissingField(String),
}
