use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BufferError {
    #[error("capacity must be greater than zero")]
    ZeroCapacity,

    #[error("buffer closed")]
    Closed,
}
