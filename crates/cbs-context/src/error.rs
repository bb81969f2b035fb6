use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("slot resolution {0} is below the minimum of 4")]
    InvalidResolution(usize),
}

pub type ContextResult<T> = Result<T, ContextError>;
