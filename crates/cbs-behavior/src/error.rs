use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("unknown behavior name: {0:?}")]
    UnknownBehavior(String),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
