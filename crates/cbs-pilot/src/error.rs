use cbs_context::ContextError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PilotError {
    #[error("pilot configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("steering context error: {0}")]
    Context(#[from] ContextError),
}

pub type PilotResult<T> = Result<T, PilotError>;
