use thiserror::Error;

/// Errors produced while building or running a simulation.
///
/// Follows the four-class taxonomy: validation errors reject a spec before a
/// run starts, invariant violations abort an in-progress run with a
/// diagnostic, domain edges are handled by saturation (not raised), and `Io`
/// covers the rare filesystem failure when loading a spec or writing output.
#[derive(Debug, Error)]
pub enum CaError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("invariant violated at iteration {iteration}, cell ({row},{col}): {detail}")]
    InvariantViolation {
        iteration: usize,
        row: usize,
        col: usize,
        detail: String,
    },

    #[error("domain edge: {0}")]
    DomainEdge(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CaError>;
