use crate::rational::Rational;
use crate::system::{Stage, Unknown};

#[derive(Debug, thiserror::Error)]
pub enum SolveError {
    #[error("need at least {required} hailstones, got {got}")]
    InsufficientData { required: usize, got: usize },
    #[error("{stage} system is singular, no pivot for {unknown}")]
    SingularSystem { stage: Stage, unknown: Unknown },
    #[error("{stage} system has contradicting equations")]
    ContradictoryEquations { stage: Stage },
    #[error("planes disagree on {unknown}: {first} != {second}")]
    InconsistentSolution {
        unknown: Unknown,
        first: Rational,
        second: Rational,
    },
    #[error("{unknown} = {value} is not an integer")]
    NonIntegerSolution { unknown: Unknown, value: Rational },
}

impl SolveError {
    pub fn is_singular(&self) -> bool {
        matches!(self, SolveError::SingularSystem { .. })
    }
}
