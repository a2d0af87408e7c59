use std::fmt;

use thiserror::Error;
use tracing::warn;

/// Shape of a partition piece.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum FunctionKind {
    Constant,
    Unilinear,
    Bilinear,
    Reciprocal,
    Sampled
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FunctionKind::Constant => "constant",
            FunctionKind::Unilinear => "unilinear",
            FunctionKind::Bilinear => "bilinear",
            FunctionKind::Reciprocal => "reciprocal",
            FunctionKind::Sampled => "sampled"
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Error)]
pub enum MathError {
    #[error("{operation} of {first} and {second} pieces has no closed form")]
    UnsupportedCombination {
        operation: &'static str,
        first: FunctionKind,
        second: FunctionKind
    },

    #[error("{composite} cannot handle a {kind} piece")]
    UnsupportedShape {
        composite: &'static str,
        kind: FunctionKind
    },

    #[error("pole at {pole} in dimension {dimension} lies within [{lower}, {upper}]")]
    Singularity {
        dimension: usize,
        pole: f64,
        lower: f64,
        upper: f64
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Format(#[from] fmt::Error)
}

impl MathError {
    pub fn unsupported_combination(operation: &'static str, first: FunctionKind, second: FunctionKind) -> MathError {
        warn!(operation, %first, %second, "unsupported piece combination");
        MathError::UnsupportedCombination { operation, first, second }
    }

    pub fn unsupported_shape(composite: &'static str, kind: FunctionKind) -> MathError {
        warn!(composite, %kind, "unsupported piece shape");
        MathError::UnsupportedShape { composite, kind }
    }
}
