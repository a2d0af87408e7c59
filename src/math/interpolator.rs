use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize
};
use thiserror::Error;

use crate::units::value::{
    Value,
    max_nan,
    min_nan
};

// ─────────────────────────────────────────────
// Strategies on raw numbers
// ─────────────────────────────────────────────
//
// Every strategy returns the boundary sample exactly at either boundary and
// only differs in between.

fn either(x1: f64, y1: f64, _x2: f64, y2: f64, _x: f64) -> f64 {
    assert!(y1 == y2 || (y1.is_nan() && y2.is_nan()), "either interpolation between different values {} and {} at {}", y1, y2, x1);
    y1
}

fn left(_x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x == x2 { y2 } else { y1 }
}

fn right(x1: f64, y1: f64, _x2: f64, y2: f64, x: f64) -> f64 {
    if x == x1 { y1 } else { y2 }
}

fn center(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x == x1 {
        y1
    } else if x == x2 {
        y2
    } else {
        (y1 + y2) / 2.0
    }
}

fn closer(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x == x1 || x - x1 < x2 - x { y1 } else { y2 }
}

fn smaller(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x == x1 {
        y1
    } else if x == x2 {
        y2
    } else {
        min_nan(y1, y2)
    }
}

fn greater(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x == x1 {
        y1
    } else if x == x2 {
        y2
    } else {
        max_nan(y1, y2)
    }
}

fn linear(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x1 == x2 {
        assert!(y1 == y2, "linear interpolation over a degenerate segment at {} with values {} and {}", x1, y1, y2);
        y1
    } else if x == x1 {
        y1
    } else if x == x2 {
        y2
    } else {
        let alpha = (x - x1) / (x2 - x1);
        y1 * (1.0 - alpha) + y2 * alpha
    }
}

// ─────────────────────────────────────────────
// Interpolator
// ─────────────────────────────────────────────

#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolatorType {
    Either,
    Left,
    Right,
    Center,
    Closer,
    Smaller,
    Greater,
    Linear
}

impl InterpolatorType {
    pub fn name(&self) -> &'static str {
        match self {
            InterpolatorType::Either => "either",
            InterpolatorType::Left => "left",
            InterpolatorType::Right => "right",
            InterpolatorType::Center => "center",
            InterpolatorType::Closer => "closer",
            InterpolatorType::Smaller => "smaller",
            InterpolatorType::Greater => "greater",
            InterpolatorType::Linear => "linear"
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseInterpolatorError {
    #[error("unknown interpolator '{0}'")]
    UnknownName(String)
}

/// Fills in values between two samples `(x1, y1)` and `(x2, y2)`.
///
/// A value object holding the selected strategy; copy it wherever it is needed.
#[derive(Clone, Copy)]
pub struct Interpolator {
    interpolator_type: InterpolatorType,
    interpolate: fn(f64, f64, f64, f64, f64) -> f64
}

impl Interpolator {
    pub fn new(interpolator_type: InterpolatorType) -> Interpolator {
        let interpolate = match interpolator_type {
            InterpolatorType::Either => either,
            InterpolatorType::Left => left,
            InterpolatorType::Right => right,
            InterpolatorType::Center => center,
            InterpolatorType::Closer => closer,
            InterpolatorType::Smaller => smaller,
            InterpolatorType::Greater => greater,
            InterpolatorType::Linear => linear
        };
        Interpolator { interpolator_type, interpolate }
    }

    pub fn parse(name: &str) -> Result<Interpolator, ParseInterpolatorError> {
        let interpolator_type = match name.trim() {
            "either" => InterpolatorType::Either,
            "left" => InterpolatorType::Left,
            "right" => InterpolatorType::Right,
            "center" => InterpolatorType::Center,
            "closer" => InterpolatorType::Closer,
            "smaller" => InterpolatorType::Smaller,
            "greater" => InterpolatorType::Greater,
            "linear" => InterpolatorType::Linear,
            _ => return Err(ParseInterpolatorError::UnknownName(name.to_owned()))
        };
        Ok(Interpolator::new(interpolator_type))
    }

    pub fn interpolator_type(&self) -> InterpolatorType {
        self.interpolator_type
    }

    /// Whether the strategy is constant strictly between the two samples.
    pub fn is_constant(&self) -> bool {
        self.interpolator_type != InterpolatorType::Linear
    }

    pub fn value<R: Value>(&self, x1: f64, y1: R, x2: f64, y2: R, x: f64) -> R {
        R::from_f64((self.interpolate)(x1, y1.to_f64(), x2, y2.to_f64(), x))
    }

    /// The value a constant strategy takes strictly between the samples.
    pub fn inner_value<R: Value>(&self, x1: f64, y1: R, x2: f64, y2: R) -> R {
        self.value(x1, y1, x2, y2, (x1 + x2) / 2.0)
    }

    pub fn min<R: Value>(&self, y1: R, y2: R) -> R {
        match self.interpolator_type {
            InterpolatorType::Either => R::from_f64(either(0.0, y1.to_f64(), 0.0, y2.to_f64(), 0.0)),
            _ => min_nan(y1, y2)
        }
    }

    pub fn max<R: Value>(&self, y1: R, y2: R) -> R {
        match self.interpolator_type {
            InterpolatorType::Either => R::from_f64(either(0.0, y1.to_f64(), 0.0, y2.to_f64(), 0.0)),
            _ => max_nan(y1, y2)
        }
    }

    pub fn mean<R: Value>(&self, y1: R, y2: R) -> R {
        match self.interpolator_type {
            InterpolatorType::Either => R::from_f64(either(0.0, y1.to_f64(), 0.0, y2.to_f64(), 0.0)),
            InterpolatorType::Left => y1,
            InterpolatorType::Right => y2,
            InterpolatorType::Smaller => min_nan(y1, y2),
            InterpolatorType::Greater => max_nan(y1, y2),
            InterpolatorType::Center | InterpolatorType::Closer | InterpolatorType::Linear => (y1 + y2) * 0.5
        }
    }
}

impl FromStr for Interpolator {
    type Err = ParseInterpolatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interpolator::parse(s)
    }
}

impl fmt::Debug for Interpolator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Interpolator({})", self.interpolator_type.name())
    }
}

impl fmt::Display for Interpolator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.interpolator_type.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_configuration_name() {
        for name in ["either", "left", "right", "center", "closer", "smaller", "greater", "linear"] {
            let interpolator = Interpolator::parse(name).unwrap();
            assert_eq!(interpolator.interpolator_type().name(), name);
        }
        assert_eq!(
            Interpolator::parse("cubic").unwrap_err(),
            ParseInterpolatorError::UnknownName("cubic".to_owned())
        );
    }

    #[test]
    fn interior_values() {
        let value = |name: &str| Interpolator::parse(name).unwrap().value(0.0, 2.0, 4.0, 6.0, 1.0);
        assert_eq!(value("left"), 2.0);
        assert_eq!(value("right"), 6.0);
        assert_eq!(value("center"), 4.0);
        assert_eq!(value("closer"), 2.0);
        assert_eq!(value("smaller"), 2.0);
        assert_eq!(value("greater"), 6.0);
        assert_eq!(value("linear"), 3.0);
    }

    #[test]
    fn means_over_the_segment() {
        let mean = |name: &str| Interpolator::parse(name).unwrap().mean(2.0, 6.0);
        assert_eq!(mean("left"), 2.0);
        assert_eq!(mean("right"), 6.0);
        assert_eq!(mean("linear"), 4.0);
        assert_eq!(mean("greater"), 6.0);
    }

    #[test]
    #[should_panic]
    fn either_rejects_different_values() {
        Interpolator::parse("either").unwrap().value(0.0, 1.0, 1.0, 2.0, 0.5);
    }

    #[test]
    fn constant_strategies_report_constant() {
        assert!(Interpolator::parse("left").unwrap().is_constant());
        assert!(!Interpolator::parse("linear").unwrap().is_constant());
    }
}
