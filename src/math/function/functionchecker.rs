use tracing::warn;

use crate::math::domain::Domain;
use crate::math::function::function::Function;
use crate::math::function::matherror::{
    FunctionKind,
    MathError
};
use crate::math::interval::Interval;
use crate::math::point::Point;
use crate::units::value::Value;

/// A point where a partition piece disagrees with the function it came from.
#[derive(Clone, Debug)]
pub struct Mismatch<R: Value, D: Domain> {
    pub point: Point<D>,
    pub kind: FunctionKind,
    pub expected: R,
    pub actual: R
}

/// Outcome of checking one partition.
#[derive(Clone, Debug)]
pub struct CheckReport<R: Value, D: Domain> {
    pub pieces: usize,
    pub mismatches: Vec<Mismatch<R, D>>,
    pub covered_volume: f64,
    pub expected_volume: f64,
    tolerance: f64
}

impl<R: Value, D: Domain> CheckReport<R, D> {
    /// Every sampled point agrees with the function.
    pub fn is_consistent(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// The piece volumes add up to the volume of the query. Unbounded queries
    /// only need an unbounded total.
    pub fn is_covering(&self) -> bool {
        if self.expected_volume.is_finite() {
            (self.covered_volume - self.expected_volume).abs() <= self.tolerance * self.expected_volume.max(1.0)
        } else {
            self.covered_volume == self.expected_volume
        }
    }

    pub fn is_ok(&self) -> bool {
        self.is_consistent() && self.is_covering()
    }
}

/// Checks a partition against the function it was taken from: at every corner
/// a piece contains, and at its center, the piece has to reproduce the
/// function; and the pieces have to cover the query.
pub struct FunctionChecker<'f, R: Value, D: Domain> {
    function: &'f dyn Function<R, D>,
    tolerance: f64
}

impl<'f, R: Value, D: Domain> FunctionChecker<'f, R, D> {
    pub fn new(function: &'f dyn Function<R, D>) -> FunctionChecker<'f, R, D> {
        FunctionChecker { function, tolerance: 1e-9 }
    }

    /// Relative tolerance, absolute for magnitudes below one.
    pub fn with_tolerance(mut self, tolerance: f64) -> FunctionChecker<'f, R, D> {
        self.tolerance = tolerance;
        self
    }

    fn agrees(&self, expected: f64, actual: f64) -> bool {
        if expected == actual || (expected.is_nan() && actual.is_nan()) {
            return true;
        }
        (expected - actual).abs() <= self.tolerance * expected.abs().max(actual.abs()).max(1.0)
    }

    pub fn check(&self, i: &Interval<D>) -> Result<CheckReport<R, D>, MathError> {
        let mut report = CheckReport {
            pieces: 0,
            mismatches: Vec::new(),
            covered_volume: 0.0,
            expected_volume: i.volume(),
            tolerance: self.tolerance
        };
        self.function.partition(i, &mut |i1, f1| {
            report.pieces += 1;
            report.covered_volume += i1.volume();
            let mut points = i1.corners();
            points.push(i1.center());
            for p in points.iter().filter(|p| i1.contains(p) && p.raw().iter().all(|x| x.is_finite())) {
                let expected = self.function.value(p);
                let actual = f1.value(p);
                if !self.agrees(expected.to_f64(), actual.to_f64()) {
                    warn!(point = %p, %expected, %actual, kind = %f1.kind(), "partition piece disagrees with the function");
                    report.mismatches.push(Mismatch { point: *p, kind: f1.kind(), expected, actual });
                }
            }
            Ok(())
        })?;
        if !report.is_covering() {
            warn!(covered = report.covered_volume, expected = report.expected_volume, "partition does not cover the query");
        }
        Ok(report)
    }
}
