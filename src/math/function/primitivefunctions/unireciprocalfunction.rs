use std::fmt;
use std::marker::PhantomData;

use crate::math::domain::Domain;
use crate::math::function::function::{
    Function,
    PartitionCallback,
    integral_of
};
use crate::math::function::matherror::MathError;
use crate::math::function::primitive::Primitive;
use crate::math::interval::Interval;
use crate::math::point::Point;
use crate::units::value::{
    Value,
    max_nan,
    min_nan
};

/// `(a * x + b) / (c * x + d)` along one dimension, constant along the others.
#[derive(Clone, Copy)]
pub struct UnireciprocalFunction<R: Value, D: Domain> {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    dimension: usize,
    value_type: PhantomData<(R, D)>
}

impl<R: Value, D: Domain> UnireciprocalFunction<R, D> {
    pub fn new(a: f64, b: f64, c: f64, d: f64, dimension: usize) -> UnireciprocalFunction<R, D> {
        assert!(dimension < D::DIMS, "dimension {} out of range", dimension);
        UnireciprocalFunction { a, b, c, d, dimension, value_type: PhantomData }
    }

    pub fn coefficients(&self) -> (f64, f64, f64, f64) {
        (self.a, self.b, self.c, self.d)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Root of the denominator, if the denominator depends on the coordinate.
    pub fn pole(&self) -> Option<f64> {
        if self.c == 0.0 { None } else { Some(-self.d / self.c) }
    }

    pub fn raw_value_at(&self, x: f64) -> f64 {
        (self.a * x + self.b) / (self.c * x + self.d)
    }

    pub fn value_at(&self, x: f64) -> R {
        R::from_f64(self.raw_value_at(x))
    }

    /// Numerator scaled by `k`.
    pub fn scaled(&self, k: f64) -> UnireciprocalFunction<R, D> {
        UnireciprocalFunction::new(self.a * k, self.b * k, self.c, self.d, self.dimension)
    }

    /// Adds the constant `k` to the whole fraction.
    pub fn offset(&self, k: f64) -> UnireciprocalFunction<R, D> {
        UnireciprocalFunction::new(self.a + k * self.c, self.b + k * self.d, self.c, self.d, self.dimension)
    }

    /// The same fraction evaluated at `x - shift`.
    pub fn shifted(&self, shift: f64) -> UnireciprocalFunction<R, D> {
        UnireciprocalFunction::new(self.a, self.b - self.a * shift, self.c, self.d - self.c * shift, self.dimension)
    }

    pub fn with_dimension(&self, dimension: usize) -> UnireciprocalFunction<R, D> {
        UnireciprocalFunction::new(self.a, self.b, self.c, self.d, dimension)
    }

    pub fn cast<S: Value>(&self) -> UnireciprocalFunction<S, D> {
        UnireciprocalFunction::new(self.a, self.b, self.c, self.d, self.dimension)
    }

    fn antiderivative(&self, x: f64) -> f64 {
        if self.c == 0.0 {
            (self.a * x * x / 2.0 + self.b * x) / self.d
        } else {
            let c2 = self.c * self.c;
            (self.a * self.c * x + (self.b * self.c - self.a * self.d) * (self.c * x + self.d).abs().ln()) / c2
        }
    }

    /// True when the pole lies within the closed extent `[lower, upper]`.
    fn touches_pole(&self, lower: f64, upper: f64) -> bool {
        self.pole().is_some_and(|x| lower <= x && x <= upper)
    }

    fn end_values(&self, i: &Interval<D>) -> (R, R) {
        let (lower, upper) = i.extent(self.dimension);
        (self.value_at(lower), self.value_at(upper))
    }
}

impl<R: Value, D: Domain> Function<R, D> for UnireciprocalFunction<R, D> {
    fn value(&self, p: &Point<D>) -> R {
        self.value_at(p.get(self.dimension))
    }

    fn partition(&self, i: &Interval<D>, callback: &mut PartitionCallback<'_, R, D>) -> Result<(), MathError> {
        callback(i, &Primitive::Reciprocal(*self))
    }

    fn is_finite(&self, i: &Interval<D>) -> Result<bool, MathError> {
        let (lower, upper) = i.extent(self.dimension);
        let (r1, r2) = self.end_values(i);
        Ok(!self.touches_pole(lower, upper) && self.d.is_finite() && r1.is_finite() && r2.is_finite())
    }

    fn is_non_zero(&self, i: &Interval<D>) -> Result<bool, MathError> {
        if !self.is_finite(i)? {
            return Ok(false);
        }
        let (r1, r2) = self.end_values(i);
        let zero = R::zero();
        Ok((r1 > zero && r2 > zero) || (r1 < zero && r2 < zero))
    }

    fn min(&self, i: &Interval<D>) -> Result<R, MathError> {
        let (lower, upper) = i.extent(self.dimension);
        if lower < upper && self.touches_pole(lower, upper) {
            return Ok(R::from_f64(f64::NEG_INFINITY));
        }
        let (r1, r2) = self.end_values(i);
        Ok(min_nan(r1, r2))
    }

    fn max(&self, i: &Interval<D>) -> Result<R, MathError> {
        let (lower, upper) = i.extent(self.dimension);
        if lower < upper && self.touches_pole(lower, upper) {
            return Ok(R::from_f64(f64::INFINITY));
        }
        let (r1, r2) = self.end_values(i);
        Ok(max_nan(r1, r2))
    }

    /// Fails when the pole lies within the closed extent, where the integral
    /// diverges, and when the denominator vanishes identically.
    fn mean(&self, i: &Interval<D>) -> Result<R, MathError> {
        let (lower, upper) = i.extent(self.dimension);
        if self.c == 0.0 && self.d == 0.0 {
            return Err(MathError::Singularity { dimension: self.dimension, pole: lower, lower, upper });
        }
        if i.is_fixed(self.dimension) || lower == upper {
            return Ok(self.value_at(lower));
        }
        if let Some(pole) = self.pole() {
            if lower <= pole && pole <= upper {
                return Err(MathError::Singularity { dimension: self.dimension, pole, lower, upper });
            }
        }
        Ok(R::from_f64((self.antiderivative(upper) - self.antiderivative(lower)) / (upper - lower)))
    }

    fn integral(&self, i: &Interval<D>) -> Result<R, MathError> {
        Ok(integral_of(self.mean(i)?, i.volume()))
    }

    fn print_structure(&self, out: &mut dyn fmt::Write, _level: usize) -> fmt::Result {
        write!(out, "(Reciprocal dim {}: ({} x + {}) / ({} x + {}))", self.dimension, self.a, self.b, self.c, self.d)
    }
}
