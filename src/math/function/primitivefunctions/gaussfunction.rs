use std::f64::consts::{
    PI,
    SQRT_2
};
use std::fmt;
use std::marker::PhantomData;

use crate::math::function::function::{
    Function,
    PartitionCallback,
    ValueRange
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

/// Normal probability density with the given mean and standard deviation.
///
/// Not decomposed into closed-form pieces: partitioning yields the function
/// itself, and every derived query is answered directly. The integral uses
/// the error function.
#[derive(Clone, Copy)]
pub struct GaussFunction<R: Value, X: Value> {
    mean: f64,
    stddev: f64,
    value_type: PhantomData<(R, X)>
}

impl<R: Value, X: Value> GaussFunction<R, X> {
    pub fn new(mean: X, stddev: X) -> Result<GaussFunction<R, X>, MathError> {
        let stddev = stddev.to_f64();
        if !(stddev > 0.0) {
            return Err(MathError::InvalidArgument(format!("gauss standard deviation must be positive, got {}", stddev)));
        }
        Ok(GaussFunction { mean: mean.to_f64(), stddev, value_type: PhantomData })
    }

    fn density(&self, x: f64) -> f64 {
        let a = (x - self.mean) / self.stddev;
        (-0.5 * a * a).exp() / (self.stddev * (2.0 * PI).sqrt())
    }

    fn cumulative(&self, x: f64) -> f64 {
        0.5 * (1.0 + libm::erf((x - self.mean) / (self.stddev * SQRT_2)))
    }
}

impl<R: Value, X: Value> Function<R, (X,)> for GaussFunction<R, X> {
    fn range(&self) -> ValueRange<R> {
        ValueRange::new(R::zero(), R::from_f64(self.density(self.mean)))
    }

    fn value(&self, p: &Point<(X,)>) -> R {
        R::from_f64(self.density(p.get(0)))
    }

    fn partition(&self, i: &Interval<(X,)>, callback: &mut PartitionCallback<'_, R, (X,)>) -> Result<(), MathError> {
        callback(i, &Primitive::Sampled(self))
    }

    fn is_finite(&self, _i: &Interval<(X,)>) -> Result<bool, MathError> {
        Ok(true)
    }

    fn is_non_zero(&self, _i: &Interval<(X,)>) -> Result<bool, MathError> {
        Ok(true)
    }

    fn min(&self, i: &Interval<(X,)>) -> Result<R, MathError> {
        let (lower, upper) = i.extent(0);
        Ok(R::from_f64(min_nan(self.density(lower), self.density(upper))))
    }

    fn max(&self, i: &Interval<(X,)>) -> Result<R, MathError> {
        let (lower, upper) = i.extent(0);
        let ends = max_nan(self.density(lower), self.density(upper));
        if lower <= self.mean && self.mean <= upper {
            Ok(R::from_f64(max_nan(ends, self.density(self.mean))))
        } else {
            Ok(R::from_f64(ends))
        }
    }

    fn mean(&self, i: &Interval<(X,)>) -> Result<R, MathError> {
        let (lower, upper) = i.extent(0);
        if i.is_fixed(0) || lower == upper {
            return Ok(R::from_f64(self.density(lower)));
        }
        Ok(R::from_f64((self.cumulative(upper) - self.cumulative(lower)) / (upper - lower)))
    }

    fn integral(&self, i: &Interval<(X,)>) -> Result<R, MathError> {
        let (lower, upper) = i.extent(0);
        if i.is_fixed(0) {
            return Ok(R::from_f64(self.density(lower)));
        }
        Ok(R::from_f64(self.cumulative(upper) - self.cumulative(lower)))
    }

    fn print_structure(&self, out: &mut dyn fmt::Write, _level: usize) -> fmt::Result {
        write!(out, "(Gauss, mean {}, stddev {})", X::from_f64(self.mean), X::from_f64(self.stddev))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type G = GaussFunction<f64, f64>;

    fn closed(lower: f64, upper: f64) -> Interval<(f64,)> {
        Interval::closed(Point::new((lower,)), Point::new((upper,)))
    }

    #[test]
    fn integrates_to_one() {
        let f = G::new(1.0, 2.0).unwrap();
        assert!((f.integral(&Interval::unbounded()).unwrap() - 1.0).abs() < 1e-12);
        assert!((f.integral(&closed(1.0, f64::INFINITY)).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn peak_is_found_inside_the_interval() {
        let f = G::new(0.0, 1.0).unwrap();
        let peak = 1.0 / (2.0 * PI).sqrt();
        assert!((f.max(&closed(-1.0, 1.0)).unwrap() - peak).abs() < 1e-15);
        assert!(f.max(&closed(1.0, 2.0)).unwrap() < peak);
        assert_eq!(f.min(&closed(-1.0, 1.0)).unwrap(), f.value(&Point::new((1.0,))));
    }

    #[test]
    fn rejects_non_positive_deviation() {
        assert!(G::new(0.0, 0.0).is_err());
    }
}
