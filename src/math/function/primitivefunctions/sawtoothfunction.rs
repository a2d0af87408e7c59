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

/// Teeth rising from zero towards `value` once per `period`, between `start`
/// and `end`; zero outside.
#[derive(Clone, Copy)]
pub struct SawtoothFunction<R: Value, X: Value> {
    start: f64,
    end: f64,
    period: f64,
    value: R,
    axis: PhantomData<X>
}

impl<R: Value, X: Value> SawtoothFunction<R, X> {
    pub fn new(start: X, end: X, period: X, value: R) -> Result<SawtoothFunction<R, X>, MathError> {
        let period = period.to_f64();
        if !(period > 0.0) || !(start <= end) {
            return Err(MathError::InvalidArgument(format!(
                "sawtooth needs start <= end and a positive period, got [{} … {}] every {}",
                start, end, period
            )));
        }
        Ok(SawtoothFunction { start: start.to_f64(), end: end.to_f64(), period, value, axis: PhantomData })
    }

    fn phase(&self, x: f64) -> f64 {
        ((x - self.start) / self.period).rem_euclid(1.0)
    }

    fn tooth(&self, x: f64) -> f64 {
        ((x - self.start) / self.period).floor()
    }

    fn value_at(&self, x: f64) -> R {
        if x < self.start || x > self.end { R::zero() } else { self.value * self.phase(x) }
    }

    /// Integral from `start` to `x` for `x` within the teeth.
    fn antiderivative(&self, x: f64) -> R {
        let phase = self.phase(x);
        self.value * (self.period * (self.tooth(x) + phase * phase) / 2.0)
    }

    /// Part of the extent where the teeth live, if any.
    fn active(&self, lower: f64, upper: f64) -> Option<(f64, f64)> {
        let (a, b) = (lower.max(self.start), upper.min(self.end));
        if a <= b { Some((a, b)) } else { None }
    }
}

impl<R: Value, X: Value> Function<R, (X,)> for SawtoothFunction<R, X> {
    fn range(&self) -> ValueRange<R> {
        ValueRange::new(min_nan(R::zero(), self.value), max_nan(R::zero(), self.value))
    }

    fn value(&self, p: &Point<(X,)>) -> R {
        self.value_at(p.get(0))
    }

    fn partition(&self, i: &Interval<(X,)>, callback: &mut PartitionCallback<'_, R, (X,)>) -> Result<(), MathError> {
        let outside_lower = i.clipped(0, f64::NEG_INFINITY, self.start, false, false);
        if !outside_lower.is_empty() {
            callback(&outside_lower, &Primitive::constant(R::zero()))?;
        }
        let inside = i.clipped(0, self.start, self.end, true, true);
        if !inside.is_empty() {
            callback(&inside, &Primitive::Sampled(self))?;
        }
        let outside_upper = i.clipped(0, self.end, f64::INFINITY, false, false);
        if !outside_upper.is_empty() {
            callback(&outside_upper, &Primitive::constant(R::zero()))?;
        }
        Ok(())
    }

    fn is_finite(&self, _i: &Interval<(X,)>) -> Result<bool, MathError> {
        Ok(self.value.is_finite())
    }

    fn is_non_zero(&self, i: &Interval<(X,)>) -> Result<bool, MathError> {
        let (lower, upper) = i.extent(0);
        let within = self.start <= lower && upper <= self.end;
        let one_tooth = self.tooth(lower) == self.tooth(upper) && self.phase(lower) > 0.0;
        Ok(self.value != R::zero() && within && one_tooth)
    }

    fn min(&self, i: &Interval<(X,)>) -> Result<R, MathError> {
        let (lower, upper) = i.extent(0);
        let mut result = min_nan(self.value_at(lower), self.value_at(upper));
        if lower < self.start || upper > self.end {
            result = min_nan(result, R::zero());
        }
        if let Some((a, b)) = self.active(lower, upper) {
            if self.tooth(a) != self.tooth(b) {
                result = min_nan(result, min_nan(R::zero(), self.value));
            }
        }
        Ok(result)
    }

    fn max(&self, i: &Interval<(X,)>) -> Result<R, MathError> {
        let (lower, upper) = i.extent(0);
        let mut result = max_nan(self.value_at(lower), self.value_at(upper));
        if lower < self.start || upper > self.end {
            result = max_nan(result, R::zero());
        }
        if let Some((a, b)) = self.active(lower, upper) {
            if self.tooth(a) != self.tooth(b) {
                result = max_nan(result, max_nan(R::zero(), self.value));
            }
        }
        Ok(result)
    }

    fn mean(&self, i: &Interval<(X,)>) -> Result<R, MathError> {
        let (lower, upper) = i.extent(0);
        if i.is_fixed(0) || lower == upper {
            return Ok(self.value_at(lower));
        }
        Ok(self.integral(i)? * (1.0 / (upper - lower)))
    }

    fn integral(&self, i: &Interval<(X,)>) -> Result<R, MathError> {
        let (lower, upper) = i.extent(0);
        if i.is_fixed(0) {
            return Ok(self.value_at(lower));
        }
        match self.active(lower, upper) {
            Some((a, b)) => Ok(self.antiderivative(b) - self.antiderivative(a)),
            None => Ok(R::zero())
        }
    }

    fn print_structure(&self, out: &mut dyn fmt::Write, _level: usize) -> fmt::Result {
        write!(
            out,
            "(Sawtooth, [{} … {}] every {} → {})",
            X::from_f64(self.start),
            X::from_f64(self.end),
            X::from_f64(self.period),
            self.value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type S = SawtoothFunction<f64, f64>;

    fn closed(lower: f64, upper: f64) -> Interval<(f64,)> {
        Interval::closed(Point::new((lower,)), Point::new((upper,)))
    }

    #[test]
    fn teeth_restart_every_period() {
        let f = S::new(0.0, 8.0, 2.0, 4.0).unwrap();
        assert_eq!(f.value(&Point::new((1.0,))), 2.0);
        assert_eq!(f.value(&Point::new((2.0,))), 0.0);
        assert_eq!(f.value(&Point::new((3.0,))), 2.0);
        assert_eq!(f.value(&Point::new((9.0,))), 0.0);
    }

    #[test]
    fn integral_counts_whole_and_partial_teeth() {
        let f = S::new(0.0, 8.0, 2.0, 4.0).unwrap();
        assert_eq!(f.integral(&closed(0.0, 8.0)).unwrap(), 16.0);
        assert_eq!(f.integral(&closed(-4.0, 3.0)).unwrap(), 5.0);
        assert_eq!(f.integral(&closed(10.0, 12.0)).unwrap(), 0.0);
    }

    #[test]
    fn extremes_across_a_tooth_boundary() {
        let f = S::new(0.0, 8.0, 2.0, 4.0).unwrap();
        assert_eq!(f.min(&closed(1.0, 3.0)).unwrap(), 0.0);
        assert_eq!(f.max(&closed(1.0, 3.0)).unwrap(), 4.0);
        assert_eq!(f.min(&closed(0.5, 1.5)).unwrap(), 1.0);
        assert!(f.is_non_zero(&closed(0.5, 1.5)).unwrap());
        assert!(!f.is_non_zero(&closed(1.0, 3.0)).unwrap());
    }

    #[test]
    fn partition_splits_off_the_zero_tails() {
        let f = S::new(0.0, 8.0, 2.0, 4.0).unwrap();
        let mut kinds = Vec::new();
        f.partition(&closed(-1.0, 10.0), &mut |_, f1| {
            kinds.push(f1.kind());
            Ok(())
        }).unwrap();
        assert_eq!(kinds.len(), 3);
        assert!(f.integral(&closed(-1.0, 10.0)).unwrap() == 16.0);
    }
}
