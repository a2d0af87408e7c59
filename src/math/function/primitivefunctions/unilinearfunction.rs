use std::fmt;
use std::marker::PhantomData;

use crate::math::domain::Domain;
use crate::math::function::function::{
    Function,
    PartitionCallback,
    ValueRange,
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

/// Linear between `(lower, r_lower)` and `(upper, r_upper)` along one
/// dimension and constant along all others.
#[derive(Clone, Copy)]
pub struct UnilinearFunction<R: Value, D: Domain> {
    lower: f64,
    upper: f64,
    r_lower: R,
    r_upper: R,
    dimension: usize,
    domain: PhantomData<D>
}

impl<R: Value, D: Domain> UnilinearFunction<R, D> {
    /// Only the coordinates of `lower` and `upper` in `dimension` are used.
    pub fn new(lower: &Point<D>, upper: &Point<D>, r_lower: R, r_upper: R, dimension: usize) -> UnilinearFunction<R, D> {
        UnilinearFunction::from_extent(dimension, lower.get(dimension), upper.get(dimension), r_lower, r_upper)
    }

    pub fn from_extent(dimension: usize, lower: f64, upper: f64, r_lower: R, r_upper: R) -> UnilinearFunction<R, D> {
        assert!(dimension < D::DIMS, "dimension {} out of range", dimension);
        UnilinearFunction { lower, upper, r_lower, r_upper, dimension, domain: PhantomData }
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn r_lower(&self) -> R {
        self.r_lower
    }

    pub fn r_upper(&self) -> R {
        self.r_upper
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Slope per unit of the active coordinate.
    pub fn a(&self) -> R {
        (self.r_upper - self.r_lower) * (1.0 / (self.upper - self.lower))
    }

    /// Value at coordinate zero.
    pub fn b(&self) -> R {
        (self.r_lower * self.upper - self.r_upper * self.lower) * (1.0 / (self.upper - self.lower))
    }

    pub fn value_at(&self, x: f64) -> R {
        if self.upper == self.lower {
            return self.r_lower;
        }
        let alpha = (x - self.lower) / (self.upper - self.lower);
        self.r_lower * (1.0 - alpha) + self.r_upper * alpha
    }

    pub fn with_values(&self, r_lower: R, r_upper: R) -> UnilinearFunction<R, D> {
        UnilinearFunction::from_extent(self.dimension, self.lower, self.upper, r_lower, r_upper)
    }

    pub fn with_dimension(&self, dimension: usize) -> UnilinearFunction<R, D> {
        UnilinearFunction::from_extent(dimension, self.lower, self.upper, self.r_lower, self.r_upper)
    }

    pub fn shifted(&self, shift: f64) -> UnilinearFunction<R, D> {
        UnilinearFunction::from_extent(self.dimension, self.lower + shift, self.upper + shift, self.r_lower, self.r_upper)
    }

    fn is_flat(&self) -> bool {
        self.upper == self.lower || self.r_upper == self.r_lower
    }

    /// Like `value_at`, but an infinite coordinate yields the signed limit of
    /// the line rather than `inf - inf`.
    fn limit_at(&self, x: f64) -> R {
        if x.is_finite() {
            return self.value_at(x);
        }
        if self.is_flat() {
            return self.r_lower;
        }
        let rising = (self.r_upper - self.r_lower).to_f64() / (self.upper - self.lower) > 0.0;
        if rising == (x > 0.0) { R::upper_bound() } else { R::lower_bound() }
    }

    fn end_values(&self, i: &Interval<D>) -> (R, R) {
        let (lower, upper) = i.extent(self.dimension);
        (self.limit_at(lower), self.limit_at(upper))
    }
}

impl<R: Value, D: Domain> Function<R, D> for UnilinearFunction<R, D> {
    fn range(&self) -> ValueRange<R> {
        ValueRange::new(min_nan(self.r_lower, self.r_upper), max_nan(self.r_lower, self.r_upper))
    }

    fn value(&self, p: &Point<D>) -> R {
        self.value_at(p.get(self.dimension))
    }

    fn partition(&self, i: &Interval<D>, callback: &mut PartitionCallback<'_, R, D>) -> Result<(), MathError> {
        callback(i, &Primitive::Unilinear(*self))
    }

    fn is_finite(&self, _i: &Interval<D>) -> Result<bool, MathError> {
        Ok(self.r_lower.is_finite() && self.r_upper.is_finite())
    }

    fn is_non_zero(&self, i: &Interval<D>) -> Result<bool, MathError> {
        let (r1, r2) = self.end_values(i);
        let zero = R::zero();
        Ok((r1 > zero && r2 > zero) || (r1 < zero && r2 < zero))
    }

    fn min(&self, i: &Interval<D>) -> Result<R, MathError> {
        let (r1, r2) = self.end_values(i);
        Ok(min_nan(r1, r2))
    }

    fn max(&self, i: &Interval<D>) -> Result<R, MathError> {
        let (r1, r2) = self.end_values(i);
        Ok(max_nan(r1, r2))
    }

    /// An extent unbounded on one side averages to the limit on that side.
    fn mean(&self, i: &Interval<D>) -> Result<R, MathError> {
        let (lower, upper) = i.extent(self.dimension);
        if self.is_flat() {
            return Ok(self.r_lower);
        }
        if i.is_fixed(self.dimension) || lower == upper {
            return Ok(self.limit_at(lower));
        }
        match (lower.is_finite(), upper.is_finite()) {
            (true, true) => Ok(self.value_at((lower + upper) / 2.0)),
            (true, false) => Ok(self.limit_at(upper)),
            (false, true) => Ok(self.limit_at(lower)),
            (false, false) => Err(MathError::InvalidArgument(format!(
                "mean of a sloped line over the unbounded extent [{}, {}]",
                lower, upper
            )))
        }
    }

    fn integral(&self, i: &Interval<D>) -> Result<R, MathError> {
        Ok(integral_of(self.mean(i)?, i.volume()))
    }

    fn print_structure(&self, out: &mut dyn fmt::Write, _level: usize) -> fmt::Result {
        write!(
            out,
            "(Unilinear dim {}: {} → {} … {} → {})",
            self.dimension,
            D::format_coordinate(self.dimension, self.lower),
            self.r_lower,
            D::format_coordinate(self.dimension, self.upper),
            self.r_upper
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type U = UnilinearFunction<f64, (f64, f64)>;

    #[test]
    fn interpolates_along_its_dimension_only() {
        let f = U::from_extent(1, 0.0, 10.0, 0.0, 20.0);
        assert_eq!(f.value(&Point::new((100.0, 5.0))), 10.0);
        assert_eq!(f.value(&Point::new((-3.0, 10.0))), 20.0);
    }

    #[test]
    fn slope_and_intercept() {
        let f = U::from_extent(0, 2.0, 4.0, 1.0, 5.0);
        assert_eq!(f.a(), 2.0);
        assert_eq!(f.b(), -3.0);
    }

    #[test]
    fn extremes_over_a_sub_interval() {
        let f = U::from_extent(0, 0.0, 8.0, 8.0, 0.0);
        let i = Interval::closed(Point::new((2.0, 0.0)), Point::new((4.0, 1.0)));
        assert_eq!(f.min(&i).unwrap(), 4.0);
        assert_eq!(f.max(&i).unwrap(), 6.0);
        assert_eq!(f.mean(&i).unwrap(), 5.0);
        assert_eq!(f.integral(&i).unwrap(), 10.0);
        assert!(f.is_non_zero(&i).unwrap());
    }

    #[test]
    fn unbounded_extents_follow_the_slope() {
        let rising = U::from_extent(0, 0.0, 1.0, 0.0, 1.0);
        let right = Interval::new(Point::new((0.0, 0.0)), Point::new((f64::INFINITY, 1.0)), 3, 2, 0);
        let left = Interval::new(Point::new((f64::NEG_INFINITY, 0.0)), Point::new((0.0, 1.0)), 2, 3, 0);
        assert_eq!(rising.mean(&right).unwrap(), f64::INFINITY);
        assert_eq!(rising.max(&right).unwrap(), f64::INFINITY);
        assert_eq!(rising.min(&right).unwrap(), 0.0);
        assert_eq!(rising.mean(&left).unwrap(), f64::NEG_INFINITY);
        let falling = U::from_extent(0, 0.0, 1.0, 1.0, 0.0);
        assert_eq!(falling.mean(&right).unwrap(), f64::NEG_INFINITY);
        assert_eq!(falling.mean(&left).unwrap(), f64::INFINITY);
        let everywhere = Interval::<(f64, f64)>::unbounded();
        assert!(matches!(rising.mean(&everywhere), Err(MathError::InvalidArgument(_))));
        let flat = U::from_extent(0, 0.0, 1.0, 2.0, 2.0);
        assert_eq!(flat.mean(&everywhere).unwrap(), 2.0);
        assert_eq!(flat.integral(&right).unwrap(), f64::INFINITY);
    }
}
