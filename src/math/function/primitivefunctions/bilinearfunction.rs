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

fn alpha(x: f64, lower: f64, upper: f64) -> f64 {
    if upper == lower { 0.0 } else { (x - lower) / (upper - lower) }
}

/// Bilinear over the rectangle spanned by two dimensions, constant along all
/// others. Corner values are named `r_<dimension1 side>_<dimension2 side>`.
#[derive(Clone, Copy)]
pub struct BilinearFunction<R: Value, D: Domain> {
    dimension1: usize,
    dimension2: usize,
    lower1: f64,
    upper1: f64,
    lower2: f64,
    upper2: f64,
    r_lower_lower: R,
    r_lower_upper: R,
    r_upper_lower: R,
    r_upper_upper: R,
    domain: PhantomData<D>
}

impl<R: Value, D: Domain> BilinearFunction<R, D> {
    /// Spans the rectangle from `lower` to `upper` in the two given dimensions.
    pub fn new(lower: &Point<D>, upper: &Point<D>,
               r_lower_lower: R, r_lower_upper: R, r_upper_lower: R, r_upper_upper: R,
               dimension1: usize, dimension2: usize) -> BilinearFunction<R, D> {
        BilinearFunction::from_extents(
            (dimension1, lower.get(dimension1), upper.get(dimension1)),
            (dimension2, lower.get(dimension2), upper.get(dimension2)),
            [r_lower_lower, r_lower_upper, r_upper_lower, r_upper_upper]
        )
    }

    /// `corners` are ordered lower-lower, lower-upper, upper-lower, upper-upper.
    pub fn from_extents(extent1: (usize, f64, f64), extent2: (usize, f64, f64), corners: [R; 4]) -> BilinearFunction<R, D> {
        let (dimension1, lower1, upper1) = extent1;
        let (dimension2, lower2, upper2) = extent2;
        assert!(dimension1 != dimension2, "bilinear function needs two different dimensions");
        assert!(dimension1 < D::DIMS && dimension2 < D::DIMS, "dimension out of range");
        BilinearFunction {
            dimension1,
            dimension2,
            lower1,
            upper1,
            lower2,
            upper2,
            r_lower_lower: corners[0],
            r_lower_upper: corners[1],
            r_upper_lower: corners[2],
            r_upper_upper: corners[3],
            domain: PhantomData
        }
    }

    pub fn dimension1(&self) -> usize {
        self.dimension1
    }

    pub fn dimension2(&self) -> usize {
        self.dimension2
    }

    pub fn extent1(&self) -> (usize, f64, f64) {
        (self.dimension1, self.lower1, self.upper1)
    }

    pub fn extent2(&self) -> (usize, f64, f64) {
        (self.dimension2, self.lower2, self.upper2)
    }

    pub fn corners(&self) -> [R; 4] {
        [self.r_lower_lower, self.r_lower_upper, self.r_upper_lower, self.r_upper_upper]
    }

    /// Coordinates of the corners in the same order as `corners`.
    pub fn corner_coordinates(&self) -> [(f64, f64); 4] {
        [
            (self.lower1, self.lower2),
            (self.lower1, self.upper2),
            (self.upper1, self.lower2),
            (self.upper1, self.upper2)
        ]
    }

    pub fn value_at(&self, x1: f64, x2: f64) -> R {
        let alpha1 = alpha(x1, self.lower1, self.upper1);
        let alpha2 = alpha(x2, self.lower2, self.upper2);
        let r_lower = self.r_lower_lower * (1.0 - alpha1) + self.r_upper_lower * alpha1;
        let r_upper = self.r_lower_upper * (1.0 - alpha1) + self.r_upper_upper * alpha1;
        r_lower * (1.0 - alpha2) + r_upper * alpha2
    }

    pub fn with_corners(&self, corners: [R; 4]) -> BilinearFunction<R, D> {
        BilinearFunction::from_extents(self.extent1(), self.extent2(), corners)
    }

    pub fn shifted(&self, shift1: f64, shift2: f64) -> BilinearFunction<R, D> {
        BilinearFunction::from_extents(
            (self.dimension1, self.lower1 + shift1, self.upper1 + shift1),
            (self.dimension2, self.lower2 + shift2, self.upper2 + shift2),
            self.corners()
        )
    }

    fn interval_corner_values(&self, i: &Interval<D>) -> [R; 4] {
        let (l1, u1) = i.extent(self.dimension1);
        let (l2, u2) = i.extent(self.dimension2);
        [self.value_at(l1, l2), self.value_at(l1, u2), self.value_at(u1, l2), self.value_at(u1, u2)]
    }
}

impl<R: Value, D: Domain> Function<R, D> for BilinearFunction<R, D> {
    fn range(&self) -> ValueRange<R> {
        let [a, b, c, d] = self.corners();
        ValueRange::new(min_nan(min_nan(a, b), min_nan(c, d)), max_nan(max_nan(a, b), max_nan(c, d)))
    }

    fn value(&self, p: &Point<D>) -> R {
        self.value_at(p.get(self.dimension1), p.get(self.dimension2))
    }

    fn partition(&self, i: &Interval<D>, callback: &mut PartitionCallback<'_, R, D>) -> Result<(), MathError> {
        callback(i, &Primitive::Bilinear(*self))
    }

    fn is_finite(&self, _i: &Interval<D>) -> Result<bool, MathError> {
        Ok(self.corners().iter().all(|r| r.is_finite()))
    }

    fn is_non_zero(&self, i: &Interval<D>) -> Result<bool, MathError> {
        let values = self.interval_corner_values(i);
        let zero = R::zero();
        Ok(values.iter().all(|r| *r > zero) || values.iter().all(|r| *r < zero))
    }

    fn min(&self, i: &Interval<D>) -> Result<R, MathError> {
        let [a, b, c, d] = self.interval_corner_values(i);
        Ok(min_nan(min_nan(a, b), min_nan(c, d)))
    }

    fn max(&self, i: &Interval<D>) -> Result<R, MathError> {
        let [a, b, c, d] = self.interval_corner_values(i);
        Ok(max_nan(max_nan(a, b), max_nan(c, d)))
    }

    fn mean(&self, i: &Interval<D>) -> Result<R, MathError> {
        let (l1, u1) = i.extent(self.dimension1);
        let (l2, u2) = i.extent(self.dimension2);
        Ok(self.value_at((l1 + u1) / 2.0, (l2 + u2) / 2.0))
    }

    fn integral(&self, i: &Interval<D>) -> Result<R, MathError> {
        Ok(integral_of(self.mean(i)?, i.volume()))
    }

    fn print_structure(&self, out: &mut dyn fmt::Write, _level: usize) -> fmt::Result {
        write!(
            out,
            "(Bilinear dims {}, {}: {}, {}, {}, {})",
            self.dimension1,
            self.dimension2,
            self.r_lower_lower,
            self.r_lower_upper,
            self.r_upper_lower,
            self.r_upper_upper
        )
    }
}
