use std::fmt;
use std::marker::PhantomData;
use std::ops::{
    Add,
    Div,
    Mul,
    Sub
};

use crate::math::domain::{
    Domain,
    MAX_DIMS
};

/// Coordinate tuple in the domain `D`.
#[derive(Clone, Copy)]
pub struct Point<D: Domain> {
    raw: [f64; MAX_DIMS],
    domain: PhantomData<D>
}

impl<D: Domain> Point<D> {
    pub fn new(coordinates: D) -> Point<D> {
        Point::from_raw(coordinates.to_raw())
    }

    pub fn from_raw(raw: [f64; MAX_DIMS]) -> Point<D> {
        Point { raw, domain: PhantomData }
    }

    pub fn from_slice(coordinates: &[f64]) -> Point<D> {
        let mut raw = [0.0; MAX_DIMS];
        for (dim, x) in coordinates.iter().take(D::DIMS).enumerate() {
            raw[dim] = *x;
        }
        Point::from_raw(raw)
    }

    pub fn zero() -> Point<D> {
        Point::from_raw([0.0; MAX_DIMS])
    }

    pub fn lower_bounds() -> Point<D> {
        let mut raw = [0.0; MAX_DIMS];
        for dim in 0..D::DIMS {
            raw[dim] = D::lower_boundary(dim);
        }
        Point::from_raw(raw)
    }

    pub fn upper_bounds() -> Point<D> {
        let mut raw = [0.0; MAX_DIMS];
        for dim in 0..D::DIMS {
            raw[dim] = D::upper_boundary(dim);
        }
        Point::from_raw(raw)
    }

    pub fn coordinates(&self) -> D {
        D::from_raw(&self.raw)
    }

    pub fn raw(&self) -> &[f64; MAX_DIMS] {
        &self.raw
    }

    pub fn get(&self, dim: usize) -> f64 {
        self.raw[dim]
    }

    pub fn set(&mut self, dim: usize, x: f64) {
        self.raw[dim] = x;
    }

    pub fn with(&self, dim: usize, x: f64) -> Point<D> {
        let mut p = *self;
        p.raw[dim] = x;
        p
    }

    /// Picks the listed dimensions into a point of another domain.
    pub fn project<E: Domain>(&self, dims: &[usize]) -> Point<E> {
        let mut raw = [0.0; MAX_DIMS];
        for (k, dim) in dims.iter().enumerate() {
            raw[k] = self.raw[*dim];
        }
        Point::from_raw(raw)
    }

    pub fn all_lt(&self, other: &Point<D>) -> bool {
        (0..D::DIMS).all(|d| self.raw[d] < other.raw[d])
    }

    pub fn all_le(&self, other: &Point<D>) -> bool {
        (0..D::DIMS).all(|d| self.raw[d] <= other.raw[d])
    }

    pub fn all_gt(&self, other: &Point<D>) -> bool {
        (0..D::DIMS).all(|d| self.raw[d] > other.raw[d])
    }

    pub fn all_ge(&self, other: &Point<D>) -> bool {
        (0..D::DIMS).all(|d| self.raw[d] >= other.raw[d])
    }

    fn zip_with(&self, other: &Point<D>, op: impl Fn(f64, f64) -> f64) -> Point<D> {
        let mut raw = [0.0; MAX_DIMS];
        for dim in 0..D::DIMS {
            raw[dim] = op(self.raw[dim], other.raw[dim]);
        }
        Point::from_raw(raw)
    }

    fn map(&self, op: impl Fn(f64) -> f64) -> Point<D> {
        let mut raw = [0.0; MAX_DIMS];
        for dim in 0..D::DIMS {
            raw[dim] = op(self.raw[dim]);
        }
        Point::from_raw(raw)
    }
}

impl<D: Domain> PartialEq for Point<D> {
    fn eq(&self, other: &Self) -> bool {
        self.raw[..D::DIMS] == other.raw[..D::DIMS]
    }
}

impl<D: Domain> Add for Point<D> {
    type Output = Point<D>;

    fn add(self, rhs: Point<D>) -> Point<D> {
        self.zip_with(&rhs, |a, b| a + b)
    }
}

impl<D: Domain> Sub for Point<D> {
    type Output = Point<D>;

    fn sub(self, rhs: Point<D>) -> Point<D> {
        self.zip_with(&rhs, |a, b| a - b)
    }
}

impl<D: Domain> Mul<f64> for Point<D> {
    type Output = Point<D>;

    fn mul(self, rhs: f64) -> Point<D> {
        self.map(|a| a * rhs)
    }
}

impl<D: Domain> Div<f64> for Point<D> {
    type Output = Point<D>;

    fn div(self, rhs: f64) -> Point<D> {
        self.map(|a| a / rhs)
    }
}

impl<D: Domain> fmt::Display for Point<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for dim in 0..D::DIMS {
            if dim > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", D::format_coordinate(dim, self.raw[dim]))?;
        }
        write!(f, ")")
    }
}

impl<D: Domain> fmt::Debug for Point<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::quantity::Time;

    type P2 = Point<(f64, f64)>;

    #[test]
    fn comparisons_require_every_component() {
        let a = P2::new((0.0, 0.0));
        let b = P2::new((1.0, 0.0));
        assert!(a.all_le(&b));
        assert!(!a.all_lt(&b));
        assert!(b.all_ge(&a));
        assert!(!b.all_gt(&a));
    }

    #[test]
    fn componentwise_arithmetic() {
        let a = P2::new((1.0, 2.0));
        let b = P2::new((3.0, 4.0));
        assert_eq!((a + b).coordinates(), (4.0, 6.0));
        assert_eq!((b - a).coordinates(), (2.0, 2.0));
        assert_eq!((a * 2.0).coordinates(), (2.0, 4.0));
        assert_eq!(((a + b) / 2.0).coordinates(), (2.0, 3.0));
    }

    #[test]
    fn bounds_follow_axis_boundaries() {
        let lower = Point::<(Time, f64)>::lower_bounds();
        assert!(lower.get(0).is_finite());
        assert_eq!(lower.get(1), f64::NEG_INFINITY);
        assert_eq!(format!("{}", Point::<(Time, f64)>::new((Time::new(1.0), 2.0))), "(1 s, 2)");
    }
}
