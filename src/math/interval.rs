use std::fmt;

use crate::math::domain::Domain;
use crate::math::point::Point;

/// Axis-aligned box of the domain `D`.
///
/// Bit `d` of the three masks refers to dimension `d`. A fixed dimension pins
/// the box to the single coordinate `lower[d] == upper[d]`, which is how a
/// multi-dimensional query is sliced down to a line or a point.
#[derive(Clone, Copy)]
pub struct Interval<D: Domain> {
    lower: Point<D>,
    upper: Point<D>,
    lower_closed: u8,
    upper_closed: u8,
    fixed: u8
}

fn bit(dim: usize) -> u8 {
    1 << dim
}

impl<D: Domain> Interval<D> {
    pub fn new(lower: Point<D>, upper: Point<D>, lower_closed: u8, upper_closed: u8, fixed: u8) -> Interval<D> {
        Interval { lower, upper, lower_closed, upper_closed, fixed }
    }

    /// The whole space, open at the axis boundaries.
    pub fn unbounded() -> Interval<D> {
        Interval::new(Point::lower_bounds(), Point::upper_bounds(), 0, 0, 0)
    }

    pub fn closed(lower: Point<D>, upper: Point<D>) -> Interval<D> {
        Interval::new(lower, upper, Self::all_bits(), Self::all_bits(), 0)
    }

    pub fn point(p: Point<D>) -> Interval<D> {
        Interval::new(p, p, Self::all_bits(), Self::all_bits(), Self::all_bits())
    }

    pub fn all_bits() -> u8 {
        ((1u16 << D::DIMS) - 1) as u8
    }

    pub fn lower(&self) -> &Point<D> {
        &self.lower
    }

    pub fn upper(&self) -> &Point<D> {
        &self.upper
    }

    pub fn lower_closed(&self) -> u8 {
        self.lower_closed
    }

    pub fn upper_closed(&self) -> u8 {
        self.upper_closed
    }

    pub fn fixed(&self) -> u8 {
        self.fixed
    }

    pub fn is_lower_closed(&self, dim: usize) -> bool {
        self.lower_closed & bit(dim) != 0
    }

    pub fn is_upper_closed(&self, dim: usize) -> bool {
        self.upper_closed & bit(dim) != 0
    }

    pub fn is_fixed(&self, dim: usize) -> bool {
        self.fixed & bit(dim) != 0
    }

    pub fn extent(&self, dim: usize) -> (f64, f64) {
        (self.lower.get(dim), self.upper.get(dim))
    }

    pub fn width(&self, dim: usize) -> f64 {
        self.upper.get(dim) - self.lower.get(dim)
    }

    pub fn is_empty(&self) -> bool {
        (0..D::DIMS).any(|dim| {
            let (lower, upper) = self.extent(dim);
            let open = !(self.is_lower_closed(dim) && self.is_upper_closed(dim));
            if self.is_fixed(dim) {
                lower != upper || open
            } else {
                lower > upper || (lower == upper && open)
            }
        })
    }

    /// Product of the widths of every non-fixed dimension.
    pub fn volume(&self) -> f64 {
        (0..D::DIMS)
            .filter(|dim| !self.is_fixed(*dim))
            .map(|dim| self.width(dim))
            .product()
    }

    pub fn contains(&self, p: &Point<D>) -> bool {
        (0..D::DIMS).all(|dim| {
            let x = p.get(dim);
            let (lower, upper) = self.extent(dim);
            if self.is_fixed(dim) {
                return x == lower;
            }
            let above = lower < x || (self.is_lower_closed(dim) && lower == x);
            let below = x < upper || (self.is_upper_closed(dim) && x == upper);
            above && below
        })
    }

    /// A point strictly inside every non-degenerate dimension, also for
    /// half-unbounded boxes.
    pub fn center(&self) -> Point<D> {
        let mut center = self.lower;
        for dim in 0..D::DIMS {
            let (lower, upper) = self.extent(dim);
            let x = if self.is_fixed(dim) {
                lower
            } else if lower.is_infinite() && upper.is_infinite() {
                0.0
            } else if lower.is_infinite() {
                upper - upper.abs().max(1.0)
            } else if upper.is_infinite() {
                lower + lower.abs().max(1.0)
            } else {
                (lower + upper) / 2.0
            };
            center.set(dim, x);
        }
        center
    }

    /// Every corner of the box, varying only the non-fixed dimensions.
    pub fn corners(&self) -> Vec<Point<D>> {
        let free: Vec<usize> = (0..D::DIMS).filter(|dim| !self.is_fixed(*dim)).collect();
        (0..(1usize << free.len()))
            .map(|mask| {
                let mut corner = self.lower;
                for (k, dim) in free.iter().enumerate() {
                    if mask & (1 << k) != 0 {
                        corner.set(*dim, self.upper.get(*dim));
                    }
                }
                corner
            })
            .collect()
    }

    pub fn intersect(&self, other: &Interval<D>) -> Interval<D> {
        let mut result = *self;
        for dim in 0..D::DIMS {
            let b = bit(dim);
            let (l1, u1) = self.extent(dim);
            let (l2, u2) = other.extent(dim);
            result.lower_closed &= !b;
            result.upper_closed &= !b;
            if l1 > l2 {
                result.lower.set(dim, l1);
                result.lower_closed |= self.lower_closed & b;
            } else if l2 > l1 {
                result.lower.set(dim, l2);
                result.lower_closed |= other.lower_closed & b;
            } else {
                result.lower.set(dim, l1);
                result.lower_closed |= self.lower_closed & other.lower_closed & b;
            }
            if u1 < u2 {
                result.upper.set(dim, u1);
                result.upper_closed |= self.upper_closed & b;
            } else if u2 < u1 {
                result.upper.set(dim, u2);
                result.upper_closed |= other.upper_closed & b;
            } else {
                result.upper.set(dim, u1);
                result.upper_closed |= self.upper_closed & other.upper_closed & b;
            }
        }
        result.fixed = self.fixed | other.fixed;
        result
    }

    pub fn shifted(&self, shift: &Point<D>) -> Interval<D> {
        Interval::new(self.lower + *shift, self.upper + *shift, self.lower_closed, self.upper_closed, self.fixed)
    }

    /// Pins `dim` to the coordinate `x`.
    pub fn fixed_at(&self, dim: usize, x: f64) -> Interval<D> {
        let b = bit(dim);
        Interval::new(
            self.lower.with(dim, x),
            self.upper.with(dim, x),
            self.lower_closed | b,
            self.upper_closed | b,
            self.fixed | b
        )
    }

    /// Replaces the extent of `dim`, releasing it if it was fixed.
    pub fn replaced(&self, dim: usize, lower: f64, upper: f64, lower_closed: bool, upper_closed: bool) -> Interval<D> {
        let b = bit(dim);
        let lc = if lower_closed { self.lower_closed | b } else { self.lower_closed & !b };
        let uc = if upper_closed { self.upper_closed | b } else { self.upper_closed & !b };
        Interval::new(self.lower.with(dim, lower), self.upper.with(dim, upper), lc, uc, self.fixed & !b)
    }

    /// Restricts `dim` to the given extent, keeping the other dimensions.
    pub fn clipped(&self, dim: usize, lower: f64, upper: f64, lower_closed: bool, upper_closed: bool) -> Interval<D> {
        let mut limit = Interval::<D>::unbounded().replaced(dim, lower, upper, lower_closed, upper_closed);
        for other in (0..D::DIMS).filter(|other| *other != dim) {
            limit.lower.set(other, f64::NEG_INFINITY);
            limit.upper.set(other, f64::INFINITY);
        }
        self.intersect(&limit)
    }

    /// Picks the listed dimensions into an interval of another domain.
    pub fn project<E: Domain>(&self, dims: &[usize]) -> Interval<E> {
        let mut result = Interval::new(self.lower.project(dims), self.upper.project(dims), 0, 0, 0);
        for (k, dim) in dims.iter().enumerate() {
            let from = bit(*dim);
            let to = bit(k);
            if self.lower_closed & from != 0 { result.lower_closed |= to; }
            if self.upper_closed & from != 0 { result.upper_closed |= to; }
            if self.fixed & from != 0 { result.fixed |= to; }
        }
        result
    }

    /// Writes dimension `k` of `self` into dimension `dims[k]` of `target`.
    pub fn embedded<E: Domain>(&self, target: &Interval<E>, dims: &[usize]) -> Interval<E> {
        let mut result = *target;
        for (k, dim) in dims.iter().enumerate() {
            let (lower, upper) = self.extent(k);
            result = result.replaced(*dim, lower, upper, self.is_lower_closed(k), self.is_upper_closed(k));
            if self.is_fixed(k) {
                result.fixed |= bit(*dim);
            }
        }
        result
    }
}

impl<D: Domain> fmt::Display for Interval<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for dim in 0..D::DIMS {
            if dim > 0 {
                write!(f, " x ")?;
            }
            let (lower, upper) = self.extent(dim);
            if self.is_fixed(dim) {
                write!(f, "{{{}}}", D::format_coordinate(dim, lower))?;
            } else {
                write!(
                    f,
                    "{}{} … {}{}",
                    if self.is_lower_closed(dim) { "[" } else { "(" },
                    D::format_coordinate(dim, lower),
                    D::format_coordinate(dim, upper),
                    if self.is_upper_closed(dim) { "]" } else { ")" }
                )?;
            }
        }
        Ok(())
    }
}

impl<D: Domain> fmt::Debug for Interval<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Interval{{{}}}", self)
    }
}
