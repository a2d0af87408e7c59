use std::fmt;
use std::marker::PhantomData;

use crate::math::function::function::{
    Function,
    PartitionCallback
};
use crate::math::function::matherror::MathError;
use crate::math::function::primitive::Primitive;
use crate::math::function::primitivefunctions::unilinearfunction::UnilinearFunction;
use crate::math::interpolator::Interpolator;
use crate::math::interval::Interval;
use crate::math::point::Point;
use crate::units::value::Value;

/// Piece reproducing one table segment between `(x1, r1)` and `(x2, r2)`.
///
/// Constant strategies take their inner value over the whole half-open
/// segment, linear ones become a unilinear piece spanning the segment.
pub(crate) fn segment_piece<R: Value, X: Value>(interpolator: &Interpolator,
                                                 x1: f64,
                                                 r1: R,
                                                 x2: f64,
                                                 r2: R,
                                                 i: &Interval<(X,)>) -> Primitive<'static, R, (X,)> {
    if interpolator.is_constant() {
        Primitive::constant(interpolator.inner_value(x1, r1, x2, r2))
    } else {
        Primitive::Unilinear(UnilinearFunction::from_extent(0, x1, x2, r1, r2)).simplified(i)
    }
}

/// Value a segment takes at `x`, consistent with `segment_piece`.
pub(crate) fn segment_value<R: Value>(interpolator: &Interpolator, x1: f64, r1: R, x2: f64, r2: R, x: f64) -> R {
    if interpolator.is_constant() {
        interpolator.inner_value(x1, r1, x2, r2)
    } else {
        interpolator.value(x1, r1, x2, r2, x)
    }
}

/// Interpolates an ordered table of samples; zero outside the first and last
/// sample. Segments are closed below and open above, except the last one.
pub struct Interpolated1DFunction<R: Value, X: Value> {
    xs: Vec<f64>,
    rs: Vec<R>,
    interpolators: Vec<Interpolator>,
    axis: PhantomData<X>
}

impl<R: Value, X: Value> Interpolated1DFunction<R, X> {
    /// Uses the same interpolator for every segment.
    pub fn new(table: Vec<(X, R)>, interpolator: Interpolator) -> Result<Interpolated1DFunction<R, X>, MathError> {
        Interpolated1DFunction::from_entries(table.into_iter().map(|(x, r)| (x, r, interpolator)).collect())
    }

    /// Each entry carries the interpolator of the segment starting at it.
    pub fn from_entries(entries: Vec<(X, R, Interpolator)>) -> Result<Interpolated1DFunction<R, X>, MathError> {
        if entries.is_empty() {
            return Err(MathError::InvalidArgument("interpolated table is empty".to_owned()));
        }
        if let Some(pair) = entries.windows(2).find(|pair| !(pair[0].0 < pair[1].0)) {
            return Err(MathError::InvalidArgument(format!(
                "interpolated table is not strictly increasing at {} and {}",
                pair[0].0, pair[1].0
            )));
        }
        let xs = entries.iter().map(|(x, _, _)| x.to_f64()).collect();
        let rs = entries.iter().map(|(_, r, _)| *r).collect();
        let interpolators = entries.iter().map(|(_, _, interpolator)| *interpolator).collect();
        Ok(Interpolated1DFunction { xs, rs, interpolators, axis: PhantomData })
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Index of the last sample at or below `x`.
    fn floor_index(&self, x: f64) -> usize {
        self.xs.partition_point(|xk| *xk <= x).saturating_sub(1)
    }

    fn last(&self) -> usize {
        self.xs.len() - 1
    }
}

impl<R: Value, X: Value> Function<R, (X,)> for Interpolated1DFunction<R, X> {
    fn value(&self, p: &Point<(X,)>) -> R {
        let x = p.get(0);
        let last = self.last();
        if x < self.xs[0] || x > self.xs[last] {
            return R::zero();
        }
        if last == 0 {
            return self.rs[0];
        }
        let k = self.floor_index(x).min(last - 1);
        segment_value(&self.interpolators[k], self.xs[k], self.rs[k], self.xs[k + 1], self.rs[k + 1], x)
    }

    fn partition(&self, i: &Interval<(X,)>, callback: &mut PartitionCallback<'_, R, (X,)>) -> Result<(), MathError> {
        let last = self.last();
        let (lower, upper) = i.extent(0);
        let before = i.clipped(0, f64::NEG_INFINITY, self.xs[0], false, false);
        if !before.is_empty() {
            callback(&before, &Primitive::constant(R::zero()))?;
        }
        if last == 0 {
            let only = i.clipped(0, self.xs[0], self.xs[0], true, true);
            if !only.is_empty() {
                callback(&only, &Primitive::constant(self.rs[0]))?;
            }
        }
        let mut k = self.floor_index(lower);
        while k < last && self.xs[k] <= upper {
            let i1 = i.clipped(0, self.xs[k], self.xs[k + 1], true, k + 1 == last);
            if !i1.is_empty() {
                let piece = segment_piece(&self.interpolators[k], self.xs[k], self.rs[k], self.xs[k + 1], self.rs[k + 1], &i1);
                callback(&i1, &piece)?;
            }
            k += 1;
        }
        let after = i.clipped(0, self.xs[last], f64::INFINITY, false, false);
        if !after.is_empty() {
            callback(&after, &Primitive::constant(R::zero()))?;
        }
        Ok(())
    }

    fn is_finite(&self, _i: &Interval<(X,)>) -> Result<bool, MathError> {
        Ok(self.rs.iter().all(|r| r.is_finite()))
    }

    fn print_structure(&self, out: &mut dyn fmt::Write, level: usize) -> fmt::Result {
        write!(out, "(Interpolated1D")?;
        let inline = self.xs.len() < 8;
        for ((x, r), interpolator) in self.xs.iter().zip(&self.rs).zip(&self.interpolators) {
            if inline {
                write!(out, ", {} → {}, {}", X::from_f64(*x), r, interpolator)?;
            } else {
                write!(out, "\n{}{} → {}, {}", " ".repeat(level + 2), X::from_f64(*x), r, interpolator)?;
            }
        }
        write!(out, ")")
    }
}
