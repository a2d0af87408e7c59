use std::fmt;
use std::marker::PhantomData;

use crate::math::function::function::{
    Function,
    PartitionCallback
};
use crate::math::function::matherror::MathError;
use crate::math::function::primitive::Primitive;
use crate::math::function::primitivefunctions::interpolated1dfunction::{
    segment_piece,
    segment_value
};
use crate::math::interpolator::Interpolator;
use crate::math::interval::Interval;
use crate::math::point::Point;
use crate::units::value::Value;

/// `size` sample coordinates spaced evenly from `start` to `end`, splitting
/// `[start, end)` into `size - 1` segments closed below and open above.
#[derive(Clone, Copy, Debug)]
pub(crate) struct EvenGrid {
    start: f64,
    end: f64,
    step: f64,
    size: usize
}

impl EvenGrid {
    pub(crate) fn new(start: f64, end: f64, size: usize) -> Result<EvenGrid, MathError> {
        if size < 2 || !(start < end) {
            return Err(MathError::InvalidArgument(format!(
                "evenly spaced samples need at least two samples over a non-empty extent, got {} over [{} … {}]",
                size, start, end
            )));
        }
        Ok(EvenGrid { start, end, step: (end - start) / (size - 1) as f64, size })
    }

    pub(crate) fn start(&self) -> f64 {
        self.start
    }

    pub(crate) fn end(&self) -> f64 {
        self.end
    }

    pub(crate) fn step(&self) -> f64 {
        self.step
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn contains(&self, x: f64) -> bool {
        self.start <= x && x < self.end
    }

    /// Coordinate of sample `k`, exact at both ends.
    pub(crate) fn bound(&self, k: usize) -> f64 {
        if k + 1 == self.size { self.end } else { self.start + self.step * k as f64 }
    }

    /// Segment containing `x`, which must lie in `[start, end)`.
    pub(crate) fn segment(&self, x: f64) -> usize {
        let last = self.size - 2;
        let guess = ((x - self.start) / self.step).floor();
        let mut k = if guess < 0.0 { 0 } else { (guess as usize).min(last) };
        while k > 0 && x < self.bound(k) {
            k -= 1;
        }
        while k < last && x >= self.bound(k + 1) {
            k += 1;
        }
        k
    }

    /// Segments meeting `[lower, upper]`, in ascending order.
    pub(crate) fn overlapping(&self, lower: f64, upper: f64) -> impl Iterator<Item = usize> + '_ {
        let first = if lower < self.end { self.segment(lower.max(self.start)) } else { self.size - 1 };
        (first..self.size - 1).take_while(move |k| upper >= self.start && self.bound(*k) <= upper)
    }
}

/// Samples spaced evenly from `start` to `end`, interpolated on `[start, end)`
/// and zero elsewhere.
pub struct PeriodicallyInterpolated1DFunction<R: Value, X: Value> {
    grid: EvenGrid,
    interpolator: Interpolator,
    rs: Vec<R>,
    axis: PhantomData<X>
}

impl<R: Value, X: Value> PeriodicallyInterpolated1DFunction<R, X> {
    pub fn new(start: X, end: X, interpolator: Interpolator, rs: Vec<R>) -> Result<PeriodicallyInterpolated1DFunction<R, X>, MathError> {
        let grid = EvenGrid::new(start.to_f64(), end.to_f64(), rs.len())?;
        Ok(PeriodicallyInterpolated1DFunction { grid, interpolator, rs, axis: PhantomData })
    }

    pub fn step(&self) -> X {
        X::from_f64(self.grid.step())
    }

    fn segment_piece(&self, k: usize, i: &Interval<(X,)>) -> Primitive<'static, R, (X,)> {
        segment_piece(&self.interpolator, self.grid.bound(k), self.rs[k], self.grid.bound(k + 1), self.rs[k + 1], i)
    }
}

impl<R: Value, X: Value> Function<R, (X,)> for PeriodicallyInterpolated1DFunction<R, X> {
    fn value(&self, p: &Point<(X,)>) -> R {
        let x = p.get(0);
        if !self.grid.contains(x) {
            return R::zero();
        }
        let k = self.grid.segment(x);
        segment_value(&self.interpolator, self.grid.bound(k), self.rs[k], self.grid.bound(k + 1), self.rs[k + 1], x)
    }

    fn partition(&self, i: &Interval<(X,)>, callback: &mut PartitionCallback<'_, R, (X,)>) -> Result<(), MathError> {
        let before = i.clipped(0, f64::NEG_INFINITY, self.grid.start(), false, false);
        if !before.is_empty() {
            callback(&before, &Primitive::constant(R::zero()))?;
        }
        let (lower, upper) = i.extent(0);
        for k in self.grid.overlapping(lower, upper) {
            let i1 = i.clipped(0, self.grid.bound(k), self.grid.bound(k + 1), true, false);
            if !i1.is_empty() {
                callback(&i1, &self.segment_piece(k, &i1))?;
            }
        }
        let after = i.clipped(0, self.grid.end(), f64::INFINITY, true, false);
        if !after.is_empty() {
            callback(&after, &Primitive::constant(R::zero()))?;
        }
        Ok(())
    }

    fn is_finite(&self, _i: &Interval<(X,)>) -> Result<bool, MathError> {
        Ok(self.rs.iter().all(|r| r.is_finite()))
    }

    fn print_structure(&self, out: &mut dyn fmt::Write, _level: usize) -> fmt::Result {
        write!(
            out,
            "(PeriodicallyInterpolated1D, [{} … {}) every {}, {} samples, {})",
            X::from_f64(self.grid.start()),
            X::from_f64(self.grid.end()),
            X::from_f64(self.grid.step()),
            self.rs.len(),
            self.interpolator
        )
    }
}
