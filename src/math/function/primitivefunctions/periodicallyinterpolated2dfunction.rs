use std::fmt;
use std::marker::PhantomData;

use crate::math::function::function::{
    Function,
    PartitionCallback
};
use crate::math::function::matherror::{
    FunctionKind,
    MathError
};
use crate::math::function::primitive::Primitive;
use crate::math::function::primitivefunctions::bilinearfunction::BilinearFunction;
use crate::math::function::primitivefunctions::interpolated1dfunction::segment_value;
use crate::math::function::primitivefunctions::periodicallyinterpolated1dfunction::EvenGrid;
use crate::math::interpolator::{
    Interpolator,
    InterpolatorType
};
use crate::math::interval::Interval;
use crate::math::point::Point;
use crate::units::value::Value;

/// Samples on an evenly spaced grid over `[start_x, end_x) x [start_y, end_y)`,
/// zero elsewhere. Sample `(kx, ky)` is stored at `rs[size_x * ky + kx]`.
///
/// A cell is interpolated along `X` on its lower and upper row first, then
/// along `Y` between the two results. Partitions support cells that are
/// constant in both directions or linear in both directions.
pub struct PeriodicallyInterpolated2DFunction<R: Value, X: Value, Y: Value> {
    grid_x: EvenGrid,
    grid_y: EvenGrid,
    interpolator_x: Interpolator,
    interpolator_y: Interpolator,
    rs: Vec<R>,
    axes: PhantomData<(X, Y)>
}

impl<R: Value, X: Value, Y: Value> PeriodicallyInterpolated2DFunction<R, X, Y> {
    pub fn new(start_x: X, end_x: X, size_x: usize, interpolator_x: Interpolator,
               start_y: Y, end_y: Y, size_y: usize, interpolator_y: Interpolator,
               rs: Vec<R>) -> Result<PeriodicallyInterpolated2DFunction<R, X, Y>, MathError> {
        let grid_x = EvenGrid::new(start_x.to_f64(), end_x.to_f64(), size_x)?;
        let grid_y = EvenGrid::new(start_y.to_f64(), end_y.to_f64(), size_y)?;
        if rs.len() != size_x * size_y {
            return Err(MathError::InvalidArgument(format!(
                "{} x {} grid needs {} samples, got {}",
                size_x, size_y, size_x * size_y, rs.len()
            )));
        }
        Ok(PeriodicallyInterpolated2DFunction { grid_x, grid_y, interpolator_x, interpolator_y, rs, axes: PhantomData })
    }

    fn sample(&self, kx: usize, ky: usize) -> R {
        self.rs[self.grid_x.size() * ky + kx]
    }

    fn row_value(&self, kx: usize, ky: usize, x: f64) -> R {
        let (x1, x2) = (self.grid_x.bound(kx), self.grid_x.bound(kx + 1));
        segment_value(&self.interpolator_x, x1, self.sample(kx, ky), x2, self.sample(kx + 1, ky), x)
    }

    fn cell_value(&self, kx: usize, ky: usize, x: f64, y: f64) -> R {
        let (y1, y2) = (self.grid_y.bound(ky), self.grid_y.bound(ky + 1));
        segment_value(&self.interpolator_y, y1, self.row_value(kx, ky, x), y2, self.row_value(kx, ky + 1, x), y)
    }

    fn cell_piece(&self, kx: usize, ky: usize, i: &Interval<(X, Y)>) -> Result<Primitive<'static, R, (X, Y)>, MathError> {
        let (x1, x2) = (self.grid_x.bound(kx), self.grid_x.bound(kx + 1));
        let (y1, y2) = (self.grid_y.bound(ky), self.grid_y.bound(ky + 1));
        let linear = |interpolator: &Interpolator| interpolator.interpolator_type() == InterpolatorType::Linear;
        if self.interpolator_x.is_constant() && self.interpolator_y.is_constant() {
            Ok(Primitive::constant(self.cell_value(kx, ky, (x1 + x2) / 2.0, (y1 + y2) / 2.0)))
        } else if linear(&self.interpolator_x) && linear(&self.interpolator_y) {
            let corners = [self.sample(kx, ky), self.sample(kx, ky + 1), self.sample(kx + 1, ky), self.sample(kx + 1, ky + 1)];
            Ok(Primitive::Bilinear(BilinearFunction::from_extents((0, x1, x2), (1, y1, y2), corners)).simplified(i))
        } else {
            Err(MathError::unsupported_shape("mixed 2D interpolation", FunctionKind::Sampled))
        }
    }
}

impl<R: Value, X: Value, Y: Value> Function<R, (X, Y)> for PeriodicallyInterpolated2DFunction<R, X, Y> {
    fn value(&self, p: &Point<(X, Y)>) -> R {
        let (x, y) = (p.get(0), p.get(1));
        if !self.grid_x.contains(x) || !self.grid_y.contains(y) {
            return R::zero();
        }
        self.cell_value(self.grid_x.segment(x), self.grid_y.segment(y), x, y)
    }

    fn partition(&self, i: &Interval<(X, Y)>, callback: &mut PartitionCallback<'_, R, (X, Y)>) -> Result<(), MathError> {
        let band = i.clipped(0, self.grid_x.start(), self.grid_x.end(), true, false);
        let left = i.clipped(0, f64::NEG_INFINITY, self.grid_x.start(), false, false);
        let below = band.clipped(1, f64::NEG_INFINITY, self.grid_y.start(), false, false);
        for i1 in [left, below] {
            if !i1.is_empty() {
                callback(&i1, &Primitive::constant(R::zero()))?;
            }
        }
        let (lower_x, upper_x) = i.extent(0);
        let (lower_y, upper_y) = i.extent(1);
        for ky in self.grid_y.overlapping(lower_y, upper_y) {
            let row = band.clipped(1, self.grid_y.bound(ky), self.grid_y.bound(ky + 1), true, false);
            if row.is_empty() {
                continue;
            }
            for kx in self.grid_x.overlapping(lower_x, upper_x) {
                let i2 = row.clipped(0, self.grid_x.bound(kx), self.grid_x.bound(kx + 1), true, false);
                if !i2.is_empty() {
                    callback(&i2, &self.cell_piece(kx, ky, &i2)?)?;
                }
            }
        }
        let above = band.clipped(1, self.grid_y.end(), f64::INFINITY, true, false);
        let right = i.clipped(0, self.grid_x.end(), f64::INFINITY, true, false);
        for i1 in [above, right] {
            if !i1.is_empty() {
                callback(&i1, &Primitive::constant(R::zero()))?;
            }
        }
        Ok(())
    }

    fn is_finite(&self, _i: &Interval<(X, Y)>) -> Result<bool, MathError> {
        Ok(self.rs.iter().all(|r| r.is_finite()))
    }

    fn print_structure(&self, out: &mut dyn fmt::Write, _level: usize) -> fmt::Result {
        write!(
            out,
            "(PeriodicallyInterpolated2D, {} x {} samples over [{} … {}) x [{} … {}), {} then {})",
            self.grid_x.size(),
            self.grid_y.size(),
            X::from_f64(self.grid_x.start()),
            X::from_f64(self.grid_x.end()),
            Y::from_f64(self.grid_y.start()),
            Y::from_f64(self.grid_y.end()),
            self.interpolator_x,
            self.interpolator_y
        )
    }
}
