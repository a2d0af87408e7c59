use std::fmt;

use tracing::warn;

use crate::math::function::function::{
    Function,
    PartitionCallback,
    SharedFunction
};
use crate::math::function::matherror::MathError;
use crate::math::function::primitive::Primitive;
use crate::math::function::primitivefunctions::periodicallyinterpolated1dfunction::EvenGrid;
use crate::math::interval::Interval;
use crate::math::point::Point;
use crate::units::value::Value;

/// Replaces a function of `(X, Y)` by a grid of constant cells, each holding
/// the mean of the function over that cell. Zero outside the grid.
///
/// Grid lines are spaced evenly, `size_x` of them from `start_x` to `end_x`
/// and likewise along `Y`; cells are closed below and open above.
pub struct Rasterized2DFunction<R: Value, X: Value, Y: Value> {
    grid_x: EvenGrid,
    grid_y: EvenGrid,
    function: SharedFunction<R, (X, Y)>
}

impl<R: Value, X: Value, Y: Value> Rasterized2DFunction<R, X, Y> {
    pub fn new(start_x: X, end_x: X, size_x: usize,
               start_y: Y, end_y: Y, size_y: usize,
               function: SharedFunction<R, (X, Y)>) -> Result<Rasterized2DFunction<R, X, Y>, MathError> {
        Ok(Rasterized2DFunction {
            grid_x: EvenGrid::new(start_x.to_f64(), end_x.to_f64(), size_x)?,
            grid_y: EvenGrid::new(start_y.to_f64(), end_y.to_f64(), size_y)?,
            function
        })
    }

    fn cell(&self, kx: usize, ky: usize) -> Interval<(X, Y)> {
        Interval::new(
            Point::from_slice(&[self.grid_x.bound(kx), self.grid_y.bound(ky)]),
            Point::from_slice(&[self.grid_x.bound(kx + 1), self.grid_y.bound(ky + 1)]),
            0b11,
            0b00,
            0b00
        )
    }

    fn cell_mean(&self, kx: usize, ky: usize) -> Result<R, MathError> {
        self.function.mean(&self.cell(kx, ky))
    }
}

impl<R: Value, X: Value, Y: Value> Function<R, (X, Y)> for Rasterized2DFunction<R, X, Y> {
    fn value(&self, p: &Point<(X, Y)>) -> R {
        let (x, y) = (p.get(0), p.get(1));
        if !self.grid_x.contains(x) || !self.grid_y.contains(y) {
            return R::zero();
        }
        let (kx, ky) = (self.grid_x.segment(x), self.grid_y.segment(y));
        match self.cell_mean(kx, ky) {
            Ok(r) => r,
            Err(e) => {
                warn!(%e, x, y, "mean over the raster cell is undefined");
                R::from_f64(f64::NAN)
            }
        }
    }

    fn partition(&self, i: &Interval<(X, Y)>, callback: &mut PartitionCallback<'_, R, (X, Y)>) -> Result<(), MathError> {
        let (start_x, end_x) = (self.grid_x.start(), self.grid_x.end());
        let (start_y, end_y) = (self.grid_y.start(), self.grid_y.end());
        let band = i.clipped(0, start_x, end_x, true, false);
        let outside = [
            i.clipped(0, f64::NEG_INFINITY, start_x, false, false),
            band.clipped(1, f64::NEG_INFINITY, start_y, false, false),
            band.clipped(1, end_y, f64::INFINITY, true, false),
            i.clipped(0, end_x, f64::INFINITY, true, false)
        ];
        let (lower_x, upper_x) = i.extent(0);
        let (lower_y, upper_y) = i.extent(1);
        for (k, i1) in outside.iter().enumerate() {
            if !i1.is_empty() {
                callback(i1, &Primitive::constant(R::zero()))?;
            }
            // grid cells go between the bands below and above it
            if k == 1 {
                for ky in self.grid_y.overlapping(lower_y, upper_y) {
                    let row = band.clipped(1, self.grid_y.bound(ky), self.grid_y.bound(ky + 1), true, false);
                    if row.is_empty() {
                        continue;
                    }
                    for kx in self.grid_x.overlapping(lower_x, upper_x) {
                        let i2 = row.clipped(0, self.grid_x.bound(kx), self.grid_x.bound(kx + 1), true, false);
                        if !i2.is_empty() {
                            callback(&i2, &Primitive::constant(self.cell_mean(kx, ky)?))?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn print_structure(&self, out: &mut dyn fmt::Write, level: usize) -> fmt::Result {
        write!(
            out,
            "(Rasterized2D, {} x {} cells over [{} … {}) x [{} … {})\n{}",
            self.grid_x.size() - 1,
            self.grid_y.size() - 1,
            X::from_f64(self.grid_x.start()),
            X::from_f64(self.grid_x.end()),
            Y::from_f64(self.grid_y.start()),
            Y::from_f64(self.grid_y.end()),
            " ".repeat(level + 2)
        )?;
        self.function.print_structure(out, level + 2)?;
        write!(out, ")")
    }
}
