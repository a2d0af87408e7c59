use std::fmt;

use crate::math::domain::Domain;
use crate::math::function::function::{
    Function,
    PartitionCallback,
    SharedFunction
};
use crate::math::function::matherror::MathError;
use crate::math::function::primitive::Primitive;
use crate::math::function::primitivefunctions::bilinearfunction::BilinearFunction;
use crate::math::function::primitivefunctions::interpolated1dfunction::segment_value;
use crate::math::function::primitivefunctions::unilinearfunction::UnilinearFunction;
use crate::math::interpolator::Interpolator;
use crate::math::interval::Interval;
use crate::math::point::Point;
use crate::units::value::Value;

/// Replaces the shape of a function along one dimension with samples taken
/// every `step` from `lower` to `upper`, joined by an interpolator. Beyond
/// the grid the function is frozen at the nearest grid end.
///
/// This is the explicit way out when pieces have no closed-form combination:
/// a sampled piece that collapses to a single point on a grid line becomes a
/// constant there.
pub struct ApproximatedFunction<R: Value, D: Domain> {
    function: SharedFunction<R, D>,
    dimension: usize,
    lower: f64,
    upper: f64,
    step: f64,
    cells: usize,
    interpolator: Interpolator
}

impl<R: Value, D: Domain> ApproximatedFunction<R, D> {
    pub fn new(function: SharedFunction<R, D>,
               dimension: usize,
               lower: f64,
               upper: f64,
               step: f64,
               interpolator: Interpolator) -> Result<ApproximatedFunction<R, D>, MathError> {
        if dimension >= D::DIMS {
            return Err(MathError::InvalidArgument(format!("dimension {} is out of range for {} dimensions", dimension, D::DIMS)));
        }
        if !(step > 0.0) || !(lower < upper) || !lower.is_finite() || !upper.is_finite() {
            return Err(MathError::InvalidArgument(format!(
                "approximation grid [{} … {}] every {} is invalid",
                lower, upper, step
            )));
        }
        let mut cells = ((upper - lower) / step).ceil().max(1.0) as usize;
        while cells > 1 && lower + step * (cells - 1) as f64 >= upper {
            cells -= 1;
        }
        Ok(ApproximatedFunction { function, dimension, lower, upper, step, cells, interpolator })
    }

    /// Grid line `k`, exact at `upper`.
    fn bound(&self, k: usize) -> f64 {
        if k >= self.cells { self.upper } else { self.lower + self.step * k as f64 }
    }

    /// Cell containing `x`, which must lie in `[lower, upper]`.
    fn cell(&self, x: f64) -> usize {
        let last = self.cells - 1;
        let guess = ((x - self.lower) / self.step).floor();
        let mut k = if guess < 0.0 { 0 } else { (guess as usize).min(last) };
        while k > 0 && x < self.bound(k) {
            k -= 1;
        }
        while k < last && x >= self.bound(k + 1) {
            k += 1;
        }
        k
    }

    /// The piece `f` restricted to the grid line through `slice`.
    fn freeze(&self, f: &Primitive<'_, R, D>, slice: &Interval<D>, x: f64) -> Result<Primitive<'static, R, D>, MathError> {
        match f.frozen_along(self.dimension, x) {
            Some(g) => Ok(g),
            None if slice.lower() == slice.upper() => Ok(Primitive::constant(f.value(slice.lower()))),
            None => Err(MathError::unsupported_shape("approximation", f.kind()))
        }
    }

    /// Joins the frozen pieces on two neighbouring grid lines.
    fn join(&self, g1: &Primitive<'static, R, D>, g2: &Primitive<'static, R, D>, x1: f64, x2: f64) -> Result<Primitive<'static, R, D>, MathError> {
        use Primitive::*;
        let dim = self.dimension;
        if let (Constant(c1), Constant(c2)) = (g1, g2) {
            let (r1, r2) = (c1.constant_value(), c2.constant_value());
            return Ok(if self.interpolator.is_constant() {
                Primitive::constant(self.interpolator.inner_value(x1, r1, x2, r2))
            } else {
                Unilinear(UnilinearFunction::from_extent(dim, x1, x2, r1, r2))
            });
        }
        let unsupported = |g: &Primitive<'static, R, D>| MathError::unsupported_shape("approximation", g.kind());
        if self.interpolator.is_constant() {
            let shaped = if matches!(g1, Constant(_)) { g2 } else { g1 };
            return Err(unsupported(shaped));
        }
        let (other, lower, upper) = match (g1, g2) {
            (Unilinear(u1), Unilinear(u2)) if u1.dimension() != u2.dimension() => return Err(unsupported(g2)),
            (Unilinear(u), Constant(_)) | (Unilinear(u), Unilinear(_)) | (Constant(_), Unilinear(u)) => (u.dimension(), u.lower(), u.upper()),
            (Constant(_), _) | (Unilinear(_), _) => return Err(unsupported(g2)),
            _ => return Err(unsupported(g1))
        };
        let at = |g: &Primitive<'static, R, D>, x: f64| match g {
            Unilinear(u) => u.value_at(x),
            _ => g.value(&Point::zero())
        };
        Ok(Bilinear(BilinearFunction::from_extents(
            (other, lower, upper),
            (dim, x1, x2),
            [at(g1, lower), at(g2, lower), at(g1, upper), at(g2, upper)]
        )))
    }

    /// Pieces of `region`, which lies beyond one end of the grid, frozen at `x`.
    fn partition_frozen(&self, region: &Interval<D>, x: f64, callback: &mut PartitionCallback<'_, R, D>) -> Result<(), MathError> {
        if region.is_empty() {
            return Ok(());
        }
        let along = region.project::<(f64,)>(&[self.dimension]);
        self.function.partition(&region.fixed_at(self.dimension, x), &mut |i1, f1| {
            let g = self.freeze(f1, i1, x)?;
            callback(&along.embedded(i1, &[self.dimension]), &g)
        })
    }

    fn partition_cell(&self, cell: &Interval<D>, x1: f64, x2: f64, callback: &mut PartitionCallback<'_, R, D>) -> Result<(), MathError> {
        let dim = self.dimension;
        let along = cell.project::<(f64,)>(&[dim]);
        self.function.partition(&cell.fixed_at(dim, x1), &mut |i1, f1| {
            let g1 = self.freeze(f1, i1, x1)?;
            self.function.partition(&i1.fixed_at(dim, x2), &mut |i2, f2| {
                let g2 = self.freeze(f2, i2, x2)?;
                let i3 = along.embedded(i2, &[dim]);
                callback(&i3, &self.join(&g1, &g2, x1, x2)?.simplified(&i3))
            })
        })
    }
}

impl<R: Value, D: Domain> Function<R, D> for ApproximatedFunction<R, D> {
    fn domain(&self) -> Interval<D> {
        self.function.domain()
    }

    fn value(&self, p: &Point<D>) -> R {
        let x = p.get(self.dimension);
        if x < self.lower {
            self.function.value(&p.with(self.dimension, self.lower))
        } else if x > self.upper {
            self.function.value(&p.with(self.dimension, self.upper))
        } else {
            let k = self.cell(x);
            let (x1, x2) = (self.bound(k), self.bound(k + 1));
            let r1 = self.function.value(&p.with(self.dimension, x1));
            let r2 = self.function.value(&p.with(self.dimension, x2));
            segment_value(&self.interpolator, x1, r1, x2, r2, x)
        }
    }

    fn partition(&self, i: &Interval<D>, callback: &mut PartitionCallback<'_, R, D>) -> Result<(), MathError> {
        let dim = self.dimension;
        let (lower, upper) = i.extent(dim);
        self.partition_frozen(&i.clipped(dim, f64::NEG_INFINITY, self.lower, false, false), self.lower, callback)?;
        if !i.clipped(dim, self.lower, self.upper, true, true).is_empty() {
            let mut k = self.cell(lower.max(self.lower));
            while k < self.cells && self.bound(k) <= upper {
                let (x1, x2) = (self.bound(k), self.bound(k + 1));
                let cell = i.clipped(dim, x1, x2, true, k + 1 == self.cells);
                if !cell.is_empty() {
                    self.partition_cell(&cell, x1, x2, callback)?;
                }
                k += 1;
            }
        }
        self.partition_frozen(&i.clipped(dim, self.upper, f64::INFINITY, false, false), self.upper, callback)
    }

    fn print_structure(&self, out: &mut dyn fmt::Write, level: usize) -> fmt::Result {
        write!(
            out,
            "(Approximated, dim {}: [{} … {}] every {}, {}\n{}",
            self.dimension,
            D::format_coordinate(self.dimension, self.lower),
            D::format_coordinate(self.dimension, self.upper),
            self.step,
            self.interpolator,
            " ".repeat(level + 2)
        )?;
        self.function.print_structure(out, level + 2)?;
        write!(out, ")")
    }
}
