use std::fmt;

use crate::math::function::combination;
use crate::math::function::function::{
    Function,
    PartitionCallback,
    SharedFunction,
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

/// Outer product `function_x(x) * function_y(y)` of two one-dimensional
/// functions.
///
/// The partition is the grid of both partitions. Because the product is
/// separable, every derived query is answered from the two factors directly,
/// which also covers cells whose pieces have no closed form.
pub struct Combined2DFunction<R: Value, X: Value, Y: Value> {
    function_x: SharedFunction<R, (X,)>,
    function_y: SharedFunction<f64, (Y,)>
}

impl<R: Value, X: Value, Y: Value> Combined2DFunction<R, X, Y> {
    pub fn new(function_x: SharedFunction<R, (X,)>, function_y: SharedFunction<f64, (Y,)>) -> Combined2DFunction<R, X, Y> {
        Combined2DFunction { function_x, function_y }
    }

    fn split(i: &Interval<(X, Y)>) -> (Interval<(X,)>, Interval<(Y,)>) {
        (i.project(&[0]), i.project(&[1]))
    }

    /// Extremes of `r * k` for `r` in `[r1, r2]` and `k` in `[k1, k2]`.
    fn products(r: (R, R), k: (f64, f64)) -> [R; 4] {
        [r.0 * k.0, r.0 * k.1, r.1 * k.0, r.1 * k.1]
    }
}

impl<R: Value, X: Value, Y: Value> Function<R, (X, Y)> for Combined2DFunction<R, X, Y> {
    fn domain(&self) -> Interval<(X, Y)> {
        let domain = Interval::unbounded();
        let domain = self.function_x.domain().embedded(&domain, &[0]);
        self.function_y.domain().embedded(&domain, &[1])
    }

    fn range(&self) -> ValueRange<R> {
        let (rx, ry) = (self.function_x.range(), self.function_y.range());
        let products = Self::products((rx.lower(), rx.upper()), (ry.lower(), ry.upper()));
        if products.iter().any(|r| r.is_nan()) {
            return ValueRange::unbounded();
        }
        ValueRange::new(products.into_iter().fold(R::upper_bound(), min_nan), products.into_iter().fold(R::lower_bound(), max_nan))
    }

    fn value(&self, p: &Point<(X, Y)>) -> R {
        self.function_x.value(&p.project(&[0])) * self.function_y.value(&p.project(&[1]))
    }

    fn partition(&self, i: &Interval<(X, Y)>, callback: &mut PartitionCallback<'_, R, (X, Y)>) -> Result<(), MathError> {
        let (ix, iy) = Self::split(i);
        self.function_x.partition(&ix, &mut |ix1, fx1| {
            let gx: Option<Primitive<'static, R, (X, Y)>> = fx1.reembedded(&[Some(0)]);
            let row = ix1.embedded(i, &[0]);
            self.function_y.partition(&iy, &mut |iy1, fy1| {
                let gy: Option<Primitive<'static, f64, (X, Y)>> = fy1.reembedded(&[Some(1)]);
                let cell = iy1.embedded(&row, &[1]);
                match (&gx, gy) {
                    (Some(gx), Some(gy)) => callback(&cell, &combination::multiply(gx, &gy, &cell)?),
                    _ => callback(&cell, &Primitive::Sampled(self))
                }
            })
        })
    }

    fn is_finite(&self, i: &Interval<(X, Y)>) -> Result<bool, MathError> {
        let (ix, iy) = Self::split(i);
        Ok(self.function_x.is_finite(&ix)? && self.function_y.is_finite(&iy)?)
    }

    fn is_non_zero(&self, i: &Interval<(X, Y)>) -> Result<bool, MathError> {
        let (ix, iy) = Self::split(i);
        Ok(self.function_x.is_non_zero(&ix)? && self.function_y.is_non_zero(&iy)?)
    }

    fn min(&self, i: &Interval<(X, Y)>) -> Result<R, MathError> {
        let (ix, iy) = Self::split(i);
        let rx = (self.function_x.min(&ix)?, self.function_x.max(&ix)?);
        let ry = (self.function_y.min(&iy)?, self.function_y.max(&iy)?);
        Ok(Self::products(rx, ry).into_iter().fold(R::upper_bound(), min_nan))
    }

    fn max(&self, i: &Interval<(X, Y)>) -> Result<R, MathError> {
        let (ix, iy) = Self::split(i);
        let rx = (self.function_x.min(&ix)?, self.function_x.max(&ix)?);
        let ry = (self.function_y.min(&iy)?, self.function_y.max(&iy)?);
        Ok(Self::products(rx, ry).into_iter().fold(R::lower_bound(), max_nan))
    }

    fn integral(&self, i: &Interval<(X, Y)>) -> Result<R, MathError> {
        let (ix, iy) = Self::split(i);
        let rx = self.function_x.integral(&ix)?;
        if rx == R::zero() {
            return Ok(rx);
        }
        let ry = self.function_y.integral(&iy)?;
        if ry == 0.0 { Ok(R::zero()) } else { Ok(rx * ry) }
    }

    fn print_structure(&self, out: &mut dyn fmt::Write, level: usize) -> fmt::Result {
        write!(out, "(# ")?;
        self.function_x.print_structure(out, level + 3)?;
        write!(out, "\n{}", " ".repeat(level + 3))?;
        self.function_y.print_structure(out, level + 3)?;
        write!(out, ")")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::math::function::matherror::FunctionKind;
    use crate::math::function::primitivefunctions::boxcarfunction::Boxcar1DFunction;
    use crate::math::function::primitivefunctions::gaussfunction::GaussFunction;
    use crate::math::function::primitivefunctions::unilinearfunction::UnilinearFunction;

    type C = Combined2DFunction<f64, f64, f64>;

    fn square(upper: f64) -> Interval<(f64, f64)> {
        Interval::closed(Point::new((0.0, 0.0)), Point::new((upper, upper)))
    }

    #[test]
    fn boxcars_combine_into_a_grid() {
        let fx: SharedFunction<f64, (f64,)> = Arc::new(Boxcar1DFunction::<f64, f64>::new(1.0, 3.0, 2.0).unwrap());
        let fy: SharedFunction<f64, (f64,)> = Arc::new(Boxcar1DFunction::<f64, f64>::new(0.0, 2.0, 0.5).unwrap());
        let f = C::new(fx, fy);
        assert_eq!(f.value(&Point::new((2.0, 1.0))), 1.0);
        let mut pieces = 0;
        let mut volume = 0.0;
        f.partition(&square(4.0), &mut |i1, f1| {
            assert_eq!(f1.kind(), FunctionKind::Constant);
            assert_eq!(f1.value(&i1.center()), f.value(&i1.center()));
            volume += i1.volume();
            pieces += 1;
            Ok(())
        }).unwrap();
        assert_eq!((pieces, volume), (6, 16.0));
        assert_eq!(f.integral(&square(4.0)).unwrap(), 4.0);
    }

    #[test]
    fn ramps_on_both_axes_become_bilinear() {
        let fx: SharedFunction<f64, (f64,)> = Arc::new(UnilinearFunction::<f64, (f64,)>::from_extent(0, 0.0, 1.0, 0.0, 1.0));
        let fy: SharedFunction<f64, (f64,)> = Arc::new(UnilinearFunction::<f64, (f64,)>::from_extent(0, 0.0, 1.0, 1.0, 3.0));
        let f = C::new(fx, fy);
        f.partition(&square(1.0), &mut |i1, f1| {
            assert_eq!(f1.kind(), FunctionKind::Bilinear);
            assert_eq!(f1.value(i1.upper()), 3.0);
            Ok(())
        }).unwrap();
        assert_eq!(f.max(&square(1.0)).unwrap(), 3.0);
        assert_eq!(f.integral(&square(1.0)).unwrap(), 1.0);
    }

    #[test]
    fn sampled_cells_are_answered_by_separation() {
        let fx: SharedFunction<f64, (f64,)> = Arc::new(GaussFunction::<f64, f64>::new(0.0, 1.0).unwrap());
        let fy: SharedFunction<f64, (f64,)> = Arc::new(Boxcar1DFunction::<f64, f64>::new(0.0, 2.0, 3.0).unwrap());
        let f = C::new(fx, fy);
        let all = Interval::unbounded();
        assert!((f.integral(&all).unwrap() - 6.0).abs() < 1e-12);
        assert!(f.is_finite(&all).unwrap());
    }
}
