use std::fmt;

use crate::math::function::function::{
    Function,
    PartitionCallback,
    SharedFunction
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

/// Moves a two-dimensional function along `Y` by the value a modulator takes
/// at `x`: the result at `(x, y)` is `function(x, y - modulator(x))`.
///
/// The modulator has to be piecewise constant; over each of its pieces the
/// function is simply shifted.
pub struct DomainModulated2DFunction<R: Value, X: Value, Y: Value> {
    function: SharedFunction<R, (X, Y)>,
    modulator: SharedFunction<Y, (X,)>
}

type SlabCallback<'c, X, Y> = dyn FnMut(&Interval<(X, Y)>, &Point<(X, Y)>) -> Result<(), MathError> + 'c;

impl<R: Value, X: Value, Y: Value> DomainModulated2DFunction<R, X, Y> {
    pub fn new(function: SharedFunction<R, (X, Y)>, modulator: SharedFunction<Y, (X,)>) -> DomainModulated2DFunction<R, X, Y> {
        DomainModulated2DFunction { function, modulator }
    }

    /// Splits `i` along `X` by the modulator's pieces and reports each slab
    /// with the shift that applies over it.
    fn for_each_slab(&self, i: &Interval<(X, Y)>, callback: &mut SlabCallback<'_, X, Y>) -> Result<(), MathError> {
        self.modulator.partition(&i.project(&[0]), &mut |i1, f1| match f1 {
            Primitive::Constant(c) => {
                let shift = Point::zero().with(1, c.constant_value().to_f64());
                callback(&i1.embedded(i, &[0]), &shift)
            },
            _ => Err(MathError::unsupported_shape("domain modulation", f1.kind()))
        })
    }

    /// Each slab of `i` in the wrapped function's coordinates.
    fn for_each_source(&self, i: &Interval<(X, Y)>, callback: &mut dyn FnMut(&Interval<(X, Y)>) -> Result<(), MathError>) -> Result<(), MathError> {
        self.for_each_slab(i, &mut |slab, shift| callback(&slab.shifted(&(Point::zero() - *shift))))
    }
}

impl<R: Value, X: Value, Y: Value> Function<R, (X, Y)> for DomainModulated2DFunction<R, X, Y> {
    fn value(&self, p: &Point<(X, Y)>) -> R {
        let modulation = self.modulator.value(&p.project(&[0]));
        self.function.value(&p.with(1, p.get(1) - modulation.to_f64()))
    }

    fn partition(&self, i: &Interval<(X, Y)>, callback: &mut PartitionCallback<'_, R, (X, Y)>) -> Result<(), MathError> {
        self.for_each_slab(i, &mut |slab, shift| {
            self.function.partition(&slab.shifted(&(Point::zero() - *shift)), &mut |i1, f1| {
                let i2 = i1.shifted(shift);
                match f1.shifted(shift) {
                    Some(f2) => callback(&i2, &f2),
                    None => callback(&i2, &Primitive::Sampled(self))
                }
            })
        })
    }

    fn is_finite(&self, i: &Interval<(X, Y)>) -> Result<bool, MathError> {
        let mut result = true;
        self.for_each_source(i, &mut |source| {
            result &= self.function.is_finite(source)?;
            Ok(())
        })?;
        Ok(result)
    }

    fn is_non_zero(&self, i: &Interval<(X, Y)>) -> Result<bool, MathError> {
        let mut result = true;
        self.for_each_source(i, &mut |source| {
            result &= self.function.is_non_zero(source)?;
            Ok(())
        })?;
        Ok(result)
    }

    fn min(&self, i: &Interval<(X, Y)>) -> Result<R, MathError> {
        let mut result = R::upper_bound();
        self.for_each_source(i, &mut |source| {
            result = min_nan(result, self.function.min(source)?);
            Ok(())
        })?;
        Ok(result)
    }

    fn max(&self, i: &Interval<(X, Y)>) -> Result<R, MathError> {
        let mut result = R::lower_bound();
        self.for_each_source(i, &mut |source| {
            result = max_nan(result, self.function.max(source)?);
            Ok(())
        })?;
        Ok(result)
    }

    fn integral(&self, i: &Interval<(X, Y)>) -> Result<R, MathError> {
        let mut result = R::zero();
        self.for_each_source(i, &mut |source| {
            result = result + self.function.integral(source)?;
            Ok(())
        })?;
        Ok(result)
    }

    fn print_structure(&self, out: &mut dyn fmt::Write, level: usize) -> fmt::Result {
        write!(out, "(~ ")?;
        self.function.print_structure(out, level + 3)?;
        write!(out, "\n{}", " ".repeat(level + 3))?;
        self.modulator.print_structure(out, level + 3)?;
        write!(out, ")")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::math::function::primitivefunctions::boxcarfunction::{
        Boxcar1DFunction,
        Boxcar2DFunction
    };
    use crate::math::function::primitivefunctions::unilinearfunction::UnilinearFunction;

    type M = DomainModulated2DFunction<f64, f64, f64>;

    fn band() -> SharedFunction<f64, (f64, f64)> {
        Arc::new(Boxcar2DFunction::<f64, f64, f64>::new(0.0, 10.0, 2.0, 4.0, 1.0).unwrap())
    }

    fn square() -> Interval<(f64, f64)> {
        Interval::closed(Point::new((0.0, 0.0)), Point::new((10.0, 10.0)))
    }

    #[test]
    fn band_is_moved_where_the_modulator_is_on() {
        let modulator: SharedFunction<f64, (f64,)> = Arc::new(Boxcar1DFunction::<f64, f64>::new(5.0, 10.0, 3.0).unwrap());
        let f = M::new(band(), modulator);
        assert_eq!(f.value(&Point::new((2.0, 3.0))), 1.0);
        assert_eq!(f.value(&Point::new((6.0, 3.0))), 0.0);
        assert_eq!(f.value(&Point::new((6.0, 6.0))), 1.0);
        let mut volume = 0.0;
        f.partition(&square(), &mut |i1, f1| {
            for p in i1.corners().iter().chain([i1.center()].iter()) {
                if i1.contains(p) {
                    assert_eq!(f1.value(p), f.value(p));
                }
            }
            volume += i1.volume();
            Ok(())
        }).unwrap();
        assert_eq!(volume, 100.0);
        assert_eq!(f.integral(&square()).unwrap(), 20.0);
    }

    #[test]
    fn non_constant_modulators_are_rejected() {
        let modulator: SharedFunction<f64, (f64,)> = Arc::new(UnilinearFunction::<f64, (f64,)>::from_extent(0, 0.0, 10.0, 0.0, 1.0));
        let f = M::new(band(), modulator);
        assert!(matches!(f.integral(&square()), Err(MathError::UnsupportedShape { .. })));
    }
}
