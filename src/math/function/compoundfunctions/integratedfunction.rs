use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::warn;

use crate::math::function::function::{
    Function,
    PartitionCallback,
    SharedFunction
};
use crate::math::function::matherror::MathError;
use crate::math::function::primitive::Primitive;
use crate::math::function::primitivefunctions::unilinearfunction::UnilinearFunction;
use crate::math::interval::Interval;
use crate::math::point::Point;
use crate::units::value::Value;

/// Integrates a function of `(X, Y)` over the whole `Y` axis, leaving a
/// function of `X`.
pub struct IntegratedFunction<R: Value, X: Value, Y: Value> {
    function: SharedFunction<R, (X, Y)>,
    axis: PhantomData<X>
}

impl<R: Value, X: Value, Y: Value> IntegratedFunction<R, X, Y> {
    pub fn new(function: SharedFunction<R, (X, Y)>) -> IntegratedFunction<R, X, Y> {
        IntegratedFunction { function, axis: PhantomData }
    }

    fn line(x: f64) -> Interval<(X, Y)> {
        Interval::unbounded().fixed_at(0, x)
    }

    fn strip(i: &Interval<(X,)>) -> Interval<(X, Y)> {
        i.embedded(&Interval::unbounded(), &[0])
    }

    /// Every `X` coordinate where a piece of the wrapped function starts or
    /// ends within the strip over `i`, in ascending order.
    fn breakpoints(&self, i: &Interval<(X,)>) -> Result<Vec<f64>, MathError> {
        let mut xs = Vec::new();
        self.function.partition(&Self::strip(i), &mut |i1, _| {
            xs.extend([i1.lower().get(0), i1.upper().get(0)]);
            Ok(())
        })?;
        xs.sort_by(f64::total_cmp);
        xs.dedup();
        Ok(xs)
    }

    /// Integrals along `Y` at both ends of the slab `[x1, x2)`, which no piece
    /// boundary crosses.
    fn slab_integrals(&self, i: &Interval<(X,)>, x1: f64, x2: f64) -> Result<(R, R), MathError> {
        let source = Self::strip(&i.clipped(0, x1, x2, true, false));
        let (mut r1, mut r2) = (R::zero(), R::zero());
        self.function.partition(&source, &mut |i1, f1| match f1 {
            Primitive::Sampled(_) => Err(MathError::unsupported_shape("integration", f1.kind())),
            Primitive::Reciprocal(q) if q.dimension() == 0 => Err(MathError::unsupported_shape("integration", f1.kind())),
            _ => {
                r1 = r1 + f1.integral(&i1.fixed_at(0, x1))?;
                r2 = r2 + f1.integral(&i1.fixed_at(0, x2))?;
                Ok(())
            }
        })?;
        Ok((r1, r2))
    }
}

impl<R: Value, X: Value, Y: Value> Function<R, (X,)> for IntegratedFunction<R, X, Y> {
    fn value(&self, p: &Point<(X,)>) -> R {
        match self.function.integral(&Self::line(p.get(0))) {
            Ok(r) => r,
            Err(e) => {
                warn!(%e, x = p.get(0), "integral along the line is undefined");
                R::from_f64(f64::NAN)
            }
        }
    }

    fn partition(&self, i: &Interval<(X,)>, callback: &mut PartitionCallback<'_, R, (X,)>) -> Result<(), MathError> {
        let xs = self.breakpoints(i)?;
        if xs.len() < 2 {
            let (lower, _) = i.extent(0);
            return callback(i, &Primitive::constant(self.function.integral(&Self::line(lower))?));
        }
        for (k, window) in xs.windows(2).enumerate() {
            let (x1, x2) = (window[0], window[1]);
            let slab = i.clipped(0, x1, x2, true, k + 2 == xs.len());
            if slab.is_empty() {
                continue;
            }
            let (r1, r2) = self.slab_integrals(i, x1, x2)?;
            let piece = Primitive::Unilinear(UnilinearFunction::from_extent(0, x1, x2, r1, r2)).simplified(&slab);
            callback(&slab, &piece)?;
        }
        Ok(())
    }

    fn integral(&self, i: &Interval<(X,)>) -> Result<R, MathError> {
        self.function.integral(&Self::strip(i))
    }

    fn print_structure(&self, out: &mut dyn fmt::Write, level: usize) -> fmt::Result {
        write!(out, "(Integrated\n{}", " ".repeat(level + 2))?;
        self.function.print_structure(out, level + 2)?;
        write!(out, ")")
    }
}

/// Integrates `function` over its second axis.
pub fn integrate<R: Value, X: Value, Y: Value>(function: &SharedFunction<R, (X, Y)>) -> SharedFunction<R, (X,)> {
    Arc::new(IntegratedFunction::<R, X, Y>::new(function.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::function::compoundfunctions::combined2dfunction::Combined2DFunction;
    use crate::math::function::matherror::FunctionKind;
    use crate::math::function::primitivefunctions::boxcarfunction::{
        Boxcar1DFunction,
        Boxcar2DFunction
    };
    use crate::math::function::primitivefunctions::unilinearfunction::UnilinearFunction;

    fn closed(lower: f64, upper: f64) -> Interval<(f64,)> {
        Interval::closed(Point::new((lower,)), Point::new((upper,)))
    }

    #[test]
    fn boxcar_integrates_into_a_pulse() {
        let boxcar: SharedFunction<f64, (f64, f64)> = Arc::new(Boxcar2DFunction::<f64, f64, f64>::new(1.0, 3.0, 0.0, 2.0, 2.0).unwrap());
        let f = integrate(&boxcar);
        assert_eq!(f.value(&Point::new((2.0,))), 4.0);
        assert_eq!(f.value(&Point::new((3.0,))), 0.0);
        let mut pieces = Vec::new();
        f.partition(&closed(0.0, 4.0), &mut |i1, f1| {
            pieces.push((i1.extent(0), f1.value(&i1.center())));
            Ok(())
        }).unwrap();
        assert_eq!(pieces, vec![((0.0, 1.0), 0.0), ((1.0, 3.0), 4.0), ((3.0, 4.0), 0.0)]);
        assert_eq!(f.integral(&closed(0.0, 4.0)).unwrap(), 8.0);
    }

    #[test]
    fn linear_dependence_on_x_survives() {
        let ramp: SharedFunction<f64, (f64,)> = Arc::new(UnilinearFunction::<f64, (f64,)>::from_extent(0, 0.0, 1.0, 0.0, 1.0));
        let boxcar: SharedFunction<f64, (f64,)> = Arc::new(Boxcar1DFunction::<f64, f64>::new(0.0, 2.0, 1.0).unwrap());
        let product: SharedFunction<f64, (f64, f64)> = Arc::new(Combined2DFunction::new(ramp, boxcar));
        let f = integrate(&product);
        f.partition(&closed(0.0, 1.0), &mut |i1, f1| {
            assert_eq!(f1.kind(), FunctionKind::Unilinear);
            assert_eq!(f1.value(i1.upper()), 2.0);
            Ok(())
        }).unwrap();
        assert_eq!(f.value(&Point::new((0.5,))), 1.0);
        assert_eq!(f.integral(&closed(0.0, 1.0)).unwrap(), 1.0);
    }

    #[test]
    fn point_query_gives_one_constant() {
        let boxcar: SharedFunction<f64, (f64, f64)> = Arc::new(Boxcar2DFunction::<f64, f64, f64>::new(1.0, 3.0, 0.0, 2.0, 2.0).unwrap());
        let f = integrate(&boxcar);
        let mut values = Vec::new();
        f.partition(&Interval::point(Point::new((2.0,))), &mut |_, f1| {
            values.push(f1.value(&Point::new((2.0,))));
            Ok(())
        }).unwrap();
        assert_eq!(values, vec![4.0]);
    }
}
