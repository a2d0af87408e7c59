use std::fmt;

use crate::math::domain::Domain;
use crate::math::function::combination;
use crate::math::function::function::{
    Function,
    PartitionCallback,
    SharedFunction
};
use crate::math::function::matherror::MathError;
use crate::math::interval::Interval;
use crate::math::point::Point;
use crate::units::value::Value;

/// `f1 * f2` where the second factor is dimensionless.
pub struct MultipliedFunction<R: Value, D: Domain> {
    function1: SharedFunction<R, D>,
    function2: SharedFunction<f64, D>
}

impl<R: Value, D: Domain> MultipliedFunction<R, D> {
    pub fn new(function1: SharedFunction<R, D>, function2: SharedFunction<f64, D>) -> MultipliedFunction<R, D> {
        MultipliedFunction { function1, function2 }
    }

    pub fn function1(&self) -> &SharedFunction<R, D> {
        &self.function1
    }

    pub fn function2(&self) -> &SharedFunction<f64, D> {
        &self.function2
    }
}

impl<R: Value, D: Domain> Function<R, D> for MultipliedFunction<R, D> {
    fn domain(&self) -> Interval<D> {
        self.function1.domain().intersect(&self.function2.domain())
    }

    fn value(&self, p: &Point<D>) -> R {
        self.function1.value(p) * self.function2.value(p)
    }

    fn partition(&self, i: &Interval<D>, callback: &mut PartitionCallback<'_, R, D>) -> Result<(), MathError> {
        self.function1.partition(i, &mut |i1, f1| {
            if f1.is_zero() && self.function2.is_finite(i1)? {
                return callback(i1, f1);
            }
            self.function2.partition(i1, &mut |i2, f2| {
                let g = combination::multiply(f1, f2, i2)?;
                callback(i2, &g)
            })
        })
    }

    fn is_finite(&self, i: &Interval<D>) -> Result<bool, MathError> {
        Ok(self.function1.is_finite(i)? && self.function2.is_finite(i)?)
    }

    fn print_structure(&self, out: &mut dyn fmt::Write, level: usize) -> fmt::Result {
        write!(out, "(* ")?;
        self.function1.print_structure(out, level + 3)?;
        write!(out, "\n{}", " ".repeat(level + 3))?;
        self.function2.print_structure(out, level + 3)?;
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

    #[test]
    fn zero_factor_skips_the_sampled_side() {
        let pulse: SharedFunction<f64, (f64,)> = Arc::new(Boxcar1DFunction::<f64, f64>::new(0.0, 1.0, 2.0).unwrap());
        let gauss: SharedFunction<f64, (f64,)> = Arc::new(GaussFunction::<f64, f64>::new(0.0, 1.0).unwrap());
        let f = MultipliedFunction::new(pulse, gauss);
        let mut kinds = Vec::new();
        let i = Interval::closed(Point::new((-2.0,)), Point::new((-1.0,)));
        f.partition(&i, &mut |_, g| {
            kinds.push(g.kind());
            Ok(())
        }).unwrap();
        assert_eq!(kinds, vec![FunctionKind::Constant]);
        assert!(f.partition(&Interval::closed(Point::new((0.0,)), Point::new((1.0,))), &mut |_, _| Ok(())).is_err());
    }
}
