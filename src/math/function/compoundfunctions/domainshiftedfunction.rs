use std::fmt;

use crate::math::domain::Domain;
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
use crate::units::value::Value;

/// `function` translated by `shift`: the value at `p + shift` is the wrapped
/// value at `p`.
pub struct DomainShiftedFunction<R: Value, D: Domain> {
    function: SharedFunction<R, D>,
    shift: Point<D>
}

impl<R: Value, D: Domain> DomainShiftedFunction<R, D> {
    pub fn new(function: SharedFunction<R, D>, shift: Point<D>) -> DomainShiftedFunction<R, D> {
        DomainShiftedFunction { function, shift }
    }

    pub fn shift(&self) -> &Point<D> {
        &self.shift
    }

    /// The query interval in the wrapped function's coordinates.
    fn unshifted(&self, i: &Interval<D>) -> Interval<D> {
        i.shifted(&(Point::zero() - self.shift))
    }
}

impl<R: Value, D: Domain> Function<R, D> for DomainShiftedFunction<R, D> {
    fn domain(&self) -> Interval<D> {
        self.function.domain().shifted(&self.shift)
    }

    fn range(&self) -> ValueRange<R> {
        self.function.range()
    }

    fn value(&self, p: &Point<D>) -> R {
        self.function.value(&(*p - self.shift))
    }

    fn partition(&self, i: &Interval<D>, callback: &mut PartitionCallback<'_, R, D>) -> Result<(), MathError> {
        self.function.partition(&self.unshifted(i), &mut |i1, f1| {
            let i2 = i1.shifted(&self.shift);
            match f1.shifted(&self.shift) {
                Some(f2) => callback(&i2, &f2),
                None => callback(&i2, &Primitive::Sampled(self))
            }
        })
    }

    // Sampled pieces point back at this function, so every query goes to the
    // wrapped function directly.

    fn is_finite(&self, i: &Interval<D>) -> Result<bool, MathError> {
        self.function.is_finite(&self.unshifted(i))
    }

    fn is_non_zero(&self, i: &Interval<D>) -> Result<bool, MathError> {
        self.function.is_non_zero(&self.unshifted(i))
    }

    fn min(&self, i: &Interval<D>) -> Result<R, MathError> {
        self.function.min(&self.unshifted(i))
    }

    fn max(&self, i: &Interval<D>) -> Result<R, MathError> {
        self.function.max(&self.unshifted(i))
    }

    fn mean(&self, i: &Interval<D>) -> Result<R, MathError> {
        self.function.mean(&self.unshifted(i))
    }

    fn integral(&self, i: &Interval<D>) -> Result<R, MathError> {
        self.function.integral(&self.unshifted(i))
    }

    fn print_structure(&self, out: &mut dyn fmt::Write, level: usize) -> fmt::Result {
        write!(out, "(DomainShifted, shift = {}\n{}", self.shift, " ".repeat(level + 2))?;
        self.function.print_structure(out, level + 2)?;
        write!(out, ")")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::math::function::primitivefunctions::boxcarfunction::Boxcar1DFunction;
    use crate::math::function::primitivefunctions::gaussfunction::GaussFunction;
    use crate::math::function::primitivefunctions::unilinearfunction::UnilinearFunction;

    fn closed(lower: f64, upper: f64) -> Interval<(f64,)> {
        Interval::closed(Point::new((lower,)), Point::new((upper,)))
    }

    #[test]
    fn boxcar_moves_with_the_shift() {
        let boxcar: SharedFunction<f64, (f64,)> = Arc::new(Boxcar1DFunction::<f64, f64>::new(2.0, 5.0, 9.0).unwrap());
        let f = DomainShiftedFunction::new(boxcar, Point::new((10.0,)));
        assert_eq!(f.value(&Point::new((12.0,))), 9.0);
        assert_eq!(f.value(&Point::new((3.0,))), 0.0);
        let mut bounds = Vec::new();
        f.partition(&closed(10.0, 20.0), &mut |i1, f1| {
            bounds.push((i1.extent(0), f1.value(&i1.center())));
            Ok(())
        }).unwrap();
        assert_eq!(bounds, vec![((10.0, 12.0), 0.0), ((12.0, 15.0), 9.0), ((15.0, 20.0), 0.0)]);
    }

    #[test]
    fn linear_pieces_are_moved_too() {
        let ramp: SharedFunction<f64, (f64,)> = Arc::new(UnilinearFunction::<f64, (f64,)>::from_extent(0, 0.0, 1.0, 0.0, 1.0));
        let f = DomainShiftedFunction::new(ramp, Point::new((-1.0,)));
        f.partition(&closed(-1.0, 0.0), &mut |i1, f1| {
            assert_eq!(f1.value(i1.lower()), 0.0);
            assert_eq!(f1.value(i1.upper()), 1.0);
            Ok(())
        }).unwrap();
        assert_eq!(f.integral(&closed(-1.0, 0.0)).unwrap(), 0.5);
    }

    #[test]
    fn sampled_pieces_answer_through_the_wrapped_function() {
        let gauss: SharedFunction<f64, (f64,)> = Arc::new(GaussFunction::<f64, f64>::new(0.0, 1.0).unwrap());
        let f = DomainShiftedFunction::new(gauss.clone(), Point::new((3.0,)));
        assert_eq!(f.max(&closed(2.0, 4.0)).unwrap(), gauss.max(&closed(-1.0, 1.0)).unwrap());
        assert!((f.integral(&Interval::unbounded()).unwrap() - 1.0).abs() < 1e-12);
    }
}
