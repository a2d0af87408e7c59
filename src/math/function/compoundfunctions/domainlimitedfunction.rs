use std::fmt;
use std::sync::Arc;

use crate::math::domain::Domain;
use crate::math::function::function::{
    Function,
    PartitionCallback,
    SharedFunction,
    ValueRange
};
use crate::math::function::matherror::MathError;
use crate::math::interval::Interval;
use crate::math::point::Point;
use crate::units::value::Value;

/// Restricts a function to `domain`. The range is taken over that domain once,
/// when the limit is constructed.
pub struct DomainLimitedFunction<R: Value, D: Domain> {
    function: SharedFunction<R, D>,
    domain: Interval<D>,
    range: ValueRange<R>
}

impl<R: Value, D: Domain> DomainLimitedFunction<R, D> {
    pub fn new(function: SharedFunction<R, D>, domain: &Interval<D>) -> Result<DomainLimitedFunction<R, D>, MathError> {
        let domain = function.domain().intersect(domain);
        let range = if domain.is_empty() {
            ValueRange::new(R::zero(), R::zero())
        } else {
            ValueRange::new(function.min(&domain)?, function.max(&domain)?)
        };
        Ok(DomainLimitedFunction { function, domain, range })
    }
}

impl<R: Value, D: Domain> Function<R, D> for DomainLimitedFunction<R, D> {
    fn domain(&self) -> Interval<D> {
        self.domain
    }

    fn range(&self) -> ValueRange<R> {
        self.range
    }

    fn value(&self, p: &Point<D>) -> R {
        assert!(self.domain.contains(p), "{} lies outside the limited domain {}", p, self.domain);
        self.function.value(p)
    }

    fn partition(&self, i: &Interval<D>, callback: &mut PartitionCallback<'_, R, D>) -> Result<(), MathError> {
        let i1 = i.intersect(&self.domain);
        if i1.is_empty() {
            return Ok(());
        }
        self.function.partition(&i1, callback)
    }

    fn is_finite(&self, i: &Interval<D>) -> Result<bool, MathError> {
        let i1 = i.intersect(&self.domain);
        if i1.is_empty() { Ok(true) } else { self.function.is_finite(&i1) }
    }

    fn print_structure(&self, out: &mut dyn fmt::Write, level: usize) -> fmt::Result {
        write!(out, "(DomainLimited, domain = {}\n{}", self.domain, " ".repeat(level + 2))?;
        self.function.print_structure(out, level + 2)?;
        write!(out, ")")
    }
}

/// Limits `function` to the quadrant where every coordinate is non-negative.
pub fn limit_to_first_quadrant<R: Value, D: Domain>(function: &SharedFunction<R, D>) -> Result<SharedFunction<R, D>, MathError> {
    let quadrant = Interval::new(Point::zero(), Point::upper_bounds(), Interval::<D>::all_bits(), 0, 0);
    Ok(Arc::new(DomainLimitedFunction::new(function.clone(), &quadrant)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::function::primitivefunctions::unilinearfunction::UnilinearFunction;

    fn ramp() -> SharedFunction<f64, (f64,)> {
        Arc::new(UnilinearFunction::<f64, (f64,)>::from_extent(0, 0.0, 10.0, 0.0, 10.0))
    }

    fn closed(lower: f64, upper: f64) -> Interval<(f64,)> {
        Interval::closed(Point::new((lower,)), Point::new((upper,)))
    }

    #[test]
    fn range_is_taken_over_the_limit() {
        let f = DomainLimitedFunction::new(ramp(), &closed(2.0, 4.0)).unwrap();
        assert_eq!(f.range(), ValueRange::new(2.0, 4.0));
        assert_eq!(f.value(&Point::new((3.0,))), 3.0);
    }

    #[test]
    fn partition_stays_inside_the_limit() {
        let f = DomainLimitedFunction::new(ramp(), &closed(2.0, 4.0)).unwrap();
        let mut extents = Vec::new();
        f.partition(&closed(0.0, 10.0), &mut |i1, _| {
            extents.push(i1.extent(0));
            Ok(())
        }).unwrap();
        assert_eq!(extents, vec![(2.0, 4.0)]);
        assert_eq!(f.integral(&closed(0.0, 10.0)).unwrap(), 6.0);
        assert_eq!(f.integral(&closed(5.0, 10.0)).unwrap(), 0.0);
    }

    #[test]
    #[should_panic]
    fn evaluating_outside_the_limit_aborts() {
        let f = DomainLimitedFunction::new(ramp(), &closed(2.0, 4.0)).unwrap();
        f.value(&Point::new((5.0,)));
    }

    #[test]
    fn first_quadrant_drops_negative_coordinates() {
        let f = limit_to_first_quadrant(&ramp()).unwrap();
        assert_eq!(f.domain().extent(0), (0.0, f64::INFINITY));
        assert_eq!(f.min(&closed(-5.0, 5.0)).unwrap(), 0.0);
    }
}
