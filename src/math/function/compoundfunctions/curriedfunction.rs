use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

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

/// Slice of a function of `D` with some dimensions pinned to fixed
/// coordinates; the remaining dimensions, in ascending order, become the
/// dimensions of `E`.
///
/// Pieces are frozen along the pinned dimensions and moved into `E`. Pieces
/// without a closed form are answered by the slice itself, so every derived
/// query goes straight to the wrapped function over the lifted interval.
pub struct CurriedFunction<R: Value, D: Domain, E: Domain> {
    function: SharedFunction<R, D>,
    fixed: Point<D>,
    fixed_dims: Vec<usize>,
    kept: Vec<usize>,
    targets: Vec<Option<usize>>,
    domain: PhantomData<E>
}

impl<R: Value, D: Domain, E: Domain> CurriedFunction<R, D, E> {
    /// Pins each dimension in `fixed_dims` to its coordinate in `fixed`.
    pub fn new(function: SharedFunction<R, D>, fixed: Point<D>, fixed_dims: &[usize]) -> Result<CurriedFunction<R, D, E>, MathError> {
        let mut pinned = 0u8;
        for dim in fixed_dims {
            if *dim >= D::DIMS || pinned & (1 << dim) != 0 {
                return Err(MathError::InvalidArgument(format!("cannot pin dimension {} of a {}-dimensional function twice or out of range", dim, D::DIMS)));
            }
            pinned |= 1 << dim;
        }
        if fixed_dims.is_empty() || D::DIMS - fixed_dims.len() != E::DIMS {
            return Err(MathError::InvalidArgument(format!(
                "pinning {} of {} dimensions does not leave {}",
                fixed_dims.len(), D::DIMS, E::DIMS
            )));
        }
        let kept: Vec<usize> = (0..D::DIMS).filter(|dim| pinned & (1 << dim) == 0).collect();
        let targets = (0..D::DIMS).map(|dim| kept.iter().position(|k| *k == dim)).collect();
        Ok(CurriedFunction { function, fixed, fixed_dims: fixed_dims.to_vec(), kept, targets, domain: PhantomData })
    }

    fn lift_point(&self, p: &Point<E>) -> Point<D> {
        let mut q = self.fixed;
        for (k, dim) in self.kept.iter().enumerate() {
            q.set(*dim, p.get(k));
        }
        q
    }

    fn lift(&self, i: &Interval<E>) -> Interval<D> {
        self.fixed_dims
            .iter()
            .fold(i.embedded(&Interval::unbounded(), &self.kept), |lifted, dim| lifted.fixed_at(*dim, self.fixed.get(*dim)))
    }

    fn reduced(&self, f1: &Primitive<'_, R, D>) -> Option<Primitive<'static, R, E>> {
        let (first, rest) = self.fixed_dims.split_first()?;
        let mut piece = f1.frozen_along(*first, self.fixed.get(*first))?;
        for dim in rest {
            piece = piece.frozen_along(*dim, self.fixed.get(*dim))?;
        }
        piece.reembedded(&self.targets)
    }
}

impl<R: Value, D: Domain, E: Domain> Function<R, E> for CurriedFunction<R, D, E> {
    fn domain(&self) -> Interval<E> {
        self.function.domain().project(&self.kept)
    }

    fn range(&self) -> ValueRange<R> {
        self.function.range()
    }

    fn value(&self, p: &Point<E>) -> R {
        self.function.value(&self.lift_point(p))
    }

    fn partition(&self, i: &Interval<E>, callback: &mut PartitionCallback<'_, R, E>) -> Result<(), MathError> {
        self.function.partition(&self.lift(i), &mut |i1, f1| {
            let i2 = i1.project::<E>(&self.kept);
            match self.reduced(f1) {
                Some(f2) => callback(&i2, &f2),
                None => callback(&i2, &Primitive::Sampled(self))
            }
        })
    }

    fn is_finite(&self, i: &Interval<E>) -> Result<bool, MathError> {
        self.function.is_finite(&self.lift(i))
    }

    fn is_non_zero(&self, i: &Interval<E>) -> Result<bool, MathError> {
        self.function.is_non_zero(&self.lift(i))
    }

    fn min(&self, i: &Interval<E>) -> Result<R, MathError> {
        self.function.min(&self.lift(i))
    }

    fn max(&self, i: &Interval<E>) -> Result<R, MathError> {
        self.function.max(&self.lift(i))
    }

    fn mean(&self, i: &Interval<E>) -> Result<R, MathError> {
        self.function.mean(&self.lift(i))
    }

    fn integral(&self, i: &Interval<E>) -> Result<R, MathError> {
        self.function.integral(&self.lift(i))
    }

    fn print_structure(&self, out: &mut dyn fmt::Write, level: usize) -> fmt::Result {
        write!(out, "(Curried, dimensions {:?} at {}\n{}", self.fixed_dims, self.fixed, " ".repeat(level + 2))?;
        self.function.print_structure(out, level + 2)?;
        write!(out, ")")
    }
}

/// The function of `y` left over after pinning `x`.
pub fn curry_left<R: Value, X: Value, Y: Value>(function: &SharedFunction<R, (X, Y)>, x: X) -> Result<SharedFunction<R, (Y,)>, MathError> {
    let fixed = Point::from_slice(&[x.to_f64(), 0.0]);
    Ok(Arc::new(CurriedFunction::<R, (X, Y), (Y,)>::new(function.clone(), fixed, &[0])?))
}

/// The function of `x` left over after pinning `y`.
pub fn curry_right<R: Value, X: Value, Y: Value>(function: &SharedFunction<R, (X, Y)>, y: Y) -> Result<SharedFunction<R, (X,)>, MathError> {
    let fixed = Point::from_slice(&[0.0, y.to_f64()]);
    Ok(Arc::new(CurriedFunction::<R, (X, Y), (X,)>::new(function.clone(), fixed, &[1])?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::function::compoundfunctions::combined2dfunction::Combined2DFunction;
    use crate::math::function::matherror::FunctionKind;
    use crate::math::function::primitivefunctions::bilinearfunction::BilinearFunction;
    use crate::math::function::primitivefunctions::boxcarfunction::Boxcar1DFunction;
    use crate::math::function::primitivefunctions::gaussfunction::GaussFunction;
    use crate::math::function::primitivefunctions::unilinearfunction::UnilinearFunction;

    fn closed(lower: f64, upper: f64) -> Interval<(f64,)> {
        Interval::closed(Point::new((lower,)), Point::new((upper,)))
    }

    fn ramp_times_boxcar() -> SharedFunction<f64, (f64, f64)> {
        let ramp: SharedFunction<f64, (f64,)> = Arc::new(UnilinearFunction::<f64, (f64,)>::from_extent(0, 0.0, 4.0, 0.0, 8.0));
        let boxcar: SharedFunction<f64, (f64,)> = Arc::new(Boxcar1DFunction::<f64, f64>::new(1.0, 3.0, 0.5).unwrap());
        Arc::new(Combined2DFunction::new(ramp, boxcar))
    }

    #[test]
    fn left_slice_keeps_the_second_dimension() {
        let f = curry_left(&ramp_times_boxcar(), 2.0).unwrap();
        assert_eq!(f.value(&Point::new((2.0,))), 2.0);
        assert_eq!(f.value(&Point::new((0.0,))), 0.0);
        assert_eq!(f.integral(&closed(0.0, 4.0)).unwrap(), 4.0);
        let mut pieces = Vec::new();
        f.partition(&closed(0.0, 4.0), &mut |i1, f1| {
            assert!(f1.kind() == FunctionKind::Constant);
            pieces.push((i1.extent(0), f1.value(&i1.center())));
            Ok(())
        }).unwrap();
        assert_eq!(pieces, vec![((0.0, 1.0), 0.0), ((1.0, 3.0), 2.0), ((3.0, 4.0), 0.0)]);
    }

    #[test]
    fn right_slice_keeps_the_first_dimension() {
        let f = curry_right(&ramp_times_boxcar(), 2.0).unwrap();
        assert_eq!(f.value(&Point::new((3.0,))), 3.0);
        f.partition(&closed(0.0, 4.0), &mut |i1, f1| {
            assert_eq!(f1.kind(), FunctionKind::Unilinear);
            assert_eq!(f1.value(i1.upper()), 4.0);
            Ok(())
        }).unwrap();
        assert_eq!(f.integral(&closed(0.0, 4.0)).unwrap(), 8.0);
        assert_eq!(f.max(&closed(0.0, 4.0)).unwrap(), 4.0);
    }

    #[test]
    fn bilinear_pieces_become_unilinear() {
        let b: SharedFunction<f64, (f64, f64)> = Arc::new(BilinearFunction::<f64, (f64, f64)>::from_extents((0, 0.0, 1.0), (1, 0.0, 1.0), [0.0, 1.0, 2.0, 3.0]));
        let f = curry_left(&b, 0.5).unwrap();
        f.partition(&closed(0.0, 1.0), &mut |_, f1| {
            assert_eq!(f1.kind(), FunctionKind::Unilinear);
            assert_eq!(f1.value(&Point::new((1.0,))), 2.0);
            Ok(())
        }).unwrap();
    }

    #[test]
    fn sampled_pieces_are_answered_by_the_slice() {
        let gauss: SharedFunction<f64, (f64,)> = Arc::new(GaussFunction::<f64, f64>::new(0.0, 1.0).unwrap());
        let one: SharedFunction<f64, (f64,)> = Arc::new(Boxcar1DFunction::<f64, f64>::new(-10.0, 10.0, 1.0).unwrap());
        let product: SharedFunction<f64, (f64, f64)> = Arc::new(Combined2DFunction::new(gauss.clone(), one));
        let f = curry_right(&product, 0.0).unwrap();
        f.partition(&closed(-1.0, 1.0), &mut |i1, f1| {
            assert_eq!(f1.kind(), FunctionKind::Sampled);
            assert_eq!(f1.value(&i1.center()), gauss.value(&i1.center()));
            Ok(())
        }).unwrap();
        let expected = gauss.integral(&closed(-1.0, 1.0)).unwrap();
        assert!((f.integral(&closed(-1.0, 1.0)).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn pinning_must_leave_the_target_domain() {
        let f = ramp_times_boxcar();
        assert!(CurriedFunction::<f64, (f64, f64), (f64,)>::new(f.clone(), Point::zero(), &[]).is_err());
        assert!(CurriedFunction::<f64, (f64, f64), (f64,)>::new(f.clone(), Point::zero(), &[2]).is_err());
        assert!(CurriedFunction::<f64, (f64, f64), (f64,)>::new(f, Point::zero(), &[0, 1]).is_err());
    }
}
