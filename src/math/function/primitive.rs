use crate::math::domain::Domain;
use crate::math::function::function::Function;
use crate::math::function::matherror::{
    FunctionKind,
    MathError
};
use crate::math::function::primitivefunctions::bilinearfunction::BilinearFunction;
use crate::math::function::primitivefunctions::constantfunction::ConstantFunction;
use crate::math::function::primitivefunctions::unilinearfunction::UnilinearFunction;
use crate::math::function::primitivefunctions::unireciprocalfunction::UnireciprocalFunction;
use crate::math::interval::Interval;
use crate::math::point::Point;
use crate::units::value::Value;

/// A partition piece.
///
/// The closed-form kinds are carried by value so that the combination engine
/// can match on them; `Sampled` borrows a leaf that is not decomposed further.
#[derive(Clone, Copy)]
pub enum Primitive<'a, R: Value, D: Domain> {
    Constant(ConstantFunction<R, D>),
    Unilinear(UnilinearFunction<R, D>),
    Bilinear(BilinearFunction<R, D>),
    Reciprocal(UnireciprocalFunction<R, D>),
    Sampled(&'a dyn Function<R, D>)
}

impl<'a, R: Value, D: Domain> Primitive<'a, R, D> {
    pub fn constant(value: R) -> Primitive<'a, R, D> {
        Primitive::Constant(ConstantFunction::new(value))
    }

    pub fn kind(&self) -> FunctionKind {
        match self {
            Primitive::Constant(_) => FunctionKind::Constant,
            Primitive::Unilinear(_) => FunctionKind::Unilinear,
            Primitive::Bilinear(_) => FunctionKind::Bilinear,
            Primitive::Reciprocal(_) => FunctionKind::Reciprocal,
            Primitive::Sampled(_) => FunctionKind::Sampled
        }
    }

    pub fn as_function(&self) -> &dyn Function<R, D> {
        match self {
            Primitive::Constant(f) => f,
            Primitive::Unilinear(f) => f,
            Primitive::Bilinear(f) => f,
            Primitive::Reciprocal(f) => f,
            Primitive::Sampled(f) => *f
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Primitive::Constant(c) if c.is_zero())
    }

    pub fn value(&self, p: &Point<D>) -> R {
        self.as_function().value(p)
    }

    pub fn is_finite(&self, i: &Interval<D>) -> Result<bool, MathError> {
        self.as_function().is_finite(i)
    }

    pub fn is_non_zero(&self, i: &Interval<D>) -> Result<bool, MathError> {
        self.as_function().is_non_zero(i)
    }

    pub fn min(&self, i: &Interval<D>) -> Result<R, MathError> {
        self.as_function().min(i)
    }

    pub fn max(&self, i: &Interval<D>) -> Result<R, MathError> {
        self.as_function().max(i)
    }

    pub fn mean(&self, i: &Interval<D>) -> Result<R, MathError> {
        self.as_function().mean(i)
    }

    pub fn integral(&self, i: &Interval<D>) -> Result<R, MathError> {
        self.as_function().integral(i)
    }

    pub fn depends_on(&self, dim: usize) -> bool {
        match self {
            Primitive::Constant(_) => false,
            Primitive::Unilinear(f) => f.dimension() == dim,
            Primitive::Bilinear(f) => f.dimension1() == dim || f.dimension2() == dim,
            Primitive::Reciprocal(f) => f.dimension() == dim,
            Primitive::Sampled(_) => true
        }
    }

    /// Collapses degenerate shapes: equal end values become a constant, a
    /// bilinear piece that is flat along one dimension becomes unilinear, and
    /// a reciprocal with a constant denominator becomes linear over `i`.
    pub fn simplified(self, i: &Interval<D>) -> Primitive<'a, R, D> {
        match self {
            Primitive::Unilinear(f) if f.r_lower() == f.r_upper() => Primitive::constant(f.r_lower()),
            Primitive::Bilinear(f) => {
                let [ll, lu, ul, uu] = f.corners();
                let (dimension1, lower1, upper1) = f.extent1();
                let (dimension2, lower2, upper2) = f.extent2();
                if ll == lu && ll == ul && ll == uu {
                    Primitive::constant(ll)
                } else if ll == ul && lu == uu {
                    Primitive::Unilinear(UnilinearFunction::from_extent(dimension2, lower2, upper2, ll, lu))
                } else if ll == lu && ul == uu {
                    Primitive::Unilinear(UnilinearFunction::from_extent(dimension1, lower1, upper1, ll, ul))
                } else {
                    self
                }
            },
            Primitive::Reciprocal(f) => {
                let (a, _, c, _) = f.coefficients();
                let (lower, upper) = i.extent(f.dimension());
                if c != 0.0 {
                    self
                } else if a == 0.0 || lower == upper {
                    Primitive::constant(f.value_at(lower))
                } else if lower.is_finite() && upper.is_finite() {
                    Primitive::Unilinear(UnilinearFunction::from_extent(f.dimension(), lower, upper, f.value_at(lower), f.value_at(upper)))
                        .simplified(i)
                } else {
                    self
                }
            },
            _ => self
        }
    }

    pub fn negated(&self) -> Option<Primitive<'static, R, D>> {
        self.scaled(-1.0)
    }

    /// The piece multiplied by the plain factor `k`.
    pub fn scaled(&self, k: f64) -> Option<Primitive<'static, R, D>> {
        match self {
            Primitive::Constant(f) => Some(Primitive::constant(f.constant_value() * k)),
            Primitive::Unilinear(f) => Some(Primitive::Unilinear(f.with_values(f.r_lower() * k, f.r_upper() * k))),
            Primitive::Bilinear(f) => Some(Primitive::Bilinear(f.with_corners(f.corners().map(|r| r * k)))),
            Primitive::Reciprocal(f) => Some(Primitive::Reciprocal(f.scaled(k))),
            Primitive::Sampled(_) => None
        }
    }

    /// The piece moved by `shift`, so that the result at `p + shift` equals
    /// this piece at `p`.
    pub fn shifted(&self, shift: &Point<D>) -> Option<Primitive<'static, R, D>> {
        match self {
            Primitive::Constant(f) => Some(Primitive::Constant(*f)),
            Primitive::Unilinear(f) => Some(Primitive::Unilinear(f.shifted(shift.get(f.dimension())))),
            Primitive::Bilinear(f) => Some(Primitive::Bilinear(f.shifted(shift.get(f.dimension1()), shift.get(f.dimension2())))),
            Primitive::Reciprocal(f) => Some(Primitive::Reciprocal(f.shifted(shift.get(f.dimension())))),
            Primitive::Sampled(_) => None
        }
    }

    /// The piece with dimension `dim` pinned to `x`, so that the result no
    /// longer depends on it.
    pub fn frozen_along(&self, dim: usize, x: f64) -> Option<Primitive<'static, R, D>> {
        match self {
            Primitive::Constant(f) => Some(Primitive::Constant(*f)),
            Primitive::Unilinear(f) if f.dimension() == dim => Some(Primitive::constant(f.value_at(x))),
            Primitive::Unilinear(f) => Some(Primitive::Unilinear(*f)),
            Primitive::Bilinear(f) if f.dimension1() == dim => {
                let (other, lower, upper) = f.extent2();
                Some(Primitive::Unilinear(UnilinearFunction::from_extent(other, lower, upper, f.value_at(x, lower), f.value_at(x, upper))))
            },
            Primitive::Bilinear(f) if f.dimension2() == dim => {
                let (other, lower, upper) = f.extent1();
                Some(Primitive::Unilinear(UnilinearFunction::from_extent(other, lower, upper, f.value_at(lower, x), f.value_at(upper, x))))
            },
            Primitive::Bilinear(f) => Some(Primitive::Bilinear(*f)),
            Primitive::Reciprocal(f) if f.dimension() == dim => Some(Primitive::constant(f.value_at(x))),
            Primitive::Reciprocal(f) => Some(Primitive::Reciprocal(*f)),
            Primitive::Sampled(_) => None
        }
    }

    /// Moves the piece into domain `E`, sending dimension `k` to `dims[k]`.
    /// A `None` entry drops the dimension, which requires the piece not to
    /// depend on it.
    pub fn reembedded<E: Domain>(&self, dims: &[Option<usize>]) -> Option<Primitive<'static, R, E>> {
        match self {
            Primitive::Constant(f) => Some(Primitive::constant(f.constant_value())),
            Primitive::Unilinear(f) => {
                let target = dims[f.dimension()]?;
                Some(Primitive::Unilinear(UnilinearFunction::from_extent(target, f.lower(), f.upper(), f.r_lower(), f.r_upper())))
            },
            Primitive::Bilinear(f) => {
                let (dimension1, lower1, upper1) = f.extent1();
                let (dimension2, lower2, upper2) = f.extent2();
                let target1 = dims[dimension1]?;
                let target2 = dims[dimension2]?;
                Some(Primitive::Bilinear(BilinearFunction::from_extents((target1, lower1, upper1), (target2, lower2, upper2), f.corners())))
            },
            Primitive::Reciprocal(f) => {
                let target = dims[f.dimension()]?;
                let (a, b, c, d) = f.coefficients();
                Some(Primitive::Reciprocal(UnireciprocalFunction::new(a, b, c, d, target)))
            },
            Primitive::Sampled(_) => None
        }
    }

    /// One line describing the piece over `i`.
    pub fn describe(&self, i: &Interval<D>) -> String {
        let f = self.as_function();
        match self {
            Primitive::Constant(c) => format!("constant {} over {}", c.constant_value(), i),
            _ => format!("{} over {} → {} … {}", self.kind(), i, f.value(i.lower()), f.value(i.upper()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type P<'a> = Primitive<'a, f64, (f64, f64)>;

    fn unit_square() -> Interval<(f64, f64)> {
        Interval::closed(Point::new((0.0, 0.0)), Point::new((1.0, 1.0)))
    }

    #[test]
    fn flat_unilinear_becomes_constant() {
        let f = P::Unilinear(UnilinearFunction::from_extent(0, 0.0, 1.0, 2.0, 2.0)).simplified(&unit_square());
        assert_eq!(f.kind(), FunctionKind::Constant);
    }

    #[test]
    fn bilinear_flat_along_one_dimension_becomes_unilinear() {
        let b = BilinearFunction::from_extents((0, 0.0, 1.0), (1, 0.0, 1.0), [1.0, 3.0, 1.0, 3.0]);
        match P::Bilinear(b).simplified(&unit_square()) {
            Primitive::Unilinear(u) => {
                assert_eq!(u.dimension(), 1);
                assert_eq!((u.r_lower(), u.r_upper()), (1.0, 3.0));
            },
            other => panic!("unexpected {}", other.kind())
        }
    }

    #[test]
    fn freezing_a_bilinear_keeps_the_other_dimension() {
        let b = BilinearFunction::from_extents((0, 0.0, 1.0), (1, 0.0, 1.0), [0.0, 1.0, 2.0, 3.0]);
        let frozen = P::Bilinear(b).frozen_along(0, 1.0).unwrap();
        assert!(!frozen.depends_on(0));
        assert_eq!(frozen.value(&Point::new((0.0, 1.0))), 3.0);
    }

    #[test]
    fn reembedding_drops_only_unused_dimensions() {
        let u = P::Unilinear(UnilinearFunction::from_extent(0, 0.0, 1.0, 0.0, 1.0));
        assert!(u.reembedded::<(f64,)>(&[Some(0), None]).is_some());
        assert!(u.reembedded::<(f64,)>(&[None, Some(0)]).is_none());
    }
}
