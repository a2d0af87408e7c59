//! Closed-form combination of two partition pieces over a common interval.
//!
//! Every function here matches the pair of piece kinds exhaustively and
//! either synthesizes an exact primitive or reports the pair as unsupported.
//! Results are always passed through `Primitive::simplified`.

use crate::math::domain::Domain;
use crate::math::function::matherror::MathError;
use crate::math::function::primitive::Primitive;
use crate::math::function::primitivefunctions::bilinearfunction::BilinearFunction;
use crate::math::function::primitivefunctions::unilinearfunction::UnilinearFunction;
use crate::math::function::primitivefunctions::unireciprocalfunction::UnireciprocalFunction;
use crate::math::interval::Interval;
use crate::units::value::{
    Value,
    ratio
};

/// Extent of the first operand unless it is degenerate.
fn common_extent<R: Value, S: Value, D: Domain>(u1: &UnilinearFunction<R, D>, u2: &UnilinearFunction<S, D>) -> (f64, f64) {
    if u1.lower() != u1.upper() {
        (u1.lower(), u1.upper())
    } else {
        (u2.lower(), u2.upper())
    }
}

/// `(a, b)` of `a * x + b` in raw numbers.
fn linear_coefficients<R: Value, D: Domain>(u: &UnilinearFunction<R, D>) -> (f64, f64) {
    if u.lower() == u.upper() {
        (0.0, u.r_lower().to_f64())
    } else {
        (u.a().to_f64(), u.b().to_f64())
    }
}

/// Value of `u` at a bilinear corner given as coordinates along the
/// bilinear's two dimensions.
fn unilinear_at_corner<R: Value, S: Value, D: Domain>(u: &UnilinearFunction<R, D>, b: &BilinearFunction<S, D>, corner: (f64, f64)) -> R {
    if u.dimension() == b.dimension1() { u.value_at(corner.0) } else { u.value_at(corner.1) }
}

fn bilinear_at_corner<R: Value, S: Value, D: Domain>(b: &BilinearFunction<R, D>, other: &BilinearFunction<S, D>, corner: (f64, f64)) -> R {
    if b.dimension1() == other.dimension1() { b.value_at(corner.0, corner.1) } else { b.value_at(corner.1, corner.0) }
}

fn same_dimensions<R: Value, S: Value, D: Domain>(b1: &BilinearFunction<R, D>, b2: &BilinearFunction<S, D>) -> bool {
    (b1.dimension1() == b2.dimension1() && b1.dimension2() == b2.dimension2())
        || (b1.dimension1() == b2.dimension2() && b1.dimension2() == b2.dimension1())
}

fn unilinear_product<R: Value, D: Domain>(u1: &UnilinearFunction<R, D>, u2: &UnilinearFunction<f64, D>) -> BilinearFunction<R, D> {
    BilinearFunction::from_extents(
        (u1.dimension(), u1.lower(), u1.upper()),
        (u2.dimension(), u2.lower(), u2.upper()),
        [
            u1.r_lower() * u2.r_lower(),
            u1.r_lower() * u2.r_upper(),
            u1.r_upper() * u2.r_lower(),
            u1.r_upper() * u2.r_upper()
        ]
    )
}

fn sum<'a, R: Value, D: Domain>(operation: &'static str,
                                f1: &Primitive<'a, R, D>,
                                f2: &Primitive<'a, R, D>,
                                i: &Interval<D>) -> Result<Primitive<'a, R, D>, MathError> {
    use Primitive::*;
    let result = match (f1, f2) {
        (Constant(c1), Constant(c2)) => Primitive::constant(c1.constant_value() + c2.constant_value()),
        (Constant(c), _) if c.is_zero() => *f2,
        (_, Constant(c)) if c.is_zero() => *f1,
        (Constant(c), Unilinear(u)) | (Unilinear(u), Constant(c)) => {
            let k = c.constant_value();
            Unilinear(u.with_values(u.r_lower() + k, u.r_upper() + k))
        },
        (Constant(c), Bilinear(b)) | (Bilinear(b), Constant(c)) => {
            let k = c.constant_value();
            Bilinear(b.with_corners(b.corners().map(|r| r + k)))
        },
        (Constant(c), Reciprocal(q)) | (Reciprocal(q), Constant(c)) => Reciprocal(q.offset(c.constant_value().to_f64())),
        (Unilinear(u1), Unilinear(u2)) if u1.dimension() == u2.dimension() => {
            let (lower, upper) = common_extent(u1, u2);
            Unilinear(UnilinearFunction::from_extent(
                u1.dimension(),
                lower,
                upper,
                u1.value_at(lower) + u2.value_at(lower),
                u1.value_at(upper) + u2.value_at(upper)
            ))
        },
        (Unilinear(u1), Unilinear(u2)) => {
            let extent1 = (u1.dimension(), u1.lower(), u1.upper());
            let extent2 = (u2.dimension(), u2.lower(), u2.upper());
            Bilinear(BilinearFunction::from_extents(extent1, extent2, [
                u1.r_lower() + u2.r_lower(),
                u1.r_lower() + u2.r_upper(),
                u1.r_upper() + u2.r_lower(),
                u1.r_upper() + u2.r_upper()
            ]))
        },
        (Unilinear(u), Bilinear(b)) | (Bilinear(b), Unilinear(u))
            if u.dimension() == b.dimension1() || u.dimension() == b.dimension2() => {
            let corners = b.corner_coordinates();
            let values = b.corners();
            Bilinear(b.with_corners([0, 1, 2, 3].map(|k| values[k] + unilinear_at_corner(u, b, corners[k]))))
        },
        (Bilinear(b1), Bilinear(b2)) if same_dimensions(b1, b2) => {
            let corners = b1.corner_coordinates();
            let values = b1.corners();
            Bilinear(b1.with_corners([0, 1, 2, 3].map(|k| values[k] + bilinear_at_corner(b2, b1, corners[k]))))
        },
        (Constant(_), Sampled(_)) | (Sampled(_), Constant(_))
        | (Unilinear(_), Bilinear(_)) | (Bilinear(_), Unilinear(_))
        | (Unilinear(_), Reciprocal(_)) | (Reciprocal(_), Unilinear(_))
        | (Unilinear(_), Sampled(_)) | (Sampled(_), Unilinear(_))
        | (Bilinear(_), Bilinear(_))
        | (Bilinear(_), Reciprocal(_)) | (Reciprocal(_), Bilinear(_))
        | (Bilinear(_), Sampled(_)) | (Sampled(_), Bilinear(_))
        | (Reciprocal(_), Reciprocal(_))
        | (Reciprocal(_), Sampled(_)) | (Sampled(_), Reciprocal(_))
        | (Sampled(_), Sampled(_)) => return Err(MathError::unsupported_combination(operation, f1.kind(), f2.kind()))
    };
    Ok(result.simplified(i))
}

/// `f1 + f2`.
pub fn add<'a, R: Value, D: Domain>(f1: &Primitive<'a, R, D>, f2: &Primitive<'a, R, D>, i: &Interval<D>) -> Result<Primitive<'a, R, D>, MathError> {
    sum("add", f1, f2, i)
}

/// `f1 - f2`, computed as `f1 + (-f2)`.
pub fn subtract<'a, R: Value, D: Domain>(f1: &Primitive<'a, R, D>, f2: &Primitive<'a, R, D>, i: &Interval<D>) -> Result<Primitive<'a, R, D>, MathError> {
    let negated: Primitive<'a, R, D> = f2
        .negated()
        .ok_or_else(|| MathError::unsupported_combination("subtract", f1.kind(), f2.kind()))?;
    sum("subtract", f1, &negated, i)
}

/// `f1 * f2` where `f2` is dimensionless.
pub fn multiply<'a, R: Value, D: Domain>(f1: &Primitive<'a, R, D>, f2: &Primitive<'_, f64, D>, i: &Interval<D>) -> Result<Primitive<'a, R, D>, MathError> {
    use Primitive::*;
    let unsupported = || MathError::unsupported_combination("multiply", f1.kind(), f2.kind());
    let result = match (f1, f2) {
        (Constant(c1), Constant(c2)) => Primitive::constant(c1.constant_value() * c2.constant_value()),
        (Constant(c1), _) if c1.is_zero() => *f1,
        (_, Constant(c2)) if c2.constant_value() == 1.0 => *f1,
        (_, Constant(c2)) if c2.is_zero() => Primitive::constant(R::zero()),
        (Unilinear(_), Constant(c2)) | (Bilinear(_), Constant(c2)) | (Reciprocal(_), Constant(c2)) => {
            f1.scaled(c2.constant_value()).ok_or_else(unsupported)?
        },
        (Constant(c1), Unilinear(u2)) => {
            let k = c1.constant_value();
            Unilinear(UnilinearFunction::from_extent(u2.dimension(), u2.lower(), u2.upper(), k * u2.r_lower(), k * u2.r_upper()))
        },
        (Constant(c1), Bilinear(b2)) => {
            let k = c1.constant_value();
            Bilinear(BilinearFunction::from_extents(b2.extent1(), b2.extent2(), b2.corners().map(|r| k * r)))
        },
        (Constant(c1), Reciprocal(q2)) => Reciprocal(q2.cast::<R>().scaled(c1.constant_value().to_f64())),
        (Unilinear(u1), Unilinear(u2)) if u1.dimension() != u2.dimension() => Bilinear(unilinear_product(u1, u2)),
        (Constant(_), Sampled(_)) | (Sampled(_), Constant(_))
        | (Unilinear(_), Unilinear(_))
        | (Unilinear(_), Bilinear(_)) | (Bilinear(_), Unilinear(_))
        | (Unilinear(_), Reciprocal(_)) | (Reciprocal(_), Unilinear(_))
        | (Unilinear(_), Sampled(_)) | (Sampled(_), Unilinear(_))
        | (Bilinear(_), Bilinear(_))
        | (Bilinear(_), Reciprocal(_)) | (Reciprocal(_), Bilinear(_))
        | (Bilinear(_), Sampled(_)) | (Sampled(_), Bilinear(_))
        | (Reciprocal(_), Reciprocal(_))
        | (Reciprocal(_), Sampled(_)) | (Sampled(_), Reciprocal(_))
        | (Sampled(_), Sampled(_)) => return Err(unsupported())
    };
    Ok(result.simplified(i))
}

/// `f1 / f2`, a dimensionless result.
pub fn divide<R: Value, D: Domain>(f1: &Primitive<'_, R, D>, f2: &Primitive<'_, R, D>, i: &Interval<D>) -> Result<Primitive<'static, f64, D>, MathError> {
    use Primitive::*;
    let result = match (f1, f2) {
        (Constant(c1), Constant(c2)) => Primitive::constant(ratio(c1.constant_value(), c2.constant_value())),
        (Constant(c1), Unilinear(u2)) => {
            let (a2, b2) = linear_coefficients(u2);
            Reciprocal(UnireciprocalFunction::new(0.0, c1.constant_value().to_f64(), a2, b2, u2.dimension()))
        },
        (Constant(c1), Reciprocal(q2)) => {
            let k = c1.constant_value().to_f64();
            let (a, b, c, d) = q2.coefficients();
            Reciprocal(UnireciprocalFunction::new(k * c, k * d, a, b, q2.dimension()))
        },
        (Unilinear(u1), Constant(c2)) => {
            let k = c2.constant_value();
            Unilinear(UnilinearFunction::from_extent(u1.dimension(), u1.lower(), u1.upper(), ratio(u1.r_lower(), k), ratio(u1.r_upper(), k)))
        },
        (Unilinear(u1), Unilinear(u2)) if u1.dimension() == u2.dimension() => {
            let (a1, b1) = linear_coefficients(u1);
            let (a2, b2) = linear_coefficients(u2);
            Reciprocal(UnireciprocalFunction::new(a1, b1, a2, b2, u1.dimension()))
        },
        (Bilinear(b1), Constant(c2)) => {
            let k = c2.constant_value();
            Bilinear(BilinearFunction::from_extents(b1.extent1(), b1.extent2(), b1.corners().map(|r| ratio(r, k))))
        },
        (Reciprocal(q1), Constant(c2)) => Reciprocal(q1.cast::<f64>().scaled(1.0 / c2.constant_value().to_f64())),
        (Constant(_), Bilinear(_)) | (Constant(_), Sampled(_))
        | (Unilinear(_), Unilinear(_))
        | (Unilinear(_), Bilinear(_)) | (Unilinear(_), Reciprocal(_)) | (Unilinear(_), Sampled(_))
        | (Bilinear(_), Unilinear(_)) | (Bilinear(_), Bilinear(_)) | (Bilinear(_), Reciprocal(_)) | (Bilinear(_), Sampled(_))
        | (Reciprocal(_), Unilinear(_)) | (Reciprocal(_), Bilinear(_)) | (Reciprocal(_), Reciprocal(_)) | (Reciprocal(_), Sampled(_))
        | (Sampled(_), _) => return Err(MathError::unsupported_combination("divide", f1.kind(), f2.kind()))
    };
    Ok(result.simplified(i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::function::matherror::FunctionKind;
    use crate::math::point::Point;

    type D2 = (f64, f64);

    fn square() -> Interval<D2> {
        Interval::closed(Point::new((0.0, 0.0)), Point::new((10.0, 10.0)))
    }

    fn constant<'a>(value: f64) -> Primitive<'a, f64, D2> {
        Primitive::constant(value)
    }

    fn unilinear<'a>(dimension: usize, r_lower: f64, r_upper: f64) -> Primitive<'a, f64, D2> {
        Primitive::Unilinear(UnilinearFunction::from_extent(dimension, 0.0, 10.0, r_lower, r_upper))
    }

    #[test]
    fn constants_always_merge_into_a_constant() {
        let f = add(&constant(3.0), &constant(4.0), &square()).unwrap();
        assert_eq!(f.kind(), FunctionKind::Constant);
        assert_eq!(f.value(&Point::new((1.0, 1.0))), 7.0);
    }

    #[test]
    fn opposite_slopes_cancel_to_a_constant() {
        let f = add(&unilinear(0, 0.0, 10.0), &unilinear(0, 10.0, 0.0), &square()).unwrap();
        assert_eq!(f.kind(), FunctionKind::Constant);
        assert_eq!(f.value(&Point::new((3.0, 0.0))), 10.0);
    }

    #[test]
    fn unilinears_on_different_dimensions_become_bilinear() {
        let f = add(&unilinear(0, 0.0, 10.0), &unilinear(1, 0.0, 20.0), &square()).unwrap();
        assert_eq!(f.kind(), FunctionKind::Bilinear);
        assert_eq!(f.value(&Point::new((5.0, 5.0))), 15.0);
    }

    #[test]
    fn subtracting_a_unilinear_from_a_constant() {
        let f = subtract(&constant(10.0), &unilinear(0, 0.0, 10.0), &square()).unwrap();
        assert_eq!(f.value(&Point::new((2.0, 0.0))), 8.0);
    }

    #[test]
    fn product_of_orthogonal_unilinears_is_bilinear() {
        let f1 = unilinear(0, 0.0, 10.0);
        let f2: Primitive<'_, f64, D2> = Primitive::Unilinear(UnilinearFunction::from_extent(1, 0.0, 10.0, 1.0, 2.0));
        let f = multiply(&f1, &f2, &square()).unwrap();
        assert_eq!(f.kind(), FunctionKind::Bilinear);
        assert_eq!(f.value(&Point::new((10.0, 10.0))), 20.0);
        assert_eq!(f.value(&Point::new((5.0, 0.0))), 5.0);
    }

    #[test]
    fn quotient_of_same_dimension_unilinears_is_reciprocal() {
        let f = divide(&unilinear(0, 1.0, 11.0), &unilinear(0, 2.0, 12.0), &square()).unwrap();
        assert_eq!(f.kind(), FunctionKind::Reciprocal);
        assert_eq!(f.value(&Point::new((0.0, 0.0))), 0.5);
    }

    #[test]
    fn quotient_of_constant_by_unilinear_is_reciprocal() {
        let f = divide(&constant(4.0), &unilinear(0, 1.0, 11.0), &square()).unwrap();
        assert_eq!(f.kind(), FunctionKind::Reciprocal);
        assert_eq!(f.value(&Point::new((1.0, 0.0))), 2.0);
    }

    #[test]
    fn unsupported_pairs_fail() {
        let f1 = unilinear(0, 0.0, 10.0);
        let result = multiply(&f1, &Primitive::Unilinear(UnilinearFunction::from_extent(0, 0.0, 10.0, 1.0, 2.0)), &square());
        assert!(matches!(result, Err(MathError::UnsupportedCombination { operation: "multiply", .. })));
    }
}
