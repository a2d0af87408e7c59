//! Every interpolator returns the boundary samples exactly.

use proptest::prelude::*;
use piecewisemath::math::interpolator::{
    Interpolator,
    InterpolatorType
};

const NAMES: [&str; 8] = ["either", "left", "right", "center", "closer", "smaller", "greater", "linear"];

proptest! {
    #[test]
    fn prop_boundaries_are_exact(name in prop::sample::select(NAMES.to_vec()),
                                 x1 in -1e6f64..1e6,
                                 width in 1e-3f64..1e3,
                                 y1 in -1e6f64..1e6,
                                 y2 in -1e6f64..1e6) {
        let interpolator = Interpolator::parse(name).unwrap();
        let y2 = if interpolator.interpolator_type() == InterpolatorType::Either { y1 } else { y2 };
        let x2 = x1 + width;
        prop_assume!(x1 < x2);
        prop_assert_eq!(interpolator.value(x1, y1, x2, y2, x1), y1);
        prop_assert_eq!(interpolator.value(x1, y1, x2, y2, x2), y2);
    }

    #[test]
    fn prop_inner_values_stay_between_samples(name in prop::sample::select(NAMES[1..].to_vec()),
                                              x1 in -1e3f64..1e3,
                                              width in 1e-3f64..1e3,
                                              y1 in -1e3f64..1e3,
                                              y2 in -1e3f64..1e3,
                                              alpha in 0.0f64..1.0) {
        let interpolator = Interpolator::parse(name).unwrap();
        let x2 = x1 + width;
        let x = x1 + alpha * width;
        prop_assume!(x1 <= x && x <= x2);
        let v = interpolator.value(x1, y1, x2, y2, x);
        let tolerance = 1e-9 * y1.abs().max(y2.abs()).max(1.0);
        prop_assert!(y1.min(y2) - tolerance <= v && v <= y1.max(y2) + tolerance);
        let mean = interpolator.mean(y1, y2);
        prop_assert!(y1.min(y2) - tolerance <= mean && mean <= y1.max(y2) + tolerance);
    }

    #[test]
    fn prop_unknown_names_are_rejected(name in "[a-z]{1,10}") {
        prop_assume!(!NAMES.contains(&name.as_str()));
        prop_assert!(Interpolator::parse(&name).is_err());
    }
}
