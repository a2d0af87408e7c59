use crate::units::value::Value;

/// Highest number of axes a domain may have.
pub const MAX_DIMS: usize = 5;

/// A coordinate space given as a tuple of axis types, e.g. `(Time, Frequency)`.
///
/// Coordinates are stored raw in a fixed array; the tuple type only decides
/// the number of axes, their boundaries and how coordinates are displayed.
pub trait Domain: Copy + Send + Sync + 'static {
    const DIMS: usize;

    fn lower_boundary(dim: usize) -> f64;

    fn upper_boundary(dim: usize) -> f64;

    fn to_raw(&self) -> [f64; MAX_DIMS];

    fn from_raw(raw: &[f64; MAX_DIMS]) -> Self;

    fn format_coordinate(dim: usize, raw: f64) -> String;
}

macro_rules! impl_domain {
    ($dims:expr; $($axis:ident : $index:tt),+) => {
        impl<$($axis: Value),+> Domain for ($($axis,)+) {
            const DIMS: usize = $dims;

            fn lower_boundary(dim: usize) -> f64 {
                [$($axis::lower_bound().to_f64()),+][dim]
            }

            fn upper_boundary(dim: usize) -> f64 {
                [$($axis::upper_bound().to_f64()),+][dim]
            }

            fn to_raw(&self) -> [f64; MAX_DIMS] {
                let mut raw = [0.0; MAX_DIMS];
                $(raw[$index] = self.$index.to_f64();)+
                raw
            }

            fn from_raw(raw: &[f64; MAX_DIMS]) -> Self {
                ($($axis::from_f64(raw[$index]),)+)
            }

            fn format_coordinate(dim: usize, raw: f64) -> String {
                match dim {
                    $($index => $axis::from_f64(raw).to_string(),)+
                    _ => raw.to_string()
                }
            }
        }
    };
}

impl_domain!(1; X: 0);
impl_domain!(2; X: 0, Y: 1);
impl_domain!(3; X: 0, Y: 1, Z: 2);
impl_domain!(4; X: 0, Y: 1, Z: 2, T: 3);
impl_domain!(5; X: 0, Y: 1, Z: 2, T: 3, F: 4);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::quantity::{Frequency, Time};

    #[test]
    fn tuple_domains_round_trip_raw_coordinates() {
        let p = (Time::new(1.0), Frequency::new(2e9));
        let raw = p.to_raw();
        assert_eq!(raw[0], 1.0);
        assert_eq!(raw[1], 2e9);
        assert_eq!(<(Time, Frequency)>::from_raw(&raw), p);
        assert_eq!(<(Time, Frequency)>::DIMS, 2);
    }

    #[test]
    fn time_axis_has_finite_boundaries() {
        assert!(<(Time, f64)>::upper_boundary(0).is_finite());
        assert!(<(Time, f64)>::upper_boundary(1).is_infinite());
        assert_eq!(<(Time,)>::format_coordinate(0, 2.0), "2 s");
    }
}
