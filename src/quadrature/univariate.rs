//! Quadrature rules for the one-dimensional domain `[-1, 1]`.
use crate::nalgebra::RealField;
use crate::quadrature::{convert_quadrature_rule_from_1d_f64, QuadraturePair1d};
use fenris_quadrature::univariate;

/// Gauss quadrature with the given number of points.
///
/// Integrates polynomials of order up to `2 n - 1` exactly on `[-1, 1]`.
///
/// # Panics
///
/// Panics if zero points are requested.
pub fn gauss<T: RealField>(num_points: usize) -> QuadraturePair1d<T> {
    assert!(num_points > 0, "number of points must be positive");
    let (weights, points) = univariate::gauss(num_points);
    convert_quadrature_rule_from_1d_f64((weights, points))
}
