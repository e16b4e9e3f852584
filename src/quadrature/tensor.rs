use crate::nalgebra::RealField;
use crate::quadrature::{convert_quadrature_rule_from_2d_f64, QuadraturePair2d};

use fenris_quadrature::tensor;

/// Tensor-product Gauss rule for the reference quadrilateral `[-1, 1]^2`.
///
/// # Panics
///
/// Panics if zero points are requested.
pub fn quadrilateral_gauss<T: RealField>(num_points_per_dim: usize) -> QuadraturePair2d<T> {
    assert!(num_points_per_dim > 0, "number of points must be positive");
    let (weights, points) = tensor::quadrilateral_gauss(num_points_per_dim);
    convert_quadrature_rule_from_2d_f64((weights, points))
}
