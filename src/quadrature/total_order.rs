//! Quadrature rules parametrized by polynomial total-order accuracy.
use crate::nalgebra::RealField;
use crate::quadrature::{convert_quadrature_rule_from_2d_f64, QuadratureError, QuadraturePair2d};
use fenris_quadrature::polyquad;

/// A rule for the reference triangle `(-1, -1), (1, -1), (-1, 1)` that integrates polynomials
/// of total degree up to `strength` exactly.
///
/// The rule with the fewest points among the available rules of at least the requested
/// strength is returned.
pub fn triangle<T: RealField>(strength: usize) -> Result<QuadraturePair2d<T>, QuadratureError> {
    let (weights, points) = polyquad::triangle(strength)?;
    Ok(convert_quadrature_rule_from_2d_f64((weights, points)))
}
