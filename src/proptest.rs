//! Strategies for property-based testing of boundary computations.
use ::proptest::prelude::*;
use nalgebra::{Matrix2, Matrix3, Point2, Point3, Vector2, Vector3};

pub fn point2() -> impl Strategy<Value = Point2<f64>> {
    // Pick a reasonably small range to pick coordinates from,
    // otherwise we can easily get floating point numbers that are
    // so ridiculously large as to break anything we might want to do with them
    let range = -10.0..10.0;
    [range.clone(), range].prop_map(|[x, y]| Point2::new(x, y))
}

pub fn point3() -> impl Strategy<Value = Point3<f64>> {
    let range = -10.0..10.0;
    [range.clone(), range.clone(), range].prop_map(|[x, y, z]| Point3::new(x, y, z))
}

/// Orientation-preserving affine maps `x -> A x + b` in two dimensions.
///
/// `A` is a positive multiple of a perturbation of the identity, so `det A > 0` and `A` is
/// reasonably well conditioned.
pub fn affine_map2() -> impl Strategy<Value = (Matrix2<f64>, Vector2<f64>)> {
    let perturbation = -0.4..0.4;
    let scale = 0.5..2.0;
    (
        [perturbation.clone(), perturbation.clone(), perturbation.clone(), perturbation],
        scale,
        point2(),
    )
        .prop_map(|(e, scale, b)| {
            let a = (Matrix2::identity() + Matrix2::from_row_slice(&e)) * scale;
            (a, b.coords)
        })
}

/// Orientation-preserving affine maps `x -> A x + b` in three dimensions.
///
/// See [`affine_map2`].
pub fn affine_map3() -> impl Strategy<Value = (Matrix3<f64>, Vector3<f64>)> {
    let perturbation = -0.3..0.3;
    let scale = 0.5..2.0;
    (
        ::proptest::array::uniform9(perturbation),
        scale,
        point3(),
    )
        .prop_map(|(e, scale, b)| {
            let a = (Matrix3::identity() + Matrix3::from_row_slice(&e)) * scale;
            (a, b.coords)
        })
}
