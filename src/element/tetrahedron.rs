use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};

use crate::element::FixedNodesReferenceFiniteElement;
use crate::nalgebra::{Matrix1x4, Matrix3x4, OMatrix, Point3, Vector3, U1, U10, U3, U4};
use crate::Real;

/// Linear Lagrange interpolation on the reference tetrahedron.
///
/// The reference tetrahedron is defined by the corners `(-1, -1, -1)`, `(1, -1, -1)`,
/// `(-1, 1, -1)` and `(-1, -1, 1)`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tet4;

/// Quadratic Lagrange interpolation on the reference tetrahedron.
///
/// The vertex nodes are numbered as for [`Tet4`], followed by the midpoints of the edges
/// `(0, 1)`, `(1, 2)`, `(0, 2)`, `(0, 3)`, `(2, 3)` and `(1, 3)`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tet10;

impl<T> FixedNodesReferenceFiniteElement<T> for Tet4
where
    T: Real,
{
    type ReferenceDim = U3;
    type NodalDim = U4;

    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn evaluate_basis(&self, xi: &Point3<T>) -> Matrix1x4<T> {
        Matrix1x4::from_row_slice(&[
            -0.5 * xi.x - 0.5 * xi.y - 0.5 * xi.z - 0.5,
            0.5 * xi.x + 0.5,
            0.5 * xi.y + 0.5,
            0.5 * xi.z + 0.5
        ])
    }

    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn gradients(&self, _reference_coords: &Point3<T>) -> Matrix3x4<T> {
        Matrix3x4::from_columns(&[
            Vector3::new(-0.5, -0.5, -0.5),
            Vector3::new(0.5, 0.0, 0.0),
            Vector3::new(0.0, 0.5, 0.0),
            Vector3::new(0.0, 0.0, 0.5)
        ])
    }
}

impl<T> FixedNodesReferenceFiniteElement<T> for Tet10
where
    T: Real,
{
    type ReferenceDim = U3;
    type NodalDim = U10;

    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn evaluate_basis(&self, xi: &Point3<T>) -> OMatrix<T, U1, U10> {
        let psi = Tet4.evaluate_basis(xi);
        OMatrix::<T, U1, U10>::from_row_slice(&[
            psi[0] * (2.0 * psi[0] - 1.0),
            psi[1] * (2.0 * psi[1] - 1.0),
            psi[2] * (2.0 * psi[2] - 1.0),
            psi[3] * (2.0 * psi[3] - 1.0),
            4.0 * psi[0] * psi[1],
            4.0 * psi[1] * psi[2],
            4.0 * psi[0] * psi[2],
            4.0 * psi[0] * psi[3],
            4.0 * psi[2] * psi[3],
            4.0 * psi[1] * psi[3]
        ])
    }

    #[rustfmt::skip]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn gradients(&self, xi: &Point3<T>) -> OMatrix<T, U3, U10> {
        let psi = Tet4.evaluate_basis(xi);
        let g = Tet4.gradients(xi);

        let vertex_gradient = |i| g.index((.., i)) * (4.0 * psi[i] - 1.0);
        let edge_gradient = |i, j|
            g.index((.., i)) * (4.0 * psi[j]) + g.index((.., j)) * (4.0 * psi[i]);

        OMatrix::<T, U3, U10>::from_columns(&[
            vertex_gradient(0),
            vertex_gradient(1),
            vertex_gradient(2),
            vertex_gradient(3),
            edge_gradient(0, 1),
            edge_gradient(1, 2),
            edge_gradient(0, 2),
            edge_gradient(0, 3),
            edge_gradient(2, 3),
            edge_gradient(1, 3)
        ])
    }
}
