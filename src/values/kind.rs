use crate::allocators::DimAllocator;
use crate::{Real, SmallDim};
use nalgebra::{DefaultAllocator, OMatrix, OVector};
use num::Zero;
use std::fmt::Debug;
use std::ops::{AddAssign, Mul};

/// Determines how the scalar basis of an interpolation is turned into the basis that
/// [`BoundaryValues`](crate::values::BoundaryValues) exposes.
///
/// A scalar basis function `N_b` with reference gradient `dN_b/dxi` gives rise to
/// [`components_per_basis`](Self::components_per_basis) exposed basis functions, numbered
/// `b * components_per_basis() + c`.
pub trait ShapeKind<T, D>: Copy + Debug + Default + Send + Sync + 'static
where
    T: Real,
    D: SmallDim,
    DefaultAllocator: DimAllocator<T, D>,
{
    type Value: Clone + Debug + PartialEq + Zero + AddAssign + Mul<T, Output = Self::Value>;
    type Gradient: Clone + Debug + PartialEq + Zero + AddAssign + Mul<T, Output = Self::Gradient>;

    fn components_per_basis() -> usize;

    /// The value of exposed basis function `component` derived from a scalar basis value.
    fn expand_value(value: T, component: usize) -> Self::Value;

    /// The gradient of exposed basis function `component` derived from a scalar basis gradient.
    fn expand_gradient(gradient: &OVector<T, D>, component: usize) -> Self::Gradient;

    /// Maps a gradient with respect to reference coordinates to a gradient with respect to
    /// physical coordinates, given the inverse of the reference Jacobian `dx/dxi`.
    fn push_forward(reference_gradient: &Self::Gradient, inverse_jacobian: &OMatrix<T, D, D>) -> Self::Gradient;
}

/// Scalar-valued basis functions with vector gradients.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ScalarShape;

/// Vector-valued basis functions in `D` dimensions with `D x D` gradient tensors.
///
/// Every scalar basis function `N_b` yields `D` vector basis functions `N_b e_c`. The gradient
/// tensor of `N_b e_c` has `grad N_b` as its row `c`, so that entry `(i, j)` of the gradient
/// of a vector field is `du_i/dx_j`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct VectorShape;

impl<T, D> ShapeKind<T, D> for ScalarShape
where
    T: Real,
    D: SmallDim,
    DefaultAllocator: DimAllocator<T, D>,
{
    type Value = T;
    type Gradient = OVector<T, D>;

    fn components_per_basis() -> usize {
        1
    }

    fn expand_value(value: T, _component: usize) -> T {
        value
    }

    fn expand_gradient(gradient: &OVector<T, D>, _component: usize) -> OVector<T, D> {
        gradient.clone()
    }

    fn push_forward(reference_gradient: &OVector<T, D>, inverse_jacobian: &OMatrix<T, D, D>) -> OVector<T, D> {
        // grad_x N = J^{-T} grad_xi N
        inverse_jacobian.tr_mul(reference_gradient)
    }
}

impl<T, D> ShapeKind<T, D> for VectorShape
where
    T: Real,
    D: SmallDim,
    DefaultAllocator: DimAllocator<T, D>,
{
    type Value = OVector<T, D>;
    type Gradient = OMatrix<T, D, D>;

    fn components_per_basis() -> usize {
        D::dim()
    }

    fn expand_value(value: T, component: usize) -> OVector<T, D> {
        let mut expanded = OVector::<T, D>::zeros();
        expanded[component] = value;
        expanded
    }

    fn expand_gradient(gradient: &OVector<T, D>, component: usize) -> OMatrix<T, D, D> {
        OMatrix::<T, D, D>::from_fn(|i, j| if i == component { gradient[j] } else { T::zero() })
    }

    fn push_forward(reference_gradient: &OMatrix<T, D, D>, inverse_jacobian: &OMatrix<T, D, D>) -> OMatrix<T, D, D> {
        reference_gradient * inverse_jacobian
    }
}
