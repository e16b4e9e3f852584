//! Reference interpolations and the node layout of their facets.
use crate::allocators::DimAllocator;
use crate::reference::ReferenceShape;
use crate::{Real, SmallDim};
use nalgebra::allocator::Allocator;
use nalgebra::{DefaultAllocator, DimName, Dyn, MatrixViewMut, OMatrix, OPoint, Scalar, U1};
use numeric_literals::replace_float_literals;

mod hexahedron;
mod quadrilateral;
mod tetrahedron;
mod triangle;

pub use hexahedron::*;
pub use quadrilateral::*;
pub use tetrahedron::*;
pub use triangle::*;

pub trait ReferenceFiniteElement<T>
where
    T: Scalar,
    DefaultAllocator: DimAllocator<T, Self::ReferenceDim>,
{
    type ReferenceDim: SmallDim;

    /// Returns the number of nodes in the element.
    fn num_nodes(&self) -> usize;

    /// Evaluates each basis function at the given reference coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `basis_values` does not have exactly one entry per node.
    fn populate_basis(&self, basis_values: &mut [T], reference_coords: &OPoint<T, Self::ReferenceDim>);

    /// Populates a matrix whose columns are the reference gradients of each basis function.
    ///
    /// # Panics
    ///
    /// Panics if `basis_gradients` does not have exactly one column per node.
    fn populate_basis_gradients(
        &self,
        basis_gradients: MatrixViewMut<T, Self::ReferenceDim, Dyn>,
        reference_coords: &OPoint<T, Self::ReferenceDim>,
    );
}

/// Reference finite elements with a number of nodes fixed at compile-time.
pub trait FixedNodesReferenceFiniteElement<T>
where
    T: Scalar,
    DefaultAllocator: DimAllocator<T, Self::ReferenceDim>
        + Allocator<T, U1, Self::NodalDim>
        + Allocator<T, Self::ReferenceDim, Self::NodalDim>,
{
    type ReferenceDim: SmallDim;
    type NodalDim: SmallDim;

    /// Evaluates each basis function at the given reference coordinates. The result is given
    /// in a row vector where each entry is the value of the corresponding basis function.
    fn evaluate_basis(&self, reference_coords: &OPoint<T, Self::ReferenceDim>) -> OMatrix<T, U1, Self::NodalDim>;

    /// Constructs a matrix whose columns are the reference gradients of each basis function.
    fn gradients(&self, reference_coords: &OPoint<T, Self::ReferenceDim>)
        -> OMatrix<T, Self::ReferenceDim, Self::NodalDim>;
}

/// Node layout of the facets of an element.
///
/// Facets are numbered from zero in the order of [`ReferenceShape::facet_vertices`].
/// The nodes of a facet are listed with the vertex nodes first, in the same order as the
/// vertices of the reference facet, followed by any higher-order nodes.
pub trait FacetTopology {
    fn reference_shape(&self) -> ReferenceShape;

    /// The total number of nodes of the cell.
    fn num_cell_nodes(&self) -> usize;

    fn nodes_per_facet(&self) -> usize;

    /// The local node indices of the given facet, or `None` if the facet does not exist.
    fn facet_nodes(&self, facet: usize) -> Option<&'static [usize]>;

    fn num_facets(&self) -> usize {
        self.reference_shape().num_facets()
    }
}

/// Interpolations that can be evaluated on the boundary of their reference cell.
pub trait BoundaryInterpolation<T>: ReferenceFiniteElement<T> + FacetTopology
where
    T: Scalar,
    DefaultAllocator: DimAllocator<T, Self::ReferenceDim>,
{
}

impl<T, X> BoundaryInterpolation<T> for X
where
    T: Scalar,
    X: ReferenceFiniteElement<T> + FacetTopology,
    DefaultAllocator: DimAllocator<T, X::ReferenceDim>,
{
}

/// Implements `ReferenceFiniteElement` for any element that implements
/// `FixedNodesReferenceFiniteElement`.
///
/// A blanket impl would prevent implementing `ReferenceFiniteElement` directly for elements
/// with a runtime number of nodes, so the macro is invoked for each fixed element instead.
macro_rules! impl_reference_finite_element_for_fixed {
    ($element:ty) => {
        impl<T> ReferenceFiniteElement<T> for $element
        where
            T: Scalar,
            $element: FixedNodesReferenceFiniteElement<T>,
            DefaultAllocator: DimAllocator<T, <$element as FixedNodesReferenceFiniteElement<T>>::ReferenceDim>
                + Allocator<T, U1, <$element as FixedNodesReferenceFiniteElement<T>>::NodalDim>
                + Allocator<
                    T,
                    <$element as FixedNodesReferenceFiniteElement<T>>::ReferenceDim,
                    <$element as FixedNodesReferenceFiniteElement<T>>::NodalDim,
                >,
        {
            type ReferenceDim = <Self as FixedNodesReferenceFiniteElement<T>>::ReferenceDim;

            fn num_nodes(&self) -> usize {
                <$element as FixedNodesReferenceFiniteElement<T>>::NodalDim::dim()
            }

            fn populate_basis(&self, result: &mut [T], reference_coords: &OPoint<T, Self::ReferenceDim>) {
                let basis_values =
                    <$element as FixedNodesReferenceFiniteElement<T>>::evaluate_basis(self, reference_coords);
                result.clone_from_slice(&basis_values.as_slice());
            }

            fn populate_basis_gradients(
                &self,
                mut result: MatrixViewMut<T, Self::ReferenceDim, Dyn>,
                reference_coords: &OPoint<T, Self::ReferenceDim>,
            ) {
                let gradients = <$element as FixedNodesReferenceFiniteElement<T>>::gradients(self, reference_coords);
                result.copy_from(&gradients);
            }
        }
    };
}

/// Implements `FacetTopology` from a static facet node table.
macro_rules! impl_facet_topology {
    ($element:ty, $shape:expr, $num_nodes:expr, $facets:expr) => {
        impl FacetTopology for $element {
            fn reference_shape(&self) -> ReferenceShape {
                $shape
            }

            fn num_cell_nodes(&self) -> usize {
                $num_nodes
            }

            fn nodes_per_facet(&self) -> usize {
                $facets[0].len()
            }

            fn facet_nodes(&self, facet: usize) -> Option<&'static [usize]> {
                $facets.get(facet).map(|nodes| nodes.as_slice())
            }
        }
    };
}

impl_reference_finite_element_for_fixed!(Tri3);
impl_reference_finite_element_for_fixed!(Tri6);
impl_reference_finite_element_for_fixed!(Quad4);
impl_reference_finite_element_for_fixed!(Quad9);
impl_reference_finite_element_for_fixed!(Tet4);
impl_reference_finite_element_for_fixed!(Tet10);
impl_reference_finite_element_for_fixed!(Hex8);

impl_facet_topology!(Tri3, ReferenceShape::Triangle, 3, TRI3_FACETS);
impl_facet_topology!(Tri6, ReferenceShape::Triangle, 6, TRI6_FACETS);
impl_facet_topology!(Quad4, ReferenceShape::Quadrilateral, 4, QUAD4_FACETS);
impl_facet_topology!(Quad9, ReferenceShape::Quadrilateral, 9, QUAD9_FACETS);
impl_facet_topology!(Tet4, ReferenceShape::Tetrahedron, 4, TET4_FACETS);
impl_facet_topology!(Tet10, ReferenceShape::Tetrahedron, 10, TET10_FACETS);
impl_facet_topology!(Hex8, ReferenceShape::Hexahedron, 8, HEX8_FACETS);

static TRI3_FACETS: [[usize; 2]; 3] = [[0, 1], [1, 2], [2, 0]];
static TRI6_FACETS: [[usize; 3]; 3] = [[0, 1, 3], [1, 2, 4], [2, 0, 5]];
static QUAD4_FACETS: [[usize; 2]; 4] = [[0, 1], [1, 2], [2, 3], [3, 0]];
static QUAD9_FACETS: [[usize; 3]; 4] = [[0, 1, 4], [1, 2, 5], [2, 3, 6], [3, 0, 7]];
static TET4_FACETS: [[usize; 3]; 4] = [[0, 2, 1], [0, 1, 3], [1, 2, 3], [0, 3, 2]];
#[rustfmt::skip]
static TET10_FACETS: [[usize; 6]; 4] = [
    [0, 2, 1, 6, 5, 4],
    [0, 1, 3, 4, 9, 7],
    [1, 2, 3, 5, 8, 9],
    [0, 3, 2, 7, 8, 6],
];
#[rustfmt::skip]
static HEX8_FACETS: [[usize; 4]; 6] = [
    [3, 2, 1, 0],
    [0, 1, 5, 4],
    [1, 2, 6, 5],
    [2, 3, 7, 6],
    [4, 7, 3, 0],
    [5, 6, 7, 4],
];

/// Linear basis function on the interval [-1, 1].
///
/// `alpha == -1` denotes the basis function associated with the node at `x == -1`,
/// and `alpha == 1` for `x == 1`.
#[replace_float_literals(T::from_f64(literal).unwrap())]
#[inline(always)]
fn phi_linear_1d<T>(alpha: T, xi: T) -> T
where
    T: Real,
{
    (1.0 + alpha * xi) / 2.0
}

/// Gradient for the linear basis function on the interval [-1, 1].
///
/// See `phi_linear_1d` for the meaning of `alpha`.
#[replace_float_literals(T::from_f64(literal).unwrap())]
#[inline(always)]
fn phi_linear_1d_grad<T>(alpha: T) -> T
where
    T: Real,
{
    alpha / 2.0
}

/// Quadratic basis function on the interval [-1, 1].
///
/// `alpha == -1` denotes the basis function associated with the node at `x == -1`,
/// `alpha == 0` denotes the basis function associated with the node at `x == 0`,
/// and `alpha == 1` for `x == 1`.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
fn phi_quadratic_1d<T>(alpha: T, xi: T) -> T
where
    T: Real,
{
    let alpha2 = alpha * alpha;
    let a = (3.0 / 2.0) * alpha2 - 1.0;
    let b = alpha / 2.0;
    let c = 1.0 - alpha2;
    a * xi * xi + b * xi + c
}

/// Gradient for the quadratic basis function on the interval [-1, 1].
///
/// See `phi_quadratic_1d` for the meaning of `alpha`.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
fn phi_quadratic_1d_grad<T>(alpha: T, xi: T) -> T
where
    T: Real,
{
    let alpha2 = alpha * alpha;
    let a = (3.0 / 2.0) * alpha2 - 1.0;
    let b = alpha / 2.0;
    2.0 * a * xi + b
}
