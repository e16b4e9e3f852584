//! Shape function values on the facets of a reference cell, mapped to physical cells.
//!
//! A [`BoundaryValues`] object is built once for a combination of interpolation space,
//! geometry space and facet quadrature rule. Construction evaluates every basis function at
//! every quadrature point of every facet of the reference cell. Afterwards,
//! [`reinit`](BoundaryValues::reinit) maps a single facet of a physical cell, described by the
//! coordinates of its geometry nodes, and makes the physical gradients, the differential
//! surface measures and the outward normals of that facet available.
//!
//! Only the facet passed to the most recent successful call to `reinit` carries valid
//! physical data. Data stored for other facets is left untouched and may be stale.
//!
//! The cached reference data is shared between clones, so a thread pool can give each worker
//! its own clone and map cells independently.
use crate::allocators::DimAllocator;
use crate::element::BoundaryInterpolation;
use crate::error::BoundaryError;
use crate::quadrature::{facet_quadratures, Quadrature, QuadraturePair};
use crate::reference::{area_vector, reference_facets};
use crate::{Real, SmallDim};
use itertools::izip;
use log::debug;
use nalgebra::{DMatrix, DefaultAllocator, MatrixViewMut, OMatrix, OPoint, OVector};
use num::Zero;
use std::sync::Arc;

mod kind;
mod reinit;

pub use kind::*;

/// Boundary values of scalar-valued basis functions.
pub type ScalarBoundaryValues<T, D, I, G = I> = BoundaryValues<T, D, ScalarShape, I, G>;

/// Boundary values of vector-valued basis functions.
pub type VectorBoundaryValues<T, D, I, G = I> = BoundaryValues<T, D, VectorShape, I, G>;

/// Reference data that never changes after construction.
#[derive(Debug)]
struct ReferenceValues<T, D, K, I, G>
where
    T: Real,
    D: SmallDim,
    K: ShapeKind<T, D>,
    DefaultAllocator: DimAllocator<T, D>,
{
    interpolation: I,
    geometry: G,
    quadratures: Vec<QuadraturePair<T, D>>,
    /// Area vectors spanned by the tangents of each reference facet.
    reference_area_vectors: Vec<OVector<T, D>>,
    num_quadrature_points: usize,
    num_basis: usize,
    num_geometry_basis: usize,
    /// Indexed by `(facet * num_quadrature_points + q) * num_basis + basis`.
    shape_values: Vec<K::Value>,
    shape_gradients: Vec<K::Gradient>,
    /// Indexed by `(facet * num_quadrature_points + q) * num_geometry_basis + basis`.
    geometry_values: Vec<T>,
    geometry_gradients: Vec<OVector<T, D>>,
}

impl<T, D, K, I, G> ReferenceValues<T, D, K, I, G>
where
    T: Real,
    D: SmallDim,
    K: ShapeKind<T, D>,
    DefaultAllocator: DimAllocator<T, D>,
{
    fn num_facets(&self) -> usize {
        self.quadratures.len()
    }

    fn point_index(&self, facet: usize, q: usize) -> usize {
        // Keeps q within the block of the given facet in the flat caches
        assert!(q < self.num_quadrature_points, "quadrature point index out of bounds");
        facet * self.num_quadrature_points + q
    }

    fn basis_range(&self, facet: usize, q: usize) -> std::ops::Range<usize> {
        let begin = self.point_index(facet, q) * self.num_basis;
        begin..begin + self.num_basis
    }

    fn geometry_range(&self, facet: usize, q: usize) -> std::ops::Range<usize> {
        let begin = self.point_index(facet, q) * self.num_geometry_basis;
        begin..begin + self.num_geometry_basis
    }
}

/// Values and gradients of an interpolation space on the facets of a cell.
///
/// `K` selects scalar ([`ScalarShape`]) or vector ([`VectorShape`]) basis functions,
/// `I` is the interpolation space and `G` the space describing the geometry of the cell.
/// Geometry is always interpolated with scalar basis functions, one per geometry node.
#[derive(Debug)]
pub struct BoundaryValues<T, D, K, I, G = I>
where
    T: Real,
    D: SmallDim,
    K: ShapeKind<T, D>,
    DefaultAllocator: DimAllocator<T, D>,
{
    reference: Arc<ReferenceValues<T, D, K, I, G>>,
    /// Same layout as the reference shape gradients.
    physical_gradients: Vec<K::Gradient>,
    /// Entry `(q, facet)` holds `detJdV` of quadrature point `q` on `facet`.
    differential_measures: DMatrix<T>,
    /// Indexed by `facet * num_quadrature_points + q`.
    normals: Vec<OVector<T, D>>,
    current_facet: usize,
}

impl<T, D, K, I, G> Clone for BoundaryValues<T, D, K, I, G>
where
    T: Real,
    D: SmallDim,
    K: ShapeKind<T, D>,
    DefaultAllocator: DimAllocator<T, D>,
{
    fn clone(&self) -> Self {
        Self {
            reference: Arc::clone(&self.reference),
            physical_gradients: self.physical_gradients.clone(),
            differential_measures: self.differential_measures.clone(),
            normals: self.normals.clone(),
            current_facet: self.current_facet,
        }
    }
}

impl<T, D, K, I> BoundaryValues<T, D, K, I, I>
where
    T: Real,
    D: SmallDim,
    K: ShapeKind<T, D>,
    I: BoundaryInterpolation<T, ReferenceDim = D> + Clone,
    DefaultAllocator: DimAllocator<T, D>,
{
    /// Precomputes boundary values for an interpolation space that also describes the
    /// geometry of the cell.
    ///
    /// See [`with_geometry`](Self::with_geometry).
    pub fn new<F>(facet_rule: impl Quadrature<T, F>, interpolation: I) -> Result<Self, BoundaryError>
    where
        F: SmallDim,
        DefaultAllocator: DimAllocator<T, F>,
    {
        let geometry = interpolation.clone();
        Self::with_geometry(facet_rule, interpolation, geometry)
    }
}

impl<T, D, K, I, G> BoundaryValues<T, D, K, I, G>
where
    T: Real,
    D: SmallDim,
    K: ShapeKind<T, D>,
    I: BoundaryInterpolation<T, ReferenceDim = D>,
    G: BoundaryInterpolation<T, ReferenceDim = D>,
    DefaultAllocator: DimAllocator<T, D>,
{
    /// Precomputes boundary values of `interpolation` on a cell whose geometry is described
    /// by `geometry`.
    ///
    /// The facet rule lives on the reference domain of the facets (see
    /// [`facet_quadratures`]). It is placed on every facet of the reference cell, and the
    /// values and reference gradients of both spaces are cached at every resulting point.
    ///
    /// # Errors
    ///
    /// Fails if the two spaces are defined on different reference shapes, if the facet rule
    /// does not have the dimension of the facets, or if a space reports a number of cell nodes
    /// that differs from its number of basis functions.
    pub fn with_geometry<F>(
        facet_rule: impl Quadrature<T, F>,
        interpolation: I,
        geometry: G,
    ) -> Result<Self, BoundaryError>
    where
        F: SmallDim,
        DefaultAllocator: DimAllocator<T, F>,
    {
        let shape = interpolation.reference_shape();
        if geometry.reference_shape() != shape {
            return Err(BoundaryError::ReferenceShapeMismatch {
                interpolation: shape,
                geometry: geometry.reference_shape(),
            });
        }
        check_node_count::<T, _>(&interpolation, "interpolation nodes")?;
        check_node_count::<T, _>(&geometry, "geometry nodes")?;

        let quadratures = facet_quadratures::<T, D, F>(facet_rule, shape)?;
        let reference_area_vectors = reference_facets::<T, D>(shape)?
            .iter()
            .map(|facet| area_vector(facet.tangents()))
            .collect();

        let num_quadrature_points = quadratures
            .first()
            .map(|(weights, _)| weights.len())
            .unwrap_or(0);
        let components = K::components_per_basis();
        let num_basis = interpolation.num_nodes() * components;
        let num_geometry_basis = geometry.num_nodes();

        let capacity = quadratures.len() * num_quadrature_points;
        let mut shape_values: Vec<K::Value> = Vec::with_capacity(capacity * num_basis);
        let mut shape_gradients: Vec<K::Gradient> = Vec::with_capacity(capacity * num_basis);
        let mut geometry_values: Vec<T> = Vec::with_capacity(capacity * num_geometry_basis);
        let mut geometry_gradients: Vec<OVector<T, D>> = Vec::with_capacity(capacity * num_geometry_basis);

        let mut interpolation_buffer = ScalarBasisBuffer::new(D::dim(), interpolation.num_nodes());
        let mut geometry_buffer = ScalarBasisBuffer::new(D::dim(), num_geometry_basis);
        for (_, points) in &quadratures {
            for xi in points {
                interpolation_buffer.populate(&interpolation, xi);
                for (b, value) in interpolation_buffer.values.iter().enumerate() {
                    let gradient = interpolation_buffer.gradient::<D>(b);
                    for c in 0..components {
                        shape_values.push(K::expand_value(*value, c));
                        shape_gradients.push(K::expand_gradient(&gradient, c));
                    }
                }

                geometry_buffer.populate(&geometry, xi);
                geometry_values.extend_from_slice(&geometry_buffer.values);
                geometry_gradients.extend((0..num_geometry_basis).map(|j| geometry_buffer.gradient::<D>(j)));
            }
        }

        let num_facets = quadratures.len();
        debug!(
            "Precomputed boundary values on {:?}: {} facets, {} quadrature points per facet, {} basis functions, {} geometry basis functions",
            shape, num_facets, num_quadrature_points, num_basis, num_geometry_basis
        );

        let physical_gradients = vec![K::Gradient::zero(); shape_gradients.len()];
        let reference = ReferenceValues {
            interpolation,
            geometry,
            quadratures,
            reference_area_vectors,
            num_quadrature_points,
            num_basis,
            num_geometry_basis,
            shape_values,
            shape_gradients,
            geometry_values,
            geometry_gradients,
        };

        Ok(Self {
            reference: Arc::new(reference),
            physical_gradients,
            differential_measures: DMatrix::zeros(num_quadrature_points, num_facets),
            normals: vec![OVector::<T, D>::zeros(); num_facets * num_quadrature_points],
            current_facet: 0,
        })
    }
}

fn check_node_count<T, E>(space: &E, quantity: &'static str) -> Result<(), BoundaryError>
where
    T: Real,
    E: BoundaryInterpolation<T>,
    DefaultAllocator: DimAllocator<T, E::ReferenceDim>,
{
    if space.num_nodes() != space.num_cell_nodes() {
        return Err(BoundaryError::dimension_mismatch(
            quantity,
            space.num_cell_nodes(),
            space.num_nodes(),
        ));
    }
    Ok(())
}

/// Scratch space for evaluating a scalar basis at a single point.
struct ScalarBasisBuffer<T: Real> {
    values: Vec<T>,
    gradients: DMatrix<T>,
}

impl<T: Real> ScalarBasisBuffer<T> {
    fn new(reference_dim: usize, num_nodes: usize) -> Self {
        Self {
            values: vec![T::zero(); num_nodes],
            gradients: DMatrix::zeros(reference_dim, num_nodes),
        }
    }

    fn populate<E, D>(&mut self, space: &E, xi: &OPoint<T, D>)
    where
        D: SmallDim,
        E: BoundaryInterpolation<T, ReferenceDim = D>,
        DefaultAllocator: DimAllocator<T, D>,
    {
        space.populate_basis(&mut self.values, xi);
        space.populate_basis_gradients(MatrixViewMut::from(&mut self.gradients), xi);
    }

    fn gradient<D>(&self, basis: usize) -> OVector<T, D>
    where
        D: SmallDim,
        DefaultAllocator: DimAllocator<T, D>,
    {
        OVector::<T, D>::from_iterator(self.gradients.column(basis).iter().copied())
    }
}

impl<T, D, K, I, G> BoundaryValues<T, D, K, I, G>
where
    T: Real,
    D: SmallDim,
    K: ShapeKind<T, D>,
    DefaultAllocator: DimAllocator<T, D>,
{
    pub fn num_quadrature_points(&self) -> usize {
        self.reference.num_quadrature_points
    }

    pub fn num_facets(&self) -> usize {
        self.reference.num_facets()
    }

    /// The number of exposed basis functions.
    ///
    /// For vector-valued basis functions this is the number of interpolation nodes times the
    /// dimension.
    pub fn num_basis(&self) -> usize {
        self.reference.num_basis
    }

    pub fn num_geometry_basis(&self) -> usize {
        self.reference.num_geometry_basis
    }

    /// The quadrature rule placed on the given facet of the reference cell.
    ///
    /// # Panics
    ///
    /// Panics if the facet index is out of bounds.
    pub fn quadrature(&self, facet: usize) -> &QuadraturePair<T, D> {
        &self.reference.quadratures[facet]
    }

    pub fn quadratures(&self) -> &[QuadraturePair<T, D>] {
        &self.reference.quadratures
    }

    pub fn interpolation(&self) -> &I {
        &self.reference.interpolation
    }

    pub fn geometry(&self) -> &G {
        &self.reference.geometry
    }

    /// The facet mapped by the most recent call to [`reinit`](Self::reinit).
    ///
    /// Before the first call this is `0`, with all physical data set to zero.
    pub fn current_facet(&self) -> usize {
        self.current_facet
    }

    /// The differential surface measures `detJdV`, one row per quadrature point and one
    /// column per facet.
    ///
    /// Only the column of the current facet is guaranteed to be up to date.
    pub fn differential_measures(&self) -> &DMatrix<T> {
        &self.differential_measures
    }

    /// `detJdV` at the given quadrature point of the current facet.
    ///
    /// # Panics
    ///
    /// Panics if the quadrature point index is out of bounds.
    pub fn differential_measure(&self, q: usize) -> T {
        assert!(q < self.num_quadrature_points(), "quadrature point index out of bounds");
        self.differential_measures[(q, self.current_facet)]
    }

    /// The outward unit normal at the given quadrature point of the current facet.
    ///
    /// The normal points out of the cell when the cell is positively oriented, i.e. when its
    /// reference Jacobian has positive determinant.
    ///
    /// # Panics
    ///
    /// Panics if the quadrature point index is out of bounds.
    pub fn normal(&self, q: usize) -> &OVector<T, D> {
        let index = self.reference.point_index(self.current_facet, q);
        &self.normals[index]
    }

    /// The value of the given basis function at a quadrature point of the current facet.
    ///
    /// # Panics
    ///
    /// Panics if the basis or quadrature point index is out of bounds.
    pub fn shape_value(&self, basis: usize, q: usize) -> &K::Value {
        &self.reference.shape_values[self.basis_index(basis, q)]
    }

    /// The gradient with respect to reference coordinates of the given basis function at a
    /// quadrature point of the current facet.
    ///
    /// # Panics
    ///
    /// Panics if the basis or quadrature point index is out of bounds.
    pub fn reference_shape_gradient(&self, basis: usize, q: usize) -> &K::Gradient {
        &self.reference.shape_gradients[self.basis_index(basis, q)]
    }

    /// The gradient with respect to physical coordinates of the given basis function at a
    /// quadrature point of the current facet.
    ///
    /// # Panics
    ///
    /// Panics if the basis or quadrature point index is out of bounds.
    pub fn shape_gradient(&self, basis: usize, q: usize) -> &K::Gradient {
        &self.physical_gradients[self.basis_index(basis, q)]
    }

    /// Physical gradients stored for the given facet, ordered by quadrature point and then
    /// basis function.
    ///
    /// Unless `facet` is the current facet, the returned data stems from an earlier mapping
    /// (possibly of a different cell) and is not meaningful for the current cell.
    ///
    /// # Panics
    ///
    /// Panics if the facet index is out of bounds.
    pub fn physical_gradients(&self, facet: usize) -> &[K::Gradient] {
        assert!(facet < self.num_facets(), "facet index out of bounds");
        let begin = self.reference.basis_range(facet, 0).start;
        let end = begin + self.num_quadrature_points() * self.num_basis();
        &self.physical_gradients[begin..end]
    }

    /// Evaluates `sum_j u_j N_j` at a quadrature point of the current facet.
    ///
    /// # Panics
    ///
    /// Panics if `u` does not have exactly one coefficient per basis function, or if the
    /// quadrature point index is out of bounds.
    pub fn function_value(&self, q: usize, u: &[T]) -> K::Value {
        assert_eq!(u.len(), self.num_basis(), "one coefficient per basis function required");
        let range = self.reference.basis_range(self.current_facet, q);
        let mut value = K::Value::zero();
        for (&u_j, n_j) in izip!(u, &self.reference.shape_values[range]) {
            value += n_j.clone() * u_j;
        }
        value
    }

    /// Evaluates `sum_j u_j grad N_j` with respect to physical coordinates at a quadrature
    /// point of the current facet.
    ///
    /// # Panics
    ///
    /// Panics if `u` does not have exactly one coefficient per basis function, or if the
    /// quadrature point index is out of bounds.
    pub fn function_gradient(&self, q: usize, u: &[T]) -> K::Gradient {
        assert_eq!(u.len(), self.num_basis(), "one coefficient per basis function required");
        let range = self.reference.basis_range(self.current_facet, q);
        let mut gradient = K::Gradient::zero();
        for (&u_j, dn_j) in izip!(u, &self.physical_gradients[range]) {
            gradient += dn_j.clone() * u_j;
        }
        gradient
    }

    /// Evaluates the physical position `sum_j M_j x_j` of a quadrature point of the current
    /// facet.
    ///
    /// # Panics
    ///
    /// Panics if `coords` does not have exactly one point per geometry basis function, or if
    /// the quadrature point index is out of bounds.
    pub fn spatial_coordinate(&self, q: usize, coords: &[OPoint<T, D>]) -> OPoint<T, D> {
        assert_eq!(coords.len(), self.num_geometry_basis(), "one point per geometry node required");
        let range = self.reference.geometry_range(self.current_facet, q);
        let mut x = OVector::<T, D>::zeros();
        for (x_j, &m_j) in izip!(coords, &self.reference.geometry_values[range]) {
            x += &x_j.coords * m_j;
        }
        OPoint::from(x)
    }

    fn basis_index(&self, basis: usize, q: usize) -> usize {
        assert!(basis < self.num_basis(), "basis index out of bounds");
        self.reference.basis_range(self.current_facet, q).start + basis
    }
}

impl<T, D, I, G> BoundaryValues<T, D, VectorShape, I, G>
where
    T: Real,
    D: SmallDim,
    DefaultAllocator: DimAllocator<T, D>,
{
    /// The symmetric part `(G + G^T) / 2` of the physical gradient of a basis function.
    pub fn shape_symmetric_gradient(&self, basis: usize, q: usize) -> OMatrix<T, D, D> {
        symmetric_part(self.shape_gradient(basis, q))
    }

    /// The divergence (trace of the physical gradient) of a basis function.
    pub fn shape_divergence(&self, basis: usize, q: usize) -> T {
        self.shape_gradient(basis, q).trace()
    }

    /// The symmetric part of [`function_gradient`](Self::function_gradient).
    ///
    /// # Panics
    ///
    /// Panics if `u` does not have exactly one coefficient per basis function.
    pub fn function_symmetric_gradient(&self, q: usize, u: &[T]) -> OMatrix<T, D, D> {
        symmetric_part(&self.function_gradient(q, u))
    }

    /// The divergence of the vector field `sum_j u_j N_j`.
    ///
    /// # Panics
    ///
    /// Panics if `u` does not have exactly one coefficient per basis function.
    pub fn function_divergence(&self, q: usize, u: &[T]) -> T {
        self.function_gradient(q, u).trace()
    }
}

fn symmetric_part<T, D>(gradient: &OMatrix<T, D, D>) -> OMatrix<T, D, D>
where
    T: Real,
    D: SmallDim,
    DefaultAllocator: DimAllocator<T, D>,
{
    let half = T::one() / (T::one() + T::one());
    (gradient + gradient.transpose()) * half
}
