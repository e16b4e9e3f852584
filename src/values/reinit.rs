use crate::allocators::DimAllocator;
use crate::error::{BoundaryError, Degeneracy};
use crate::values::{BoundaryValues, ShapeKind};
use crate::{Real, SmallDim};
use itertools::izip;
use log::debug;
use nalgebra::{DefaultAllocator, OMatrix, OPoint};

impl<T, D, K, I, G> BoundaryValues<T, D, K, I, G>
where
    T: Real,
    D: SmallDim,
    K: ShapeKind<T, D>,
    DefaultAllocator: DimAllocator<T, D>,
{
    /// Maps the given facet of a physical cell.
    ///
    /// `coords` are the physical coordinates of the geometry nodes of the cell, in the node
    /// order of the geometry space. On success, the physical gradients, differential surface
    /// measures and outward normals of `facet` are updated and `facet` becomes the current
    /// facet.
    ///
    /// At each quadrature point `xi` of the facet, the reference Jacobian
    /// `J = sum_j x_j (grad M_j(xi))^T` is formed and inverted, basis gradients are pushed
    /// forward with `J^{-1}`, and the area vector of the facet is obtained from the area
    /// vector `a` of the reference facet as `det(J) J^{-T} a`. Its norm times the quadrature
    /// weight is the differential measure `detJdV`, and its direction the outward normal.
    ///
    /// Inverted cells, whose Jacobian has negative determinant, are not rejected. The surface
    /// measure is a norm and stays positive, while the computed normals point into the cell.
    ///
    /// Calling `reinit` again with the same arguments reproduces the same results bit for bit.
    ///
    /// # Errors
    ///
    /// Returns a dimension error if the number of coordinates does not match the number of
    /// geometry nodes, in which case nothing is modified. Returns a degenerate geometry error
    /// if the Jacobian is singular or the surface measure is not positive at some quadrature
    /// point. In that case the current facet is still updated, but its physical data is only
    /// partially overwritten and must not be used.
    ///
    /// # Panics
    ///
    /// Panics if the facet index is out of bounds.
    #[allow(non_snake_case)]
    pub fn reinit(&mut self, coords: &[OPoint<T, D>], facet: usize) -> Result<(), BoundaryError> {
        let reference = &*self.reference;
        assert!(
            facet < reference.num_facets(),
            "facet index {facet} out of bounds for {} facets",
            reference.num_facets()
        );
        if coords.len() != reference.num_geometry_basis {
            return Err(BoundaryError::dimension_mismatch(
                "geometry node coordinates",
                reference.num_geometry_basis,
                coords.len(),
            ));
        }

        self.current_facet = facet;
        let (weights, _) = &reference.quadratures[facet];
        let reference_area = &reference.reference_area_vectors[facet];

        for (q, &weight) in weights.iter().enumerate() {
            let degenerate = |kind: Degeneracy| {
                debug!("Rejected mapping of facet {facet} at quadrature point {q}: {kind}");
                BoundaryError::DegenerateGeometry {
                    facet,
                    quadrature_point: q,
                    kind,
                }
            };

            let dM_dxi = &reference.geometry_gradients[reference.geometry_range(facet, q)];
            let mut J = OMatrix::<T, D, D>::zeros();
            for (x_j, dm_j) in izip!(coords, dM_dxi) {
                J += &x_j.coords * dm_j.transpose();
            }

            // Singularity test relative to the column norms of J
            let det = J.determinant();
            let column_scale = J
                .column_iter()
                .fold(T::one(), |scale, column| scale * column.norm());
            if !(det.abs() > T::default_epsilon() * column_scale) {
                return Err(degenerate(Degeneracy::SingularJacobian));
            }
            let J_inv = J
                .try_inverse()
                .ok_or_else(|| degenerate(Degeneracy::SingularJacobian))?;

            let area = J_inv.tr_mul(reference_area) * det;
            let surface_measure = area.norm();
            if !(surface_measure > T::zero()) {
                return Err(degenerate(Degeneracy::NonPositiveSurfaceMeasure));
            }

            let point_index = reference.point_index(facet, q);
            self.normals[point_index] = area / surface_measure;
            self.differential_measures[(q, facet)] = surface_measure * weight;

            let range = reference.basis_range(facet, q);
            let dN_dxi = &reference.shape_gradients[range.clone()];
            for (dN_dx, dN_dxi) in izip!(&mut self.physical_gradients[range], dN_dxi) {
                *dN_dx = K::push_forward(dN_dxi, &J_inv);
            }
        }

        Ok(())
    }
}
