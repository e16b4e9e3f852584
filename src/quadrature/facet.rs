//! Placement of quadrature rules on the facets of reference cells.
use crate::allocators::DimAllocator;
use crate::error::BoundaryError;
use crate::quadrature::{Quadrature, QuadraturePair};
use crate::reference::{reference_facets, ReferenceShape};
use crate::{Real, SmallDim};
use nalgebra::DefaultAllocator;

/// Derives one quadrature rule per facet of the reference shape from a rule on the
/// reference domain of the facets.
///
/// The facet rule has dimension `F`, which must be one less than the dimension `D` of the
/// cell. Each derived rule carries the weights of the facet rule unchanged, with its points
/// mapped onto the facet by the affine parametrization of
/// [`ReferenceFacet`](crate::reference::ReferenceFacet). The weights therefore measure area
/// on the facet's reference domain, and must be scaled by the surface determinant of the
/// facet map to integrate over the facet itself.
///
/// Rules are returned in facet order.
pub fn facet_quadratures<T, D, F>(
    facet_rule: impl Quadrature<T, F>,
    shape: ReferenceShape,
) -> Result<Vec<QuadraturePair<T, D>>, BoundaryError>
where
    T: Real,
    D: SmallDim,
    F: SmallDim,
    DefaultAllocator: DimAllocator<T, D> + DimAllocator<T, F>,
{
    if shape.dim() != D::dim() {
        return Err(BoundaryError::dimension_mismatch("reference dimension", D::dim(), shape.dim()));
    }
    if F::dim() + 1 != D::dim() {
        return Err(BoundaryError::UnsupportedFacetDimension {
            shape,
            facet_dim: F::dim(),
        });
    }
    let weights = facet_rule.weights();
    let points = facet_rule.points();
    if weights.len() != points.len() {
        return Err(BoundaryError::dimension_mismatch(
            "quadrature points",
            weights.len(),
            points.len(),
        ));
    }

    let facets = reference_facets::<T, D>(shape)?;
    let rules = facets
        .iter()
        .map(|facet| {
            let facet_points = points
                .iter()
                .map(|eta| facet.map_point(eta.coords.as_slice()))
                .collect();
            (weights.to_vec(), facet_points)
        })
        .collect();
    Ok(rules)
}
