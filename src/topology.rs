//! Correspondence between mesh boundary nodes and reference facets.
use crate::element::FacetTopology;
use crate::error::BoundaryError;
use itertools::Itertools;

/// Determines which facet of a cell is spanned by the given boundary nodes.
///
/// `boundary_nodes` are global node indices of one boundary facet, in any order.
/// `cell_nodes` are the global node indices of the cell, in the local node order of
/// `element`. Returns the (zero-based) index of the facet of `element` whose local nodes are
/// exactly the positions of the boundary nodes in `cell_nodes`.
///
/// # Errors
///
/// Returns a dimension error if `boundary_nodes` does not have one entry per facet node or
/// `cell_nodes` does not have one entry per cell node. Returns a topology error if a boundary
/// node is not a node of the cell, or if the boundary nodes do not form a facet.
pub fn resolve_facet(
    boundary_nodes: &[usize],
    cell_nodes: &[usize],
    element: &impl FacetTopology,
) -> Result<usize, BoundaryError> {
    if boundary_nodes.len() != element.nodes_per_facet() {
        return Err(BoundaryError::dimension_mismatch(
            "boundary nodes",
            element.nodes_per_facet(),
            boundary_nodes.len(),
        ));
    }
    if cell_nodes.len() != element.num_cell_nodes() {
        return Err(BoundaryError::dimension_mismatch(
            "cell nodes",
            element.num_cell_nodes(),
            cell_nodes.len(),
        ));
    }

    let local_nodes: Vec<usize> = boundary_nodes
        .iter()
        .map(|&node| {
            cell_nodes
                .iter()
                .position(|&cell_node| cell_node == node)
                .ok_or(BoundaryError::NodeNotInCell { node })
        })
        .collect::<Result<_, _>>()?;
    let local_nodes = local_nodes.into_iter().sorted_unstable().collect_vec();

    (0..element.num_facets())
        .find(|&facet| {
            element
                .facet_nodes(facet)
                .map(|nodes| nodes.iter().copied().sorted_unstable().eq(local_nodes.iter().copied()))
                .unwrap_or(false)
        })
        .ok_or(BoundaryError::NoMatchingFacet)
}

/// The global node indices of a facet, in the local facet node order of `element`.
///
/// This is the inverse of [`resolve_facet`]: the nodes returned for a facet resolve back to
/// the same facet.
///
/// # Panics
///
/// Panics if the facet index is out of bounds or if `cell_nodes` does not have one entry per
/// cell node.
pub fn facet_global_nodes(element: &impl FacetTopology, facet: usize, cell_nodes: &[usize]) -> Vec<usize> {
    assert_eq!(cell_nodes.len(), element.num_cell_nodes(), "one global index per cell node required");
    let facet_nodes = element
        .facet_nodes(facet)
        .unwrap_or_else(|| panic!("facet index {facet} out of bounds"));
    facet_nodes.iter().map(|&local| cell_nodes[local]).collect()
}
