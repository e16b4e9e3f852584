use fenris_boundary::element::{FacetTopology, Hex8, Quad4, Quad9, Tet10, Tet4, Tri3, Tri6};
use fenris_boundary::topology::{facet_global_nodes, resolve_facet};
use fenris_boundary::{BoundaryError, ErrorCategory};
use proptest::prelude::*;

/// Global node indices for a cell that have nothing in common with the local numbering.
fn scrambled_cell_nodes(element: &impl FacetTopology) -> Vec<usize> {
    (0..element.num_cell_nodes()).rev().map(|i| 100 + 7 * i).collect()
}

fn assert_resolves_every_facet(element: &impl FacetTopology) {
    let cell_nodes = scrambled_cell_nodes(element);
    for facet in 0..element.num_facets() {
        let mut boundary_nodes = facet_global_nodes(element, facet, &cell_nodes);
        assert_eq!(resolve_facet(&boundary_nodes, &cell_nodes, element), Ok(facet));
        boundary_nodes.reverse();
        assert_eq!(resolve_facet(&boundary_nodes, &cell_nodes, element), Ok(facet));
        boundary_nodes.rotate_left(1);
        assert_eq!(resolve_facet(&boundary_nodes, &cell_nodes, element), Ok(facet));
    }
}

#[test]
fn resolves_every_facet_regardless_of_node_order() {
    assert_resolves_every_facet(&Tri3);
    assert_resolves_every_facet(&Tri6);
    assert_resolves_every_facet(&Quad4);
    assert_resolves_every_facet(&Quad9);
    assert_resolves_every_facet(&Tet4);
    assert_resolves_every_facet(&Tet10);
    assert_resolves_every_facet(&Hex8);
}

fn shuffled_facet(element: impl FacetTopology + Copy + 'static) -> impl Strategy<Value = (usize, Vec<usize>)> {
    (0..element.num_facets()).prop_flat_map(move |facet| {
        let nodes = facet_global_nodes(&element, facet, &scrambled_cell_nodes(&element));
        (Just(facet), Just(nodes).prop_shuffle())
    })
}

proptest! {
    #[test]
    fn resolves_shuffled_tet10_facets((facet, boundary_nodes) in shuffled_facet(Tet10)) {
        let cell_nodes = scrambled_cell_nodes(&Tet10);
        prop_assert_eq!(resolve_facet(&boundary_nodes, &cell_nodes, &Tet10), Ok(facet));
    }

    #[test]
    fn resolves_shuffled_hex8_facets((facet, boundary_nodes) in shuffled_facet(Hex8)) {
        let cell_nodes = scrambled_cell_nodes(&Hex8);
        prop_assert_eq!(resolve_facet(&boundary_nodes, &cell_nodes, &Hex8), Ok(facet));
    }
}

#[test]
fn node_outside_cell_is_a_topology_error() {
    let cell_nodes = [10, 11, 12, 13];
    let error = resolve_facet(&[10, 99], &cell_nodes, &Quad4).unwrap_err();
    assert_eq!(error, BoundaryError::NodeNotInCell { node: 99 });
    assert_eq!(error.category(), ErrorCategory::Topology);
}

#[test]
fn nodes_that_do_not_form_a_facet_are_a_topology_error() {
    // Diagonal of a quadrilateral
    let error = resolve_facet(&[10, 12], &[10, 11, 12, 13], &Quad4).unwrap_err();
    assert_eq!(error, BoundaryError::NoMatchingFacet);
    assert_eq!(error.category(), ErrorCategory::Topology);

    // Repeated node
    let error = resolve_facet(&[11, 11], &[10, 11, 12, 13], &Quad4).unwrap_err();
    assert_eq!(error, BoundaryError::NoMatchingFacet);

    // Four vertices of a hexahedron that are not coplanar
    let cell_nodes: Vec<usize> = (20..28).collect();
    let error = resolve_facet(&[20, 21, 22, 26], &cell_nodes, &Hex8).unwrap_err();
    assert_eq!(error, BoundaryError::NoMatchingFacet);

    // Vertices of a facet of a quadratic triangle, but a midpoint node of another edge
    let cell_nodes: Vec<usize> = (0..6).collect();
    let error = resolve_facet(&[0, 1, 4], &cell_nodes, &Tri6).unwrap_err();
    assert_eq!(error, BoundaryError::NoMatchingFacet);
}

#[test]
fn wrong_node_counts_are_dimension_errors() {
    let error = resolve_facet(&[10, 11, 12], &[10, 11, 12, 13], &Quad4).unwrap_err();
    assert_eq!(
        error,
        BoundaryError::DimensionMismatch {
            quantity: "boundary nodes",
            expected: 2,
            actual: 3
        }
    );
    assert_eq!(error.category(), ErrorCategory::Dimension);

    let error = resolve_facet(&[10, 11], &[10, 11, 12], &Quad4).unwrap_err();
    assert_eq!(
        error,
        BoundaryError::DimensionMismatch {
            quantity: "cell nodes",
            expected: 4,
            actual: 3
        }
    );
}

#[test]
fn facet_global_nodes_follow_local_facet_order() {
    let cell_nodes: Vec<usize> = (0..10).map(|i| 50 + i).collect();
    assert_eq!(facet_global_nodes(&Tet10, 2, &cell_nodes), vec![51, 52, 53, 55, 58, 59]);
    assert_eq!(facet_global_nodes(&Quad4, 3, &[4, 3, 2, 1]), vec![1, 4]);
}

#[test]
#[should_panic]
fn facet_global_nodes_panics_on_invalid_facet() {
    facet_global_nodes(&Tri3, 3, &[0, 1, 2]);
}
