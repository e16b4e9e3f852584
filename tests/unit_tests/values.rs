use crate::{
    affine_map, hex8_reference_nodes, quad4_reference_nodes, quad9_reference_nodes, tet10_reference_nodes,
    tet4_reference_nodes, tri3_reference_nodes, tri6_reference_nodes,
};
use fenris_boundary::allocators::DimAllocator;
use fenris_boundary::element::{Hex8, Quad4, Quad9, Tet10, Tet4, Tri3, Tri6};
use fenris_boundary::error::Degeneracy;
use fenris_boundary::proptest::{affine_map2, affine_map3};
use fenris_boundary::quadrature::tensor::quadrilateral_gauss;
use fenris_boundary::quadrature::total_order;
use fenris_boundary::quadrature::univariate::gauss;
use fenris_boundary::{BoundaryError, ErrorCategory, ScalarBoundaryValues, SmallDim, VectorBoundaryValues};
use matrixcompare::{assert_matrix_eq, assert_scalar_eq};
use nalgebra::{DefaultAllocator, Matrix2, Matrix3, OPoint, OVector, Point2, Point3, Vector2, Vector3, U2, U3};
use proptest::prelude::*;
use rayon::prelude::*;

fn unit_square() -> Vec<Point2<f64>> {
    vec![
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(1.0, 1.0),
        Point2::new(0.0, 1.0),
    ]
}

fn quad4_values() -> ScalarBoundaryValues<f64, U2, Quad4> {
    ScalarBoundaryValues::new(gauss(2), Quad4).unwrap()
}

/// Integrates the outward normal and `x . n` over the whole boundary of a cell.
///
/// By the divergence theorem, the former vanishes and the latter is `d` times the volume.
fn surface_moments<D, I>(
    values: &mut ScalarBoundaryValues<f64, D, I>,
    coords: &[OPoint<f64, D>],
) -> (OVector<f64, D>, f64)
where
    D: SmallDim,
    DefaultAllocator: DimAllocator<f64, D>,
{
    let mut flux = OVector::<f64, D>::zeros();
    let mut moment = 0.0;
    for facet in 0..values.num_facets() {
        values.reinit(coords, facet).unwrap();
        for q in 0..values.num_quadrature_points() {
            let n = values.normal(q);
            let measure = values.differential_measure(q);
            let x = values.spatial_coordinate(q, coords);
            flux += n * measure;
            moment += x.coords.dot(n) * measure;
        }
    }
    (flux, moment)
}

#[test]
fn unit_square_bottom_edge() {
    let mut values = quad4_values();
    assert_eq!(values.num_facets(), 4);
    assert_eq!(values.num_quadrature_points(), 2);
    assert_eq!(values.num_basis(), 4);
    assert_eq!(values.num_geometry_basis(), 4);

    let coords = unit_square();
    values.reinit(&coords, 0).unwrap();
    assert_eq!(values.current_facet(), 0);

    let total: f64 = (0..2).map(|q| values.differential_measure(q)).sum();
    assert_scalar_eq!(total, 1.0, comp = abs, tol = 1e-14);
    for q in 0..2 {
        assert_scalar_eq!(values.differential_measure(q), 0.5, comp = abs, tol = 1e-14);
        assert_matrix_eq!(values.normal(q).clone(), Vector2::new(0.0, -1.0), comp = abs, tol = 1e-14);

        let x = values.spatial_coordinate(q, &coords);
        let (_, points) = values.quadrature(0);
        assert_scalar_eq!(x.x, (points[q].x + 1.0) / 2.0, comp = abs, tol = 1e-14);
        assert_scalar_eq!(x.y, 0.0, comp = abs, tol = 1e-14);

        // N_0 = (1 - x)(1 - y) on the unit square
        let expected_gradient = Vector2::new(-1.0, x.x - 1.0);
        assert_matrix_eq!(values.shape_gradient(0, q).clone(), expected_gradient, comp = abs, tol = 1e-14);
        assert_scalar_eq!(*values.shape_value(0, q), 1.0 - x.x, comp = abs, tol = 1e-14);
        // Nodes 2 and 3 are not on the bottom edge
        assert_eq!(*values.shape_value(2, q), 0.0);
        assert_eq!(*values.shape_value(3, q), 0.0);
    }
}

#[test]
fn every_facet_of_unit_square() {
    let mut values = quad4_values();
    let coords = unit_square();
    let expected_normals = [
        Vector2::new(0.0, -1.0),
        Vector2::new(1.0, 0.0),
        Vector2::new(0.0, 1.0),
        Vector2::new(-1.0, 0.0),
    ];
    for (facet, expected_normal) in expected_normals.iter().enumerate() {
        values.reinit(&coords, facet).unwrap();
        let length: f64 = values.differential_measures().column(facet).sum();
        assert_scalar_eq!(length, 1.0, comp = abs, tol = 1e-14);
        for q in 0..values.num_quadrature_points() {
            assert_matrix_eq!(values.normal(q).clone(), *expected_normal, comp = abs, tol = 1e-14);
        }
    }
}

#[test]
fn physical_data_is_zero_before_first_reinit() {
    let values = quad4_values();
    assert_eq!(values.current_facet(), 0);
    assert!(values.differential_measures().iter().all(|&m| m == 0.0));
    assert!(values.physical_gradients(3).iter().all(|g| g == &Vector2::zeros()));
}

#[test]
fn reinit_is_idempotent() {
    let coords = vec![
        Point2::new(0.1, -0.3),
        Point2::new(1.7, 0.2),
        Point2::new(1.4, 1.3),
        Point2::new(-0.2, 0.9),
    ];
    let mut values = quad4_values();
    values.reinit(&coords, 1).unwrap();
    let first = values.clone();
    values.reinit(&coords, 1).unwrap();

    assert_eq!(values.current_facet(), first.current_facet());
    assert_eq!(values.differential_measures(), first.differential_measures());
    assert_eq!(values.physical_gradients(1), first.physical_gradients(1));
    for q in 0..values.num_quadrature_points() {
        assert_eq!(values.normal(q), first.normal(q));
        for basis in 0..values.num_basis() {
            assert_eq!(values.shape_gradient(basis, q), first.shape_gradient(basis, q));
        }
    }
}

#[test]
fn data_of_other_facets_is_stale() {
    let mut values = quad4_values();
    let cell_a = unit_square();
    let cell_b = affine_map(&cell_a, &(Matrix2::identity() * 2.0), &Vector2::new(3.0, -1.0));

    values.reinit(&cell_a, 0).unwrap();
    let gradients_a = values.physical_gradients(0).to_vec();
    let measures_a = values.differential_measures().column(0).clone_owned();

    values.reinit(&cell_b, 1).unwrap();
    assert_eq!(values.current_facet(), 1);
    // Facet 0 still holds the data of cell A
    assert_eq!(values.physical_gradients(0), gradients_a.as_slice());
    assert_eq!(values.differential_measures().column(0), measures_a);

    values.reinit(&cell_b, 0).unwrap();
    assert_ne!(values.physical_gradients(0), gradients_a.as_slice());
    let length: f64 = values.differential_measures().column(0).sum();
    assert_scalar_eq!(length, 2.0, comp = abs, tol = 1e-14);
}

#[test]
fn collapsed_cell_is_degenerate() {
    let mut values = quad4_values();
    let collinear = vec![
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(2.0, 0.0),
        Point2::new(3.0, 0.0),
    ];
    let error = values.reinit(&collinear, 2).unwrap_err();
    assert_eq!(
        error,
        BoundaryError::DegenerateGeometry {
            facet: 2,
            quadrature_point: 0,
            kind: Degeneracy::SingularJacobian
        }
    );
    assert_eq!(error.category(), ErrorCategory::DegenerateGeometry);
    assert_eq!(values.current_facet(), 2);

    let mut values = ScalarBoundaryValues::<f64, U3, Tet4>::new(total_order::triangle(1).unwrap(), Tet4).unwrap();
    let coplanar = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
    ];
    let error = values.reinit(&coplanar, 1).unwrap_err();
    assert_eq!(error.category(), ErrorCategory::DegenerateGeometry);
}

#[test]
fn wrong_number_of_coordinates_leaves_state_untouched() {
    let mut values = quad4_values();
    let coords = unit_square();
    values.reinit(&coords, 3).unwrap();
    let before = values.clone();

    let error = values.reinit(&coords[..3], 1).unwrap_err();
    assert_eq!(
        error,
        BoundaryError::DimensionMismatch {
            quantity: "geometry node coordinates",
            expected: 4,
            actual: 3
        }
    );
    assert_eq!(error.category(), ErrorCategory::Dimension);
    assert_eq!(values.current_facet(), 3);
    assert_eq!(values.differential_measures(), before.differential_measures());
    assert_eq!(values.physical_gradients(1), before.physical_gradients(1));
}

#[test]
fn construction_rejects_incompatible_inputs() {
    let error = ScalarBoundaryValues::<f64, U2, Quad4, Tri3>::with_geometry(gauss(2), Quad4, Tri3).unwrap_err();
    assert!(matches!(error, BoundaryError::ReferenceShapeMismatch { .. }));
    assert_eq!(error.category(), ErrorCategory::Dimension);

    // A segment rule cannot be placed on the faces of a tetrahedron
    let error = ScalarBoundaryValues::<f64, U3, Tet4>::new(gauss(2), Tet4).unwrap_err();
    assert!(matches!(error, BoundaryError::UnsupportedFacetDimension { facet_dim: 1, .. }));
    assert_eq!(error.category(), ErrorCategory::Dimension);
}

#[test]
fn vector_values_expand_scalar_basis() {
    let coords = vec![
        Point2::new(0.0, 0.0),
        Point2::new(2.0, 0.5),
        Point2::new(2.5, 2.0),
        Point2::new(-0.5, 1.5),
    ];
    let mut scalar = quad4_values();
    let mut vector = VectorBoundaryValues::<f64, U2, Quad4>::new(gauss(2), Quad4).unwrap();
    assert_eq!(vector.num_basis(), 8);
    assert_eq!(vector.num_geometry_basis(), 4);

    for facet in 0..4 {
        scalar.reinit(&coords, facet).unwrap();
        vector.reinit(&coords, facet).unwrap();
        assert_eq!(scalar.differential_measures(), vector.differential_measures());
        for q in 0..2 {
            assert_eq!(scalar.normal(q), vector.normal(q));
            for b in 0..4 {
                for c in 0..2 {
                    let mut expected_value = Vector2::zeros();
                    expected_value[c] = *scalar.shape_value(b, q);
                    assert_eq!(vector.shape_value(2 * b + c, q), &expected_value);

                    let mut expected_gradient = Matrix2::zeros();
                    expected_gradient.set_row(c, &scalar.shape_gradient(b, q).transpose());
                    assert_matrix_eq!(
                        vector.shape_gradient(2 * b + c, q).clone(),
                        expected_gradient,
                        comp = abs,
                        tol = 1e-14
                    );
                    assert_scalar_eq!(
                        vector.shape_divergence(2 * b + c, q),
                        scalar.shape_gradient(b, q)[c],
                        comp = abs,
                        tol = 1e-14
                    );
                }
            }
        }
    }
}

#[test]
fn vector_values_reproduce_linear_displacement() {
    let a = Matrix2::new(1.2, 0.3, -0.4, 0.9);
    let coords = affine_map(&tri3_reference_nodes(), &a, &Vector2::new(2.0, 1.0));
    let gradient = Matrix2::new(1.0, 2.0, -0.5, 3.0);
    let translation = Vector2::new(0.25, -1.0);
    let u: Vec<f64> = coords
        .iter()
        .flat_map(|x| {
            let u_x = gradient * x.coords + translation;
            [u_x.x, u_x.y]
        })
        .collect();

    let mut values = VectorBoundaryValues::<f64, U2, Tri3>::new(gauss(2), Tri3).unwrap();
    for facet in 0..values.num_facets() {
        values.reinit(&coords, facet).unwrap();
        for q in 0..values.num_quadrature_points() {
            let x = values.spatial_coordinate(q, &coords);
            let expected = gradient * x.coords + translation;
            assert_matrix_eq!(values.function_value(q, &u), expected, comp = abs, tol = 1e-12);
            assert_matrix_eq!(values.function_gradient(q, &u), gradient, comp = abs, tol = 1e-12);
            assert_matrix_eq!(
                values.function_symmetric_gradient(q, &u),
                (gradient + gradient.transpose()) * 0.5,
                comp = abs,
                tol = 1e-12
            );
            assert_scalar_eq!(values.function_divergence(q, &u), 4.0, comp = abs, tol = 1e-12);
        }
    }
}

#[test]
fn tetrahedron_facet_areas_and_normals() {
    let coords = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
    ];
    let mut values = ScalarBoundaryValues::<f64, U3, Tet4>::new(total_order::triangle(2).unwrap(), Tet4).unwrap();
    let expected = [
        (0.5, Vector3::new(0.0, 0.0, -1.0)),
        (0.5, Vector3::new(0.0, -1.0, 0.0)),
        (3.0f64.sqrt() / 2.0, Vector3::new(1.0, 1.0, 1.0).normalize()),
        (0.5, Vector3::new(-1.0, 0.0, 0.0)),
    ];
    for (facet, (area, normal)) in expected.iter().enumerate() {
        values.reinit(&coords, facet).unwrap();
        let computed_area: f64 = values.differential_measures().column(facet).sum();
        assert_scalar_eq!(computed_area, *area, comp = abs, tol = 1e-13);
        for q in 0..values.num_quadrature_points() {
            assert_matrix_eq!(values.normal(q).clone(), *normal, comp = abs, tol = 1e-14);
        }
    }
}

#[test]
fn hexahedron_box_facet_areas_and_normals() {
    let a = Matrix3::from_diagonal(&Vector3::new(1.0, 1.5, 2.0));
    let coords = affine_map(&hex8_reference_nodes(), &a, &Vector3::new(1.0, 1.5, 2.0));
    let mut values = ScalarBoundaryValues::<f64, U3, Hex8>::new(quadrilateral_gauss(2), Hex8).unwrap();
    let expected = [
        (6.0, Vector3::new(0.0, 0.0, -1.0)),
        (8.0, Vector3::new(0.0, -1.0, 0.0)),
        (12.0, Vector3::new(1.0, 0.0, 0.0)),
        (8.0, Vector3::new(0.0, 1.0, 0.0)),
        (12.0, Vector3::new(-1.0, 0.0, 0.0)),
        (6.0, Vector3::new(0.0, 0.0, 1.0)),
    ];
    for (facet, (area, normal)) in expected.iter().enumerate() {
        values.reinit(&coords, facet).unwrap();
        let computed_area: f64 = values.differential_measures().column(facet).sum();
        assert_scalar_eq!(computed_area, *area, comp = abs, tol = 1e-13);
        for q in 0..values.num_quadrature_points() {
            assert_matrix_eq!(values.normal(q).clone(), *normal, comp = abs, tol = 1e-14);
        }
    }
}

#[test]
fn inverted_cell_has_inward_normals() {
    // Clockwise node order
    let coords = vec![
        Point2::new(0.0, 0.0),
        Point2::new(0.0, 1.0),
        Point2::new(1.0, 1.0),
        Point2::new(1.0, 0.0),
    ];
    let mut values = quad4_values();
    values.reinit(&coords, 0).unwrap();
    for q in 0..2 {
        assert_scalar_eq!(values.differential_measure(q), 0.5, comp = abs, tol = 1e-14);
        // The first facet is the left edge, whose outward normal is (-1, 0)
        assert_matrix_eq!(values.normal(q).clone(), Vector2::new(1.0, 0.0), comp = abs, tol = 1e-14);
    }
}

#[test]
fn higher_order_geometry_of_straight_cell_matches_linear_geometry() {
    let a = Matrix2::new(1.3, -0.2, 0.4, 0.8);
    let b = Vector2::new(-1.0, 0.5);
    let mut linear = ScalarBoundaryValues::<f64, U2, Tri3>::new(gauss(3), Tri3).unwrap();
    let mut quadratic = ScalarBoundaryValues::<f64, U2, Tri6>::new(gauss(3), Tri6).unwrap();
    let linear_coords = affine_map(&tri3_reference_nodes(), &a, &b);
    let quadratic_coords = affine_map(&tri6_reference_nodes(), &a, &b);
    for facet in 0..3 {
        linear.reinit(&linear_coords, facet).unwrap();
        quadratic.reinit(&quadratic_coords, facet).unwrap();
        for q in 0..3 {
            assert_scalar_eq!(
                linear.differential_measure(q),
                quadratic.differential_measure(q),
                comp = abs,
                tol = 1e-13
            );
            assert_matrix_eq!(linear.normal(q).clone(), quadratic.normal(q).clone(), comp = abs, tol = 1e-13);
        }
    }
}

#[test]
fn quad9_with_quad4_geometry_reproduces_quadratic_field() {
    let a = Matrix2::new(1.5, 0.3, -0.2, 0.7);
    let b = Vector2::new(0.5, 2.0);
    let geometry_coords = affine_map(&quad4_reference_nodes(), &a, &b);
    let interpolation_nodes = affine_map(&quad9_reference_nodes(), &a, &b);

    let f = |x: &Point2<f64>| x.x * x.x + x.x * x.y - x.y;
    let grad_f = |x: &Point2<f64>| Vector2::new(2.0 * x.x + x.y, x.x - 1.0);
    let u: Vec<f64> = interpolation_nodes.iter().map(f).collect();

    let mut values = ScalarBoundaryValues::<f64, U2, Quad9, Quad4>::with_geometry(gauss(3), Quad9, Quad4).unwrap();
    assert_eq!(values.num_basis(), 9);
    assert_eq!(values.num_geometry_basis(), 4);
    for facet in 0..4 {
        values.reinit(&geometry_coords, facet).unwrap();
        for q in 0..3 {
            let x = values.spatial_coordinate(q, &geometry_coords);
            assert_scalar_eq!(values.function_value(q, &u), f(&x), comp = abs, tol = 1e-12);
            assert_matrix_eq!(values.function_gradient(q, &u), grad_f(&x), comp = abs, tol = 1e-12);
        }
    }
}

#[test]
fn tet10_with_tet4_geometry_reproduces_quadratic_field() {
    let a = Matrix3::new(1.1, 0.2, -0.1, 0.0, 0.9, 0.3, 0.2, -0.1, 1.2);
    let b = Vector3::new(-0.5, 1.0, 0.25);
    let geometry_coords = affine_map(&tet4_reference_nodes(), &a, &b);
    let interpolation_nodes = affine_map(&tet10_reference_nodes(), &a, &b);

    let f = |x: &Point3<f64>| x.x * x.x + x.y * x.z - 2.0 * x.z;
    let grad_f = |x: &Point3<f64>| Vector3::new(2.0 * x.x, x.z, x.y - 2.0);
    let u: Vec<f64> = interpolation_nodes.iter().map(f).collect();

    let facet_rule = total_order::triangle(2).unwrap();
    let mut values = ScalarBoundaryValues::<f64, U3, Tet10, Tet4>::with_geometry(facet_rule, Tet10, Tet4).unwrap();
    for facet in 0..4 {
        values.reinit(&geometry_coords, facet).unwrap();
        for q in 0..values.num_quadrature_points() {
            let x = values.spatial_coordinate(q, &geometry_coords);
            assert_scalar_eq!(values.function_value(q, &u), f(&x), comp = abs, tol = 1e-12);
            assert_matrix_eq!(values.function_gradient(q, &u), grad_f(&x), comp = abs, tol = 1e-12);
        }
    }
}

proptest! {
    #[test]
    fn triangle_satisfies_divergence_theorem((a, b) in affine_map2()) {
        let coords = affine_map(&tri3_reference_nodes(), &a, &b);
        let mut values = ScalarBoundaryValues::<f64, U2, Tri3>::new(gauss(2), Tri3).unwrap();
        let (flux, moment) = surface_moments(&mut values, &coords);
        // The reference triangle has area 2
        let area = 2.0 * a.determinant();
        assert_matrix_eq!(flux, Vector2::zeros(), comp = abs, tol = 1e-10);
        assert_scalar_eq!(moment, 2.0 * area, comp = abs, tol = 1e-9);
    }

    #[test]
    fn quadrilateral_satisfies_divergence_theorem((a, b) in affine_map2()) {
        let coords = affine_map(&quad4_reference_nodes(), &a, &b);
        let mut values = quad4_values();
        let (flux, moment) = surface_moments(&mut values, &coords);
        let area = 4.0 * a.determinant();
        assert_matrix_eq!(flux, Vector2::zeros(), comp = abs, tol = 1e-10);
        assert_scalar_eq!(moment, 2.0 * area, comp = abs, tol = 1e-9);
    }

    #[test]
    fn tetrahedron_satisfies_divergence_theorem((a, b) in affine_map3()) {
        let coords = affine_map(&tet4_reference_nodes(), &a, &b);
        let facet_rule = total_order::triangle(1).unwrap();
        let mut values = ScalarBoundaryValues::<f64, U3, Tet4>::new(facet_rule, Tet4).unwrap();
        let (flux, moment) = surface_moments(&mut values, &coords);
        let volume = 4.0 / 3.0 * a.determinant();
        assert_matrix_eq!(flux, Vector3::zeros(), comp = abs, tol = 1e-10);
        assert_scalar_eq!(moment, 3.0 * volume, comp = abs, tol = 1e-9);
    }

    #[test]
    fn hexahedron_satisfies_divergence_theorem((a, b) in affine_map3()) {
        let coords = affine_map(&hex8_reference_nodes(), &a, &b);
        let mut values = ScalarBoundaryValues::<f64, U3, Hex8>::new(quadrilateral_gauss(2), Hex8).unwrap();
        let (flux, moment) = surface_moments(&mut values, &coords);
        let volume = 8.0 * a.determinant();
        assert_matrix_eq!(flux, Vector3::zeros(), comp = abs, tol = 1e-10);
        assert_scalar_eq!(moment, 3.0 * volume, comp = abs, tol = 1e-8);
    }

    #[test]
    fn quadrilateral_reproduces_linear_fields((a, b) in affine_map2(), c in [-5.0f64..5.0, -5.0..5.0], d in -5.0f64..5.0) {
        let c = Vector2::new(c[0], c[1]);
        let coords = affine_map(&quad4_reference_nodes(), &a, &b);
        let u: Vec<f64> = coords.iter().map(|x| c.dot(&x.coords) + d).collect();
        let mut values = quad4_values();
        for facet in 0..4 {
            values.reinit(&coords, facet).unwrap();
            for q in 0..2 {
                let x = values.spatial_coordinate(q, &coords);
                assert_scalar_eq!(values.function_value(q, &u), c.dot(&x.coords) + d, comp = abs, tol = 1e-10);
                assert_matrix_eq!(values.function_gradient(q, &u), c, comp = abs, tol = 1e-10);
            }
        }
    }

    #[test]
    fn tetrahedron_reproduces_linear_fields((a, b) in affine_map3(), c in [-5.0f64..5.0, -5.0..5.0, -5.0..5.0]) {
        let c = Vector3::new(c[0], c[1], c[2]);
        let coords = affine_map(&tet4_reference_nodes(), &a, &b);
        let u: Vec<f64> = coords.iter().map(|x| c.dot(&x.coords)).collect();
        let facet_rule = total_order::triangle(2).unwrap();
        let mut values = ScalarBoundaryValues::<f64, U3, Tet4>::new(facet_rule, Tet4).unwrap();
        for facet in 0..4 {
            values.reinit(&coords, facet).unwrap();
            for q in 0..values.num_quadrature_points() {
                let x = values.spatial_coordinate(q, &coords);
                assert_scalar_eq!(values.function_value(q, &u), c.dot(&x.coords), comp = abs, tol = 1e-10);
                assert_matrix_eq!(values.function_gradient(q, &u), c, comp = abs, tol = 1e-10);
            }
        }
    }
}

fn boundary_summary(values: &mut ScalarBoundaryValues<f64, U2, Quad4>, coords: &[Point2<f64>]) -> Vec<f64> {
    let mut summary = Vec::new();
    for facet in 0..values.num_facets() {
        values.reinit(coords, facet).unwrap();
        summary.extend(values.differential_measures().column(facet).iter());
        summary.extend(values.physical_gradients(facet).iter().flat_map(|g| g.iter()));
    }
    summary
}

#[test]
fn per_worker_clones_match_serial_results() {
    let cells: Vec<Vec<Point2<f64>>> = (0..64)
        .map(|i| {
            let i = i as f64;
            let a = Matrix2::new(1.0 + 0.1 * i, 0.2, -0.1, 1.0 + 0.05 * i);
            affine_map(&quad4_reference_nodes(), &a, &Vector2::new(i, -0.5 * i))
        })
        .collect();
    let values = quad4_values();

    let mut serial_values = values.clone();
    let serial: Vec<_> = cells
        .iter()
        .map(|coords| boundary_summary(&mut serial_values, coords))
        .collect();
    let parallel: Vec<_> = cells
        .par_iter()
        .map_with(values, |values, coords| boundary_summary(values, coords))
        .collect();

    assert_eq!(serial, parallel);
}

#[test]
#[should_panic]
fn reinit_panics_on_invalid_facet() {
    let mut values = quad4_values();
    let _ = values.reinit(&unit_square(), 4);
}

#[test]
#[should_panic]
fn function_value_panics_on_wrong_number_of_coefficients() {
    let mut values = quad4_values();
    values.reinit(&unit_square(), 0).unwrap();
    values.function_value(0, &[1.0, 2.0, 3.0]);
}

/// Maps facets 0 and 1 and then facet 0 again, so that the slots directly after the current
/// facet hold valid data of another facet.
fn quad4_values_after_revisiting_first_facet() -> ScalarBoundaryValues<f64, U2, Quad4> {
    let mut values = quad4_values();
    let coords = unit_square();
    for facet in [0, 1, 0] {
        values.reinit(&coords, facet).unwrap();
    }
    values
}

#[test]
#[should_panic(expected = "quadrature point index out of bounds")]
fn shape_value_panics_on_quadrature_point_past_current_facet() {
    let values = quad4_values_after_revisiting_first_facet();
    values.shape_value(0, values.num_quadrature_points());
}

#[test]
#[should_panic(expected = "quadrature point index out of bounds")]
fn normal_panics_on_quadrature_point_past_current_facet() {
    let values = quad4_values_after_revisiting_first_facet();
    values.normal(values.num_quadrature_points());
}

#[test]
#[should_panic(expected = "quadrature point index out of bounds")]
fn shape_gradient_panics_on_quadrature_point_past_current_facet() {
    let values = quad4_values_after_revisiting_first_facet();
    values.shape_gradient(1, 2);
}

#[test]
#[should_panic(expected = "quadrature point index out of bounds")]
fn differential_measure_panics_on_quadrature_point_past_current_facet() {
    let values = quad4_values_after_revisiting_first_facet();
    values.differential_measure(2);
}

#[test]
#[should_panic(expected = "quadrature point index out of bounds")]
fn spatial_coordinate_panics_on_quadrature_point_past_current_facet() {
    let values = quad4_values_after_revisiting_first_facet();
    values.spatial_coordinate(2, &unit_square());
}
