//! Reference cells and the affine parametrization of their facets.
//!
//! The reference cells follow the usual conventions: the reference interval, quadrilateral and
//! hexahedron are `[-1, 1]^d`, and the reference triangle and tetrahedron are the simplices with
//! one vertex at `(-1, ..., -1)` and the remaining vertices at `1` along each axis.
//!
//! Facets are listed with their vertices ordered so that the frame spanned by the facet
//! tangents (see [`ReferenceFacet`]) has the outward normal as its area vector.
use crate::allocators::DimAllocator;
use crate::error::BoundaryError;
use crate::{Real, SmallDim};
use nalgebra::{convert, DefaultAllocator, OPoint, OVector};
use serde::{Deserialize, Serialize};

static SEGMENT_VERTICES: [[f64; 1]; 2] = [[-1.0], [1.0]];
static TRIANGLE_VERTICES: [[f64; 2]; 3] = [[-1.0, -1.0], [1.0, -1.0], [-1.0, 1.0]];
static QUADRILATERAL_VERTICES: [[f64; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
static TETRAHEDRON_VERTICES: [[f64; 3]; 4] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
];
#[rustfmt::skip]
static HEXAHEDRON_VERTICES: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [ 1.0, -1.0, -1.0],
    [ 1.0,  1.0, -1.0],
    [-1.0,  1.0, -1.0],
    [-1.0, -1.0,  1.0],
    [ 1.0, -1.0,  1.0],
    [ 1.0,  1.0,  1.0],
    [-1.0,  1.0,  1.0],
];

static SEGMENT_FACETS: [&[usize]; 2] = [&[0], &[1]];
static TRIANGLE_FACETS: [&[usize]; 3] = [&[0, 1], &[1, 2], &[2, 0]];
static QUADRILATERAL_FACETS: [&[usize]; 4] = [&[0, 1], &[1, 2], &[2, 3], &[3, 0]];
static TETRAHEDRON_FACETS: [&[usize]; 4] = [&[0, 2, 1], &[0, 1, 3], &[1, 2, 3], &[0, 3, 2]];
static HEXAHEDRON_FACETS: [&[usize]; 6] = [
    &[3, 2, 1, 0],
    &[0, 1, 5, 4],
    &[1, 2, 6, 5],
    &[2, 3, 7, 6],
    &[4, 7, 3, 0],
    &[5, 6, 7, 4],
];

/// The shape of a reference cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceShape {
    Segment,
    Triangle,
    Quadrilateral,
    Tetrahedron,
    Hexahedron,
}

impl ReferenceShape {
    /// The dimension of the reference cell.
    pub fn dim(&self) -> usize {
        use ReferenceShape::*;
        match self {
            Segment => 1,
            Triangle | Quadrilateral => 2,
            Tetrahedron | Hexahedron => 3,
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.facet_table()
            .iter()
            .flat_map(|facet| facet.iter())
            .max()
            .map(|&max_vertex| max_vertex + 1)
            .unwrap_or(0)
    }

    pub fn num_facets(&self) -> usize {
        self.facet_table().len()
    }

    /// The coordinates of the given vertex, or `None` if the vertex index is out of bounds.
    pub fn vertex(&self, index: usize) -> Option<&'static [f64]> {
        use ReferenceShape::*;
        match self {
            Segment => SEGMENT_VERTICES.get(index).map(|v| v.as_slice()),
            Triangle => TRIANGLE_VERTICES.get(index).map(|v| v.as_slice()),
            Quadrilateral => QUADRILATERAL_VERTICES.get(index).map(|v| v.as_slice()),
            Tetrahedron => TETRAHEDRON_VERTICES.get(index).map(|v| v.as_slice()),
            Hexahedron => HEXAHEDRON_VERTICES.get(index).map(|v| v.as_slice()),
        }
    }

    /// The vertex indices of the given facet, ordered consistently with the outward normal.
    pub fn facet_vertices(&self, facet: usize) -> Option<&'static [usize]> {
        self.facet_table().get(facet).copied()
    }

    /// The shape of the facets, or `None` if the facets are points.
    pub fn facet_shape(&self) -> Option<ReferenceShape> {
        use ReferenceShape::*;
        match self {
            Segment => None,
            Triangle | Quadrilateral => Some(Segment),
            Tetrahedron => Some(Triangle),
            Hexahedron => Some(Quadrilateral),
        }
    }

    fn facet_table(&self) -> &'static [&'static [usize]] {
        use ReferenceShape::*;
        match self {
            Segment => &SEGMENT_FACETS,
            Triangle => &TRIANGLE_FACETS,
            Quadrilateral => &QUADRILATERAL_FACETS,
            Tetrahedron => &TETRAHEDRON_FACETS,
            Hexahedron => &HEXAHEDRON_FACETS,
        }
    }
}

/// Affine parametrization of a facet of a reference cell.
///
/// A point `eta` in the reference domain of the facet is mapped to the point
/// `origin + sum_i eta_i * tangents[i]` on the facet of the cell. The reference domain
/// of a facet is `[-1, 1]` for edges, `[-1, 1]^2` for quadrilateral faces and the reference
/// triangle for triangular faces. The tangents are the (constant) derivatives of the map.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceFacet<T, D>
where
    T: Real,
    D: SmallDim,
    DefaultAllocator: DimAllocator<T, D>,
{
    origin: OPoint<T, D>,
    tangents: Vec<OVector<T, D>>,
}

impl<T, D> ReferenceFacet<T, D>
where
    T: Real,
    D: SmallDim,
    DefaultAllocator: DimAllocator<T, D>,
{
    /// Constructs the parametrization of the given facet of the reference shape.
    ///
    /// # Panics
    ///
    /// Panics if the facet index is out of bounds.
    pub fn from_shape(shape: ReferenceShape, facet: usize) -> Result<Self, BoundaryError> {
        if shape.dim() != D::dim() {
            return Err(BoundaryError::dimension_mismatch("reference dimension", D::dim(), shape.dim()));
        }
        let facet_shape = shape
            .facet_shape()
            .ok_or(BoundaryError::UnsupportedFacetDimension {
                shape,
                facet_dim: shape.dim() - 1,
            })?;
        let facet_vertices = shape
            .facet_vertices(facet)
            .unwrap_or_else(|| panic!("facet index {facet} out of bounds for {shape:?}"));
        let v: Vec<OPoint<T, D>> = facet_vertices
            .iter()
            .map(|&vertex_idx| reference_vertex(shape, vertex_idx))
            .collect();

        let half = convert::<f64, T>(0.5);
        let (origin, tangents) = match facet_shape {
            ReferenceShape::Segment => {
                let origin = OPoint::from((&v[0].coords + &v[1].coords) * half);
                (origin, vec![(&v[1] - &v[0]) * half])
            }
            ReferenceShape::Triangle => {
                let origin = OPoint::from((&v[1].coords + &v[2].coords) * half);
                (origin, vec![(&v[1] - &v[0]) * half, (&v[2] - &v[0]) * half])
            }
            ReferenceShape::Quadrilateral => {
                let quarter = convert::<f64, T>(0.25);
                let sum = v
                    .iter()
                    .fold(OVector::<T, D>::zeros(), |sum, vertex| sum + &vertex.coords);
                (
                    OPoint::from(sum * quarter),
                    vec![(&v[1] - &v[0]) * half, (&v[3] - &v[0]) * half],
                )
            }
            facet_shape => unreachable!("{facet_shape:?} is never the facet of a reference cell"),
        };

        Ok(Self { origin, tangents })
    }

    pub fn origin(&self) -> &OPoint<T, D> {
        &self.origin
    }

    pub fn tangents(&self) -> &[OVector<T, D>] {
        &self.tangents
    }

    /// Maps a point in the reference domain of the facet to the facet of the reference cell.
    ///
    /// # Panics
    ///
    /// Panics if the number of facet coordinates does not match the number of tangents.
    pub fn map_point(&self, facet_coords: &[T]) -> OPoint<T, D> {
        assert_eq!(facet_coords.len(), self.tangents.len(), "facet coordinates must match facet dimension");
        let mut point = self.origin.clone();
        for (eta, tangent) in facet_coords.iter().zip(&self.tangents) {
            point.coords += tangent * *eta;
        }
        point
    }

    /// The outward unit normal of the facet on the reference cell.
    pub fn reference_normal(&self) -> OVector<T, D> {
        area_vector(&self.tangents).normalize()
    }
}

/// All facets of the reference shape, in facet order.
pub fn reference_facets<T, D>(shape: ReferenceShape) -> Result<Vec<ReferenceFacet<T, D>>, BoundaryError>
where
    T: Real,
    D: SmallDim,
    DefaultAllocator: DimAllocator<T, D>,
{
    (0..shape.num_facets())
        .map(|facet| ReferenceFacet::from_shape(shape, facet))
        .collect()
}

/// The area vector spanned by `d - 1` tangents in `d` dimensions.
///
/// In two dimensions this is the tangent rotated clockwise by a right angle, in three
/// dimensions the cross product of the two tangents. Its norm is the surface measure of the
/// parallelotope spanned by the tangents, and for the facet tangents of a positively oriented
/// cell it points out of the cell.
///
/// # Panics
///
/// Panics unless there are exactly `d - 1` tangents and `d` is 2 or 3.
pub fn area_vector<T, D>(tangents: &[OVector<T, D>]) -> OVector<T, D>
where
    T: Real,
    D: SmallDim,
    DefaultAllocator: DimAllocator<T, D>,
{
    assert_eq!(tangents.len() + 1, D::dim(), "need exactly d - 1 tangents");
    match D::dim() {
        2 => {
            let t = &tangents[0];
            OVector::<T, D>::from_fn(|i, _| if i == 0 { t[1] } else { -t[0] })
        }
        3 => {
            let (a, b) = (&tangents[0], &tangents[1]);
            OVector::<T, D>::from_fn(|i, _| {
                let (j, k) = ((i + 1) % 3, (i + 2) % 3);
                a[j] * b[k] - a[k] * b[j]
            })
        }
        dim => panic!("area vectors are only defined in 2 and 3 dimensions, got {dim}"),
    }
}

fn reference_vertex<T, D>(shape: ReferenceShape, index: usize) -> OPoint<T, D>
where
    T: Real,
    D: SmallDim,
    DefaultAllocator: DimAllocator<T, D>,
{
    let coords = shape
        .vertex(index)
        .unwrap_or_else(|| panic!("vertex {index} out of bounds for {shape:?}"));
    OPoint::from(OVector::<T, D>::from_fn(|i, _| convert(coords[i])))
}
