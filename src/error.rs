//! Errors reported by boundary value computations.
use crate::reference::ReferenceShape;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Coarse classification of a [`BoundaryError`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Inconsistent sizes or dimensions between collaborating objects.
    Dimension,
    /// The physical cell cannot be mapped from the reference cell.
    DegenerateGeometry,
    /// Mesh nodes do not describe a facet of the cell.
    Topology,
}

/// The way in which a facet mapping degenerated.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Degeneracy {
    /// The Jacobian of the reference-to-physical map is not invertible.
    SingularJacobian,
    /// The facet has zero (or undefined) surface measure.
    NonPositiveSurfaceMeasure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BoundaryError {
    /// A quantity does not have the size required by its collaborators.
    DimensionMismatch {
        quantity: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Interpolation and geometry spaces are defined on different reference cells.
    ReferenceShapeMismatch {
        interpolation: ReferenceShape,
        geometry: ReferenceShape,
    },
    /// No facet rule of the given dimension can be placed on the facets of the shape.
    UnsupportedFacetDimension { shape: ReferenceShape, facet_dim: usize },
    /// Mapping the facet of the physical cell failed at a quadrature point.
    DegenerateGeometry {
        facet: usize,
        quadrature_point: usize,
        kind: Degeneracy,
    },
    /// A boundary node is not one of the nodes of the cell.
    NodeNotInCell { node: usize },
    /// The boundary nodes are all part of the cell, but do not form one of its facets.
    NoMatchingFacet,
}

impl BoundaryError {
    pub fn category(&self) -> ErrorCategory {
        use BoundaryError::*;
        match self {
            DimensionMismatch { .. } | ReferenceShapeMismatch { .. } | UnsupportedFacetDimension { .. } => {
                ErrorCategory::Dimension
            }
            DegenerateGeometry { .. } => ErrorCategory::DegenerateGeometry,
            NodeNotInCell { .. } | NoMatchingFacet => ErrorCategory::Topology,
        }
    }

    pub(crate) fn dimension_mismatch(quantity: &'static str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            quantity,
            expected,
            actual,
        }
    }
}

impl Display for Degeneracy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingularJacobian => write!(f, "singular Jacobian"),
            Self::NonPositiveSurfaceMeasure => write!(f, "non-positive surface measure"),
        }
    }
}

impl Display for BoundaryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch {
                quantity,
                expected,
                actual,
            } => {
                write!(f, "Dimension mismatch for {quantity}: expected {expected}, got {actual}")
            }
            Self::ReferenceShapeMismatch {
                interpolation,
                geometry,
            } => {
                write!(
                    f,
                    "Interpolation is defined on a {interpolation:?}, but geometry is defined on a {geometry:?}"
                )
            }
            Self::UnsupportedFacetDimension { shape, facet_dim } => {
                write!(f, "Cannot place a {facet_dim}-dimensional facet rule on the facets of a {shape:?}")
            }
            Self::DegenerateGeometry {
                facet,
                quadrature_point,
                kind,
            } => {
                write!(
                    f,
                    "Degenerate geometry on facet {facet} at quadrature point {quadrature_point}: {kind}"
                )
            }
            Self::NodeNotInCell { node } => {
                write!(f, "Boundary node {node} is not a node of the cell")
            }
            Self::NoMatchingFacet => {
                write!(f, "Boundary nodes do not correspond to any facet of the cell")
            }
        }
    }
}

impl std::error::Error for BoundaryError {}
