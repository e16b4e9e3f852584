//! Boundary values of finite element bases.
//!
//! The central type is [`BoundaryValues`](values::BoundaryValues), which caches the values
//! and reference gradients of an interpolation space at quadrature points placed on every
//! facet of a reference cell, and maps them to a physical cell one facet at a time with
//! [`reinit`](values::BoundaryValues::reinit). After mapping, the physical gradients, the
//! differential surface measure `detJdV` and the outward unit normals of that facet can be
//! queried, which is what boundary integrals (Neumann/Robin conditions, surface tractions,
//! flux evaluation) need.
//!
//! Supporting modules provide the reference shapes and their facet parametrizations
//! ([`reference`]), a collection of standard Lagrange elements together with their facet
//! node tables ([`element`]), basic quadrature rules ([`quadrature`]) and the resolution of
//! mesh boundary nodes to a reference facet ([`topology`]).
use nalgebra::{DimMin, DimName};

pub mod allocators;
pub mod element;
pub mod error;
pub mod quadrature;
pub mod reference;
pub mod topology;
pub mod values;

#[cfg(feature = "proptest")]
pub mod proptest;

pub extern crate nalgebra;

pub use fenris_traits::Real;

pub use error::{BoundaryError, ErrorCategory};
pub use values::{BoundaryValues, ScalarBoundaryValues, ScalarShape, ShapeKind, VectorBoundaryValues, VectorShape};

/// A small, fixed-size dimension.
///
/// Used as a trait alias for various traits frequently needed by generic routines.
pub trait SmallDim: DimName + DimMin<Self, Output = Self> {}

impl<D> SmallDim for D where D: DimName + DimMin<Self, Output = Self> {}
