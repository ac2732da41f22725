//! Core mesh data structures.
//!
//! This module provides the half-edge mesh representation used by the
//! subdivision steps, the indexed exchange format, and the conversions
//! between the two.
//!
//! # Overview
//!
//! The working type is [`HalfEdgeMesh`], a polygon mesh stored as three
//! append-only arenas (vertices, half-edges, faces) that reference each
//! other by typed index. [`build`] wires the structure up from an
//! [`IndexedMesh`]; [`restore`] flattens it back. [`VertexRing`] walks the
//! half-edges incident to a vertex — the shared query both subdivision
//! rules are written against — and
//! [`check_consistency`](HalfEdgeMesh::check_consistency) re-verifies the
//! graph invariants after every construction.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`HalfEdgeId`] - Identifies a half-edge
//! - [`FaceId`] - Identifies a face
//!
//! These indices are generic over the underlying integer type (the
//! [`MeshIndex`] trait), allowing you to choose `u16`, `u32`, or `u64`
//! based on mesh size. The sentinel value of each type encodes a null
//! reference, e.g. the missing `pair` of a boundary half-edge.
//!
//! # Construction
//!
//! ```
//! use tessella::mesh::{build, restore, HalfEdgeMesh, IndexedMesh};
//! use nalgebra::Point3;
//!
//! let indexed = IndexedMesh::from_parts(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(1.0, 1.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!     ],
//!     vec![vec![0, 1, 2, 3]],
//! );
//!
//! let mesh: HalfEdgeMesh = build(&indexed).unwrap();
//! assert_eq!(mesh.num_faces(), 1);
//! assert_eq!(restore(&mesh), indexed);
//! ```

mod builder;
mod check;
mod halfedge;
mod index;
mod indexed;
mod ring;

pub use builder::{build, restore};
pub use halfedge::{Face, FaceHalfEdgeIter, HalfEdge, HalfEdgeMesh, Vertex};
pub use index::{FaceId, HalfEdgeId, MeshIndex, VertexId};
pub use indexed::IndexedMesh;
pub use ring::{VertexClass, VertexRing};
