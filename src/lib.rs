//! # Tessella
//!
//! A half-edge polygon mesh subdivision library.
//!
//! Tessella converts an indexed face/vertex mesh into a half-edge
//! structure, applies one or more rounds of a subdivision rule —
//! Catmull-Clark for faces of arbitrary degree, Loop for triangles — that
//! simultaneously refines topology and smooths geometry, and converts the
//! result back into an indexed mesh.
//!
//! ## Features
//!
//! - **Half-edge data structure**: O(1) adjacency queries with type-safe
//!   indices over append-only arenas; faces of arbitrary degree ≥ 3
//! - **Catmull-Clark subdivision**: every old face of degree k becomes k
//!   quads per iteration
//! - **Loop subdivision**: every triangle becomes 4 triangles per
//!   iteration, with the classic regular/extraordinary vertex weights
//! - **Boundary aware**: open meshes keep their boundary, with dedicated
//!   boundary rules for edge points and repositioned vertices
//! - **Verified topology**: every build and every subdivision step
//!   re-checks the half-edge invariants and reports the first violation
//!
//! ## Quick Start
//!
//! ```
//! use tessella::algo::subdivide::{subdivide, SubdivideOptions, SubdivisionRule};
//! use tessella::mesh::IndexedMesh;
//! use nalgebra::Point3;
//!
//! // A unit quad.
//! let mesh = IndexedMesh::from_parts(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(1.0, 1.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!     ],
//!     vec![vec![0, 1, 2, 3]],
//! );
//!
//! // One Catmull-Clark round: 9 vertices, 4 quads, fresh vertex normals.
//! let options = SubdivideOptions::new(SubdivisionRule::CatmullClark, 1);
//! let out = subdivide(&mesh, &options).unwrap();
//!
//! assert_eq!(out.num_vertices(), 9);
//! assert_eq!(out.num_faces(), 4);
//! assert_eq!(out.normals.len(), 9);
//! ```
//!
//! ## Working on the Half-Edge Structure
//!
//! The indexed representation is the exchange format; algorithms run on
//! [`mesh::HalfEdgeMesh`], built with [`mesh::build`] and flattened back
//! with [`mesh::restore`]:
//!
//! ```
//! use tessella::mesh::{build, HalfEdgeMesh, IndexedMesh, VertexRing};
//! use nalgebra::Point3;
//!
//! let mesh = IndexedMesh::from_parts(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(0.5, 1.0, 0.0),
//!         Point3::new(0.5, 0.5, 1.0),
//!     ],
//!     vec![vec![0, 2, 1], vec![0, 1, 3], vec![1, 2, 3], vec![2, 0, 3]],
//! );
//! let he_mesh: HalfEdgeMesh = build(&mesh).unwrap();
//!
//! // Every tetrahedron vertex has a closed one-ring of valence 3.
//! for v in he_mesh.vertex_ids() {
//!     let ring = VertexRing::around(&he_mesh, v);
//!     assert_eq!(ring.valence(), 3);
//! }
//! ```
//!
//! Each subdivision step consumes one mesh and returns a brand-new one;
//! nothing is mutated in place and no references cross mesh generations,
//! so iterating is a simple fold over owned values.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use tessella::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::subdivide::{
        catmull_clark_step, loop_step, subdivide, SubdivideOptions, SubdivisionRule,
    };
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build, restore, Face, FaceId, HalfEdge, HalfEdgeId, HalfEdgeMesh, IndexedMesh, MeshIndex,
        Vertex, VertexClass, VertexId, VertexRing,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;
