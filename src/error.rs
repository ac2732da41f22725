//! Error types for tessella.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh construction and subdivision.
///
/// The first group of variants describes defective *input* (recoverable by
/// the caller supplying a valid mesh). The second group is produced by
/// [`check_consistency`](crate::mesh::HalfEdgeMesh::check_consistency) and
/// indicates a broken half-edge graph; after a subdivision step these are
/// internal errors and are reported rather than repaired.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// The mesh has no vertices or no faces.
    #[error("mesh not ready: no vertices or no faces")]
    EmptyMesh,

    /// A face references a vertex index outside the position list.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face lists the same vertex more than once.
    #[error("face {face} is degenerate (repeats a vertex)")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// A face has fewer than three corners.
    #[error("face {face} has degree {degree}, need at least 3")]
    FaceTooSmall {
        /// The face index.
        face: usize,
        /// The number of corners found.
        degree: usize,
    },

    /// An undirected edge is claimed by more than two half-edges, or by two
    /// half-edges running the same direction (inconsistent winding).
    #[error("edge ({v0}, {v1}) is non-manifold")]
    NonManifoldEdge {
        /// First endpoint of the edge.
        v0: usize,
        /// Second endpoint of the edge.
        v1: usize,
    },

    /// A non-triangular face reached the Loop subdivision step.
    #[error("Loop subdivision requires triangles, face {face} has degree {degree}")]
    NonTriangularFace {
        /// The face index.
        face: usize,
        /// The degree of the offending face.
        degree: usize,
    },

    /// A half-edge's `origin`, `next`, or `prev` reference is missing,
    /// out of range, or does not invert (`next.prev != self`).
    #[error("half-edge {halfedge} has a broken link")]
    BrokenLink {
        /// The half-edge index.
        halfedge: usize,
    },

    /// A half-edge's `pair` does not point back, or spans different vertices.
    #[error("half-edge {halfedge} has a broken pair link")]
    BrokenPair {
        /// The half-edge index.
        halfedge: usize,
    },

    /// Walking `next` from a face's representative does not return to it in
    /// a valid cycle, or visits a half-edge owned by another face.
    #[error("face {face} has an invalid boundary loop")]
    InvalidFaceLoop {
        /// The face index.
        face: usize,
    },

    /// A vertex's representative half-edge does not start at that vertex.
    #[error("vertex {vertex} has an invalid representative half-edge")]
    InvalidVertexHalfEdge {
        /// The vertex index.
        vertex: usize,
    },

    /// A half-edge belongs to no face loop.
    #[error("half-edge {halfedge} is not part of any face loop")]
    OrphanHalfEdge {
        /// The half-edge index.
        halfedge: usize,
    },
}
