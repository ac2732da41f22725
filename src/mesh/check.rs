//! Consistency verification for the half-edge structure.
//!
//! [`HalfEdgeMesh::check_consistency`] re-verifies the structural
//! invariants of the half-edge graph and reports the first violation
//! found. It runs as a self-test after every build and after every
//! subdivision step; a violation there means malformed input slipped past
//! validation or the step itself is defective, so the error is reported,
//! never repaired.

use super::halfedge::HalfEdgeMesh;
use super::index::MeshIndex;
use crate::error::{MeshError, Result};

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Verify the half-edge invariants, reporting the first violation.
    ///
    /// Checked, in order:
    /// - every half-edge has in-range `origin`, `next` and `prev`, with
    ///   `next.prev == self` and `prev.next == self`
    /// - every valid `pair` is mutual, distinct from its half-edge, and
    ///   runs the same undirected edge in the opposite direction
    /// - walking `next` from each face's representative returns to it in
    ///   `degree ≥ 3` steps, with every half-edge on the walk owned by that
    ///   face and visited by exactly one face loop
    /// - no half-edge is left out of all face loops
    /// - every valid vertex representative starts at its vertex
    pub fn check_consistency(&self) -> Result<()> {
        let nv = self.num_vertices();
        let nh = self.num_halfedges();

        for (hid, he) in self.halfedges() {
            let broken = MeshError::BrokenLink {
                halfedge: hid.index(),
            };
            if !he.origin.is_valid() || he.origin.index() >= nv {
                return Err(broken);
            }
            if !he.next.is_valid() || he.next.index() >= nh {
                return Err(broken);
            }
            if !he.prev.is_valid() || he.prev.index() >= nh {
                return Err(broken);
            }
            if self.prev(he.next) != hid || self.next(he.prev) != hid {
                return Err(broken);
            }
        }

        for (hid, he) in self.halfedges() {
            if !he.pair.is_valid() {
                continue; // boundary edge
            }
            let broken = MeshError::BrokenPair {
                halfedge: hid.index(),
            };
            if he.pair.index() >= nh || he.pair == hid {
                return Err(broken);
            }
            if self.pair(he.pair) != hid {
                return Err(broken);
            }
            // The pair runs the opposite direction over the same two
            // vertices: pair.origin == self.next.origin and vice versa.
            if self.origin(he.pair) != self.dest(hid) || self.dest(he.pair) != he.origin {
                return Err(broken);
            }
        }

        let mut visited = vec![false; nh];
        for (fid, face) in self.faces() {
            let invalid = MeshError::InvalidFaceLoop { face: fid.index() };
            if !face.halfedge.is_valid() || face.halfedge.index() >= nh {
                return Err(invalid);
            }

            let mut he = face.halfedge;
            let mut degree = 0;
            loop {
                if std::mem::replace(&mut visited[he.index()], true) {
                    // Already claimed by this or another loop.
                    return Err(invalid);
                }
                if self.face_of(he) != fid {
                    return Err(invalid);
                }
                degree += 1;
                if degree > nh {
                    return Err(invalid);
                }
                he = self.next(he);
                if he == face.halfedge {
                    break;
                }
            }
            if degree < 3 {
                return Err(MeshError::FaceTooSmall {
                    face: fid.index(),
                    degree,
                });
            }
        }

        if let Some(orphan) = visited.iter().position(|&seen| !seen) {
            return Err(MeshError::OrphanHalfEdge { halfedge: orphan });
        }

        for (vid, v) in self.vertices() {
            if !v.halfedge.is_valid() {
                continue; // isolated vertex
            }
            if v.halfedge.index() >= nh || self.origin(v.halfedge) != vid {
                return Err(MeshError::InvalidVertexHalfEdge {
                    vertex: vid.index(),
                });
            }
        }

        Ok(())
    }
}
