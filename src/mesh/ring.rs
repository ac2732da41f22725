//! One-ring traversal around a vertex.
//!
//! The one-ring is the shared primitive of both subdivision steps: it
//! gathers the half-edges incident to a vertex, counts its valence, and
//! decides whether the vertex sits on the mesh boundary.
//!
//! # Traversal
//!
//! Starting from the vertex's representative outgoing half-edge `h0`, the
//! forward pass repeatedly moves `h = h.pair.next`, collecting one outgoing
//! half-edge per incident edge, until it either returns to `h0` (interior
//! vertex, ring closed) or lands on a half-edge without a pair (boundary
//! reached, ring open). For an open ring a second pass walks the other way
//! from `h0.prev` via `h = h.pair.prev`, collecting the remaining
//! boundary-side edges as *incoming* half-edges. Every ring entry stands
//! for exactly one incident edge, so the total entry count is the vertex
//! valence.

use super::halfedge::HalfEdgeMesh;
use super::index::{HalfEdgeId, MeshIndex, VertexId};

/// Classification of a vertex by its one-ring, computed once and then
/// dispatched to the matching repositioning formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexClass<I: MeshIndex = u32> {
    /// The ring closed on itself; all incident edges are interior.
    Interior,
    /// The ring is open. `prev` and `next` are the far endpoints of the two
    /// boundary edges incident to the vertex — the ring's open ends,
    /// independent of which half-edge happens to be the representative.
    Boundary {
        /// Endpoint of the boundary edge found by the backward pass.
        prev: VertexId<I>,
        /// Endpoint of the boundary edge found by the forward pass.
        next: VertexId<I>,
    },
}

/// The collected one-ring of a vertex.
#[derive(Debug, Clone)]
pub struct VertexRing<I: MeshIndex = u32> {
    vertex: VertexId<I>,
    /// One half-edge per incident edge. Entries from the forward pass are
    /// outgoing from the vertex, entries from the backward pass incoming.
    halfedges: Vec<HalfEdgeId<I>>,
    /// Number of entries contributed by the forward pass.
    forward_len: usize,
    boundary: bool,
}

impl<I: MeshIndex> VertexRing<I> {
    /// Collect the one-ring of `v`.
    ///
    /// An isolated vertex (no representative half-edge) yields an empty,
    /// open ring.
    pub fn around(mesh: &HalfEdgeMesh<I>, v: VertexId<I>) -> Self {
        let start = mesh.vertex(v).halfedge;
        if !start.is_valid() {
            return Self {
                vertex: v,
                halfedges: Vec::new(),
                forward_len: 0,
                boundary: true,
            };
        }

        let mut halfedges = Vec::new();
        let mut boundary = false;

        let mut he = start;
        loop {
            halfedges.push(he);
            if mesh.is_boundary_halfedge(he) {
                boundary = true;
                break;
            }
            he = mesh.next(mesh.pair(he));
            if he == start {
                break;
            }
        }
        let forward_len = halfedges.len();

        if boundary {
            let mut he = mesh.prev(start);
            loop {
                halfedges.push(he);
                if mesh.is_boundary_halfedge(he) {
                    break;
                }
                he = mesh.prev(mesh.pair(he));
            }
        }

        Self {
            vertex: v,
            halfedges,
            forward_len,
            boundary,
        }
    }

    /// The vertex this ring surrounds.
    #[inline]
    pub fn vertex(&self) -> VertexId<I> {
        self.vertex
    }

    /// The valence: number of edges incident to the vertex.
    #[inline]
    pub fn valence(&self) -> usize {
        self.halfedges.len()
    }

    /// Whether the ring is open (the vertex lies on the mesh boundary).
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.boundary
    }

    /// The collected half-edges, one per incident edge.
    #[inline]
    pub fn halfedges(&self) -> &[HalfEdgeId<I>] {
        &self.halfedges
    }

    /// The far endpoint of ring entry `i`.
    pub fn neighbor(&self, mesh: &HalfEdgeMesh<I>, i: usize) -> VertexId<I> {
        let he = self.halfedges[i];
        if mesh.origin(he) == self.vertex {
            mesh.dest(he)
        } else {
            mesh.origin(he)
        }
    }

    /// Iterate over the far endpoints of all incident edges.
    pub fn neighbors<'a>(
        &'a self,
        mesh: &'a HalfEdgeMesh<I>,
    ) -> impl Iterator<Item = VertexId<I>> + 'a {
        (0..self.halfedges.len()).map(move |i| self.neighbor(mesh, i))
    }

    /// Classify the vertex as interior or boundary.
    ///
    /// For a boundary vertex the two neighbors are the endpoints of the two
    /// boundary edges incident to it: the last entry of the forward pass
    /// (outgoing, toward `next`) and the last entry of the backward pass
    /// (incoming, from `prev`).
    ///
    /// # Panics
    /// Panics on the empty ring of an isolated vertex, which has no
    /// boundary edges to classify by; check [`valence`](Self::valence)
    /// first.
    pub fn classify(&self, mesh: &HalfEdgeMesh<I>) -> VertexClass<I> {
        if !self.boundary {
            return VertexClass::Interior;
        }
        let fwd = self.halfedges[self.forward_len - 1];
        let bwd = self.halfedges[self.halfedges.len() - 1];
        VertexClass::Boundary {
            prev: mesh.origin(bwd),
            next: mesh.dest(fwd),
        }
    }
}
