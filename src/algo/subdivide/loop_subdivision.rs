//! Loop subdivision for triangle meshes.

use nalgebra::{Point3, Vector3};

use crate::error::{MeshError, Result};
use crate::mesh::{HalfEdgeId, HalfEdgeMesh, MeshIndex, VertexClass, VertexId, VertexRing};

/// Perform one Loop subdivision iteration.
///
/// The input must consist of triangles only (callers triangulate
/// beforehand); every old triangle becomes 4 triangles in the returned
/// mesh. The input mesh is only read; the result is a freshly allocated
/// mesh.
///
/// # Vertex Rules
///
/// - **Edge point, boundary**: midpoint of the endpoints
/// - **Edge point, interior**: `⅜(start + end) + ⅛(apex0 + apex1)`, the
///   apexes being the vertices opposite the edge in its two triangles
/// - **Even vertex, interior, valence 6**: `10/16 · old + 1/16 · Σneighbors`
/// - **Even vertex, interior, extraordinary**: `β = 3/16` for valence 3,
///   else `3/(8·valence)`; `(1 − valence·β) · old + β · Σneighbors`
/// - **Even vertex, boundary**: `¾ · old + ⅛ · (neighbor1 + neighbor2)`,
///   the far endpoints of the two incident boundary edges (original
///   positions)
///
/// # Errors
///
/// Returns [`MeshError::NonTriangularFace`] if any input face is not a
/// triangle, or a topology error from the final
/// [`check_consistency`](HalfEdgeMesh::check_consistency) self-test.
pub fn loop_step<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> Result<HalfEdgeMesh<I>> {
    // Fail fast instead of misreading adjacency through the fixed
    // triangle pattern below.
    for f in mesh.face_ids() {
        let degree = mesh.face_degree(f);
        if degree != 3 {
            return Err(MeshError::NonTriangularFace {
                face: f.index(),
                degree,
            });
        }
    }

    let n_old_halfedges = mesh.num_halfedges();
    let n_old_faces = mesh.num_faces();

    let mut out = HalfEdgeMesh::with_capacity(
        mesh.num_vertices() + mesh.num_edges(),
        2 * n_old_halfedges + 6 * n_old_faces,
        4 * n_old_faces,
    );

    // Step 1: even vertices, one per old vertex, repositioned in step 3.
    for v in mesh.vertex_ids() {
        out.add_vertex(*mesh.position(v));
    }

    // Step 2: one edge point per undirected edge, shared across the pair,
    // and a (former, latter) split of every old half-edge.
    let mut edge_points: Vec<VertexId<I>> = vec![VertexId::invalid(); n_old_halfedges];
    let mut splits: Vec<(HalfEdgeId<I>, HalfEdgeId<I>)> =
        vec![(HalfEdgeId::invalid(), HalfEdgeId::invalid()); n_old_halfedges];

    for he in mesh.halfedge_ids() {
        let pair = mesh.pair(he);
        let p0 = mesh.position(mesh.origin(he)).coords;
        let p1 = mesh.position(mesh.dest(he)).coords;

        let edge_point = if !pair.is_valid() {
            // Boundary edge: plain midpoint.
            out.add_vertex(Point3::from((p0 + p1) * 0.5))
        } else if edge_points[pair.index()].is_valid() {
            edge_points[pair.index()]
        } else {
            // Interior edge: weighted by the two triangle apexes.
            let apex0 = mesh.position(mesh.origin(mesh.prev(he))).coords;
            let apex1 = mesh.position(mesh.origin(mesh.prev(pair))).coords;
            out.add_vertex(Point3::from(
                (p0 + p1) * (3.0 / 8.0) + (apex0 + apex1) * (1.0 / 8.0),
            ))
        };
        edge_points[he.index()] = edge_point;

        let former = out.add_halfedge();
        let latter = out.add_halfedge();

        let even_start = VertexId::new(mesh.origin(he).index());
        out.halfedge_mut(former).origin = even_start;
        if !out.vertex(even_start).halfedge.is_valid() {
            out.vertex_mut(even_start).halfedge = former;
        }
        out.halfedge_mut(latter).origin = edge_point;
        if !out.vertex(edge_point).halfedge.is_valid() {
            out.vertex_mut(edge_point).halfedge = latter;
        }
        splits[he.index()] = (former, latter);

        if pair.is_valid() && splits[pair.index()].0.is_valid() {
            let (pair_former, pair_latter) = splits[pair.index()];
            out.set_pair(pair_former, latter);
            out.set_pair(pair_latter, former);
        }
    }

    // Step 3: reposition even vertices from the one-ring of the old mesh.
    for v in mesh.vertex_ids() {
        let old_pos = mesh.position(v).coords;
        let ring = VertexRing::around(mesh, v);
        if ring.valence() == 0 {
            continue; // isolated vertex keeps its position
        }

        let new_pos = match ring.classify(mesh) {
            VertexClass::Boundary { prev, next } => {
                old_pos * 0.75
                    + (mesh.position(prev).coords + mesh.position(next).coords) * 0.125
            }
            VertexClass::Interior => {
                let valence = ring.valence();
                let neighbor_sum: Vector3<f64> = ring
                    .neighbors(mesh)
                    .map(|n| mesh.position(n).coords)
                    .sum();
                if valence == 6 {
                    // Regular vertex.
                    old_pos * (10.0 / 16.0) + neighbor_sum * (1.0 / 16.0)
                } else {
                    let beta = if valence == 3 {
                        3.0 / 16.0
                    } else {
                        3.0 / (8.0 * valence as f64)
                    };
                    old_pos * (1.0 - valence as f64 * beta) + neighbor_sum * beta
                }
            }
        };
        out.set_position(VertexId::new(v.index()), Point3::from(new_pos));
    }

    // Step 4: rebuild topology. Each old triangle becomes exactly 4
    // triangles — three corner triangles reusing the split halves, plus a
    // center triangle over the three edge points — wired as a fixed
    // 12-half-edge pattern, so no general k-gon loop is needed.
    for f in mesh.face_ids() {
        let h0 = mesh.face(f).halfedge;
        let old = [h0, mesh.next(h0), mesh.prev(h0)];
        let mids = [
            edge_points[old[0].index()],
            edge_points[old[1].index()],
            edge_points[old[2].index()],
        ];

        // he[0..6]: the split halves of the three old half-edges;
        // he[6..9]: outer sides of the center edges, in the corner
        // triangles; he[9..12]: the center triangle itself.
        let mut he = [HalfEdgeId::<I>::invalid(); 12];
        for i in 0..3 {
            let (former, latter) = splits[old[i].index()];
            he[2 * i] = former;
            he[2 * i + 1] = latter;
        }
        for slot in he.iter_mut().skip(6) {
            *slot = out.add_halfedge();
        }

        let corner0 = out.add_face();
        let center = out.add_face();
        let corner1 = out.add_face();
        let corner2 = out.add_face();

        // Corner triangle at origin(old[0]): former0 -> he6 -> latter2.
        for h in [he[0], he[6], he[5]] {
            out.halfedge_mut(h).face = corner0;
        }
        // Center triangle: he9 -> he10 -> he11.
        for h in [he[9], he[10], he[11]] {
            out.halfedge_mut(h).face = center;
        }
        // Corner triangle at origin(old[1]): latter0 -> former1 -> he7.
        for h in [he[1], he[2], he[7]] {
            out.halfedge_mut(h).face = corner1;
        }
        // Corner triangle at origin(old[2]): latter1 -> former2 -> he8.
        for h in [he[3], he[4], he[8]] {
            out.halfedge_mut(h).face = corner2;
        }

        out.link(he[0], he[6]);
        out.link(he[6], he[5]);
        out.link(he[5], he[0]);

        out.link(he[1], he[2]);
        out.link(he[2], he[7]);
        out.link(he[7], he[1]);

        out.link(he[3], he[4]);
        out.link(he[4], he[8]);
        out.link(he[8], he[3]);

        out.link(he[9], he[10]);
        out.link(he[10], he[11]);
        out.link(he[11], he[9]);

        out.halfedge_mut(he[6]).origin = mids[0];
        out.halfedge_mut(he[7]).origin = mids[1];
        out.halfedge_mut(he[8]).origin = mids[2];
        out.halfedge_mut(he[9]).origin = mids[2];
        out.halfedge_mut(he[10]).origin = mids[0];
        out.halfedge_mut(he[11]).origin = mids[1];

        // The center triangle runs opposite the three outer sides.
        out.set_pair(he[6], he[9]);
        out.set_pair(he[7], he[10]);
        out.set_pair(he[8], he[11]);

        out.face_mut(corner0).halfedge = he[0];
        out.face_mut(center).halfedge = he[9];
        out.face_mut(corner1).halfedge = he[1];
        out.face_mut(corner2).halfedge = he[3];
    }

    out.check_consistency()?;
    Ok(out)
}
