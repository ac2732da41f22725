//! Mesh construction utilities.
//!
//! This module converts between the indexed face/vertex representation
//! ([`IndexedMesh`]) and the half-edge representation ([`HalfEdgeMesh`]):
//! [`build`] wires up the half-edge graph from vertex positions and face
//! loops of arbitrary degree, and [`restore`] flattens a half-edge mesh
//! back to indexed form. The two are exact inverses: vertex order and face
//! order are preserved, and each restored face loop starts at the same
//! corner it was built from.

use std::collections::HashMap;

use super::halfedge::HalfEdgeMesh;
use super::index::{HalfEdgeId, MeshIndex, VertexId};
use super::indexed::IndexedMesh;
use crate::error::{MeshError, Result};

/// Build a half-edge mesh from an indexed mesh.
///
/// For each input face (an ordered list of ≥ 3 vertex indices, counter-
/// clockwise), one half-edge is created per corner and linked `next`/`prev`
/// into a cycle. After all faces are processed, half-edges are paired by a
/// symmetric key over their two endpoints: a key matched by exactly two
/// half-edges becomes a paired interior edge, a key matched by exactly one
/// an unpaired boundary edge.
///
/// # Errors
///
/// - [`MeshError::EmptyMesh`] if the input has no vertices or no faces
/// - [`MeshError::FaceTooSmall`] for a face with fewer than 3 corners
/// - [`MeshError::InvalidVertexIndex`] for an out-of-range corner
/// - [`MeshError::DegenerateFace`] for a face repeating a vertex
/// - [`MeshError::NonManifoldEdge`] when an edge is claimed by more than
///   two half-edges, or by two half-edges running the same direction
///
/// # Example
/// ```
/// use tessella::mesh::{build, HalfEdgeMesh, IndexedMesh};
/// use nalgebra::Point3;
///
/// let mesh = IndexedMesh::from_parts(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.5, 1.0, 0.0),
///     ],
///     vec![vec![0, 1, 2]],
/// );
///
/// let he_mesh: HalfEdgeMesh = build(&mesh).unwrap();
/// assert_eq!(he_mesh.num_vertices(), 3);
/// assert_eq!(he_mesh.num_faces(), 1);
/// ```
pub fn build<I: MeshIndex>(mesh: &IndexedMesh) -> Result<HalfEdgeMesh<I>> {
    if !mesh.is_ready() {
        return Err(MeshError::EmptyMesh);
    }

    // Validate faces before touching the arenas.
    for (fi, face) in mesh.faces.iter().enumerate() {
        if face.len() < 3 {
            return Err(MeshError::FaceTooSmall {
                face: fi,
                degree: face.len(),
            });
        }
        for &vi in face {
            if vi >= mesh.positions.len() {
                return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
            }
        }
        for i in 0..face.len() {
            for j in (i + 1)..face.len() {
                if face[i] == face[j] {
                    return Err(MeshError::DegenerateFace { face: fi });
                }
            }
        }
    }

    let total_halfedges: usize = mesh.faces.iter().map(|f| f.len()).sum();
    let mut out = HalfEdgeMesh::with_capacity(
        mesh.positions.len(),
        total_halfedges,
        mesh.faces.len(),
    );

    for &pos in &mesh.positions {
        out.add_vertex(pos);
    }

    // One pass per face: create its half-edges, close the next/prev cycle,
    // assign origins and the owning face, and set each vertex's
    // representative the first time a half-edge leaves it.
    for face in &mesh.faces {
        let k = face.len();
        let hes: Vec<HalfEdgeId<I>> = (0..k).map(|_| out.add_halfedge()).collect();
        let face_id = out.add_face();
        out.face_mut(face_id).halfedge = hes[0];

        for i in 0..k {
            let origin = VertexId::new(face[i]);
            {
                let he = out.halfedge_mut(hes[i]);
                he.origin = origin;
                he.face = face_id;
                he.next = hes[(i + 1) % k];
                he.prev = hes[(i + k - 1) % k];
            }
            if !out.vertex(origin).halfedge.is_valid() {
                out.vertex_mut(origin).halfedge = hes[i];
            }
        }
    }

    pair_halfedges(&mut out)?;

    Ok(out)
}

/// Pair half-edges over the same undirected edge.
///
/// The key is symmetric in the two endpoint indices, so the two half-edges
/// of an interior edge land in the same bucket regardless of direction. A
/// bucket of one is a boundary edge and keeps its invalid pair.
fn pair_halfedges<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>) -> Result<()> {
    let mut edge_map: HashMap<(usize, usize), Vec<HalfEdgeId<I>>> = HashMap::new();

    for he in mesh.halfedge_ids().collect::<Vec<_>>() {
        let v0 = mesh.origin(he).index();
        let v1 = mesh.dest(he).index();
        let key = if v0 < v1 { (v0, v1) } else { (v1, v0) };
        edge_map.entry(key).or_default().push(he);
    }

    for (&(v0, v1), claims) in &edge_map {
        match claims[..] {
            [_] => {} // boundary edge, pair stays invalid
            [a, b] => {
                // The two must run opposite directions over the edge.
                if mesh.origin(a) != mesh.dest(b) || mesh.dest(a) != mesh.origin(b) {
                    return Err(MeshError::NonManifoldEdge { v0, v1 });
                }
                mesh.halfedge_mut(a).pair = b;
                mesh.halfedge_mut(b).pair = a;
            }
            _ => return Err(MeshError::NonManifoldEdge { v0, v1 }),
        }
    }

    Ok(())
}

/// Flatten a half-edge mesh back to an indexed mesh.
///
/// Vertex positions are emitted in arena order; each face emits the ordered
/// vertex-index loop obtained by walking `next` from its representative
/// half-edge. Normals are left empty; the caller recomputes them.
pub fn restore<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> IndexedMesh {
    let positions = mesh.vertex_ids().map(|v| *mesh.position(v)).collect();

    let faces = mesh
        .face_ids()
        .map(|f| mesh.face_vertices(f).map(|v| v.index()).collect())
        .collect();

    IndexedMesh::from_parts(positions, faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn two_triangles() -> IndexedMesh {
        IndexedMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.5, 1.0, 0.0),
                Point3::new(0.5, -1.0, 0.0),
            ],
            vec![vec![0, 1, 2], vec![1, 0, 3]],
        )
    }

    fn pentagon() -> IndexedMesh {
        IndexedMesh::from_parts(
            vec![
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.31, 0.95, 0.0),
                Point3::new(-0.81, 0.59, 0.0),
                Point3::new(-0.81, -0.59, 0.0),
                Point3::new(0.31, -0.95, 0.0),
            ],
            vec![vec![0, 1, 2, 3, 4]],
        )
    }

    #[test]
    fn test_single_triangle() {
        let mesh: HalfEdgeMesh<u32> = build(&IndexedMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.5, 1.0, 0.0),
            ],
            vec![vec![0, 1, 2]],
        ))
        .unwrap();

        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(mesh.num_faces(), 1);
        // One half-edge per corner; no ghost boundary half-edges.
        assert_eq!(mesh.num_halfedges(), 3);
        assert!(mesh.check_consistency().is_ok());
    }

    #[test]
    fn test_two_triangles_share_one_edge() {
        let mesh: HalfEdgeMesh<u32> = build(&two_triangles()).unwrap();

        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 2);
        assert_eq!(mesh.num_halfedges(), 6);
        assert_eq!(mesh.num_edges(), 5);
        assert!(mesh.check_consistency().is_ok());

        let paired = mesh
            .halfedge_ids()
            .filter(|&he| !mesh.is_boundary_halfedge(he))
            .count();
        assert_eq!(paired, 2);
    }

    #[test]
    fn test_build_pentagon() {
        let mesh: HalfEdgeMesh<u32> = build(&pentagon()).unwrap();

        assert_eq!(mesh.num_faces(), 1);
        assert_eq!(mesh.face_degree(crate::mesh::FaceId::new(0)), 5);
        assert!(mesh.check_consistency().is_ok());
    }

    #[test]
    fn test_roundtrip_exact() {
        let input = two_triangles();
        let mesh: HalfEdgeMesh<u32> = build(&input).unwrap();
        let output = restore(&mesh);

        assert_eq!(input.positions, output.positions);
        assert_eq!(input.faces, output.faces);
    }

    #[test]
    fn test_roundtrip_polygon() {
        let input = pentagon();
        let mesh: HalfEdgeMesh<u32> = build(&input).unwrap();
        let output = restore(&mesh);

        assert_eq!(input.positions, output.positions);
        assert_eq!(input.faces, output.faces);
    }

    #[test]
    fn test_empty_input() {
        let empty = IndexedMesh::new();
        assert_eq!(
            build::<u32>(&empty).unwrap_err(),
            MeshError::EmptyMesh
        );

        let no_faces = IndexedMesh::from_parts(vec![Point3::origin()], vec![]);
        assert_eq!(
            build::<u32>(&no_faces).unwrap_err(),
            MeshError::EmptyMesh
        );
    }

    #[test]
    fn test_invalid_vertex_index() {
        let bad = IndexedMesh::from_parts(
            vec![Point3::origin()],
            vec![vec![0, 1, 2]],
        );
        assert_eq!(
            build::<u32>(&bad).unwrap_err(),
            MeshError::InvalidVertexIndex { face: 0, vertex: 1 }
        );
    }

    #[test]
    fn test_degenerate_face() {
        let bad = IndexedMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.5, 1.0, 0.0),
            ],
            vec![vec![0, 0, 2]],
        );
        assert_eq!(
            build::<u32>(&bad).unwrap_err(),
            MeshError::DegenerateFace { face: 0 }
        );
    }

    #[test]
    fn test_face_too_small() {
        let bad = IndexedMesh::from_parts(
            vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
            vec![vec![0, 1]],
        );
        assert_eq!(
            build::<u32>(&bad).unwrap_err(),
            MeshError::FaceTooSmall { face: 0, degree: 2 }
        );
    }

    #[test]
    fn test_nonmanifold_overcrowded_edge() {
        // Three faces all claiming edge (0, 1).
        let bad = IndexedMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.5, 1.0, 0.0),
                Point3::new(0.5, -1.0, 0.0),
                Point3::new(0.5, 0.0, 1.0),
            ],
            vec![vec![0, 1, 2], vec![1, 0, 3], vec![0, 1, 4]],
        );
        assert_eq!(
            build::<u32>(&bad).unwrap_err(),
            MeshError::NonManifoldEdge { v0: 0, v1: 1 }
        );
    }

    #[test]
    fn test_nonmanifold_same_direction() {
        // Both faces traverse edge (0, 1) in the same direction
        // (inconsistent winding).
        let bad = IndexedMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.5, 1.0, 0.0),
                Point3::new(0.5, -1.0, 0.0),
            ],
            vec![vec![0, 1, 2], vec![0, 1, 3]],
        );
        assert_eq!(
            build::<u32>(&bad).unwrap_err(),
            MeshError::NonManifoldEdge { v0: 0, v1: 1 }
        );
    }

    #[test]
    fn test_representative_starts_at_vertex() {
        let mesh: HalfEdgeMesh<u32> = build(&two_triangles()).unwrap();
        for (vid, v) in mesh.vertices() {
            assert!(v.halfedge.is_valid());
            assert_eq!(mesh.origin(v.halfedge), vid);
        }
    }
}
